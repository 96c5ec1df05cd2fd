use std::{collections::HashMap, time::SystemTime};

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::ScoreEntity,
    dto::{
        identity::Caller,
        score::{RecordScoreRequest, ResultsResponse, ScoreSummary, StandingSummary},
    },
    error::ServiceError,
    services::{quiz_service::fetch_accessible_quiz, standings},
    state::{SharedState, progression::QuizPhase},
};

/// Record or overwrite a per-round score.
///
/// A prior score for the same `(team, round)` is replaced silently; no
/// audit trail is kept. Entry is allowed for any round up to the derived
/// entry round.
pub async fn record_score(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
    request: RecordScoreRequest,
) -> Result<ScoreSummary, ServiceError> {
    let store = state.require_quiz_store().await?;
    let quiz = fetch_accessible_quiz(&store, caller, quiz_id).await?;

    let points = u32::try_from(request.points)
        .map_err(|_| ServiceError::InvalidInput("points value is too large".into()))?;

    if request.round < 1 || request.round > quiz.rounds {
        return Err(ServiceError::InvalidInput(format!(
            "round {} is outside 1..={}",
            request.round, quiz.rounds
        )));
    }

    let teams = store.list_teams(quiz_id).await?;
    if !teams.iter().any(|team| team.id == request.team_id) {
        return Err(ServiceError::NotFound(format!(
            "team `{}` not found in quiz `{quiz_id}`",
            request.team_id
        )));
    }

    let scores = store.list_scores(quiz_id).await?;
    let phase = QuizPhase::derive(quiz.rounds, teams.len() as u32, &scores);
    if !phase.can_edit_round(request.round) {
        return Err(ServiceError::InvalidState(format!(
            "round {} is not open for score entry",
            request.round
        )));
    }

    let completed_before = standings::is_completed(quiz.rounds, &teams, &scores);

    let stored = store
        .upsert_score(ScoreEntity {
            id: Uuid::new_v4(),
            quiz_id,
            team_id: request.team_id,
            round: request.round,
            points,
            created_at: SystemTime::now(),
        })
        .await?;

    info!(
        quiz_id = %quiz_id,
        team_id = %stored.team_id,
        round = stored.round,
        points = stored.points,
        "score recorded"
    );

    if !completed_before {
        let mut updated: Vec<ScoreEntity> = scores
            .into_iter()
            .filter(|score| {
                !(score.team_id == stored.team_id && score.round == stored.round)
            })
            .collect();
        updated.push(stored.clone());

        if standings::is_completed(quiz.rounds, &teams, &updated) {
            state
                .notifier()
                .notify_quiz_completed(&quiz, &standings::totals(&teams, &updated));
        }
    }

    Ok(stored.into())
}

/// List all scores of a quiz.
pub async fn list_scores(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
) -> Result<Vec<ScoreSummary>, ServiceError> {
    let store = state.require_quiz_store().await?;
    fetch_accessible_quiz(&store, caller, quiz_id).await?;

    let scores = store.list_scores(quiz_id).await?;
    Ok(scores.into_iter().map(Into::into).collect())
}

/// Ranked standings of a quiz, recomputed from a fresh snapshot.
pub async fn standings_for_quiz(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
) -> Result<Vec<StandingSummary>, ServiceError> {
    let store = state.require_quiz_store().await?;
    fetch_accessible_quiz(&store, caller, quiz_id).await?;

    let teams = store.list_teams(quiz_id).await?;
    let scores = store.list_scores(quiz_id).await?;
    Ok(standings::totals(&teams, &scores)
        .into_iter()
        .map(Into::into)
        .collect())
}

/// Detailed zero-filled results matrix plus the completion flag.
pub async fn results_for_quiz(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
) -> Result<ResultsResponse, ServiceError> {
    let store = state.require_quiz_store().await?;
    let quiz = fetch_accessible_quiz(&store, caller, quiz_id).await?;

    let teams = store.list_teams(quiz_id).await?;
    let scores = store.list_scores(quiz_id).await?;

    Ok(ResultsResponse {
        teams: standings::detailed_matrix(quiz.rounds, &teams, &scores)
            .into_iter()
            .map(Into::into)
            .collect(),
        completed: standings::is_completed(quiz.rounds, &teams, &scores),
    })
}

/// Index a score snapshot by team for one round.
pub fn scores_for_round(scores: &[ScoreEntity], round: u32) -> HashMap<Uuid, &ScoreEntity> {
    scores
        .iter()
        .filter(|score| score.round == round)
        .map(|score| (score.team_id, score))
        .collect()
}

/// Whether a team already has a score for a round.
pub fn has_score(scores: &[ScoreEntity], team_id: Uuid, round: u32) -> bool {
    scores
        .iter()
        .any(|score| score.team_id == team_id && score.round == round)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(team_id: Uuid, round: u32) -> ScoreEntity {
        ScoreEntity {
            id: Uuid::new_v4(),
            quiz_id: Uuid::nil(),
            team_id,
            round,
            points: 1,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn round_index_only_contains_requested_round() {
        let alpha = Uuid::new_v4();
        let beta = Uuid::new_v4();
        let scores = vec![score(alpha, 1), score(beta, 1), score(alpha, 2)];

        let by_team = scores_for_round(&scores, 1);
        assert_eq!(by_team.len(), 2);
        assert!(by_team.contains_key(&alpha));
        assert!(by_team.contains_key(&beta));

        assert!(has_score(&scores, alpha, 2));
        assert!(!has_score(&scores, beta, 2));
    }
}
