use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::models::{ScoreEntity, TeamEntity},
    dto::{
        identity::Caller,
        round::{AdvanceResponse, PhaseName, RoundStatusResponse},
        team::TeamBriefSummary,
    },
    error::ServiceError,
    services::{quiz_service::fetch_accessible_quiz, score_service, standings},
    state::{SharedState, progression::QuizPhase},
};

/// Report the derived progression phase and per-team coverage of the round
/// being closed out.
pub async fn round_status(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
) -> Result<RoundStatusResponse, ServiceError> {
    let store = state.require_quiz_store().await?;
    let quiz = fetch_accessible_quiz(&store, caller, quiz_id).await?;
    let teams = store.list_teams(quiz_id).await?;
    let scores = store.list_scores(quiz_id).await?;

    let phase = QuizPhase::derive(quiz.rounds, teams.len() as u32, &scores);

    // The round whose coverage the operator cares about: the one being
    // closed out, or round 1 before any entry.
    let checked_round = match phase {
        QuizPhase::NotStarted => 1,
        QuizPhase::InRound { round, .. } => round,
        QuizPhase::RoundComplete { round } => round,
        QuizPhase::Finished => quiz.rounds,
    };

    let (scored, missing) = split_by_coverage(&teams, &scores, checked_round);
    let can_advance = !phase.is_finished() && missing.is_empty() && !teams.is_empty();

    Ok(RoundStatusResponse {
        phase: PhaseName::from(&phase),
        current_round: phase.entry_round(),
        scored,
        missing,
        can_advance,
    })
}

/// Explicit operator advance with the forced zero-fill path.
///
/// Any team missing a score for the round being closed receives an
/// irreversible zero before the transition. Advancing a finished quiz is an
/// idempotent no-op.
pub async fn advance_round(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
) -> Result<AdvanceResponse, ServiceError> {
    let store = state.require_quiz_store().await?;
    let quiz = fetch_accessible_quiz(&store, caller, quiz_id).await?;
    let teams = store.list_teams(quiz_id).await?;
    let scores = store.list_scores(quiz_id).await?;

    if teams.is_empty() {
        return Err(ServiceError::InvalidState(
            "cannot advance a quiz without teams".into(),
        ));
    }

    let phase = QuizPhase::derive(quiz.rounds, teams.len() as u32, &scores);

    let fill_round = match phase {
        QuizPhase::Finished => {
            return Ok(AdvanceResponse {
                phase: PhaseName::Finished,
                current_round: None,
                zero_filled: Vec::new(),
            });
        }
        // A complete round has nothing to fill; the confirmation itself is
        // the transition.
        QuizPhase::RoundComplete { .. } => None,
        QuizPhase::NotStarted => Some(1),
        QuizPhase::InRound { round, .. } => Some(round),
    };

    let completed_before = standings::is_completed(quiz.rounds, &teams, &scores);
    let mut updated = scores;
    let mut zero_filled = Vec::new();

    if let Some(round) = fill_round {
        for team in &teams {
            if score_service::has_score(&updated, team.id, round) {
                continue;
            }

            let stored = store
                .upsert_score(ScoreEntity {
                    id: Uuid::new_v4(),
                    quiz_id,
                    team_id: team.id,
                    round,
                    points: 0,
                    created_at: SystemTime::now(),
                })
                .await?;
            updated.push(stored);
            zero_filled.push(TeamBriefSummary::from(team));
        }

        info!(
            quiz_id = %quiz_id,
            round,
            zero_filled = zero_filled.len(),
            "round closed by forced advance"
        );
    }

    let next = QuizPhase::derive(quiz.rounds, teams.len() as u32, &updated);

    if !completed_before && standings::is_completed(quiz.rounds, &teams, &updated) {
        state
            .notifier()
            .notify_quiz_completed(&quiz, &standings::totals(&teams, &updated));
    }

    Ok(AdvanceResponse {
        phase: PhaseName::from(&next),
        current_round: next.entry_round(),
        zero_filled,
    })
}

fn split_by_coverage(
    teams: &[TeamEntity],
    scores: &[ScoreEntity],
    round: u32,
) -> (Vec<TeamBriefSummary>, Vec<TeamBriefSummary>) {
    let by_team = score_service::scores_for_round(scores, round);
    let mut scored = Vec::new();
    let mut missing = Vec::new();

    for team in teams {
        if by_team.contains_key(&team.id) {
            scored.push(TeamBriefSummary::from(team));
        } else {
            missing.push(TeamBriefSummary::from(team));
        }
    }

    (scored, missing)
}
