use std::{sync::Arc, time::SystemTime};

use tracing::info;
use uuid::Uuid;

use crate::{
    dao::{
        models::{QuizEntity, TeamEntity},
        quiz_store::QuizStore,
    },
    dto::{
        identity::Caller,
        quiz::{CreateQuizRequest, QuizSummary},
        team::{CreateTeamRequest, ImportFailure, ImportReport, TeamSummary},
    },
    error::ServiceError,
    services::import_service,
    state::SharedState,
};

/// Create a quiz owned by the caller (when one is identified).
pub async fn create_quiz(
    state: &SharedState,
    caller: Caller,
    request: CreateQuizRequest,
) -> Result<QuizSummary, ServiceError> {
    let store = state.require_quiz_store().await?;

    let quiz = QuizEntity {
        id: Uuid::new_v4(),
        name: request.name.trim().to_string(),
        date: request.date.trim().to_string(),
        location: request.location.trim().to_string(),
        rounds: request.rounds,
        created_at: SystemTime::now(),
        owner_id: caller.user_id,
    };

    store.save_quiz(quiz.clone()).await?;
    info!(quiz_id = %quiz.id, rounds = quiz.rounds, "quiz created");
    Ok(quiz.into())
}

/// Fetch a quiz by id.
pub async fn get_quiz(
    state: &SharedState,
    caller: Caller,
    id: Uuid,
) -> Result<QuizSummary, ServiceError> {
    let store = state.require_quiz_store().await?;
    let quiz = fetch_accessible_quiz(&store, caller, id).await?;
    Ok(quiz.into())
}

/// List quizzes visible to the caller: everything for admins and anonymous
/// single-tenant callers, owned quizzes otherwise.
pub async fn list_quizzes(
    state: &SharedState,
    caller: Caller,
) -> Result<Vec<QuizSummary>, ServiceError> {
    let store = state.require_quiz_store().await?;
    let quizzes = store.list_quizzes().await?;
    Ok(quizzes
        .into_iter()
        .filter(|quiz| caller.can_access(quiz.owner_id))
        .map(Into::into)
        .collect())
}

/// Delete a quiz, cascading to its teams and scores.
pub async fn delete_quiz(
    state: &SharedState,
    caller: Caller,
    id: Uuid,
) -> Result<(), ServiceError> {
    let store = state.require_quiz_store().await?;
    // Resolves not-found and ownership before touching anything.
    fetch_accessible_quiz(&store, caller, id).await?;

    store.delete_quiz(id).await?;
    info!(quiz_id = %id, "quiz deleted");
    Ok(())
}

/// Register a single team; the team number is always `current count + 1`.
pub async fn create_team(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
    request: CreateTeamRequest,
) -> Result<TeamSummary, ServiceError> {
    let store = state.require_quiz_store().await?;
    fetch_accessible_quiz(&store, caller, quiz_id).await?;

    let team = register_team(&store, quiz_id, request.name.trim()).await?;
    Ok(team.into())
}

/// List the teams of a quiz ordered by team number.
pub async fn list_teams(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
) -> Result<Vec<TeamSummary>, ServiceError> {
    let store = state.require_quiz_store().await?;
    fetch_accessible_quiz(&store, caller, quiz_id).await?;

    let teams = store.list_teams(quiz_id).await?;
    Ok(teams.into_iter().map(Into::into).collect())
}

/// Bulk-register teams from an uploaded spreadsheet export.
///
/// Numbers are assigned 1..N in upload order regardless of any numbering
/// column in the source. Items are processed sequentially; a failed item is
/// reported and does not abort the rest.
pub async fn import_teams(
    state: &SharedState,
    caller: Caller,
    quiz_id: Uuid,
    content: &str,
) -> Result<ImportReport, ServiceError> {
    let store = state.require_quiz_store().await?;
    fetch_accessible_quiz(&store, caller, quiz_id).await?;

    let names = import_service::parse_team_names(content);
    if names.is_empty() {
        return Err(ServiceError::InvalidInput(
            "no team names found in upload".into(),
        ));
    }

    let mut created = Vec::new();
    let mut failed = Vec::new();

    for name in names {
        match register_team(&store, quiz_id, &name).await {
            Ok(team) => created.push(TeamSummary::from(team)),
            Err(err) => failed.push(ImportFailure {
                name,
                message: err.to_string(),
            }),
        }
    }

    info!(
        quiz_id = %quiz_id,
        created = created.len(),
        failed = failed.len(),
        "bulk team import finished"
    );

    Ok(ImportReport {
        success_count: created.len(),
        failure_count: failed.len(),
        created,
        failed,
    })
}

/// Persist one team with the next free number.
///
/// The count-then-write is not atomic across concurrent callers; under the
/// single-operator model this is an accepted limitation.
async fn register_team(
    store: &Arc<dyn QuizStore>,
    quiz_id: Uuid,
    name: &str,
) -> Result<TeamEntity, ServiceError> {
    if name.is_empty() {
        return Err(ServiceError::InvalidInput(
            "team name must not be empty".into(),
        ));
    }

    let count = store.count_teams(quiz_id).await?;
    let team = TeamEntity {
        id: Uuid::new_v4(),
        quiz_id,
        name: name.to_string(),
        team_number: count as u32 + 1,
        created_at: SystemTime::now(),
    };

    store.save_team(team.clone()).await?;
    Ok(team)
}

/// Resolve a quiz and enforce owner scoping.
pub(crate) async fn fetch_accessible_quiz(
    store: &Arc<dyn QuizStore>,
    caller: Caller,
    id: Uuid,
) -> Result<QuizEntity, ServiceError> {
    let Some(quiz) = store.find_quiz(id).await? else {
        return Err(ServiceError::NotFound(format!("quiz `{id}` not found")));
    };

    if !caller.can_access(quiz.owner_id) {
        return Err(ServiceError::Unauthorized(format!(
            "quiz `{id}` belongs to another organizer"
        )));
    }

    Ok(quiz)
}
