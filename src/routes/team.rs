use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        identity::Caller,
        team::{CreateTeamRequest, ImportReport, ImportTeamsRequest, TeamSummary},
    },
    error::AppError,
    services::quiz_service,
    state::SharedState,
};

/// Routes handling team registration.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/quizzes/{id}/teams", post(create_team).get(list_teams))
        .route("/quizzes/{id}/teams/import", post(import_teams))
}

/// Register a single team; its number is assigned by the server.
#[utoipa::path(
    post,
    path = "/quizzes/{id}/teams",
    tag = "team",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team registered", body = TeamSummary),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn create_team(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateTeamRequest>,
) -> Result<Json<TeamSummary>, AppError> {
    payload.validate()?;
    let summary = quiz_service::create_team(&state, caller, id, payload).await?;
    Ok(Json(summary))
}

/// List the teams of a quiz ordered by team number.
#[utoipa::path(
    get,
    path = "/quizzes/{id}/teams",
    tag = "team",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    responses(
        (status = 200, description = "Teams of the quiz", body = [TeamSummary]),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn list_teams(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<TeamSummary>>, AppError> {
    let teams = quiz_service::list_teams(&state, caller, id).await?;
    Ok(Json(teams))
}

/// Bulk-register teams from an uploaded spreadsheet export.
#[utoipa::path(
    post,
    path = "/quizzes/{id}/teams/import",
    tag = "team",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    request_body = ImportTeamsRequest,
    responses(
        (status = 200, description = "Import processed", body = ImportReport),
        (status = 400, description = "Upload contained no usable rows"),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn import_teams(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(payload): Json<ImportTeamsRequest>,
) -> Result<Json<ImportReport>, AppError> {
    payload.validate()?;
    let report = quiz_service::import_teams(&state, caller, id, &payload.content).await?;
    Ok(Json(report))
}
