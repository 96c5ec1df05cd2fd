use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        identity::Caller,
        round::{AdvanceResponse, RoundStatusResponse},
    },
    error::AppError,
    services::progression_service,
    state::SharedState,
};

/// Routes handling round progression.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/quizzes/{id}/rounds/current", get(round_status))
        .route("/quizzes/{id}/rounds/advance", post(advance_round))
}

/// Report the derived progression phase and the coverage of the round being
/// closed out.
#[utoipa::path(
    get,
    path = "/quizzes/{id}/rounds/current",
    tag = "round",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    responses(
        (status = 200, description = "Current progression snapshot", body = RoundStatusResponse),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn round_status(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<RoundStatusResponse>, AppError> {
    let status = progression_service::round_status(&state, caller, id).await?;
    Ok(Json(status))
}

/// Close the current round, zero-filling missing scores, and move entry to
/// the next round. Idempotent once the quiz is finished.
#[utoipa::path(
    post,
    path = "/quizzes/{id}/rounds/advance",
    tag = "round",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    responses(
        (status = 200, description = "Advance applied", body = AdvanceResponse),
        (status = 404, description = "Quiz does not exist"),
        (status = 409, description = "Quiz has no teams")
    )
)]
pub async fn advance_round(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<AdvanceResponse>, AppError> {
    let outcome = progression_service::advance_round(&state, caller, id).await?;
    Ok(Json(outcome))
}
