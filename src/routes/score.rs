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
        score::{RecordScoreRequest, ResultsResponse, ScoreSummary, StandingSummary},
    },
    error::AppError,
    services::score_service,
    state::SharedState,
};

/// Routes handling score entry and derived views.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/quizzes/{id}/scores", post(record_score).get(list_scores))
        .route("/quizzes/{id}/standings", get(standings))
        .route("/quizzes/{id}/results", get(results))
}

/// Record or overwrite a per-round score.
#[utoipa::path(
    post,
    path = "/quizzes/{id}/scores",
    tag = "score",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    request_body = RecordScoreRequest,
    responses(
        (status = 200, description = "Score stored", body = ScoreSummary),
        (status = 400, description = "Round or points out of range"),
        (status = 404, description = "Quiz or team does not exist"),
        (status = 409, description = "Round not open for entry")
    )
)]
pub async fn record_score(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordScoreRequest>,
) -> Result<Json<ScoreSummary>, AppError> {
    payload.validate()?;
    let summary = score_service::record_score(&state, caller, id, payload).await?;
    Ok(Json(summary))
}

/// List all recorded scores of a quiz.
#[utoipa::path(
    get,
    path = "/quizzes/{id}/scores",
    tag = "score",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    responses(
        (status = 200, description = "Scores of the quiz", body = [ScoreSummary]),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn list_scores(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ScoreSummary>>, AppError> {
    let scores = score_service::list_scores(&state, caller, id).await?;
    Ok(Json(scores))
}

/// Ranked standings, recomputed on every call.
#[utoipa::path(
    get,
    path = "/quizzes/{id}/standings",
    tag = "score",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    responses(
        (status = 200, description = "Ranked standings", body = [StandingSummary]),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn standings(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StandingSummary>>, AppError> {
    let standings = score_service::standings_for_quiz(&state, caller, id).await?;
    Ok(Json(standings))
}

/// Detailed per-round results matrix with the completion flag.
#[utoipa::path(
    get,
    path = "/quizzes/{id}/results",
    tag = "score",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    responses(
        (status = 200, description = "Detailed results", body = ResultsResponse),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn results(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<ResultsResponse>, AppError> {
    let results = score_service::results_for_quiz(&state, caller, id).await?;
    Ok(Json(results))
}
