use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        identity::Caller,
        quiz::{CreateQuizRequest, QuizSummary},
    },
    error::AppError,
    services::quiz_service,
    state::SharedState,
};

/// Routes handling quiz CRUD.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/quizzes", post(create_quiz).get(list_quizzes))
        .route("/quizzes/{id}", get(get_quiz))
        .route("/quizzes/{id}", delete(delete_quiz))
}

/// Create a new quiz.
#[utoipa::path(
    post,
    path = "/quizzes",
    tag = "quiz",
    request_body = CreateQuizRequest,
    responses(
        (status = 200, description = "Quiz created", body = QuizSummary),
        (status = 400, description = "Invalid payload")
    )
)]
pub async fn create_quiz(
    State(state): State<SharedState>,
    caller: Caller,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<Json<QuizSummary>, AppError> {
    payload.validate()?;
    let summary = quiz_service::create_quiz(&state, caller, payload).await?;
    Ok(Json(summary))
}

/// List quizzes visible to the caller, newest first.
#[utoipa::path(
    get,
    path = "/quizzes",
    tag = "quiz",
    responses((status = 200, description = "Quizzes visible to the caller", body = [QuizSummary]))
)]
pub async fn list_quizzes(
    State(state): State<SharedState>,
    caller: Caller,
) -> Result<Json<Vec<QuizSummary>>, AppError> {
    let quizzes = quiz_service::list_quizzes(&state, caller).await?;
    Ok(Json(quizzes))
}

/// Fetch one quiz.
#[utoipa::path(
    get,
    path = "/quizzes/{id}",
    tag = "quiz",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    responses(
        (status = 200, description = "Quiz found", body = QuizSummary),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn get_quiz(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizSummary>, AppError> {
    let summary = quiz_service::get_quiz(&state, caller, id).await?;
    Ok(Json(summary))
}

/// Delete a quiz, cascading to its teams and scores.
#[utoipa::path(
    delete,
    path = "/quizzes/{id}",
    tag = "quiz",
    params(("id" = Uuid, Path, description = "Identifier of the quiz")),
    responses(
        (status = 204, description = "Quiz deleted"),
        (status = 401, description = "Caller does not own the quiz"),
        (status = 404, description = "Quiz does not exist")
    )
)]
pub async fn delete_quiz(
    State(state): State<SharedState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    quiz_service::delete_quiz(&state, caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
