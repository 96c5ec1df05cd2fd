use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the pub-quiz backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::quiz::create_quiz,
        crate::routes::quiz::list_quizzes,
        crate::routes::quiz::get_quiz,
        crate::routes::quiz::delete_quiz,
        crate::routes::team::create_team,
        crate::routes::team::list_teams,
        crate::routes::team::import_teams,
        crate::routes::score::record_score,
        crate::routes::score::list_scores,
        crate::routes::score::standings,
        crate::routes::score::results,
        crate::routes::round::round_status,
        crate::routes::round::advance_round,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::quiz::CreateQuizRequest,
            crate::dto::quiz::QuizSummary,
            crate::dto::team::CreateTeamRequest,
            crate::dto::team::ImportTeamsRequest,
            crate::dto::team::TeamSummary,
            crate::dto::team::TeamBriefSummary,
            crate::dto::team::ImportFailure,
            crate::dto::team::ImportReport,
            crate::dto::score::RecordScoreRequest,
            crate::dto::score::ScoreSummary,
            crate::dto::score::StandingSummary,
            crate::dto::score::TeamResultsSummary,
            crate::dto::score::ResultsResponse,
            crate::dto::round::PhaseName,
            crate::dto::round::RoundStatusResponse,
            crate::dto::round::AdvanceResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "quiz", description = "Quiz directory operations"),
        (name = "team", description = "Team registration and bulk import"),
        (name = "score", description = "Score entry, standings, and results"),
        (name = "round", description = "Round progression operations"),
    )
)]
pub struct ApiDoc;
