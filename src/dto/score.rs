use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::ScoreEntity,
    dto::{format_system_time, team::TeamBriefSummary},
    services::standings::{Standing, TeamResults},
};

/// Payload used to record or overwrite a per-round score.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RecordScoreRequest {
    /// Team the score belongs to.
    pub team_id: Uuid,
    /// Round number, validated against the quiz's round count.
    #[validate(range(min = 1, message = "round must be at least 1"))]
    pub round: u32,
    /// Points awarded. Negative values are rejected.
    #[validate(range(min = 0, message = "points must not be negative"))]
    pub points: i64,
}

/// Score projection exposed to REST clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreSummary {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub team_id: Uuid,
    pub round: u32,
    pub points: u32,
    /// RFC 3339 creation timestamp of the original row.
    pub created_at: String,
}

impl From<ScoreEntity> for ScoreSummary {
    fn from(entity: ScoreEntity) -> Self {
        Self {
            id: entity.id,
            quiz_id: entity.quiz_id,
            team_id: entity.team_id,
            round: entity.round,
            points: entity.points,
            created_at: format_system_time(entity.created_at),
        }
    }
}

/// One row of the ranked standings.
#[derive(Debug, Serialize, ToSchema)]
pub struct StandingSummary {
    /// Team this row belongs to.
    pub team: TeamBriefSummary,
    /// Sum of points across all recorded rounds.
    pub total_points: u64,
}

impl From<Standing> for StandingSummary {
    fn from(standing: Standing) -> Self {
        Self {
            team: TeamBriefSummary {
                id: standing.team_id,
                name: standing.team_name,
                team_number: standing.team_number,
            },
            total_points: standing.total_points,
        }
    }
}

/// One row of the detailed per-round results matrix.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamResultsSummary {
    /// Team this row belongs to.
    pub team: TeamBriefSummary,
    /// Points per round, index 0 holding round 1. Rounds without a recorded
    /// score show 0.
    pub points_by_round: Vec<u32>,
    /// Sum of the row.
    pub total_points: u64,
}

impl From<TeamResults> for TeamResultsSummary {
    fn from(results: TeamResults) -> Self {
        Self {
            team: TeamBriefSummary {
                id: results.team_id,
                name: results.team_name,
                team_number: results.team_number,
            },
            points_by_round: results.points_by_round,
            total_points: results.total_points,
        }
    }
}

/// Detailed results: the zero-filled matrix plus the completion flag.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultsResponse {
    /// Per-team rows ordered like the standings.
    pub teams: Vec<TeamResultsSummary>,
    /// Count-based completion flag.
    pub completed: bool,
}
