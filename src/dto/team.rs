use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::TeamEntity,
    dto::{format_system_time, validation::validate_not_blank},
};

/// Payload used to register a single team.
///
/// The team number is always assigned by the server; callers cannot supply
/// one.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTeamRequest {
    /// Display name of the team.
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
}

/// Payload carrying an uploaded spreadsheet export for bulk registration.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ImportTeamsRequest {
    /// Tabular text (comma, semicolon, or tab separated) including a header
    /// row.
    #[validate(custom(function = "validate_not_blank"))]
    pub content: String,
}

/// Team projection exposed to REST clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamSummary {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub name: String,
    pub team_number: u32,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<TeamEntity> for TeamSummary {
    fn from(entity: TeamEntity) -> Self {
        Self {
            id: entity.id,
            quiz_id: entity.quiz_id,
            name: entity.name,
            team_number: entity.team_number,
            created_at: format_system_time(entity.created_at),
        }
    }
}

/// Minimal team projection used in round check reports.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamBriefSummary {
    pub id: Uuid,
    pub name: String,
    pub team_number: u32,
}

impl From<&TeamEntity> for TeamBriefSummary {
    fn from(entity: &TeamEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name.clone(),
            team_number: entity.team_number,
        }
    }
}

/// Per-item failure recorded during bulk import.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImportFailure {
    /// Team name as parsed from the upload.
    pub name: String,
    /// Human-readable reason the item was rejected.
    pub message: String,
}

/// Outcome of a bulk team import.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImportReport {
    /// Teams created, in upload order.
    pub created: Vec<TeamSummary>,
    /// Items that could not be created.
    pub failed: Vec<ImportFailure>,
    /// Number of successfully created teams.
    pub success_count: usize,
    /// Number of rejected items.
    pub failure_count: usize,
}
