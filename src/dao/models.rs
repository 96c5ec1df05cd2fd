use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Quiz metadata persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizEntity {
    /// Primary key of the quiz.
    pub id: Uuid,
    /// Display name chosen by the organizer.
    pub name: String,
    /// Date the quiz takes place, as entered by the organizer.
    pub date: String,
    /// Venue of the quiz.
    pub location: String,
    /// Number of scoring rounds (strictly positive). Assumed immutable once
    /// any team has a recorded score.
    pub rounds: u32,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
    /// Organizer owning this quiz. `None` in single-tenant deployments.
    pub owner_id: Option<Uuid>,
}

/// Summary projection of a quiz used in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizListItemEntity {
    /// Primary key of the quiz.
    pub id: Uuid,
    /// Display name chosen by the organizer.
    pub name: String,
    /// Date the quiz takes place.
    pub date: String,
    /// Venue of the quiz.
    pub location: String,
    /// Number of scoring rounds.
    pub rounds: u32,
    /// Creation timestamp.
    pub created_at: SystemTime,
    /// Organizer owning this quiz, if any.
    pub owner_id: Option<Uuid>,
}

/// Representation of a registered team persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamEntity {
    /// Stable identifier for the team.
    pub id: Uuid,
    /// Quiz this team is registered for.
    pub quiz_id: Uuid,
    /// Display name chosen for the team.
    pub name: String,
    /// Registration-order number, unique within a quiz. Assigned as
    /// `existing team count + 1` at creation and never reused or renumbered.
    pub team_number: u32,
    /// Creation timestamp.
    pub created_at: SystemTime,
}

/// A recorded per-round score. At most one exists per
/// `(quiz_id, team_id, round)` triple; writes are insert-or-overwrite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreEntity {
    /// Stable identifier for the score row, preserved across overwrites.
    pub id: Uuid,
    /// Quiz the score belongs to.
    pub quiz_id: Uuid,
    /// Team the score belongs to.
    pub team_id: Uuid,
    /// Round number, `1..=quiz.rounds`.
    pub round: u32,
    /// Points awarded (non-negative).
    pub points: u32,
    /// Creation timestamp of the original row.
    pub created_at: SystemTime,
}

impl From<QuizEntity> for QuizListItemEntity {
    fn from(entity: QuizEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            date: entity.date,
            location: entity.location,
            rounds: entity.rounds,
            created_at: entity.created_at,
            owner_id: entity.owner_id,
        }
    }
}
