use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::{QuizEntity, QuizListItemEntity},
    dto::{format_system_time, validation::validate_not_blank},
};

/// Payload used to create a new quiz.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateQuizRequest {
    /// Display name of the quiz.
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,
    /// Date the quiz takes place, free-form.
    #[validate(custom(function = "validate_not_blank"))]
    pub date: String,
    /// Venue of the quiz.
    #[validate(custom(function = "validate_not_blank"))]
    pub location: String,
    /// Number of scoring rounds.
    #[validate(range(min = 1, message = "rounds must be at least 1"))]
    pub rounds: u32,
}

/// Quiz projection exposed to REST clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct QuizSummary {
    pub id: Uuid,
    pub name: String,
    pub date: String,
    pub location: String,
    pub rounds: u32,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub owner_id: Option<Uuid>,
}

impl From<QuizEntity> for QuizSummary {
    fn from(entity: QuizEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            date: entity.date,
            location: entity.location,
            rounds: entity.rounds,
            created_at: format_system_time(entity.created_at),
            owner_id: entity.owner_id,
        }
    }
}

impl From<QuizListItemEntity> for QuizSummary {
    fn from(entity: QuizListItemEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            date: entity.date,
            location: entity.location,
            rounds: entity.rounds,
            created_at: format_system_time(entity.created_at),
            owner_id: entity.owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_quiz_request_rejects_blank_fields() {
        let request = CreateQuizRequest {
            name: "  ".into(),
            date: "2026-09-03".into(),
            location: "The Crown".into(),
            rounds: 3,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_quiz_request_rejects_zero_rounds() {
        let request = CreateQuizRequest {
            name: "Thursday quiz".into(),
            date: "2026-09-03".into(),
            location: "The Crown".into(),
            rounds: 0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_quiz_request_accepts_valid_payload() {
        let request = CreateQuizRequest {
            name: "Thursday quiz".into(),
            date: "2026-09-03".into(),
            location: "The Crown".into(),
            rounds: 3,
        };
        assert!(request.validate().is_ok());
    }
}
