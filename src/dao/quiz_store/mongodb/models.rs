use mongodb::bson::{Binary, DateTime, Document, doc, spec::BinarySubtype};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{QuizEntity, ScoreEntity, TeamEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoQuizDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    name: String,
    date: String,
    location: String,
    rounds: u32,
    created_at: DateTime,
    #[serde(default)]
    owner_id: Option<Uuid>,
}

impl From<QuizEntity> for MongoQuizDocument {
    fn from(value: QuizEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: value.date,
            location: value.location,
            rounds: value.rounds,
            created_at: DateTime::from_system_time(value.created_at),
            owner_id: value.owner_id,
        }
    }
}

impl From<MongoQuizDocument> for QuizEntity {
    fn from(value: MongoQuizDocument) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: value.date,
            location: value.location,
            rounds: value.rounds,
            created_at: value.created_at.to_system_time(),
            owner_id: value.owner_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTeamDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    pub quiz_id: Uuid,
    name: String,
    team_number: u32,
    created_at: DateTime,
}

impl From<TeamEntity> for MongoTeamDocument {
    fn from(value: TeamEntity) -> Self {
        Self {
            id: value.id,
            quiz_id: value.quiz_id,
            name: value.name,
            team_number: value.team_number,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<MongoTeamDocument> for TeamEntity {
    fn from(value: MongoTeamDocument) -> Self {
        Self {
            id: value.id,
            quiz_id: value.quiz_id,
            name: value.name,
            team_number: value.team_number,
            created_at: value.created_at.to_system_time(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoScoreDocument {
    #[serde(rename = "_id")]
    id: Uuid,
    pub quiz_id: Uuid,
    pub team_id: Uuid,
    pub round: u32,
    points: u32,
    created_at: DateTime,
}

impl From<ScoreEntity> for MongoScoreDocument {
    fn from(value: ScoreEntity) -> Self {
        Self {
            id: value.id,
            quiz_id: value.quiz_id,
            team_id: value.team_id,
            round: value.round,
            points: value.points,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

impl From<MongoScoreDocument> for ScoreEntity {
    fn from(value: MongoScoreDocument) -> Self {
        Self {
            id: value.id,
            quiz_id: value.quiz_id,
            team_id: value.team_id,
            round: value.round,
            points: value.points,
            created_at: value.created_at.to_system_time(),
        }
    }
}

pub fn uuid_as_binary(id: Uuid) -> Binary {
    Binary {
        subtype: BinarySubtype::Uuid,
        bytes: id.into_bytes().to_vec(),
    }
}

pub fn doc_id(id: Uuid) -> Document {
    doc! {"_id": uuid_as_binary(id)}
}
