use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::dao::{
    models::{QuizEntity, ScoreEntity, TeamEntity},
    quiz_store::couchdb::error::CouchDaoError,
};

pub const QUIZ_PREFIX: &str = "quiz::";
pub const TEAM_PREFIX: &str = "team::";
pub const SCORE_PREFIX: &str = "score::";
pub const END_SUFFIX: &str = "\u{ffff}";

#[derive(Debug, Deserialize)]
pub struct AllDocsResponse {
    pub rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
pub struct AllDocsRow {
    pub id: String,
    #[serde(default)]
    pub doc: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchQuizDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub quiz: QuizBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizBody {
    pub name: String,
    pub date: String,
    pub location: String,
    pub rounds: u32,
    pub created_at: SystemTime,
    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

impl From<(QuizEntity, Option<String>)> for CouchQuizDocument {
    fn from((quiz, rev): (QuizEntity, Option<String>)) -> Self {
        Self {
            id: quiz_doc_id(quiz.id),
            rev,
            quiz: QuizBody {
                name: quiz.name,
                date: quiz.date,
                location: quiz.location,
                rounds: quiz.rounds,
                created_at: quiz.created_at,
                owner_id: quiz.owner_id,
            },
        }
    }
}

impl TryFrom<CouchQuizDocument> for QuizEntity {
    type Error = CouchDaoError;

    fn try_from(doc: CouchQuizDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: extract_uuid(&doc.id)?,
            name: doc.quiz.name,
            date: doc.quiz.date,
            location: doc.quiz.location,
            rounds: doc.quiz.rounds,
            created_at: doc.quiz.created_at,
            owner_id: doc.quiz.owner_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchTeamDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub team: TeamBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamBody {
    pub quiz_id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub team_number: u32,
    pub created_at: SystemTime,
}

impl From<(TeamEntity, Option<String>)> for CouchTeamDocument {
    fn from((team, rev): (TeamEntity, Option<String>)) -> Self {
        Self {
            id: team_doc_id(team.quiz_id, team.id),
            rev,
            team: TeamBody {
                quiz_id: team.quiz_id,
                team_id: team.id,
                name: team.name,
                team_number: team.team_number,
                created_at: team.created_at,
            },
        }
    }
}

impl From<CouchTeamDocument> for TeamEntity {
    fn from(doc: CouchTeamDocument) -> Self {
        TeamEntity {
            id: doc.team.team_id,
            quiz_id: doc.team.quiz_id,
            name: doc.team.name,
            team_number: doc.team.team_number,
            created_at: doc.team.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchScoreDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub score: ScoreBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBody {
    pub score_id: Uuid,
    pub quiz_id: Uuid,
    pub team_id: Uuid,
    pub round: u32,
    pub points: u32,
    pub created_at: SystemTime,
}

impl From<(ScoreEntity, Option<String>)> for CouchScoreDocument {
    fn from((score, rev): (ScoreEntity, Option<String>)) -> Self {
        Self {
            id: score_doc_id(score.quiz_id, score.team_id, score.round),
            rev,
            score: ScoreBody {
                score_id: score.id,
                quiz_id: score.quiz_id,
                team_id: score.team_id,
                round: score.round,
                points: score.points,
                created_at: score.created_at,
            },
        }
    }
}

impl From<CouchScoreDocument> for ScoreEntity {
    fn from(doc: CouchScoreDocument) -> Self {
        ScoreEntity {
            id: doc.score.score_id,
            quiz_id: doc.score.quiz_id,
            team_id: doc.score.team_id,
            round: doc.score.round,
            points: doc.score.points,
            created_at: doc.score.created_at,
        }
    }
}

/// Document ID for a quiz: `quiz::{quiz_id}`.
pub fn quiz_doc_id(id: Uuid) -> String {
    format!("{}{}", QUIZ_PREFIX, id)
}

/// Document ID for a team: `team::{quiz_id}::{team_id}`. The quiz segment
/// makes per-quiz prefix listing possible.
pub fn team_doc_id(quiz_id: Uuid, team_id: Uuid) -> String {
    format!("{}{}::{}", TEAM_PREFIX, quiz_id, team_id)
}

/// Document ID for a score: `score::{quiz_id}::{team_id}::{round}`. The ID
/// itself encodes the one-score-per-round uniqueness rule.
pub fn score_doc_id(quiz_id: Uuid, team_id: Uuid, round: u32) -> String {
    format!("{}{}::{}::{}", SCORE_PREFIX, quiz_id, team_id, round)
}

/// Listing prefix covering every team document of one quiz.
pub fn team_quiz_prefix(quiz_id: Uuid) -> String {
    format!("{}{}::", TEAM_PREFIX, quiz_id)
}

/// Listing prefix covering every score document of one quiz.
pub fn score_quiz_prefix(quiz_id: Uuid) -> String {
    format!("{}{}::", SCORE_PREFIX, quiz_id)
}

pub fn extract_uuid(doc_id: &str) -> Result<Uuid, CouchDaoError> {
    let (_, id) = doc_id
        .split_once("::")
        .ok_or_else(|| CouchDaoError::InvalidDocId {
            doc_id: doc_id.to_string(),
            kind: "missing separator",
        })?;

    Uuid::parse_str(id).map_err(|_| CouchDaoError::InvalidDocId {
        doc_id: doc_id.to_string(),
        kind: "invalid UUID",
    })
}
