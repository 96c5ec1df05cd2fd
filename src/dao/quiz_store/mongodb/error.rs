use mongodb::error::Error as MongoError;
use thiserror::Error;
use uuid::Uuid;

pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

#[derive(Debug, Error)]
pub enum MongoDaoError {
    #[error("missing environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        uri: String,
        #[source]
        source: MongoError,
    },
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        attempts: u32,
        #[source]
        source: MongoError,
    },
    #[error("MongoDB ping health check failed")]
    HealthPing {
        #[source]
        source: MongoError,
    },
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        collection: &'static str,
        index: &'static str,
        #[source]
        source: MongoError,
    },
    #[error("failed to save quiz `{id}`")]
    SaveQuiz {
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to load quiz `{id}`")]
    LoadQuiz {
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to list quizzes")]
    ListQuizzes {
        #[source]
        source: MongoError,
    },
    #[error("failed to delete quiz `{id}`")]
    DeleteQuiz {
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to save team `{id}`")]
    SaveTeam {
        id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to count teams of quiz `{quiz_id}`")]
    CountTeams {
        quiz_id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to list teams of quiz `{quiz_id}`")]
    ListTeams {
        quiz_id: Uuid,
        #[source]
        source: MongoError,
    },
    #[error("failed to upsert score for team `{team_id}` round {round}")]
    UpsertScore {
        team_id: Uuid,
        round: u32,
        #[source]
        source: MongoError,
    },
    #[error("upserted score for team `{team_id}` round {round} vanished before readback")]
    ScoreReadback { team_id: Uuid, round: u32 },
    #[error("failed to list scores of quiz `{quiz_id}`")]
    ListScores {
        quiz_id: Uuid,
        #[source]
        source: MongoError,
    },
}
