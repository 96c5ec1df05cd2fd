#[cfg(feature = "couch-store")]
pub mod couchdb;
pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use crate::dao::models::{QuizEntity, QuizListItemEntity, ScoreEntity, TeamEntity};
use crate::dao::storage::StorageResult;
use futures::future::BoxFuture;
use uuid::Uuid;

/// Abstraction over the persistence layer for quizzes, teams, and scores.
///
/// Every backend implements the same contract: plain request/response
/// operations with no caching and no cross-entity transactions. The only
/// concurrency safeguard is the uniqueness constraint on
/// `(quiz_id, team_id, round)` honoured by [`QuizStore::upsert_score`].
pub trait QuizStore: Send + Sync {
    /// Persist a quiz entity.
    fn save_quiz(&self, quiz: QuizEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a quiz by id.
    fn find_quiz(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<QuizEntity>>>;
    /// List all quizzes, most recently created first. Owner scoping is the
    /// caller's responsibility.
    fn list_quizzes(&self) -> BoxFuture<'static, StorageResult<Vec<QuizListItemEntity>>>;
    /// Delete a quiz, cascading to its teams and scores. Returns whether a
    /// quiz was actually removed.
    fn delete_quiz(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    /// Persist a team entity.
    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Count the teams registered for a quiz.
    fn count_teams(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<u64>>;
    /// List the teams of a quiz ordered by team number ascending.
    fn list_teams(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>>;
    /// Insert-or-overwrite a score keyed by `(quiz_id, team_id, round)`.
    /// On overwrite the stored row id and creation timestamp are preserved;
    /// only the points change. Returns the stored entity.
    fn upsert_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<ScoreEntity>>;
    /// List all scores of a quiz ordered by team then round.
    fn list_scores(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>>;
    /// Verify the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish a lost connection.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
