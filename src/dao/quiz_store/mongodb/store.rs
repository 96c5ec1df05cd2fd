use std::sync::Arc;

use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{
    Client, Collection, Database,
    bson::{DateTime, doc},
    options::IndexOptions,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoQuizDocument, MongoScoreDocument, MongoTeamDocument, doc_id, uuid_as_binary},
};
use crate::dao::{
    models::{QuizEntity, QuizListItemEntity, ScoreEntity, TeamEntity},
    quiz_store::QuizStore,
    storage::StorageResult,
};

const QUIZ_COLLECTION_NAME: &str = "quizzes";
const TEAM_COLLECTION_NAME: &str = "teams";
const SCORE_COLLECTION_NAME: &str = "scores";

#[derive(Clone)]
pub struct MongoQuizStore {
    inner: Arc<MongoInner>,
}

struct MongoInner {
    state: RwLock<MongoState>,
    config: MongoConfig,
}

struct MongoState {
    client: Client,
    database: Database,
}

impl MongoInner {
    async fn ping(&self) -> MongoResult<()> {
        let database = {
            let guard = self.state.read().await;
            guard.database.clone()
        };

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn reconnect(&self) -> MongoResult<()> {
        let (client, database) =
            establish_connection(&self.config.options, &self.config.database_name).await?;
        let mut guard = self.state.write().await;
        guard.client = client;
        guard.database = database;
        Ok(())
    }
}

impl MongoQuizStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let (client, database) =
            establish_connection(&config.options, &config.database_name).await?;

        let inner = Arc::new(MongoInner {
            state: RwLock::new(MongoState { client, database }),
            config,
        });

        let store = Self { inner };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let database = self.database().await;

        let team_collection = database.collection::<MongoTeamDocument>(TEAM_COLLECTION_NAME);
        let team_index = mongodb::IndexModel::builder()
            .keys(doc! {"quiz_id": 1, "team_number": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("team_quiz_idx".to_owned()))
                    .build(),
            )
            .build();
        team_collection
            .create_index(team_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: TEAM_COLLECTION_NAME,
                index: "quiz_id,team_number",
                source,
            })?;

        // The unique compound index backs the one-score-per-round rule.
        let score_collection = database.collection::<MongoScoreDocument>(SCORE_COLLECTION_NAME);
        let score_index = mongodb::IndexModel::builder()
            .keys(doc! {"quiz_id": 1, "team_id": 1, "round": 1})
            .options(
                IndexOptions::builder()
                    .name(Some("score_round_idx".to_owned()))
                    .unique(Some(true))
                    .build(),
            )
            .build();
        score_collection
            .create_index(score_index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: SCORE_COLLECTION_NAME,
                index: "quiz_id,team_id,round",
                source,
            })?;

        Ok(())
    }

    async fn database(&self) -> Database {
        let guard = self.inner.state.read().await;
        guard.database.clone()
    }

    async fn quiz_collection(&self) -> Collection<MongoQuizDocument> {
        self.database()
            .await
            .collection::<MongoQuizDocument>(QUIZ_COLLECTION_NAME)
    }

    async fn team_collection(&self) -> Collection<MongoTeamDocument> {
        self.database()
            .await
            .collection::<MongoTeamDocument>(TEAM_COLLECTION_NAME)
    }

    async fn score_collection(&self) -> Collection<MongoScoreDocument> {
        self.database()
            .await
            .collection::<MongoScoreDocument>(SCORE_COLLECTION_NAME)
    }

    async fn save_quiz(&self, quiz: QuizEntity) -> MongoResult<()> {
        let id = quiz.id;
        let document: MongoQuizDocument = quiz.into();
        self.quiz_collection()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveQuiz { id, source })?;
        Ok(())
    }

    async fn find_quiz(&self, id: Uuid) -> MongoResult<Option<QuizEntity>> {
        let document = self
            .quiz_collection()
            .await
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadQuiz { id, source })?;
        Ok(document.map(Into::into))
    }

    async fn list_quizzes(&self) -> MongoResult<Vec<QuizListItemEntity>> {
        let documents: Vec<MongoQuizDocument> = self
            .quiz_collection()
            .await
            .find(doc! {})
            .sort(doc! {"created_at": -1})
            .await
            .map_err(|source| MongoDaoError::ListQuizzes { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListQuizzes { source })?;

        Ok(documents
            .into_iter()
            .map(|document| {
                let entity: QuizEntity = document.into();
                entity.into()
            })
            .collect())
    }

    async fn delete_quiz(&self, id: Uuid) -> MongoResult<bool> {
        let result = self
            .quiz_collection()
            .await
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteQuiz { id, source })?;

        // Teams and scores are removed even when the quiz document was
        // already gone, so a partially failed delete can be retried.
        let quiz_filter = doc! {"quiz_id": uuid_as_binary(id)};
        self.team_collection()
            .await
            .delete_many(quiz_filter.clone())
            .await
            .map_err(|source| MongoDaoError::DeleteQuiz { id, source })?;
        self.score_collection()
            .await
            .delete_many(quiz_filter)
            .await
            .map_err(|source| MongoDaoError::DeleteQuiz { id, source })?;

        Ok(result.deleted_count > 0)
    }

    async fn save_team(&self, team: TeamEntity) -> MongoResult<()> {
        let id = team.id;
        let document: MongoTeamDocument = team.into();
        self.team_collection()
            .await
            .replace_one(doc_id(id), &document)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveTeam { id, source })?;
        Ok(())
    }

    async fn count_teams(&self, quiz_id: Uuid) -> MongoResult<u64> {
        self.team_collection()
            .await
            .count_documents(doc! {"quiz_id": uuid_as_binary(quiz_id)})
            .await
            .map_err(|source| MongoDaoError::CountTeams { quiz_id, source })
    }

    async fn list_teams(&self, quiz_id: Uuid) -> MongoResult<Vec<TeamEntity>> {
        let documents: Vec<MongoTeamDocument> = self
            .team_collection()
            .await
            .find(doc! {"quiz_id": uuid_as_binary(quiz_id)})
            .sort(doc! {"team_number": 1})
            .await
            .map_err(|source| MongoDaoError::ListTeams { quiz_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListTeams { quiz_id, source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn upsert_score(&self, score: ScoreEntity) -> MongoResult<ScoreEntity> {
        let collection = self.score_collection().await;
        let filter = doc! {
            "quiz_id": uuid_as_binary(score.quiz_id),
            "team_id": uuid_as_binary(score.team_id),
            "round": score.round,
        };

        // `$setOnInsert` keeps the row id and creation timestamp of an
        // existing score; overwrites only touch the points.
        let update = doc! {
            "$set": {"points": score.points},
            "$setOnInsert": {
                "_id": uuid_as_binary(score.id),
                "created_at": DateTime::from_system_time(score.created_at),
            },
        };

        collection
            .update_one(filter.clone(), update)
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::UpsertScore {
                team_id: score.team_id,
                round: score.round,
                source,
            })?;

        let stored = collection
            .find_one(filter)
            .await
            .map_err(|source| MongoDaoError::UpsertScore {
                team_id: score.team_id,
                round: score.round,
                source,
            })?
            .ok_or(MongoDaoError::ScoreReadback {
                team_id: score.team_id,
                round: score.round,
            })?;

        Ok(stored.into())
    }

    async fn list_scores(&self, quiz_id: Uuid) -> MongoResult<Vec<ScoreEntity>> {
        let documents: Vec<MongoScoreDocument> = self
            .score_collection()
            .await
            .find(doc! {"quiz_id": uuid_as_binary(quiz_id)})
            .sort(doc! {"team_id": 1, "round": 1})
            .await
            .map_err(|source| MongoDaoError::ListScores { quiz_id, source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListScores { quiz_id, source })?;

        Ok(documents.into_iter().map(Into::into).collect())
    }
}

impl QuizStore for MongoQuizStore {
    fn save_quiz(&self, quiz: QuizEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_quiz(quiz).await.map_err(Into::into) })
    }

    fn find_quiz(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<QuizEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_quiz(id).await.map_err(Into::into) })
    }

    fn list_quizzes(&self) -> BoxFuture<'static, StorageResult<Vec<QuizListItemEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_quizzes().await.map_err(Into::into) })
    }

    fn delete_quiz(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_quiz(id).await.map_err(Into::into) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_team(team).await.map_err(Into::into) })
    }

    fn count_teams(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move { store.count_teams(quiz_id).await.map_err(Into::into) })
    }

    fn list_teams(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_teams(quiz_id).await.map_err(Into::into) })
    }

    fn upsert_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<ScoreEntity>> {
        let store = self.clone();
        Box::pin(async move { store.upsert_score(score).await.map_err(Into::into) })
    }

    fn list_scores(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_scores(quiz_id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
