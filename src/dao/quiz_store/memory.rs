use std::sync::Arc;

use dashmap::DashMap;
use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::{
    models::{QuizEntity, QuizListItemEntity, ScoreEntity, TeamEntity},
    quiz_store::QuizStore,
    storage::StorageResult,
};

/// Embedded in-memory backend.
///
/// Serves the local single-process deployment and the test suite. Scores are
/// keyed directly by the `(quiz_id, team_id, round)` triple, so the
/// uniqueness constraint is structural rather than checked.
#[derive(Clone, Default)]
pub struct MemoryQuizStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    quizzes: DashMap<Uuid, QuizEntity>,
    teams: DashMap<Uuid, TeamEntity>,
    scores: DashMap<(Uuid, Uuid, u32), ScoreEntity>,
}

impl MemoryQuizStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn delete_quiz_cascading(&self, id: Uuid) -> bool {
        let existed = self.inner.quizzes.remove(&id).is_some();
        if existed {
            self.inner.teams.retain(|_, team| team.quiz_id != id);
            self.inner.scores.retain(|key, _| key.0 != id);
        }
        existed
    }

    fn collect_teams(&self, quiz_id: Uuid) -> Vec<TeamEntity> {
        let mut teams: Vec<TeamEntity> = self
            .inner
            .teams
            .iter()
            .filter(|entry| entry.quiz_id == quiz_id)
            .map(|entry| entry.value().clone())
            .collect();
        teams.sort_by_key(|team| team.team_number);
        teams
    }

    fn collect_scores(&self, quiz_id: Uuid) -> Vec<ScoreEntity> {
        let mut scores: Vec<ScoreEntity> = self
            .inner
            .scores
            .iter()
            .filter(|entry| entry.key().0 == quiz_id)
            .map(|entry| entry.value().clone())
            .collect();
        scores.sort_by_key(|score| (score.team_id, score.round));
        scores
    }
}

impl QuizStore for MemoryQuizStore {
    fn save_quiz(&self, quiz: QuizEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.quizzes.insert(quiz.id, quiz);
            Ok(())
        })
    }

    fn find_quiz(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<QuizEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.inner.quizzes.get(&id).map(|entry| entry.clone())) })
    }

    fn list_quizzes(&self) -> BoxFuture<'static, StorageResult<Vec<QuizListItemEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut quizzes: Vec<QuizEntity> = store
                .inner
                .quizzes
                .iter()
                .map(|entry| entry.value().clone())
                .collect();
            // Newest first, matching the listing order of the other backends.
            quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(quizzes.into_iter().map(Into::into).collect())
        })
    }

    fn delete_quiz(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.delete_quiz_cascading(id)) })
    }

    fn save_team(&self, team: TeamEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store.inner.teams.insert(team.id, team);
            Ok(())
        })
    }

    fn count_teams(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<u64>> {
        let store = self.clone();
        Box::pin(async move {
            let count = store
                .inner
                .teams
                .iter()
                .filter(|entry| entry.quiz_id == quiz_id)
                .count();
            Ok(count as u64)
        })
    }

    fn list_teams(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<TeamEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.collect_teams(quiz_id)) })
    }

    fn upsert_score(&self, score: ScoreEntity) -> BoxFuture<'static, StorageResult<ScoreEntity>> {
        let store = self.clone();
        Box::pin(async move {
            let key = (score.quiz_id, score.team_id, score.round);
            let stored = match store.inner.scores.get(&key) {
                Some(existing) => {
                    // Overwrite points in place, keeping the original row
                    // identity and creation timestamp.
                    let mut updated = existing.clone();
                    updated.points = score.points;
                    updated
                }
                None => score,
            };
            store.inner.scores.insert(key, stored.clone());
            Ok(stored)
        })
    }

    fn list_scores(&self, quiz_id: Uuid) -> BoxFuture<'static, StorageResult<Vec<ScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.collect_scores(quiz_id)) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    fn quiz(rounds: u32) -> QuizEntity {
        QuizEntity {
            id: Uuid::new_v4(),
            name: "Thursday quiz".into(),
            date: "2026-09-03".into(),
            location: "The Crown".into(),
            rounds,
            created_at: SystemTime::now(),
            owner_id: None,
        }
    }

    fn team(quiz_id: Uuid, number: u32) -> TeamEntity {
        TeamEntity {
            id: Uuid::new_v4(),
            quiz_id,
            name: format!("Team {number}"),
            team_number: number,
            created_at: SystemTime::now(),
        }
    }

    fn score(quiz_id: Uuid, team_id: Uuid, round: u32, points: u32) -> ScoreEntity {
        ScoreEntity {
            id: Uuid::new_v4(),
            quiz_id,
            team_id,
            round,
            points,
            created_at: SystemTime::now(),
        }
    }

    #[tokio::test]
    async fn upsert_overwrites_and_preserves_identity() {
        let store = MemoryQuizStore::new();
        let q = quiz(3);
        let t = team(q.id, 1);

        let first = store
            .upsert_score(score(q.id, t.id, 1, 10))
            .await
            .unwrap();
        let second = store
            .upsert_score(score(q.id, t.id, 1, 25))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.points, 25);
        assert_eq!(store.list_scores(q.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_quiz_cascades_to_teams_and_scores() {
        let store = MemoryQuizStore::new();
        let q = quiz(2);
        let t = team(q.id, 1);
        store.save_quiz(q.clone()).await.unwrap();
        store.save_team(t.clone()).await.unwrap();
        store.upsert_score(score(q.id, t.id, 1, 5)).await.unwrap();

        assert!(store.delete_quiz(q.id).await.unwrap());
        assert!(store.find_quiz(q.id).await.unwrap().is_none());
        assert!(store.list_teams(q.id).await.unwrap().is_empty());
        assert!(store.list_scores(q.id).await.unwrap().is_empty());
        // Second delete reports nothing removed.
        assert!(!store.delete_quiz(q.id).await.unwrap());
    }

    #[tokio::test]
    async fn teams_listed_by_number() {
        let store = MemoryQuizStore::new();
        let q = quiz(2);
        store.save_team(team(q.id, 3)).await.unwrap();
        store.save_team(team(q.id, 1)).await.unwrap();
        store.save_team(team(q.id, 2)).await.unwrap();

        let numbers: Vec<u32> = store
            .list_teams(q.id)
            .await
            .unwrap()
            .iter()
            .map(|t| t.team_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}
