//! End-to-end quiz lifecycle against the in-memory store.

use std::sync::Arc;

use pubquiz_back::{
    dao::quiz_store::memory::MemoryQuizStore,
    dto::{
        identity::{Caller, CallerRole},
        quiz::CreateQuizRequest,
        round::PhaseName,
        score::RecordScoreRequest,
        team::CreateTeamRequest,
    },
    error::ServiceError,
    services::{progression_service, quiz_service, score_service},
    state::{AppState, SharedState},
};
use uuid::Uuid;

async fn test_state() -> SharedState {
    let state = AppState::new();
    state
        .install_quiz_store(Arc::new(MemoryQuizStore::new()))
        .await;
    state
}

fn quiz_request(rounds: u32) -> CreateQuizRequest {
    CreateQuizRequest {
        name: "Thursday quiz".into(),
        date: "2026-09-03".into(),
        location: "The Crown".into(),
        rounds,
    }
}

async fn add_team(state: &SharedState, quiz_id: Uuid, name: &str) -> Uuid {
    quiz_service::create_team(
        state,
        Caller::default(),
        quiz_id,
        CreateTeamRequest { name: name.into() },
    )
    .await
    .unwrap()
    .id
}

async fn record(state: &SharedState, quiz_id: Uuid, team_id: Uuid, round: u32, points: i64) {
    score_service::record_score(
        state,
        Caller::default(),
        quiz_id,
        RecordScoreRequest {
            team_id,
            round,
            points,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn full_quiz_lifecycle() {
    let state = test_state().await;
    let caller = Caller::default();

    let quiz = quiz_service::create_quiz(&state, caller, quiz_request(3))
        .await
        .unwrap();
    let alpha = add_team(&state, quiz.id, "Alpha").await;
    let beta = add_team(&state, quiz.id, "Beta").await;

    // Round 1: both teams scored.
    record(&state, quiz.id, alpha, 1, 10).await;
    record(&state, quiz.id, beta, 1, 20).await;

    let status = progression_service::round_status(&state, caller, quiz.id)
        .await
        .unwrap();
    assert_eq!(status.phase, PhaseName::RoundComplete);
    assert!(status.missing.is_empty());
    assert!(status.can_advance);
    assert_eq!(status.current_round, Some(2));

    // Round 2: only Alpha scored.
    record(&state, quiz.id, alpha, 2, 5).await;

    let status = progression_service::round_status(&state, caller, quiz.id)
        .await
        .unwrap();
    assert_eq!(status.phase, PhaseName::InRound);
    assert_eq!(status.current_round, Some(2));
    assert!(!status.can_advance);
    let missing: Vec<&str> = status.missing.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(missing, vec!["Beta"]);

    // Forced advance zero-fills Beta's round 2.
    let outcome = progression_service::advance_round(&state, caller, quiz.id)
        .await
        .unwrap();
    assert_eq!(outcome.current_round, Some(3));
    let filled: Vec<&str> = outcome.zero_filled.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(filled, vec!["Beta"]);

    // Round 3 for both; the quiz completes.
    record(&state, quiz.id, alpha, 3, 7).await;
    record(&state, quiz.id, beta, 3, 9).await;

    let results = score_service::results_for_quiz(&state, caller, quiz.id)
        .await
        .unwrap();
    assert!(results.completed);

    let standings = score_service::standings_for_quiz(&state, caller, quiz.id)
        .await
        .unwrap();
    let order: Vec<(&str, u64)> = standings
        .iter()
        .map(|s| (s.team.name.as_str(), s.total_points))
        .collect();
    assert_eq!(order, vec![("Beta", 29), ("Alpha", 22)]);

    let status = progression_service::round_status(&state, caller, quiz.id)
        .await
        .unwrap();
    assert_eq!(status.phase, PhaseName::Finished);
    assert_eq!(status.current_round, None);

    // Advancing a finished quiz is a no-op.
    let outcome = progression_service::advance_round(&state, caller, quiz.id)
        .await
        .unwrap();
    assert_eq!(outcome.phase, PhaseName::Finished);
    assert!(outcome.zero_filled.is_empty());
}

#[tokio::test]
async fn future_rounds_are_closed_for_entry() {
    let state = test_state().await;
    let caller = Caller::default();

    let quiz = quiz_service::create_quiz(&state, caller, quiz_request(3))
        .await
        .unwrap();
    let alpha = add_team(&state, quiz.id, "Alpha").await;
    add_team(&state, quiz.id, "Beta").await;

    record(&state, quiz.id, alpha, 1, 10).await;

    let err = score_service::record_score(
        &state,
        caller,
        quiz.id,
        RecordScoreRequest {
            team_id: alpha,
            round: 3,
            points: 4,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidState(_)));

    // Out-of-range rounds are rejected outright.
    let err = score_service::record_score(
        &state,
        caller,
        quiz.id,
        RecordScoreRequest {
            team_id: alpha,
            round: 4,
            points: 4,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn bulk_import_assigns_numbers_in_upload_order() {
    let state = test_state().await;
    let caller = Caller::default();

    let quiz = quiz_service::create_quiz(&state, caller, quiz_request(2))
        .await
        .unwrap();

    let report = quiz_service::import_teams(
        &state,
        caller,
        quiz.id,
        "Nr;Team\n3;Gamma\n1;Alpha\n2;Beta\n",
    )
    .await
    .unwrap();

    assert_eq!(report.success_count, 3);
    assert_eq!(report.failure_count, 0);
    let numbered: Vec<(&str, u32)> = report
        .created
        .iter()
        .map(|t| (t.name.as_str(), t.team_number))
        .collect();
    // Upload order wins over the numbering column.
    assert_eq!(numbered, vec![("Gamma", 1), ("Alpha", 2), ("Beta", 3)]);
}

#[tokio::test]
async fn owner_scoping_hides_and_protects_quizzes() {
    let state = test_state().await;
    let owner = Caller {
        user_id: Some(Uuid::new_v4()),
        role: CallerRole::Organizer,
    };
    let stranger = Caller {
        user_id: Some(Uuid::new_v4()),
        role: CallerRole::Organizer,
    };
    let admin = Caller {
        user_id: Some(Uuid::new_v4()),
        role: CallerRole::Admin,
    };

    let quiz = quiz_service::create_quiz(&state, owner, quiz_request(2))
        .await
        .unwrap();

    assert!(quiz_service::list_quizzes(&state, stranger)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(quiz_service::list_quizzes(&state, admin).await.unwrap().len(), 1);

    let err = quiz_service::delete_quiz(&state, stranger, quiz.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));

    quiz_service::delete_quiz(&state, owner, quiz.id)
        .await
        .unwrap();
    let err = quiz_service::get_quiz(&state, owner, quiz.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
