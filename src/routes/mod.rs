use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod health;
pub mod quiz;
pub mod round;
pub mod score;
pub mod team;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(quiz::router())
        .merge(team::router())
        .merge(score::router())
        .merge(round::router())
        .merge(docs::router())
        .with_state(state)
}
