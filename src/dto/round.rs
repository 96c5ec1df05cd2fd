//! DTO projections of the round progression phase.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{dto::team::TeamBriefSummary, state::progression::QuizPhase};

/// Serialized phase name.
#[derive(Debug, Clone, Copy, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseName {
    NotStarted,
    InRound,
    RoundComplete,
    Finished,
}

/// Current progression snapshot returned by the round status route.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundStatusResponse {
    /// Derived phase.
    pub phase: PhaseName,
    /// Round currently accepting entries, absent once finished.
    pub current_round: Option<u32>,
    /// Teams with a recorded score for the current round.
    pub scored: Vec<TeamBriefSummary>,
    /// Teams still missing a score for the current round.
    pub missing: Vec<TeamBriefSummary>,
    /// Whether the explicit advance call would move to the next round.
    pub can_advance: bool,
}

/// Outcome of an explicit round advance.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdvanceResponse {
    /// Phase after the advance.
    pub phase: PhaseName,
    /// Round now accepting entries, absent once finished.
    pub current_round: Option<u32>,
    /// Teams that received a zero-filled score for the closed round.
    pub zero_filled: Vec<TeamBriefSummary>,
}

impl From<&QuizPhase> for PhaseName {
    fn from(phase: &QuizPhase) -> Self {
        match phase {
            QuizPhase::NotStarted => PhaseName::NotStarted,
            QuizPhase::InRound { .. } => PhaseName::InRound,
            QuizPhase::RoundComplete { .. } => PhaseName::RoundComplete,
            QuizPhase::Finished => PhaseName::Finished,
        }
    }
}
