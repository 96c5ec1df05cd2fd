//! Round progression derived from persisted scores.
//!
//! No current-round field is ever stored. The phase is reconstructed from the
//! score table on every call, so a failed write simply leaves the machine
//! where it was.

use crate::dao::models::ScoreEntity;

/// Position of a quiz in its round progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No score has been recorded yet; entry starts at round 1.
    NotStarted,
    /// Score entry is underway for `round`; `recorded` teams have a score.
    InRound {
        /// Round currently accepting entries.
        round: u32,
        /// Number of teams with a recorded score for that round.
        recorded: u32,
    },
    /// Every team has a score for `round`; an explicit operator call moves
    /// entry to the next round.
    RoundComplete {
        /// The completed round.
        round: u32,
    },
    /// The last round is complete. Advancing further is a no-op.
    Finished,
}

impl QuizPhase {
    /// Reconstruct the phase from a score snapshot.
    ///
    /// The current round is the highest round with at least one score. When
    /// its score count reaches the team count the phase is
    /// [`QuizPhase::RoundComplete`], or [`QuizPhase::Finished`] on the last
    /// round.
    pub fn derive(rounds: u32, team_count: u32, scores: &[ScoreEntity]) -> Self {
        let Some(current) = scores.iter().map(|score| score.round).max() else {
            return QuizPhase::NotStarted;
        };

        // Uniqueness on (quiz, team, round) makes this a distinct-team count.
        let recorded = scores
            .iter()
            .filter(|score| score.round == current)
            .count() as u32;

        if team_count > 0 && recorded >= team_count {
            if current >= rounds {
                QuizPhase::Finished
            } else {
                QuizPhase::RoundComplete { round: current }
            }
        } else {
            QuizPhase::InRound {
                round: current,
                recorded,
            }
        }
    }

    /// Round currently accepting new score entries, if any.
    pub fn entry_round(&self) -> Option<u32> {
        match self {
            QuizPhase::NotStarted => Some(1),
            QuizPhase::InRound { round, .. } => Some(*round),
            QuizPhase::RoundComplete { round } => Some(round + 1),
            QuizPhase::Finished => None,
        }
    }

    /// Whether an edit of `round` is allowed without moving the machine.
    ///
    /// Any round up to the entry round may be overwritten at any time. A
    /// finished quiz accepts edits for every round (bounds are validated
    /// separately against the quiz's round count).
    pub fn can_edit_round(&self, round: u32) -> bool {
        match self.entry_round() {
            Some(entry) => round <= entry,
            None => true,
        }
    }

    /// Whether the quiz has reached its terminal phase.
    pub fn is_finished(&self) -> bool {
        matches!(self, QuizPhase::Finished)
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use uuid::Uuid;

    use super::*;

    fn score(round: u32) -> ScoreEntity {
        ScoreEntity {
            id: Uuid::new_v4(),
            quiz_id: Uuid::nil(),
            team_id: Uuid::new_v4(),
            round,
            points: 1,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn no_scores_means_not_started() {
        let phase = QuizPhase::derive(3, 2, &[]);
        assert_eq!(phase, QuizPhase::NotStarted);
        assert_eq!(phase.entry_round(), Some(1));
    }

    #[test]
    fn partial_round_stays_in_round() {
        let scores = vec![score(1), score(1), score(2)];
        let phase = QuizPhase::derive(3, 2, &scores);
        assert_eq!(
            phase,
            QuizPhase::InRound {
                round: 2,
                recorded: 1
            }
        );
        assert_eq!(phase.entry_round(), Some(2));
    }

    #[test]
    fn full_round_waits_for_operator() {
        let scores = vec![score(1), score(1)];
        let phase = QuizPhase::derive(3, 2, &scores);
        assert_eq!(phase, QuizPhase::RoundComplete { round: 1 });
        // Entry moves to the next round only via the explicit advance call,
        // but the derived entry round already points there.
        assert_eq!(phase.entry_round(), Some(2));
    }

    #[test]
    fn last_round_completion_finishes_the_quiz() {
        let scores = vec![
            score(1),
            score(1),
            score(2),
            score(2),
            score(3),
            score(3),
        ];
        let phase = QuizPhase::derive(3, 2, &scores);
        assert!(phase.is_finished());
        assert_eq!(phase.entry_round(), None);
    }

    #[test]
    fn edits_allowed_up_to_entry_round() {
        let phase = QuizPhase::InRound {
            round: 2,
            recorded: 1,
        };
        assert!(phase.can_edit_round(1));
        assert!(phase.can_edit_round(2));
        assert!(!phase.can_edit_round(3));

        let complete = QuizPhase::RoundComplete { round: 2 };
        assert!(complete.can_edit_round(3));
        assert!(!complete.can_edit_round(4));

        assert!(QuizPhase::Finished.can_edit_round(3));
    }
}
