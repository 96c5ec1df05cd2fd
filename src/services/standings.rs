//! Standings and results derived from score snapshots.
//!
//! Everything here is a pure function over teams and scores. Nothing is
//! cached; callers recompute on every request.

use std::cmp::Reverse;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::dao::models::{ScoreEntity, TeamEntity};

/// A team's rank entry: summed points across all recorded rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub team_id: Uuid,
    pub team_name: String,
    pub team_number: u32,
    pub total_points: u64,
}

/// A team's detailed results row: one cell per round, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamResults {
    pub team_id: Uuid,
    pub team_name: String,
    pub team_number: u32,
    /// Index 0 holds round 1. A round without a recorded score shows 0,
    /// indistinguishable from an actual zero.
    pub points_by_round: Vec<u32>,
    pub total_points: u64,
}

/// Ranked totals: highest points first, ties broken by ascending team
/// number. Partial quizzes produce partial totals.
pub fn totals(teams: &[TeamEntity], scores: &[ScoreEntity]) -> Vec<Standing> {
    let mut sums: IndexMap<Uuid, u64> = teams.iter().map(|team| (team.id, 0)).collect();
    for score in scores {
        if let Some(sum) = sums.get_mut(&score.team_id) {
            *sum += u64::from(score.points);
        }
    }

    let mut standings: Vec<Standing> = teams
        .iter()
        .map(|team| Standing {
            team_id: team.id,
            team_name: team.name.clone(),
            team_number: team.team_number,
            total_points: sums.get(&team.id).copied().unwrap_or(0),
        })
        .collect();

    standings.sort_by_key(|standing| (Reverse(standing.total_points), standing.team_number));
    standings
}

/// Per-team round-by-round grid, every round initialized to 0 before any
/// recorded score is applied. Rows are ordered like [`totals`].
pub fn detailed_matrix(rounds: u32, teams: &[TeamEntity], scores: &[ScoreEntity]) -> Vec<TeamResults> {
    let mut rows: IndexMap<Uuid, TeamResults> = teams
        .iter()
        .map(|team| {
            (
                team.id,
                TeamResults {
                    team_id: team.id,
                    team_name: team.name.clone(),
                    team_number: team.team_number,
                    points_by_round: vec![0; rounds as usize],
                    total_points: 0,
                },
            )
        })
        .collect();

    for score in scores {
        let Some(row) = rows.get_mut(&score.team_id) else {
            continue;
        };
        // Out-of-range rounds are rejected at entry time; skip any stray row.
        if let Some(cell) = row
            .points_by_round
            .get_mut(score.round.saturating_sub(1) as usize)
        {
            *cell = score.points;
            row.total_points += u64::from(score.points);
        }
    }

    let mut results: Vec<TeamResults> = rows.into_values().collect();
    results.sort_by_key(|row| (Reverse(row.total_points), row.team_number));
    results
}

/// Count-based completion heuristic: the quiz is complete once the number
/// of recorded scores reaches `teams × rounds`. The uniqueness constraint
/// on `(quiz, team, round)` is what keeps this equivalent to full coverage.
pub fn is_completed(rounds: u32, teams: &[TeamEntity], scores: &[ScoreEntity]) -> bool {
    scores.len() >= teams.len() * rounds as usize
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    fn team(number: u32, name: &str) -> TeamEntity {
        TeamEntity {
            id: Uuid::new_v4(),
            quiz_id: Uuid::nil(),
            name: name.into(),
            team_number: number,
            created_at: SystemTime::now(),
        }
    }

    fn score(team: &TeamEntity, round: u32, points: u32) -> ScoreEntity {
        ScoreEntity {
            id: Uuid::new_v4(),
            quiz_id: team.quiz_id,
            team_id: team.id,
            round,
            points,
            created_at: SystemTime::now(),
        }
    }

    #[test]
    fn totals_conserve_points() {
        let teams = vec![team(1, "Alpha"), team(2, "Beta")];
        let scores = vec![
            score(&teams[0], 1, 10),
            score(&teams[0], 2, 5),
            score(&teams[1], 1, 20),
        ];

        let standings = totals(&teams, &scores);
        let standings_sum: u64 = standings.iter().map(|s| s.total_points).sum();
        let scores_sum: u64 = scores.iter().map(|s| u64::from(s.points)).sum();
        assert_eq!(standings_sum, scores_sum);
    }

    #[test]
    fn ties_break_by_ascending_team_number() {
        let team3 = team(3, "Gamma");
        let team1 = team(1, "Alpha");
        let team2 = team(2, "Beta");
        let scores = vec![
            score(&team3, 1, 30),
            score(&team1, 1, 30),
            score(&team2, 1, 10),
        ];

        let standings = totals(&[team3.clone(), team1.clone(), team2.clone()], &scores);
        let order: Vec<(u32, u64)> = standings
            .iter()
            .map(|s| (s.team_number, s.total_points))
            .collect();
        assert_eq!(order, vec![(1, 30), (3, 30), (2, 10)]);
    }

    #[test]
    fn matrix_zero_fills_missing_rounds() {
        let teams = vec![team(1, "Alpha"), team(2, "Beta")];
        let scores = vec![score(&teams[0], 1, 10), score(&teams[0], 3, 7)];

        let results = detailed_matrix(3, &teams, &scores);
        let alpha = results.iter().find(|r| r.team_number == 1).unwrap();
        let beta = results.iter().find(|r| r.team_number == 2).unwrap();

        assert_eq!(alpha.points_by_round, vec![10, 0, 7]);
        assert_eq!(alpha.total_points, 17);
        assert_eq!(beta.points_by_round, vec![0, 0, 0]);
        assert_eq!(beta.total_points, 0);
    }

    #[test]
    fn completion_is_count_based() {
        let teams = vec![team(1, "Alpha"), team(2, "Beta")];
        // Alpha has both rounds, Beta only round 1: three of four scores.
        let mut scores = vec![
            score(&teams[0], 1, 1),
            score(&teams[0], 2, 1),
            score(&teams[1], 1, 1),
        ];
        assert!(!is_completed(2, &teams, &scores));

        scores.push(score(&teams[1], 2, 1));
        assert!(is_completed(2, &teams, &scores));
    }

    #[test]
    fn empty_quiz_with_no_teams_counts_as_complete() {
        assert!(is_completed(3, &[], &[]));
    }
}
