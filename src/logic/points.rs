//! Point allocator: the competition's scoring rules applied to a parsed score.

use crate::logic::score::{parse_score, SetTally};
use crate::models::Winner;
use serde::{Deserialize, Serialize};

/// Points for a straight-set (2-0) win.
pub const STRAIGHT_SET_WIN_POINTS: f64 = 8.0;
/// Points per game won for the loser of a 2-0.
pub const STRAIGHT_SET_LOSER_POINTS_PER_GAME: f64 = 0.2;
/// Points for a 2-1 win.
pub const THREE_SET_WIN_POINTS: f64 = 6.0;
/// Points for the loser of a 2-1.
pub const THREE_SET_LOSS_POINTS: f64 = 3.0;
/// Points per game won for both sides when no 2-0 or 2-1 margin is reached.
pub const DRAW_POINTS_PER_GAME: f64 = 0.3;
/// Flat points for the winner of a tie-break; the loser gets nothing.
pub const TIEBREAK_WIN_POINTS: f64 = 2.0;

/// Points per side and the resolved winner for a parsed score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub t1_points: f64,
    pub t2_points: f64,
    pub winner: Winner,
}

/// Full result of scoring one match string.
///
/// `winner` is None only when the score was absent or empty, which is distinct from a parsed draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub t1_points: f64,
    pub t2_points: f64,
    pub winner: Option<Winner>,
    #[serde(flatten)]
    pub tally: SetTally,
}

/// Apply the scoring table. Cases are checked in order and are mutually exclusive:
///
/// | sets | team 1        | team 2        | winner |
/// |------|---------------|---------------|--------|
/// | 2-0  | 8             | 0.2 × games   | team 1 |
/// | 0-2  | 0.2 × games   | 8             | team 2 |
/// | 2-1  | 6             | 3             | team 1 |
/// | 1-2  | 3             | 6             | team 2 |
/// | else | 0.3 × games   | 0.3 × games   | draw   |
pub fn allocate_points(tally: &SetTally) -> Allocation {
    let t1_games = f64::from(tally.t1_games);
    let t2_games = f64::from(tally.t2_games);
    let (t1_points, t2_points, winner) = match (tally.t1_sets, tally.t2_sets) {
        (2, 0) => (
            STRAIGHT_SET_WIN_POINTS,
            STRAIGHT_SET_LOSER_POINTS_PER_GAME * t2_games,
            Winner::Team1,
        ),
        (0, 2) => (
            STRAIGHT_SET_LOSER_POINTS_PER_GAME * t1_games,
            STRAIGHT_SET_WIN_POINTS,
            Winner::Team2,
        ),
        (2, 1) => (THREE_SET_WIN_POINTS, THREE_SET_LOSS_POINTS, Winner::Team1),
        (1, 2) => (THREE_SET_LOSS_POINTS, THREE_SET_WIN_POINTS, Winner::Team2),
        _ => (
            DRAW_POINTS_PER_GAME * t1_games,
            DRAW_POINTS_PER_GAME * t2_games,
            Winner::Draw,
        ),
    };
    Allocation {
        t1_points,
        t2_points,
        winner,
    }
}

/// Parse and allocate in one step.
pub fn compute_match_result(score: Option<&str>) -> MatchResult {
    let score = match score {
        Some(s) if !s.is_empty() => s,
        _ => return MatchResult::default(),
    };
    let tally = parse_score(Some(score));
    let allocation = allocate_points(&tally);
    MatchResult {
        t1_points: allocation.t1_points,
        t2_points: allocation.t2_points,
        winner: Some(allocation.winner),
        tally,
    }
}

/// Flat tie-break points `(team 1, team 2)`. A tie-break has no draw, so `Draw` gives nothing.
pub fn tiebreak_points(winner: Winner) -> (f64, f64) {
    match winner {
        Winner::Team1 => (TIEBREAK_WIN_POINTS, 0.0),
        Winner::Team2 => (0.0, TIEBREAK_WIN_POINTS),
        Winner::Draw => (0.0, 0.0),
    }
}

/// Points as shown to players: one decimal place.
pub fn format_points(points: f64) -> String {
    format!("{:.1}", points)
}
