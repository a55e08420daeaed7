//! Points history: each player's cumulative points after every completed match, in date order.

use crate::logic::points::{compute_match_result, tiebreak_points};
use crate::models::{GameMatch, MatchStatus, Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Cumulative point series for one player. `points[0]` is always 0; entry `i` is the total
/// after the `i`-th completed match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub player_id: PlayerId,
    pub name: String,
    pub points: Vec<f64>,
}

/// Build the history for every player over completed matches sorted by date.
///
/// Matches on the same date keep their input order. Players not in a match carry their
/// previous total forward, so all series have the same length.
pub fn points_history(players: &[Player], matches: &[GameMatch]) -> Vec<PlayerProgress> {
    let mut completed: Vec<&GameMatch> = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Completed)
        .collect();
    completed.sort_by_key(|m| m.date);

    let mut history: Vec<PlayerProgress> = players
        .iter()
        .map(|p| {
            let mut points = Vec::with_capacity(completed.len() + 1);
            points.push(0.0);
            PlayerProgress {
                player_id: p.id,
                name: p.name.clone(),
                points,
            }
        })
        .collect();

    for m in completed {
        let (t1, t2) = match_points(m);
        for entry in &mut history {
            let mut total = entry.points.last().copied().unwrap_or_default();
            if m.team_1.contains(&entry.player_id) {
                total += t1;
            }
            if m.team_2.contains(&entry.player_id) {
                total += t2;
            }
            entry.points.push(total);
        }
    }
    history
}

fn match_points(m: &GameMatch) -> (f64, f64) {
    if m.is_tiebreak() {
        m.winner.map(tiebreak_points).unwrap_or((0.0, 0.0))
    } else {
        let r = compute_match_result(Some(m.score.as_str()));
        (r.t1_points, r.t2_points)
    }
}

/// Highest cumulative total reached by anyone, at least `floor`. Used to scale charts.
pub fn max_points(history: &[PlayerProgress], floor: f64) -> f64 {
    history
        .iter()
        .flat_map(|p| p.points.iter().copied())
        .fold(floor, f64::max)
}
