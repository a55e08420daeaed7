//! Ranking aggregator: folds every played match into per-player standings.

use crate::logic::points::{compute_match_result, format_points, tiebreak_points};
use crate::models::{GameMatch, Player, PlayerId, Winner};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One player's accumulated statistics across all played matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingRow {
    pub player_id: PlayerId,
    pub name: String,
    pub photo_url: Option<String>,
    pub points: f64,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub tie_breaks_won: u32,
    pub tie_breaks_lost: u32,
}

impl RankingRow {
    fn for_player(p: &Player) -> Self {
        Self {
            player_id: p.id,
            name: p.name.clone(),
            photo_url: p.photo_url.clone(),
            ..Self::default()
        }
    }

    /// Games won minus games lost.
    pub fn game_difference(&self) -> i64 {
        i64::from(self.games_won) - i64::from(self.games_lost)
    }
}

/// What one side of a match contributes to each of its players.
struct SideContribution {
    points: f64,
    games_won: u32,
    games_lost: u32,
    outcome: SideOutcome,
}

#[derive(Clone, Copy)]
enum SideOutcome {
    Won,
    Lost,
    Drew,
}

/// Compute the leaderboard from scratch.
///
/// Every known player gets a row, even with nothing played. Matches count when they have a
/// score and are not scheduled. Ids of players no longer in `players` are skipped. Rows are
/// ordered by points (descending), then game difference (descending), then name; the sort is
/// stable so rows still equal keep roster order.
pub fn compute_ranking(players: &[Player], matches: &[GameMatch]) -> Vec<RankingRow> {
    let mut rows: Vec<RankingRow> = players.iter().map(RankingRow::for_player).collect();
    let index: HashMap<PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    let mut counted = 0usize;
    for m in matches.iter().filter(|m| m.counts_for_ranking()) {
        let Some((side_1, side_2)) = contributions(m) else {
            continue;
        };
        counted += 1;
        let tiebreak = m.is_tiebreak();
        for (team, side) in [(&m.team_1, &side_1), (&m.team_2, &side_2)] {
            for pid in team {
                if let Some(&i) = index.get(pid) {
                    apply(&mut rows[i], side, tiebreak);
                }
            }
        }
    }
    log::debug!(
        "ranking recomputed: {} players, {} of {} matches counted",
        rows.len(),
        counted,
        matches.len()
    );

    rows.sort_by(compare_rows);
    rows
}

/// Ordering used by the leaderboard: best first.
fn compare_rows(a: &RankingRow, b: &RankingRow) -> Ordering {
    b.points
        .total_cmp(&a.points)
        .then_with(|| b.game_difference().cmp(&a.game_difference()))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Per-side contributions of a match, or None for a tie-break without a recorded team winner.
fn contributions(m: &GameMatch) -> Option<(SideContribution, SideContribution)> {
    let (t1_points, t2_points, t1_games, t2_games, winner) = if m.is_tiebreak() {
        let winner = match m.winner {
            Some(w @ (Winner::Team1 | Winner::Team2)) => w,
            _ => return None,
        };
        let (t1, t2) = tiebreak_points(winner);
        (t1, t2, 0, 0, winner)
    } else {
        let result = compute_match_result(Some(m.score.as_str()));
        (
            result.t1_points,
            result.t2_points,
            result.tally.t1_games,
            result.tally.t2_games,
            result.winner.unwrap_or(Winner::Draw),
        )
    };
    let (o1, o2) = match winner {
        Winner::Team1 => (SideOutcome::Won, SideOutcome::Lost),
        Winner::Team2 => (SideOutcome::Lost, SideOutcome::Won),
        Winner::Draw => (SideOutcome::Drew, SideOutcome::Drew),
    };
    Some((
        SideContribution {
            points: t1_points,
            games_won: t1_games,
            games_lost: t2_games,
            outcome: o1,
        },
        SideContribution {
            points: t2_points,
            games_won: t2_games,
            games_lost: t1_games,
            outcome: o2,
        },
    ))
}

fn apply(row: &mut RankingRow, side: &SideContribution, tiebreak: bool) {
    row.points += side.points;
    row.played += 1;
    row.games_won = row.games_won.saturating_add(side.games_won);
    row.games_lost = row.games_lost.saturating_add(side.games_lost);
    match (side.outcome, tiebreak) {
        (SideOutcome::Won, false) => row.wins += 1,
        (SideOutcome::Lost, false) => row.losses += 1,
        (SideOutcome::Won, true) => row.tie_breaks_won += 1,
        (SideOutcome::Lost, true) => row.tie_breaks_lost += 1,
        (SideOutcome::Drew, _) => row.draws += 1,
    }
}

/// Render the leaderboard as CSV, points to one decimal place.
pub fn ranking_csv(rows: &[RankingRow]) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "position",
        "name",
        "points",
        "played",
        "wins",
        "draws",
        "losses",
        "games_won",
        "games_lost",
        "tie_breaks_won",
        "tie_breaks_lost",
    ])?;
    for (i, row) in rows.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            row.name.clone(),
            format_points(row.points),
            row.played.to_string(),
            row.wins.to_string(),
            row.draws.to_string(),
            row.losses.to_string(),
            row.games_won.to_string(),
            row.games_lost.to_string(),
            row.tie_breaks_won.to_string(),
            row.tie_breaks_lost.to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
