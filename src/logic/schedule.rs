//! Round-robin calendar for four players: every pairing of partners once per cycle.

use crate::models::{ClubError, GameMatch, Player};
use chrono::NaiveDate;

/// Players taking part in a generated calendar.
pub const ROUND_ROBIN_PLAYERS: usize = 4;
/// How many times the three pairings are repeated.
pub const ROUND_ROBIN_CYCLES: u32 = 2;

/// Generate the scheduled matches for the first four players of the roster.
///
/// With players `p0..p3` each cycle plays `p0+p1 v p2+p3`, `p0+p2 v p1+p3`, `p0+p3 v p1+p2`.
/// Rounds are numbered across cycles starting at 1. All matches are dated `date`.
pub fn generate_round_robin(
    players: &[Player],
    date: NaiveDate,
) -> Result<Vec<GameMatch>, ClubError> {
    if players.len() < ROUND_ROBIN_PLAYERS {
        return Err(ClubError::NotEnoughPlayers {
            required: ROUND_ROBIN_PLAYERS,
            available: players.len(),
        });
    }
    let p: Vec<_> = players[..ROUND_ROBIN_PLAYERS].iter().map(|p| p.id).collect();
    let pairings = [
        ([p[0], p[1]], [p[2], p[3]]),
        ([p[0], p[2]], [p[1], p[3]]),
        ([p[0], p[3]], [p[1], p[2]]),
    ];

    let mut matches = Vec::with_capacity(pairings.len() * ROUND_ROBIN_CYCLES as usize);
    let mut round = 1;
    for cycle in 1..=ROUND_ROBIN_CYCLES {
        for (team_1, team_2) in pairings {
            let mut m = GameMatch::new(team_1, team_2, date);
            m.round = Some(round);
            m.cycle = Some(cycle);
            matches.push(m);
            round += 1;
        }
    }
    log::info!(
        "Generated round-robin calendar: {} matches over {} cycles",
        matches.len(),
        ROUND_ROBIN_CYCLES
    );
    Ok(matches)
}
