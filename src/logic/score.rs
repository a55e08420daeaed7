//! Score parser: turns a freeform set-score string into per-set game counts.

use serde::{Deserialize, Serialize};

/// Games and sets won by each side, summed over every valid set token.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetTally {
    pub t1_games: u32,
    pub t2_games: u32,
    pub t1_sets: u32,
    pub t2_sets: u32,
}

/// Parse a score string such as `"6-4 3-6 7-5"`.
///
/// The input is trimmed and split on runs of whitespace. A token counts only when it splits on
/// `-` into exactly two parts that both start with an integer; anything else is skipped.
/// Parts are read leniently: `"6x"` reads as 6 and `"0x10"` as 16. A set with equal games
/// (`"6-6"`) adds to the game totals but to neither set counter. Absent or blank input gives an
/// all-zero tally.
pub fn parse_score(score: Option<&str>) -> SetTally {
    let mut tally = SetTally::default();
    let Some(score) = score else {
        return tally;
    };

    for token in score.split_whitespace() {
        let Some((g1, g2)) = parse_set(token) else {
            continue;
        };
        tally.t1_games = tally.t1_games.saturating_add(g1);
        tally.t2_games = tally.t2_games.saturating_add(g2);
        if g1 > g2 {
            tally.t1_sets += 1;
        } else if g2 > g1 {
            tally.t2_sets += 1;
        }
    }
    tally
}

/// One `<int>-<int>` token, or None if it does not have that shape.
fn parse_set(token: &str) -> Option<(u32, u32)> {
    let mut parts = token.split('-');
    let first = parts.next()?;
    let second = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((leading_int(first)?, leading_int(second)?))
}

/// Read the integer at the start of `part`, ignoring whatever follows it.
///
/// An optional leading `+` is accepted, and a `0x`/`0X` prefix switches to hexadecimal
/// (`"0x10"` reads as 16). Values too large for `u32` saturate.
fn leading_int(part: &str) -> Option<u32> {
    let unsigned = part.strip_prefix('+').unwrap_or(part);
    match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => prefix_value(hex, 16),
        None => prefix_value(unsigned, 10),
    }
}

/// Value of the leading run of `radix` digits, or None if there is none.
fn prefix_value(s: &str, radix: u32) -> Option<u32> {
    let digits: Vec<u32> = s.chars().map_while(|c| c.to_digit(radix)).collect();
    if digits.is_empty() {
        return None;
    }
    Some(
        digits
            .into_iter()
            .fold(0u32, |acc, d| acc.saturating_mul(radix).saturating_add(d)),
    )
}
