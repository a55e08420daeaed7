//! Calendar: which days are listed, who is available, and which days have enough players.

use crate::models::{Availability, Player, PlayerId};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A padel match needs four players.
pub const MIN_PLAYERS_PER_MATCH: usize = 4;

/// Which month the calendar shows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarView {
    /// Remaining days of the current month, today included.
    #[default]
    Current,
    /// Every day of the following month.
    Next,
}

/// All days of `month` (1-12) in `year`. Empty for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect()
}

/// Days listed by `view`, relative to `today`.
pub fn calendar_dates(view: CalendarView, today: NaiveDate) -> Vec<NaiveDate> {
    match view {
        CalendarView::Current => days_in_month(today.year(), today.month())
            .into_iter()
            .filter(|d| *d >= today)
            .collect(),
        CalendarView::Next => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            days_in_month(year, month)
        }
    }
}

/// Ids of players available on `date`, in the order they said so.
pub fn available_players(date: NaiveDate, availabilities: &[Availability]) -> Vec<PlayerId> {
    availabilities
        .iter()
        .filter(|a| a.date == date)
        .map(|a| a.player_id)
        .collect()
}

/// Days among `dates` on which at least four players are available.
pub fn playable_dates(dates: &[NaiveDate], availabilities: &[Availability]) -> Vec<NaiveDate> {
    dates
        .iter()
        .copied()
        .filter(|d| available_players(*d, availabilities).len() >= MIN_PLAYERS_PER_MATCH)
        .collect()
}

/// Players who have not marked themselves available on any of `dates`.
pub fn missing_players<'a>(
    players: &'a [Player],
    availabilities: &[Availability],
    dates: &[NaiveDate],
) -> Vec<&'a Player> {
    let dates: HashSet<NaiveDate> = dates.iter().copied().collect();
    let available: HashSet<PlayerId> = availabilities
        .iter()
        .filter(|a| dates.contains(&a.date))
        .map(|a| a.player_id)
        .collect();
    players
        .iter()
        .filter(|p| !available.contains(&p.id))
        .collect()
}
