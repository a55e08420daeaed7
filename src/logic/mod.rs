//! Challenge business logic: scoring, ranking, calendar and round-robin generation.

mod calendar;
mod points;
mod progress;
mod ranking;
mod schedule;
mod score;

pub use calendar::{
    available_players, calendar_dates, days_in_month, missing_players, playable_dates,
    CalendarView, MIN_PLAYERS_PER_MATCH,
};
pub use points::{
    allocate_points, compute_match_result, format_points, tiebreak_points, Allocation,
    MatchResult, DRAW_POINTS_PER_GAME, STRAIGHT_SET_LOSER_POINTS_PER_GAME,
    STRAIGHT_SET_WIN_POINTS, THREE_SET_LOSS_POINTS, THREE_SET_WIN_POINTS, TIEBREAK_WIN_POINTS,
};
pub use progress::{max_points, points_history, PlayerProgress};
pub use ranking::{compute_ranking, ranking_csv, RankingRow};
pub use schedule::{generate_round_robin, ROUND_ROBIN_CYCLES, ROUND_ROBIN_PLAYERS};
pub use score::{parse_score, SetTally};
