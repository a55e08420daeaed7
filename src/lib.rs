//! Padel challenge web app: library with models, scoring rules and persistence.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    allocate_points, calendar_dates, compute_match_result, compute_ranking, days_in_month,
    format_points, generate_round_robin, missing_players, parse_score, playable_dates,
    points_history, ranking_csv, tiebreak_points, Allocation, CalendarView, MatchResult,
    PlayerProgress, RankingRow, SetTally,
};
pub use models::{
    Availability, Club, ClubError, ClubSummary, GameMatch, MatchId, MatchStatus, MatchType,
    NewResult, NewTiebreak, Player, PlayerId, Winner,
};
