//! Data structures for the padel challenge: players, matches, availabilities, club state.

mod availability;
mod club;
mod game;
mod player;

pub use availability::Availability;
pub use club::{today, Club, ClubError, ClubSummary, NewResult, NewTiebreak, ANONYMOUS_RECORDER};
pub use game::{GameMatch, MatchId, MatchStatus, MatchType, Pair, Winner};
pub use player::{Player, PlayerId};
