//! Match (game), Winner, status and type for 2v2 padel matches.

use crate::models::player::PlayerId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Two player ids: every match is played 2v2.
pub type Pair = [PlayerId; 2];

/// Resolved outcome of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Team1,
    Team2,
    Draw,
}

/// Whether a match has been played yet.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Generated by the round-robin calendar, no score yet.
    Scheduled,
    #[default]
    Completed,
}

/// Standard multi-set match or a single tie-break contest worth a flat 2 points.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    #[default]
    Normal,
    Tiebreak,
}

/// A single 2v2 match.
///
/// `winner`, `t1_points` and `t2_points` are derived from `score` when the match is written
/// and are stored alongside it; the ranking recomputes normal matches from `score` instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub date: NaiveDate,
    pub team_1: Pair,
    pub team_2: Pair,
    /// Whitespace-separated set tokens such as `"6-4 3-6 7-5"`. Empty while scheduled.
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(rename = "type", default)]
    pub match_type: MatchType,
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub t1_points: f64,
    #[serde(default)]
    pub t2_points: f64,
    /// Position in a generated round-robin calendar (1-based).
    #[serde(default)]
    pub round: Option<u32>,
    /// Which repetition of the round-robin this match belongs to (1-based).
    #[serde(default)]
    pub cycle: Option<u32>,
    #[serde(default)]
    pub recorded_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GameMatch {
    /// A scheduled normal match with no score.
    pub fn new(team_1: Pair, team_2: Pair, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            team_1,
            team_2,
            score: String::new(),
            status: MatchStatus::Scheduled,
            match_type: MatchType::Normal,
            winner: None,
            t1_points: 0.0,
            t2_points: 0.0,
            round: None,
            cycle: None,
            recorded_by: None,
            created_at: Utc::now(),
        }
    }

    /// True when the score string is not empty. Whitespace counts as a (0-0) score.
    pub fn has_score(&self) -> bool {
        !self.score.is_empty()
    }

    pub fn is_tiebreak(&self) -> bool {
        self.match_type == MatchType::Tiebreak
    }

    /// Whether this match takes part in the ranking: it has a score and is not merely scheduled.
    pub fn counts_for_ranking(&self) -> bool {
        self.has_score() && self.status != MatchStatus::Scheduled
    }

    /// All four player ids, team 1 first.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.team_1.iter().chain(self.team_2.iter()).copied()
    }
}
