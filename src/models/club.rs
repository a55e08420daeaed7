//! Club: the shared snapshot of players, matches and availabilities, with its write operations.

use crate::logic::{
    compute_match_result, compute_ranking, generate_round_robin, tiebreak_points, RankingRow,
};
use crate::models::availability::Availability;
use crate::models::game::{GameMatch, MatchId, MatchStatus, MatchType, Pair, Winner};
use crate::models::player::{Player, PlayerId};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Recorded by this name when nobody has selected a current player.
pub const ANONYMOUS_RECORDER: &str = "Anonymous";

/// Errors that can occur when writing to the club.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClubError {
    /// Player name is empty after trimming.
    EmptyPlayerName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    PlayerNotFound(PlayerId),
    MatchNotFound(MatchId),
    /// A team slot was left empty.
    IncompleteTeams,
    /// The same player appears twice in one match.
    DuplicatePlayerInMatch(PlayerId),
    /// A result needs a score.
    EmptyScore,
    /// Tie-breaks must name team 1 or team 2 as winner.
    TiebreakNeedsWinner,
    /// Not enough players on the roster to generate a calendar.
    NotEnoughPlayers { required: usize, available: usize },
    /// The action needs a current player and none is selected.
    NoCurrentPlayer,
}

impl std::fmt::Display for ClubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClubError::EmptyPlayerName => write!(f, "Player name cannot be empty"),
            ClubError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            ClubError::PlayerNotFound(_) => write!(f, "Player not found"),
            ClubError::MatchNotFound(_) => write!(f, "Match not found"),
            ClubError::IncompleteTeams => write!(f, "Both teams need two players"),
            ClubError::DuplicatePlayerInMatch(_) => {
                write!(f, "A player cannot appear twice in the same match")
            }
            ClubError::EmptyScore => write!(f, "Enter the score"),
            ClubError::TiebreakNeedsWinner => write!(f, "A tie-break needs a winning team"),
            ClubError::NotEnoughPlayers { required, available } => {
                write!(f, "Need at least {} players (have {})", required, available)
            }
            ClubError::NoCurrentPlayer => write!(f, "Select who you are first"),
        }
    }
}

impl std::error::Error for ClubError {}

/// Form data for a normal match result (new or edited). Team slots may be left empty by the client.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewResult {
    pub team_1: [Option<PlayerId>; 2],
    pub team_2: [Option<PlayerId>; 2],
    pub score: String,
    pub date: Option<NaiveDate>,
}

/// Form data for a tie-break.
#[derive(Clone, Debug, Deserialize)]
pub struct NewTiebreak {
    pub team_1: [Option<PlayerId>; 2],
    pub team_2: [Option<PlayerId>; 2],
    pub score: String,
    pub date: Option<NaiveDate>,
    pub winner: Winner,
}

/// Dashboard counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClubSummary {
    /// Normal matches with a score.
    pub completed: usize,
    /// Matches still waiting for a score.
    pub scheduled: usize,
}

/// Full shared state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub players: Vec<Player>,
    pub matches: Vec<GameMatch>,
    #[serde(default)]
    pub availabilities: Vec<Availability>,
}

impl Club {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Validate a trimmed name: non-empty and unique among players other than `except`.
    fn check_name(&self, name: &str, except: Option<PlayerId>) -> Result<(), ClubError> {
        if name.is_empty() {
            return Err(ClubError::EmptyPlayerName);
        }
        let lowered = name.to_lowercase();
        let is_duplicate = self
            .players
            .iter()
            .any(|p| Some(p.id) != except && p.name.trim().to_lowercase() == lowered);
        if is_duplicate {
            return Err(ClubError::DuplicatePlayerName);
        }
        Ok(())
    }

    /// Register a new player. Names are trimmed and must be unique (case-insensitive).
    pub fn register_player(
        &mut self,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<&Player, ClubError> {
        let name = name.trim();
        self.check_name(name, None)?;
        let mut player = Player::new(name);
        player.photo_url = photo_url;
        self.players.push(player);
        Ok(&self.players[self.players.len() - 1])
    }

    /// Rename a player, and replace the avatar when a new one is given.
    pub fn update_player(
        &mut self,
        id: PlayerId,
        name: &str,
        photo_url: Option<String>,
    ) -> Result<&Player, ClubError> {
        let name = name.trim();
        self.check_name(name, Some(id))?;
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(ClubError::PlayerNotFound(id))?;
        player.name = name.to_string();
        if photo_url.is_some() {
            player.photo_url = photo_url;
        }
        Ok(&*player)
    }

    /// Remove a player from the roster. Their matches and availabilities stay as they are.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<Player, ClubError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(ClubError::PlayerNotFound(id))?;
        Ok(self.players.remove(idx))
    }

    /// All four slots filled, all distinct, all on the roster.
    fn check_teams(
        &self,
        team_1: [Option<PlayerId>; 2],
        team_2: [Option<PlayerId>; 2],
    ) -> Result<(Pair, Pair), ClubError> {
        let [Some(a), Some(b)] = team_1 else {
            return Err(ClubError::IncompleteTeams);
        };
        let [Some(c), Some(d)] = team_2 else {
            return Err(ClubError::IncompleteTeams);
        };
        let mut seen = HashSet::new();
        for id in [a, b, c, d] {
            if !seen.insert(id) {
                return Err(ClubError::DuplicatePlayerInMatch(id));
            }
            if self.get_player(id).is_none() {
                return Err(ClubError::PlayerNotFound(id));
            }
        }
        Ok(([a, b], [c, d]))
    }

    /// Write teams, score and derived fields of a result into `m`, keeping its match type.
    ///
    /// A tie-break keeps its stored winner and flat points; the score is display only there.
    fn fill_result(m: &mut GameMatch, team_1: Pair, team_2: Pair, score: &str, date: NaiveDate) {
        m.team_1 = team_1;
        m.team_2 = team_2;
        m.score = score.to_string();
        m.date = date;
        m.status = MatchStatus::Completed;
        if m.is_tiebreak() {
            if let Some(winner) = m.winner {
                (m.t1_points, m.t2_points) = tiebreak_points(winner);
            }
            return;
        }
        let result = compute_match_result(Some(score));
        m.winner = result.winner;
        m.t1_points = result.t1_points;
        m.t2_points = result.t2_points;
    }

    /// Record a played normal match. Winner and points are derived from the score now.
    ///
    /// `today` is used when the form has no date; `recorded_by` is the current player's name.
    pub fn record_result(
        &mut self,
        result: NewResult,
        today: NaiveDate,
        recorded_by: Option<&str>,
    ) -> Result<&GameMatch, ClubError> {
        let (team_1, team_2) = self.check_teams(result.team_1, result.team_2)?;
        let score = result.score.trim();
        if score.is_empty() {
            return Err(ClubError::EmptyScore);
        }
        let date = result.date.unwrap_or(today);
        let mut m = GameMatch::new(team_1, team_2, date);
        Self::fill_result(&mut m, team_1, team_2, score, date);
        m.recorded_by = Some(recorded_by.unwrap_or(ANONYMOUS_RECORDER).to_string());
        self.matches.push(m);
        Ok(&self.matches[self.matches.len() - 1])
    }

    /// Overwrite a match with a new result and recompute its derived fields. A scheduled
    /// match becomes completed; round and cycle numbers and the match type are kept.
    pub fn edit_result(
        &mut self,
        id: MatchId,
        result: NewResult,
        today: NaiveDate,
        recorded_by: Option<&str>,
    ) -> Result<&GameMatch, ClubError> {
        let (team_1, team_2) = self.check_teams(result.team_1, result.team_2)?;
        let score = result.score.trim();
        if score.is_empty() {
            return Err(ClubError::EmptyScore);
        }
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ClubError::MatchNotFound(id))?;
        let date = result.date.unwrap_or(today);
        Self::fill_result(m, team_1, team_2, score, date);
        m.recorded_by = Some(recorded_by.unwrap_or(ANONYMOUS_RECORDER).to_string());
        Ok(&*m)
    }

    /// Record a tie-break. The score is kept for display only; points come from the winner.
    pub fn record_tiebreak(
        &mut self,
        tiebreak: NewTiebreak,
        today: NaiveDate,
        recorded_by: Option<&str>,
    ) -> Result<&GameMatch, ClubError> {
        let (team_1, team_2) = self.check_teams(tiebreak.team_1, tiebreak.team_2)?;
        let score = tiebreak.score.trim();
        if score.is_empty() {
            return Err(ClubError::EmptyScore);
        }
        if tiebreak.winner == Winner::Draw {
            return Err(ClubError::TiebreakNeedsWinner);
        }
        let (t1_points, t2_points) = tiebreak_points(tiebreak.winner);
        let mut m = GameMatch::new(team_1, team_2, tiebreak.date.unwrap_or(today));
        m.score = score.to_string();
        m.status = MatchStatus::Completed;
        m.match_type = MatchType::Tiebreak;
        m.winner = Some(tiebreak.winner);
        m.t1_points = t1_points;
        m.t2_points = t2_points;
        m.recorded_by = Some(recorded_by.unwrap_or(ANONYMOUS_RECORDER).to_string());
        self.matches.push(m);
        Ok(&self.matches[self.matches.len() - 1])
    }

    pub fn delete_match(&mut self, id: MatchId) -> Result<GameMatch, ClubError> {
        let idx = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or(ClubError::MatchNotFound(id))?;
        Ok(self.matches.remove(idx))
    }

    /// Generate the round-robin calendar for the first four players and append it.
    pub fn generate_tournament(&mut self, date: NaiveDate) -> Result<&[GameMatch], ClubError> {
        let generated = generate_round_robin(&self.players, date)?;
        let start = self.matches.len();
        self.matches.extend(generated);
        Ok(&self.matches[start..])
    }

    /// Flip a player's availability on `date`. Returns true if they are now available.
    pub fn toggle_availability(
        &mut self,
        date: NaiveDate,
        player_id: PlayerId,
    ) -> Result<bool, ClubError> {
        let name = self
            .get_player(player_id)
            .ok_or(ClubError::PlayerNotFound(player_id))?
            .name
            .clone();
        if let Some(idx) = self
            .availabilities
            .iter()
            .position(|a| a.date == date && a.player_id == player_id)
        {
            self.availabilities.remove(idx);
            return Ok(false);
        }
        self.availabilities
            .push(Availability::new(date, player_id, name));
        Ok(true)
    }

    pub fn summary(&self) -> ClubSummary {
        ClubSummary {
            completed: self
                .matches
                .iter()
                .filter(|m| m.has_score() && !m.is_tiebreak())
                .count(),
            scheduled: self.matches.iter().filter(|m| !m.has_score()).count(),
        }
    }

    /// Current leaderboard.
    pub fn ranking(&self) -> Vec<RankingRow> {
        compute_ranking(&self.players, &self.matches)
    }
}

/// Today's date in UTC, the default date for new matches.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
