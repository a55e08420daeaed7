//! Availability: "this player can play on this date".

use crate::models::player::PlayerId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A (date, player) pair. Created and removed by toggling, never edited.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    pub id: Uuid,
    pub date: NaiveDate,
    pub player_id: PlayerId,
    /// Name at the time the availability was given, kept for display after renames or deletion.
    pub player_name: String,
}

impl Availability {
    pub fn new(date: NaiveDate, player_id: PlayerId, player_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            player_id,
            player_name: player_name.into(),
        }
    }
}
