//! Player profile.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches, availabilities and lookups).
pub type PlayerId = Uuid;

/// A member of the friend group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Small encoded avatar image (e.g. a JPEG data URL, at most 300px wide). Compression happens client side.
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl Player {
    /// Create a new player with the given name and no avatar.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            photo_url: None,
        }
    }
}
