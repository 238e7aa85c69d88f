//! Player identification.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players. Wire formats carry
//! players as decimal strings (`"0"`, `"1"`, ...), so `PlayerId` parses
//! from and renders to that form as well.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum number of players a game may be configured with.
pub const MAX_PLAYERS: usize = 255;

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Build a player ID from an index, if it fits in `0..num_players`.
    #[must_use]
    pub fn from_index(index: usize, num_players: usize) -> Option<Self> {
        if index < num_players && index < MAX_PLAYERS {
            u8::try_from(index).ok().map(Self)
        } else {
            None
        }
    }

    /// Check that this player exists in a game with `num_players` players.
    #[must_use]
    pub const fn is_valid(self, num_players: usize) -> bool {
        self.index() < num_players
    }

    /// Iterate over all player IDs for a game with `num_players` players.
    ///
    /// ```
    /// use turnflow::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(num_players: usize) -> impl Iterator<Item = PlayerId> {
        (0..num_players.min(MAX_PLAYERS) as u8).map(PlayerId)
    }

    /// The wire form of this player (`"0"`, `"1"`, ...).
    #[must_use]
    pub fn wire(self) -> String {
        self.0.to_string()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u8>().map(PlayerId)
    }
}
