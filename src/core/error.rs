//! Error types.
//!
//! - `Rejection`: why the reducer left a state unchanged. Not a fault;
//!   every invalid input degrades to a no-op carrying one of these.
//! - `ConfigError`: a game configuration that cannot be run.
//! - `SnapshotError`: a state snapshot that failed to encode or decode.

use derive_more::{Display, Error};
use tracing::instrument;

use super::action::Event;
use super::config::PhaseId;
use super::player::PlayerId;

/// Reason an action was not applied. The input state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Rejection {
    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,

    /// No move with this name exists in the game.
    #[display("Unknown move {:?}", _0)]
    UnknownMove(String),

    /// No event with this name exists.
    #[display("Unknown event {:?}", _0)]
    UnknownEvent(String),

    /// The player ID does not name a seated player.
    #[display("Invalid player {:?}", _0)]
    InvalidPlayer(String),

    /// A player other than the current player tried to move.
    #[display("It's not {}'s turn ({} is to move)", player, current)]
    NotYourTurn {
        /// The player who sent the move.
        player: PlayerId,
        /// The player whose turn it is.
        current: PlayerId,
    },

    /// The move is not in the current phase's allowed set.
    #[display("Move {} is not allowed in {}", kind, phase)]
    MoveNotAllowed {
        /// Move name.
        kind: &'static str,
        /// Phase the game is in.
        phase: PhaseId,
    },

    /// The per-turn move limit has been reached.
    #[display("Move limit of {} per turn reached", _0)]
    MoveLimitReached(u32),

    /// The game's move handler refused the move.
    #[display("Move {} is illegal in this position", _0)]
    IllegalMove(&'static str),

    /// The event is disabled in this game's configuration.
    #[display("Event {} is disabled", _0)]
    EventDisabled(Event),

    /// A phase ID that is not configured.
    #[display("Unknown phase {}", _0)]
    UnknownPhase(i64),
}

impl std::error::Error for Rejection {}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Snapshot encoding error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Snapshot error: {} at {}:{}", message, file, line)]
pub struct SnapshotError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SnapshotError {
    /// Creates a new snapshot error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<bincode::Error> for SnapshotError {
    #[track_caller]
    fn from(err: bincode::Error) -> Self {
        Self::new(format!("Bincode error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        let r = Rejection::NotYourTurn {
            player: PlayerId::new(1),
            current: PlayerId::new(0),
        };
        assert_eq!(r.to_string(), "It's not Player 1's turn (Player 0 is to move)");
        assert_eq!(Rejection::MoveLimitReached(1).to_string(), "Move limit of 1 per turn reached");
        assert_eq!(
            Rejection::UnknownMove("fly".to_string()).to_string(),
            "Unknown move \"fly\""
        );
    }

    #[test]
    fn test_config_error_tracks_location() {
        let err = ConfigError::new("no players");
        assert_eq!(err.message, "no players");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Config error: no players at "));
    }
}
