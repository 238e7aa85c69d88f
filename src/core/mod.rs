//! Core engine types: players, actions, context, state, RNG, configuration.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games configure these via `GameConfig` rather than modifying the core.

pub mod player;
pub mod action;
pub mod config;
pub mod context;
pub mod state;
pub mod rng;
pub mod error;

pub use player::{PlayerId, MAX_PLAYERS};
pub use action::{game_event, make_move, Action, ActionRecord, Event, MoveArgs, MoveKind, RawAction};
pub use config::{EventsConfig, GameConfig, PhaseConfig, PhaseId};
pub use context::{Context, GameOver};
pub use state::State;
pub use rng::GameRng;
pub use error::{ConfigError, Rejection, SnapshotError};
