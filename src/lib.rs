//! # turnflow
//!
//! A deterministic reducer for turn-based multiplayer games.
//!
//! ## Design Principles
//!
//! 1. **Pure Transitions**: `reduce(state, action)` never mutates its input.
//!    A rejected action leaves the caller holding the same state and a
//!    `Rejection` saying why.
//!
//! 2. **N-Player First**: Turn orders, validation and views take the
//!    player count from configuration. Only the gym adapter assumes two.
//!
//! 3. **Configuration Over Convention**: Games declare moves, phases, turn
//!    orders and move limits via `GameConfig`; the reducer enforces them.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The action log and play order use
//!   `im` vectors, so cloning a state to derive the next is cheap.
//!
//! - **Closed Move Sets**: A game's moves are an enum; handlers match on it
//!   exhaustively and configuration is validated when the reducer is built.
//!
//! ## Modules
//!
//! - `core`: Players, actions, configuration, context, state, RNG, errors
//! - `rules`: `Game` trait, turn orders, move validation
//! - `flow`: The reducer
//! - `env`: Integer action/observation adapter and gym-style environment
//! - `games`: Reference games (tic-tac-toe)

pub mod core;
pub mod env;
pub mod flow;
pub mod games;
pub mod rules;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    PlayerId,
    GameRng,
    PhaseId, PhaseConfig, EventsConfig, GameConfig,
    Action, ActionRecord, Event, MoveArgs, MoveKind, RawAction,
    Context, GameOver, State,
    ConfigError, Rejection, SnapshotError,
};

pub use crate::rules::{Game, MoveValidator, OrderField, TurnOrder};

pub use crate::flow::{GameState, Reducer};

pub use crate::env::{Bounds, Environment, GymEnv, Transition};
