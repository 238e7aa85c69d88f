//! Game rules: the game definition trait, turn orders, and move validation.
//!
//! Games implement `Game` to define:
//! - Initial data and move handlers
//! - End-of-game, end-of-turn, end-of-phase conditions
//! - Per-player views of their data
//!
//! The reducer calls into `Game` but never interprets
//! game-specific data directly.

pub mod engine;
pub mod turn_order;
pub mod validator;

pub use engine::Game;
pub use turn_order::{OrderField, Seat, TurnOrder};
pub use validator::MoveValidator;
