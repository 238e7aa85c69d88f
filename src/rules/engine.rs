//! Game definition trait for game implementations.
//!
//! Games implement `Game` to define their rules:
//! - Initial data (`setup`)
//! - How each move changes the data
//! - When the game, a turn, or a phase ends
//! - What each player is allowed to see

use std::fmt::Debug;

use crate::core::{Context, GameOver, MoveKind, PlayerId};

/// Game definition trait.
///
/// Games implement this trait to define their rules. The reducer calls
/// these methods; it never interprets game data itself.
///
/// ## Implementation Notes
///
/// - `apply_move`: Return `None` to refuse a move. Must be pure; the
///   reducer relies on it for replay.
/// - `end_game_if`: Return `None` while the game continues
/// - Moves are matched exhaustively on `Self::Move`, so every move the
///   game declares has a handler
pub trait Game {
    /// Game-specific data (the `G` of a state).
    type Data: Clone + Debug + PartialEq;

    /// Closed set of moves.
    type Move: MoveKind;

    /// Game name.
    fn name(&self) -> &str;

    /// Build the initial game data.
    fn setup(&self, ctx: &Context) -> Self::Data;

    /// Apply a move, returning the new data or `None` if the move is illegal.
    fn apply_move(
        &self,
        kind: Self::Move,
        g: &Self::Data,
        ctx: &Context,
        args: &[i64],
    ) -> Option<Self::Data>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn end_game_if(&self, _g: &Self::Data, _ctx: &Context) -> Option<GameOver> {
        None
    }

    /// Check if the current turn should end automatically after a move.
    fn end_turn_if(&self, _g: &Self::Data, _ctx: &Context) -> bool {
        false
    }

    /// Check if the current phase should end automatically after a move.
    fn end_phase_if(&self, _g: &Self::Data, _ctx: &Context) -> bool {
        false
    }

    /// Data as seen by `player` (`None` for a spectator).
    ///
    /// Games with hidden information strip it here. Defaults to full data.
    fn player_view(&self, g: &Self::Data, _ctx: &Context, _player: Option<PlayerId>) -> Self::Data {
        g.clone()
    }
}
