//! Environment adapter: drives a reducer one integer action at a time.
//!
//! Built purely on the reducer contract. An `Environment` game maps
//! integer actions to moves and game data to integer observations; `step`
//! applies one action for a player and ends their turn.
//!
//! ## Example
//!
//! ```
//! use turnflow::core::PlayerId;
//! use turnflow::env::{step, Environment};
//! use turnflow::games::tictactoe::TicTacToe;
//!
//! let reducer = TicTacToe::reducer().unwrap();
//! let state = reducer.initial_state();
//!
//! let state = step(&reducer, &state, 4, PlayerId::new(0));
//! assert_eq!(reducer.game().observation(&state.g)[4], 1);
//! assert_eq!(state.ctx.current_player, PlayerId::new(1));
//! ```

pub mod gym;

pub use gym::{GymEnv, Transition};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{game_event, make_move, Event, MoveArgs, PlayerId};
use crate::flow::{GameState, Reducer};
use crate::rules::Game;

/// Inclusive integer range of a space dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest value.
    pub low: i64,
    /// Largest value.
    pub high: i64,
}

impl Bounds {
    /// Create bounds `[low, high]`.
    #[must_use]
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    /// Number of values in the range.
    #[must_use]
    pub fn size(&self) -> usize {
        if self.high < self.low {
            return 0;
        }
        self.high
            .checked_sub(self.low)
            .and_then(|span| span.checked_add(1))
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or(usize::MAX)
    }

    /// Check if a value lies in the range.
    #[must_use]
    pub fn contains(&self, value: i64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Per-dimension lows and highs of a multi-dimensional space.
    #[must_use]
    pub fn unzip(spaces: &[Bounds]) -> (Vec<i64>, Vec<i64>) {
        spaces.iter().map(|space| (space.low, space.high)).unzip()
    }
}

/// A game that can be driven by integer actions.
pub trait Environment: Game {
    /// Range of integer actions.
    fn action_space(&self) -> Bounds;

    /// Range of each observation dimension.
    fn observation_space(&self) -> Vec<Bounds>;

    /// Encode game data as an observation.
    fn observation(&self, g: &Self::Data) -> Vec<i64>;

    /// Convert an integer action into a move. `None` if it maps to no move.
    fn action(&self, raw: i64) -> Option<(Self::Move, MoveArgs)>;

    /// Integer actions that would be accepted for this game data.
    fn enumerate(&self, g: &Self::Data) -> Vec<i64>;
}

/// Apply `raw` as `player`'s move, then end the turn.
///
/// Total: a refused move still ends the turn, and after the game is over
/// the state comes back unchanged.
pub fn step<E: Environment>(
    reducer: &Reducer<E>,
    state: &GameState<E>,
    raw: i64,
    player: PlayerId,
) -> GameState<E> {
    let moved = match reducer.game().action(raw) {
        Some((kind, args)) => {
            reducer.reduce_or_keep(state, &make_move(kind, &args, Some(player)))
        }
        None => {
            debug!(raw, "action outside the action space");
            state.clone()
        }
    };
    reducer.reduce_or_keep(&moved, &game_event(Event::EndTurn, &[]))
}

/// Observation of `state` from `player`'s view.
pub fn observe<E: Environment>(
    reducer: &Reducer<E>,
    state: &GameState<E>,
    player: PlayerId,
) -> Vec<i64> {
    let game = reducer.game();
    game.observation(&game.player_view(&state.g, &state.ctx, Some(player)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let space = Bounds::new(0, 8);
        assert_eq!(space.size(), 9);
        assert!(space.contains(0));
        assert!(space.contains(8));
        assert!(!space.contains(9));
        assert!(!space.contains(-1));

        assert_eq!(Bounds::new(3, 2).size(), 0);
        assert_eq!(Bounds::new(-2, 2).size(), 5);
    }

    #[test]
    fn test_bounds_size_saturates() {
        assert_eq!(Bounds::new(i64::MIN, i64::MAX).size(), usize::MAX);
        assert_eq!(Bounds::new(0, i64::MAX).size(), usize::MAX);
        assert_eq!(Bounds::new(i64::MIN, -1).size(), usize::MAX);
    }

    #[test]
    fn test_bounds_unzip() {
        let spaces = [Bounds::new(0, 2), Bounds::new(-1, 5), Bounds::new(3, 3)];
        let (low, high) = Bounds::unzip(&spaces);
        assert_eq!(low, vec![0, -1, 3]);
        assert_eq!(high, vec![2, 5, 3]);

        assert_eq!(Bounds::unzip(&[]), (vec![], vec![]));
    }

    #[test]
    fn test_bounds_serialization() {
        let json = serde_json::to_string(&Bounds::new(0, 2)).unwrap();
        assert_eq!(json, r#"{"low":0,"high":2}"#);
    }
}
