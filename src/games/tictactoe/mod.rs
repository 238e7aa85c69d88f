//! Tic-tac-toe for exercising the reducer and the environment adapter.
//!
//! - Two players, one move per turn
//! - `clickCell(id)` claims an empty cell for the current player
//! - Three in a row wins; a full board without a line is a draw
//!
//! Integer actions 0..=8 are cell ids. Observations encode each cell as
//! 0 (empty) or the owner's index + 1.

mod env;
mod game;

pub use game::{Board, TicTacToe, TicTacToeMove, LINES};
