//! Flow control: the reducer that turns actions into new states.
//!
//! Owns turn advancement, phase changes, and end-of-game detection.
//! Games never advance turns themselves; they describe when turns end and
//! the reducer does the bookkeeping.

pub mod reducer;

pub use reducer::{GameState, Reducer};
