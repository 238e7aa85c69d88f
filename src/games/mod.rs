//! Reference games built on the reducer.

pub mod tictactoe;
