//! Integer action/observation encoding for tic-tac-toe.

use smallvec::smallvec;

use crate::core::MoveArgs;
use crate::env::{Bounds, Environment};

use super::game::{Board, TicTacToe, TicTacToeMove};

const CELL_SPACE: Bounds = Bounds::new(0, 8);

impl Environment for TicTacToe {
    fn action_space(&self) -> Bounds {
        CELL_SPACE
    }

    fn observation_space(&self) -> Vec<Bounds> {
        vec![Bounds::new(0, 2); 9]
    }

    fn observation(&self, g: &Board) -> Vec<i64> {
        g.cells
            .iter()
            .map(|cell| cell.map_or(0, |player| i64::from(player.0) + 1))
            .collect()
    }

    fn action(&self, raw: i64) -> Option<(TicTacToeMove, MoveArgs)> {
        CELL_SPACE
            .contains(raw)
            .then(|| (TicTacToeMove::ClickCell, smallvec![raw]))
    }

    fn enumerate(&self, g: &Board) -> Vec<i64> {
        g.empty_cells().filter_map(|id| i64::try_from(id).ok()).collect()
    }
}
