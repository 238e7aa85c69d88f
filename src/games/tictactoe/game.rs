//! Tic-tac-toe rules.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::core::{ConfigError, Context, GameConfig, GameOver, MoveKind, PlayerId};
use crate::flow::Reducer;
use crate::rules::Game;

/// Winning lines as cell ids.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The 3x3 board, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Owner of each cell, `None` when empty.
    pub cells: [Option<PlayerId>; 9],
}

impl Board {
    /// Empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `player` holds a full line.
    #[instrument(skip(self))]
    pub fn has_line(&self, player: PlayerId) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&cell| self.cells[cell] == Some(player)))
    }

    /// Check if every cell is taken.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Ids of empty cells.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(id, _)| id)
    }
}

/// Tic-tac-toe moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicTacToeMove {
    /// Claim the cell given as the first argument.
    ClickCell,
}

impl MoveKind for TicTacToeMove {
    const ALL: &'static [Self] = &[TicTacToeMove::ClickCell];

    fn name(self) -> &'static str {
        match self {
            TicTacToeMove::ClickCell => "clickCell",
        }
    }
}

/// Tic-tac-toe game definition.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Two players, one move per turn.
    #[must_use]
    pub fn config() -> GameConfig<Board, TicTacToeMove> {
        GameConfig::new(2).with_moves_per_turn(1)
    }

    /// Reducer over the standard configuration.
    pub fn reducer() -> Result<Reducer<Self>, ConfigError> {
        Reducer::new(TicTacToe, Self::config())
    }
}

impl Game for TicTacToe {
    type Data = Board;
    type Move = TicTacToeMove;

    fn name(&self) -> &str {
        "tic-tac-toe"
    }

    fn setup(&self, _ctx: &Context) -> Board {
        Board::new()
    }

    fn apply_move(
        &self,
        kind: TicTacToeMove,
        g: &Board,
        ctx: &Context,
        args: &[i64],
    ) -> Option<Board> {
        match kind {
            TicTacToeMove::ClickCell => {
                let id = usize::try_from(*args.first()?).ok()?;
                if g.cells.get(id)?.is_some() {
                    return None;
                }
                let mut board = g.clone();
                board.cells[id] = Some(ctx.current_player);
                Some(board)
            }
        }
    }

    fn end_game_if(&self, g: &Board, ctx: &Context) -> Option<GameOver> {
        if g.has_line(ctx.current_player) {
            Some(GameOver::Winner(ctx.current_player))
        } else if g.is_full() {
            Some(GameOver::Draw)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{make_move, Rejection};

    fn click(cell: i64, player: u8) -> crate::core::Action<TicTacToeMove> {
        make_move(TicTacToeMove::ClickCell, &[cell], Some(PlayerId::new(player)))
    }

    #[test]
    fn test_lines() {
        let mut board = Board::new();
        for cell in [2, 4, 6] {
            board.cells[cell] = Some(PlayerId::new(1));
        }
        assert!(board.has_line(PlayerId::new(1)));
        assert!(!board.has_line(PlayerId::new(0)));
        assert!(!board.is_full());
        assert_eq!(board.empty_cells().count(), 6);
    }

    #[test]
    fn test_click_claims_cell() {
        let reducer = TicTacToe::reducer().unwrap();
        let state = reducer.initial_state();

        let next = reducer.reduce(&state, &click(4, 0)).unwrap();
        assert_eq!(next.g.cells[4], Some(PlayerId::new(0)));
        assert_eq!(next.ctx.num_moves, 1);
        // Turn does not pass until endTurn
        assert_eq!(next.ctx.current_player, PlayerId::new(0));
    }

    #[test]
    fn test_click_rejections() {
        let reducer = TicTacToe::reducer().unwrap();
        let state = reducer.initial_state();

        let mut taken = state.clone();
        taken.g.cells[0] = Some(PlayerId::new(1));
        assert!(matches!(reducer.reduce(&taken, &click(0, 0)), Err(Rejection::IllegalMove(_))));

        assert!(matches!(reducer.reduce(&state, &click(9, 0)), Err(Rejection::IllegalMove(_))));
        assert!(matches!(reducer.reduce(&state, &click(-1, 0)), Err(Rejection::IllegalMove(_))));

        let no_args = make_move(TicTacToeMove::ClickCell, &[], None);
        assert!(matches!(reducer.reduce(&state, &no_args), Err(Rejection::IllegalMove(_))));
    }

    #[test]
    fn test_one_move_per_turn() {
        let reducer = TicTacToe::reducer().unwrap();
        let state = reducer.initial_state();

        let next = reducer.reduce(&state, &click(0, 0)).unwrap();
        assert_eq!(
            reducer.reduce(&next, &click(1, 0)),
            Err(Rejection::MoveLimitReached(1))
        );
    }

    #[test]
    fn test_move_name() {
        assert_eq!(TicTacToeMove::ClickCell.name(), "clickCell");
        assert_eq!(TicTacToeMove::from_name("clickCell"), Some(TicTacToeMove::ClickCell));
        assert_eq!(TicTacToeMove::from_name("click"), None);
    }
}
