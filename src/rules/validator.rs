//! Move legality checks that do not depend on game data.
//!
//! The validator answers "may this move be attempted now?": the game is
//! still running, the current phase allows the move, and the turn's move
//! limit is not exhausted. Whether the move makes sense for the board is
//! the game's call (`Game::apply_move` returning `None`).

use crate::core::{Context, GameConfig, MoveKind, Rejection};

/// Checks moves against a game configuration.
#[derive(Debug)]
pub struct MoveValidator<'a, G, M> {
    config: &'a GameConfig<G, M>,
}

impl<'a, G, M: MoveKind> MoveValidator<'a, G, M> {
    /// Create a validator over a configuration.
    #[must_use]
    pub fn new(config: &'a GameConfig<G, M>) -> Self {
        Self { config }
    }

    /// Check a move, reporting why it is refused.
    pub fn check(&self, ctx: &Context, kind: M) -> Result<(), Rejection> {
        if ctx.is_over() {
            return Err(Rejection::GameOver);
        }

        if let Some(phase) = self.config.get_phase(ctx.phase) {
            if !phase.allows(kind) {
                return Err(Rejection::MoveNotAllowed {
                    kind: kind.name(),
                    phase: ctx.phase,
                });
            }
        }

        if let Some(limit) = self.config.moves_per_turn {
            if ctx.num_moves >= limit {
                return Err(Rejection::MoveLimitReached(limit));
            }
        }

        Ok(())
    }

    /// Check whether a move may be attempted now.
    #[must_use]
    pub fn is_move_legal(&self, ctx: &Context, kind: M) -> bool {
        self.check(ctx, kind).is_ok()
    }

    /// Check whether the turn has used up its moves.
    #[must_use]
    pub fn is_turn_complete(&self, ctx: &Context) -> bool {
        self.config
            .moves_per_turn
            .is_some_and(|limit| ctx.num_moves >= limit)
    }
}
