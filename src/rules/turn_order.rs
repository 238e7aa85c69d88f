//! Turn-order strategies.
//!
//! A turn order decides who plays first and who plays next:
//! - `Default`: rotate through players 0..n
//! - `Custom`: cycle through a fixed list
//! - `CustomFrom`: cycle through a list read from the game data at call
//!   time, so game effects can reorder play
//!
//! Positions always wrap modulo the length of the resolved order.

use im::Vector;
use tracing::warn;

use crate::core::{ConfigError, Context, PlayerId};

/// Accessor reading a play order out of game data.
pub struct OrderField<G> {
    /// Field name, for diagnostics.
    pub name: &'static str,
    /// Reads the order from the game data.
    pub read: fn(&G) -> Vec<PlayerId>,
}

impl<G> Clone for OrderField<G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G> Copy for OrderField<G> {}

impl<G> std::fmt::Debug for OrderField<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderField").field("name", &self.name).finish()
    }
}

/// A position in the play order and the player sitting there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seat {
    /// Index into the play order.
    pub position: usize,
    /// Player at that index.
    pub player: PlayerId,
}

/// Turn-order strategy.
///
/// ## Example
///
/// ```
/// use turnflow::core::{Context, PhaseId, PlayerId};
/// use turnflow::rules::TurnOrder;
///
/// let order: TurnOrder<()> = TurnOrder::custom([PlayerId::new(1), PlayerId::new(0)]);
/// let ctx = Context::new(2, PhaseId::default());
///
/// assert_eq!(order.first(&(), &ctx).player, PlayerId::new(1));
/// ```
#[derive(Clone, Debug)]
pub enum TurnOrder<G> {
    /// Rotate through every player in index order.
    Default,
    /// Cycle through a fixed list of players.
    Custom(Vec<PlayerId>),
    /// Cycle through a list read from game data.
    CustomFrom(OrderField<G>),
}

impl<G> TurnOrder<G> {
    /// Fixed player sequence.
    pub fn custom(players: impl IntoIterator<Item = PlayerId>) -> Self {
        TurnOrder::Custom(players.into_iter().collect())
    }

    /// Player sequence read from game data through `read`.
    pub fn custom_from(name: &'static str, read: fn(&G) -> Vec<PlayerId>) -> Self {
        TurnOrder::CustomFrom(OrderField { name, read })
    }

    /// Resolve the play order for the given game data.
    ///
    /// For `CustomFrom`, players not seated in the game are dropped, and an
    /// empty result falls back to the default rotation.
    pub fn play_order(&self, g: &G, num_players: usize) -> Vector<PlayerId> {
        match self {
            TurnOrder::Default => PlayerId::all(num_players).collect(),
            TurnOrder::Custom(players) => players.iter().copied().collect(),
            TurnOrder::CustomFrom(field) => {
                let order: Vector<PlayerId> = (field.read)(g)
                    .into_iter()
                    .filter(|p| p.is_valid(num_players))
                    .collect();
                if order.is_empty() {
                    warn!(field = field.name, "play order field is empty, using default rotation");
                    PlayerId::all(num_players).collect()
                } else {
                    order
                }
            }
        }
    }

    /// Seat that opens the game (or a phase).
    pub fn first(&self, g: &G, ctx: &Context) -> Seat {
        seat_at(&self.play_order(g, ctx.num_players), 0)
    }

    /// Seat that follows the current one.
    pub fn next(&self, g: &G, ctx: &Context) -> Seat {
        match self {
            TurnOrder::Default => {
                let n = ctx.num_players.max(1);
                let index = (ctx.current_player.index() + 1) % n;
                Seat {
                    position: index,
                    player: PlayerId::from_index(index, n).unwrap_or_default(),
                }
            }
            TurnOrder::Custom(_) | TurnOrder::CustomFrom(_) => {
                seat_at(&self.play_order(g, ctx.num_players), ctx.play_order_pos + 1)
            }
        }
    }

    /// Check a fixed order against the player count.
    ///
    /// `CustomFrom` depends on game data and is checked at call time instead.
    pub fn validate(&self, num_players: usize) -> Result<(), ConfigError> {
        if let TurnOrder::Custom(players) = self {
            if players.is_empty() {
                return Err(ConfigError::new("Custom turn order is empty"));
            }
            if let Some(p) = players.iter().find(|p| !p.is_valid(num_players)) {
                return Err(ConfigError::new(format!(
                    "Custom turn order names {} but only {} players are seated",
                    p, num_players
                )));
            }
        }
        Ok(())
    }
}

/// Seat at `position`, wrapping modulo the order length.
fn seat_at(order: &Vector<PlayerId>, position: usize) -> Seat {
    if order.is_empty() {
        return Seat {
            position: 0,
            player: PlayerId::default(),
        };
    }
    let position = position % order.len();
    Seat {
        position,
        player: order[position],
    }
}
