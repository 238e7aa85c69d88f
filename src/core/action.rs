//! Action representation: moves, events, and their wire form.
//!
//! An action is either a player's move (a move kind plus integer arguments)
//! or a flow event such as ending the turn. Actions are plain values; the
//! reducer decides what they do.
//!
//! Moves are identified by a closed `MoveKind` enum per game. Callers that
//! only have names (JSON, Python) build a `RawAction` and resolve it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

use super::error::Rejection;
use super::player::PlayerId;

/// Move arguments. SmallVec keeps the common 0-3 argument case off the heap.
pub type MoveArgs = SmallVec<[i64; 3]>;

/// A game's closed set of move identifiers.
///
/// Implemented by a fieldless enum listing every move the game defines.
/// `name` is the stable wire name used by `RawAction`.
pub trait MoveKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every move of the game.
    const ALL: &'static [Self];

    /// Stable wire name of this move.
    fn name(self) -> &'static str;

    /// Look up a move by wire name.
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }
}

/// Flow-control events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// End the current turn and pass to the next player.
    EndTurn,
    /// End the current phase and enter the next one.
    EndPhase,
}

impl Event {
    /// Every event.
    pub const ALL: [Event; 2] = [Event::EndTurn, Event::EndPhase];

    /// Wire name of the event.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Event::EndTurn => "endTurn",
            Event::EndPhase => "endPhase",
        }
    }

    /// Look up an event by wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed action.
///
/// ## Example
///
/// ```
/// use turnflow::core::{game_event, make_move, Action, Event, MoveKind, PlayerId};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Moves { ClickCell }
///
/// impl MoveKind for Moves {
///     const ALL: &'static [Self] = &[Moves::ClickCell];
///     fn name(self) -> &'static str { "clickCell" }
/// }
///
/// let click = make_move(Moves::ClickCell, &[4], Some(PlayerId::new(0)));
/// assert!(click.is_move());
///
/// let end: Action<Moves> = game_event(Event::EndTurn, &[]);
/// assert!(!end.is_move());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action<M> {
    /// A player's move.
    MakeMove {
        /// Which move.
        kind: M,
        /// Move arguments.
        args: MoveArgs,
        /// Sending player. `None` acts as the current player.
        player: Option<PlayerId>,
    },
    /// A flow event.
    GameEvent {
        /// Which event.
        event: Event,
        /// Event arguments.
        args: MoveArgs,
    },
}

impl<M> Action<M> {
    /// Check if this is a move.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Action::MakeMove { .. })
    }

    /// Arguments of the move or event.
    #[must_use]
    pub fn args(&self) -> &[i64] {
        match self {
            Action::MakeMove { args, .. } | Action::GameEvent { args, .. } => args,
        }
    }
}

/// Build a move action.
#[must_use]
pub fn make_move<M>(kind: M, args: &[i64], player: Option<PlayerId>) -> Action<M> {
    Action::MakeMove {
        kind,
        args: SmallVec::from_slice(args),
        player,
    }
}

/// Build an event action.
#[must_use]
pub fn game_event<M>(event: Event, args: &[i64]) -> Action<M> {
    Action::GameEvent {
        event,
        args: SmallVec::from_slice(args),
    }
}

/// An action as it arrives over the wire, with names instead of types.
///
/// ```
/// use turnflow::core::RawAction;
///
/// let raw: RawAction = serde_json::from_str(
///     r#"{"type":"MAKE_MOVE","move":"clickCell","args":[0],"playerID":"0"}"#,
/// ).unwrap();
/// assert!(matches!(raw, RawAction::MakeMove { .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RawAction {
    /// A named move.
    MakeMove {
        /// Move name.
        #[serde(rename = "move")]
        name: String,
        /// Move arguments.
        #[serde(default)]
        args: Vec<i64>,
        /// Sending player in wire form.
        #[serde(default, rename = "playerID")]
        player: Option<String>,
    },
    /// A named event.
    GameEvent {
        /// Event name.
        event: String,
        /// Event arguments.
        #[serde(default)]
        args: Vec<i64>,
    },
}

impl RawAction {
    /// Resolve names into a typed action.
    ///
    /// Unknown names and unparsable or unseated players are rejected.
    pub fn resolve<M: MoveKind>(&self, num_players: usize) -> Result<Action<M>, Rejection> {
        match self {
            RawAction::MakeMove { name, args, player } => {
                let kind = M::from_name(name).ok_or_else(|| Rejection::UnknownMove(name.clone()))?;
                let player = match player {
                    Some(raw) => {
                        let id = raw
                            .parse::<PlayerId>()
                            .map_err(|_| Rejection::InvalidPlayer(raw.clone()))?;
                        if !id.is_valid(num_players) {
                            return Err(Rejection::InvalidPlayer(raw.clone()));
                        }
                        Some(id)
                    }
                    None => None,
                };
                Ok(make_move(kind, args, player))
            }
            RawAction::GameEvent { event, args } => {
                let event = Event::from_name(event)
                    .ok_or_else(|| Rejection::UnknownEvent(event.clone()))?;
                Ok(game_event(event, args))
            }
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Training data
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord<M> {
    /// The player who was current when the action was applied.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action<M>,

    /// Turn number when action was taken.
    pub turn: u32,

    /// State ID the action produced.
    pub sequence: u64,
}

impl<M> ActionRecord<M> {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action<M>, turn: u32, sequence: u64) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
