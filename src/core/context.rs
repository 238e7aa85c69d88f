//! Control-flow context: whose turn it is, which phase, and whether the
//! game has ended.
//!
//! The context is owned by the reducer. Game code reads it (move handlers,
//! end conditions, turn orders) but never writes it.

use im::Vector;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::config::PhaseId;
use super::player::PlayerId;

/// Result of a completed game.
///
/// Human-readable formats use the wire shapes `{"winner":"0"}`,
/// `{"draw":true}` and `{"winners":["0","2"]}`. Binary formats use a
/// plain enum encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameOver {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<PlayerId>),
}

impl GameOver {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameOver::Winner(p) => *p == player,
            GameOver::Winners(ps) => ps.contains(&player),
            GameOver::Draw => false,
        }
    }

    /// Check if the game ended without a winner.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        matches!(self, GameOver::Draw)
    }
}

#[derive(Serialize, Deserialize)]
struct OutcomeWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winner: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    draw: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    winners: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize)]
enum OutcomeBinary {
    Winner(PlayerId),
    Draw,
    Winners(Vec<PlayerId>),
}

impl From<&GameOver> for OutcomeWire {
    fn from(result: &GameOver) -> Self {
        let mut wire = OutcomeWire {
            winner: None,
            draw: false,
            winners: None,
        };
        match result {
            GameOver::Winner(p) => wire.winner = Some(p.wire()),
            GameOver::Draw => wire.draw = true,
            GameOver::Winners(ps) => wire.winners = Some(ps.iter().map(|p| p.wire()).collect()),
        }
        wire
    }
}

impl TryFrom<OutcomeWire> for GameOver {
    type Error = String;

    fn try_from(wire: OutcomeWire) -> Result<Self, Self::Error> {
        let parse = |raw: &str| {
            raw.parse::<PlayerId>()
                .map_err(|_| format!("invalid player id {raw:?}"))
        };
        match (wire.winner, wire.winners, wire.draw) {
            (Some(winner), None, false) => Ok(GameOver::Winner(parse(&winner)?)),
            (None, Some(winners), false) => winners
                .iter()
                .map(|raw| parse(raw))
                .collect::<Result<Vec<_>, _>>()
                .map(GameOver::Winners),
            (None, None, true) => Ok(GameOver::Draw),
            _ => Err("game result must name exactly one of winner, winners or draw".to_string()),
        }
    }
}

impl Serialize for GameOver {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            return OutcomeWire::from(self).serialize(serializer);
        }
        match self.clone() {
            GameOver::Winner(p) => OutcomeBinary::Winner(p),
            GameOver::Draw => OutcomeBinary::Draw,
            GameOver::Winners(ps) => OutcomeBinary::Winners(ps),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameOver {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let wire = OutcomeWire::deserialize(deserializer)?;
            return GameOver::try_from(wire).map_err(D::Error::custom);
        }
        Ok(match OutcomeBinary::deserialize(deserializer)? {
            OutcomeBinary::Winner(p) => GameOver::Winner(p),
            OutcomeBinary::Draw => GameOver::Draw,
            OutcomeBinary::Winners(ps) => GameOver::Winners(ps),
        })
    }
}

/// Flow context.
///
/// Uses `im` persistent vectors so cloning a context is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    /// Number of seated players.
    pub num_players: usize,

    /// Turn number (starts at 1).
    pub turn: u32,

    /// Player whose turn it is.
    pub current_player: PlayerId,

    /// Resolved player sequence for the current turn.
    pub play_order: Vector<PlayerId>,

    /// Index of `current_player` in `play_order`.
    pub play_order_pos: usize,

    /// Current phase.
    pub phase: PhaseId,

    /// Moves accepted so far this turn.
    pub num_moves: u32,

    /// Set once the game has ended.
    pub gameover: Option<GameOver>,
}

impl Context {
    /// Create a fresh context before setup.
    ///
    /// ## Defaults
    ///
    /// - `current_player`: Player 0
    /// - `play_order`: 0..num_players
    /// - `turn`: 1
    #[must_use]
    pub fn new(num_players: usize, phase: PhaseId) -> Self {
        Self {
            num_players,
            turn: 1,
            current_player: PlayerId::new(0),
            play_order: PlayerId::all(num_players).collect(),
            play_order_pos: 0,
            phase,
            num_moves: 0,
            gameover: None,
        }
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.gameover.is_some()
    }

    /// Check if a player is seated in this game.
    #[must_use]
    pub fn is_player(&self, player: PlayerId) -> bool {
        player.is_valid(self.num_players)
    }
}
