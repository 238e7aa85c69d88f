//! Game configuration types.
//!
//! Games configure the reducer at startup by providing:
//! - `PhaseConfig`: Defines phases (allowed moves, successor, turn order)
//! - `EventsConfig`: Which flow events callers may dispatch
//! - `GameConfig`: Combines all configuration
//!
//! A `GameConfig` is never mutated once a `Reducer` is built from it.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::action::{Event, MoveKind};
use super::error::ConfigError;
use super::player::MAX_PLAYERS;
use crate::rules::TurnOrder;

/// Opaque phase identifier. Games define their own phases.
///
/// The engine doesn't interpret phase IDs - they're just compared
/// for equality and looked up in the configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseId(pub u32);

impl PhaseId {
    /// Create a new phase ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PhaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Phase({})", self.0)
    }
}

/// Configuration for a single phase.
#[derive(Clone, Debug)]
pub struct PhaseConfig<G, M> {
    /// Unique identifier for this phase.
    pub id: PhaseId,

    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Moves allowed in this phase. `None` allows every move.
    pub allowed_moves: Option<Vec<M>>,

    /// Phase entered when this one ends. `None` means the next declared phase.
    pub next: Option<PhaseId>,

    /// Turn order used while in this phase. `None` uses the game-wide order.
    pub turn_order: Option<TurnOrder<G>>,
}

impl<G, M: MoveKind> PhaseConfig<G, M> {
    /// Create a new phase allowing every move.
    pub fn new(id: PhaseId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            allowed_moves: None,
            next: None,
            turn_order: None,
        }
    }

    /// Restrict the phase to the given moves.
    #[must_use]
    pub fn with_allowed_moves(mut self, moves: &[M]) -> Self {
        self.allowed_moves = Some(moves.to_vec());
        self
    }

    /// Set the phase entered when this one ends.
    #[must_use]
    pub fn with_next(mut self, next: PhaseId) -> Self {
        self.next = Some(next);
        self
    }

    /// Override the turn order while in this phase.
    #[must_use]
    pub fn with_turn_order(mut self, order: TurnOrder<G>) -> Self {
        self.turn_order = Some(order);
        self
    }

    /// Check whether a move may be made in this phase.
    #[must_use]
    pub fn allows(&self, kind: M) -> bool {
        self.allowed_moves
            .as_ref()
            .map_or(true, |moves| moves.contains(&kind))
    }
}

/// Which flow events may be dispatched by callers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// `endTurn` is accepted.
    pub end_turn: bool,
    /// `endPhase` is accepted.
    pub end_phase: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            end_turn: true,
            end_phase: true,
        }
    }
}

impl EventsConfig {
    /// Check whether an event is enabled.
    #[must_use]
    pub const fn is_enabled(&self, event: Event) -> bool {
        match event {
            Event::EndTurn => self.end_turn,
            Event::EndPhase => self.end_phase,
        }
    }
}

/// Complete game configuration.
///
/// Games provide this at startup to configure the reducer.
#[derive(Clone, Debug)]
pub struct GameConfig<G, M> {
    /// Number of players (1-255).
    pub num_players: usize,

    /// Maximum moves per turn. `None` for unlimited.
    pub moves_per_turn: Option<u32>,

    /// Game-wide turn order.
    pub turn_order: TurnOrder<G>,

    /// Phase configurations. Empty means a single unrestricted phase.
    pub phases: Vec<PhaseConfig<G, M>>,

    /// Initial game phase.
    pub starting_phase: PhaseId,

    /// Enabled flow events.
    pub events: EventsConfig,
}

impl<G, M: MoveKind> GameConfig<G, M> {
    /// Create a new game configuration.
    pub fn new(num_players: usize) -> Self {
        Self {
            num_players,
            moves_per_turn: None,
            turn_order: TurnOrder::Default,
            phases: Vec::new(),
            starting_phase: PhaseId::default(),
            events: EventsConfig::default(),
        }
    }

    /// Limit the number of moves per turn.
    #[must_use]
    pub fn with_moves_per_turn(mut self, moves: u32) -> Self {
        self.moves_per_turn = Some(moves);
        self
    }

    /// Set the game-wide turn order.
    #[must_use]
    pub fn with_turn_order(mut self, order: TurnOrder<G>) -> Self {
        self.turn_order = order;
        self
    }

    /// Add a phase configuration.
    #[must_use]
    pub fn with_phase(mut self, phase: PhaseConfig<G, M>) -> Self {
        self.phases.push(phase);
        self
    }

    /// Set the starting phase.
    #[must_use]
    pub fn with_starting_phase(mut self, phase: PhaseId) -> Self {
        self.starting_phase = phase;
        self
    }

    /// Set the enabled events.
    #[must_use]
    pub fn with_events(mut self, events: EventsConfig) -> Self {
        self.events = events;
        self
    }

    /// Get a phase config by ID.
    #[must_use]
    pub fn get_phase(&self, id: PhaseId) -> Option<&PhaseConfig<G, M>> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Turn order in effect during a phase.
    #[must_use]
    pub fn turn_order_for(&self, phase: PhaseId) -> &TurnOrder<G> {
        self.get_phase(phase)
            .and_then(|p| p.turn_order.as_ref())
            .unwrap_or(&self.turn_order)
    }

    /// Phase entered after `phase` ends.
    ///
    /// Follows the phase's `next` if set, otherwise the following declared
    /// phase, wrapping to the first.
    #[must_use]
    pub fn phase_after(&self, phase: PhaseId) -> PhaseId {
        let Some(pos) = self.phases.iter().position(|p| p.id == phase) else {
            return phase;
        };
        match self.phases[pos].next {
            Some(next) => next,
            None => self.phases[(pos + 1) % self.phases.len()].id,
        }
    }

    /// Check the configuration.
    ///
    /// Verifies player count, move limit, turn orders, phase references,
    /// and that move names are unique so wire dispatch is unambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players == 0 {
            return Err(ConfigError::new("Must have at least 1 player"));
        }
        if self.num_players > MAX_PLAYERS {
            return Err(ConfigError::new(format!(
                "At most {} players supported, got {}",
                MAX_PLAYERS, self.num_players
            )));
        }
        if self.moves_per_turn == Some(0) {
            return Err(ConfigError::new("moves_per_turn must be at least 1"));
        }
        if M::ALL.is_empty() {
            return Err(ConfigError::new("Game defines no moves"));
        }
        let mut names = FxHashSet::default();
        if let Some(kind) = M::ALL.iter().find(|kind| !names.insert(kind.name())) {
            return Err(ConfigError::new(format!("Duplicate move name {:?}", kind.name())));
        }

        self.turn_order.validate(self.num_players)?;

        if self.phases.is_empty() {
            if self.starting_phase != PhaseId::default() {
                return Err(ConfigError::new(format!(
                    "Starting {} is not configured",
                    self.starting_phase
                )));
            }
            return Ok(());
        }

        let mut seen = FxHashSet::default();
        for phase in &self.phases {
            if !seen.insert(phase.id) {
                return Err(ConfigError::new(format!("Duplicate {}", phase.id)));
            }
            if let Some(next) = phase.next {
                if self.get_phase(next).is_none() {
                    return Err(ConfigError::new(format!(
                        "Phase {:?} names unknown next {}",
                        phase.name, next
                    )));
                }
            }
            if let Some(order) = &phase.turn_order {
                order.validate(self.num_players)?;
            }
        }
        if self.get_phase(self.starting_phase).is_none() {
            return Err(ConfigError::new(format!(
                "Starting {} is not configured",
                self.starting_phase
            )));
        }

        Ok(())
    }
}
