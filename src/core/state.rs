//! Game state: the game's own data plus the flow context.
//!
//! ## State
//!
//! - `g`: game-specific data, opaque to the engine
//! - `ctx`: turn, phase, current player, game-over status
//! - `log`: every accepted action, in order
//! - `state_id`: bumped on every accepted action
//!
//! States are values. The reducer never mutates a state it was given; it
//! returns a new one. `im` keeps the log cheap to share between snapshots.

use im::Vector;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::context::Context;
use super::error::SnapshotError;

/// Complete game state.
///
/// `im::Vector` requires `M: Clone` for all of its trait impls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State<G, M: Clone> {
    /// Game-specific data.
    pub g: G,

    /// Flow context.
    pub ctx: Context,

    /// Accepted actions, oldest first.
    pub log: Vector<ActionRecord<M>>,

    /// Number of accepted actions since setup.
    pub state_id: u64,
}

impl<G, M: Clone> State<G, M> {
    /// Create a new state with an empty log.
    #[must_use]
    pub fn new(g: G, ctx: Context) -> Self {
        Self {
            g,
            ctx,
            log: Vector::new(),
            state_id: 0,
        }
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.ctx.is_over()
    }

    /// Number of players.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.ctx.num_players
    }
}

impl<G: Serialize, M: Clone + Serialize> State<G, M> {
    /// Encode the state as a bincode snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }
}

impl<G: DeserializeOwned, M: Clone + DeserializeOwned> State<G, M> {
    /// Decode a state from a bincode snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{make_move, PhaseId, PlayerId};

    #[test]
    fn test_state_new() {
        let state: State<Vec<i64>, u8> =
            State::new(vec![0; 3], Context::new(2, PhaseId::default()));

        assert_eq!(state.num_players(), 2);
        assert_eq!(state.state_id, 0);
        assert!(state.log.is_empty());
        assert!(!state.is_over());
    }

    #[test]
    fn test_state_clone_is_independent() {
        let mut state: State<Vec<i64>, u8> =
            State::new(vec![0; 3], Context::new(2, PhaseId::default()));
        let snapshot = state.clone();

        state.g[0] = 7;
        state.ctx.turn = 4;
        state
            .log
            .push_back(ActionRecord::new(PlayerId::new(0), make_move(1, &[], None), 1, 1));

        assert_eq!(snapshot.g[0], 0);
        assert_eq!(snapshot.ctx.turn, 1);
        assert!(snapshot.log.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut state: State<Vec<i64>, u8> =
            State::new(vec![1, 2, 3], Context::new(3, PhaseId::new(1)));
        state
            .log
            .push_back(ActionRecord::new(PlayerId::new(2), make_move(4, &[9], None), 1, 1));
        state.state_id = 1;

        let bytes = state.to_bytes().unwrap();
        let restored: State<Vec<i64>, u8> = State::from_bytes(&bytes).unwrap();

        assert_eq!(restored, state);
    }

    #[test]
    fn test_snapshot_rejects_garbage() {
        let result = State::<Vec<i64>, u8>::from_bytes(&[0xff, 0x01]);
        assert!(result.is_err());
    }
}
