//! Gym-style two-player environment.
//!
//! The learning agent is player 0; player 1 is driven by an opponent
//! policy. Each `step` plays the agent's action, then (unless the game
//! ended) the opponent's reply, each followed by an end of turn.
//!
//! Rewards: 0 while the game runs, 1 if the agent won, -1 for a loss or a
//! draw.

use tracing::{debug, instrument};

use crate::core::{ConfigError, GameRng, PlayerId};
use crate::flow::{GameState, Reducer};

use super::{observe, step, Bounds, Environment};

/// Opponent policy: picks an integer action from the game data.
pub type OpponentPolicy<G> = Box<dyn FnMut(&G, &mut GameRng) -> i64 + Send>;

/// Outcome of one environment step.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Observation after the step.
    pub observation: Vec<i64>,
    /// Reward for the agent.
    pub reward: f64,
    /// The episode has ended.
    pub done: bool,
}

/// Gym-style environment over a two-player `Environment` game.
pub struct GymEnv<E: Environment> {
    reducer: Reducer<E>,
    state: GameState<E>,
    opponent: Option<OpponentPolicy<E::Data>>,
    root_rng: GameRng,
    rng: GameRng,
}

impl<E: Environment> std::fmt::Debug for GymEnv<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GymEnv")
            .field("reducer", &self.reducer)
            .field("state_id", &self.state.state_id)
            .field("custom_opponent", &self.opponent.is_some())
            .finish()
    }
}

impl<E: Environment> GymEnv<E> {
    /// The learning agent.
    pub const AGENT: PlayerId = PlayerId::new(0);

    /// The opponent driven by the policy.
    pub const OPPONENT: PlayerId = PlayerId::new(1);

    /// Create an environment. The game must be configured for two players,
    /// with the agent seated first.
    ///
    /// The default opponent plays uniformly at random among
    /// `Environment::enumerate`, seeded by `seed`.
    pub fn new(reducer: Reducer<E>, seed: u64) -> Result<Self, ConfigError> {
        if reducer.num_players() != 2 {
            return Err(ConfigError::new(format!(
                "Gym environment needs 2 players, got {}",
                reducer.num_players()
            )));
        }
        let state = reducer.initial_state();
        if state.ctx.current_player != Self::AGENT {
            return Err(ConfigError::new(format!(
                "Gym environment needs {} to move first, turn order opens with {}",
                Self::AGENT,
                state.ctx.current_player
            )));
        }
        let mut root_rng = GameRng::new(seed);
        let rng = root_rng.fork();
        Ok(Self {
            reducer,
            state,
            opponent: None,
            root_rng,
            rng,
        })
    }

    /// Game name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.reducer.game().name()
    }

    /// Range of integer actions.
    #[must_use]
    pub fn action_space(&self) -> Bounds {
        self.reducer.game().action_space()
    }

    /// Number of distinct actions.
    #[must_use]
    pub fn action_dim(&self) -> usize {
        self.action_space().size()
    }

    /// Range of each observation dimension.
    #[must_use]
    pub fn observation_space(&self) -> Vec<Bounds> {
        self.reducer.game().observation_space()
    }

    /// Number of observation dimensions.
    #[must_use]
    pub fn observation_dim(&self) -> usize {
        self.observation_space().len()
    }

    /// Replace the opponent policy.
    pub fn set_opponent_policy(
        &mut self,
        policy: impl FnMut(&E::Data, &mut GameRng) -> i64 + Send + 'static,
    ) {
        self.opponent = Some(Box::new(policy));
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState<E> {
        &self.state
    }

    /// Underlying reducer.
    #[must_use]
    pub fn reducer(&self) -> &Reducer<E> {
        &self.reducer
    }

    /// Current observation from the agent's view.
    #[must_use]
    pub fn observation(&self) -> Vec<i64> {
        observe(&self.reducer, &self.state, Self::AGENT)
    }

    /// Actions the game would accept right now.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<i64> {
        self.reducer.game().enumerate(&self.state.g)
    }

    /// Start a new episode and return its first observation.
    ///
    /// Each episode draws opponent randomness from a fresh fork.
    #[instrument(skip(self), fields(game = self.reducer.game().name()))]
    pub fn reset(&mut self) -> Vec<i64> {
        self.state = self.reducer.initial_state();
        self.rng = self.root_rng.fork();
        self.observation()
    }

    /// Play the agent's action and the opponent's reply.
    #[instrument(skip(self), fields(state_id = self.state.state_id))]
    pub fn step(&mut self, action: i64) -> Transition {
        let mut state = step(&self.reducer, &self.state, action, Self::AGENT);

        if !state.is_over() {
            let reply = self.opponent_action(&state.g);
            debug!(reply, "opponent reply");
            state = step(&self.reducer, &state, reply, Self::OPPONENT);
        }
        self.state = state;

        let (reward, done) = match &self.state.ctx.gameover {
            Some(result) if result.is_winner(Self::AGENT) => (1.0, true),
            Some(_) => (-1.0, true),
            None => (0.0, false),
        };

        Transition {
            observation: self.observation(),
            reward,
            done,
        }
    }

    fn opponent_action(&mut self, g: &E::Data) -> i64 {
        if let Some(policy) = self.opponent.as_mut() {
            return policy(g, &mut self.rng);
        }
        let legal = self.reducer.game().enumerate(g);
        match self.rng.choose(&legal) {
            Some(&action) => action,
            None => {
                let space = self.reducer.game().action_space();
                self.rng.gen_range(space.low..space.high.saturating_add(1))
            }
        }
    }
}
