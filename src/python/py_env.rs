//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use tracing::warn;

use crate::env::{Bounds, Environment, GymEnv};
use crate::games::tictactoe::{Board, TicTacToe};

/// Discrete action space: integers `low..=high`.
#[pyclass(name = "Discrete")]
#[derive(Clone, Debug)]
pub struct PyDiscrete(Bounds);

#[pymethods]
impl PyDiscrete {
    /// Number of actions.
    #[getter]
    fn n(&self) -> usize {
        self.0.size()
    }

    #[getter]
    fn low(&self) -> i64 {
        self.0.low
    }

    #[getter]
    fn high(&self) -> i64 {
        self.0.high
    }

    fn __repr__(&self) -> String {
        format!("Discrete({})", self.0.size())
    }
}

/// Box observation space with per-dimension bounds.
#[pyclass(name = "Box")]
#[derive(Clone, Debug)]
pub struct PyBox {
    low: Vec<i64>,
    high: Vec<i64>,
}

#[pymethods]
impl PyBox {
    #[getter]
    fn low<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        PyArray1::from_slice_bound(py, &self.low)
    }

    #[getter]
    fn high<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        PyArray1::from_slice_bound(py, &self.high)
    }

    #[getter]
    fn shape(&self) -> (usize,) {
        (self.low.len(),)
    }

    fn __repr__(&self) -> String {
        format!("Box({},)", self.low.len())
    }
}

/// Python wrapper for the tic-tac-toe gym environment.
///
/// The agent plays as player 0. Player 1 follows the opponent policy,
/// uniformly random over empty cells unless replaced.
#[pyclass(name = "TicTacToeEnv")]
pub struct PyTicTacToeEnv {
    env: GymEnv<TicTacToe>,
}

#[pymethods]
impl PyTicTacToeEnv {
    /// Create a new environment.
    ///
    /// # Arguments
    /// - seed: RNG seed for the default opponent
    #[new]
    #[pyo3(signature = (seed = 42))]
    fn new(seed: u64) -> PyResult<Self> {
        let reducer = TicTacToe::reducer().map_err(|e| PyValueError::new_err(e.to_string()))?;
        let env = GymEnv::new(reducer, seed).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { env })
    }

    /// Start a new episode. Returns the first observation.
    fn reset<'py>(&mut self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        PyArray1::from_vec_bound(py, self.env.reset())
    }

    /// Play an action and the opponent's reply.
    ///
    /// Returns `(observation, reward, done, info)`; `info` is an empty dict.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: i64,
    ) -> (Bound<'py, PyArray1<i64>>, f64, bool, Bound<'py, PyDict>) {
        let transition = self.env.step(action);
        (
            PyArray1::from_vec_bound(py, transition.observation),
            transition.reward,
            transition.done,
            PyDict::new_bound(py),
        )
    }

    /// Replace the opponent policy with a Python callable.
    ///
    /// The callable receives the board observation as a list of ints and
    /// returns a cell id. Errors are logged and the opponent forfeits the move.
    fn set_opponent_policy(&mut self, policy: PyObject) {
        self.env.set_opponent_policy(move |g: &Board, _rng| {
            let observation = TicTacToe.observation(g);
            Python::with_gil(|py| match policy.call1(py, (observation,)) {
                Ok(result) => result.extract::<i64>(py).unwrap_or_else(|e| {
                    warn!(error = %e, "opponent policy returned a non-integer");
                    -1
                }),
                Err(e) => {
                    warn!(error = %e, "opponent policy call failed");
                    -1
                }
            })
        });
    }

    /// Cell ids that are still empty.
    fn legal_actions(&self) -> Vec<i64> {
        self.env.legal_actions()
    }

    /// Current observation from the agent's view.
    fn observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i64>> {
        PyArray1::from_vec_bound(py, self.env.observation())
    }

    /// Game name.
    #[getter]
    fn name(&self) -> String {
        self.env.name().to_string()
    }

    /// Number of distinct actions.
    #[getter]
    fn action_dim(&self) -> usize {
        self.env.action_dim()
    }

    /// Number of observation dimensions.
    #[getter]
    fn observation_dim(&self) -> usize {
        self.env.observation_dim()
    }

    /// Action space with `n`, `low` and `high`.
    #[getter]
    fn action_space(&self) -> PyDiscrete {
        PyDiscrete(self.env.action_space())
    }

    /// Observation space with per-dimension `low` and `high` arrays.
    #[getter]
    fn observation_space(&self) -> PyBox {
        let (low, high) = Bounds::unzip(&self.env.observation_space());
        PyBox { low, high }
    }

    /// Current turn number.
    #[getter]
    fn turn(&self) -> u32 {
        self.env.state().ctx.turn
    }

    /// Check if the episode has ended.
    fn is_over(&self) -> bool {
        self.env.state().is_over()
    }

    /// Winner index, or None while running or on a draw.
    fn winner(&self) -> Option<usize> {
        match &self.env.state().ctx.gameover {
            Some(crate::core::GameOver::Winner(player)) => Some(player.index()),
            _ => None,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TicTacToeEnv(turn={}, over={})",
            self.env.state().ctx.turn,
            self.env.state().is_over()
        )
    }
}
