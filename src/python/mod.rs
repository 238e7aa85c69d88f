//! Python bindings for the turnflow reducer.
//!
//! # Quick Start
//!
//! ```python
//! import turnflow
//!
//! env = turnflow.TicTacToeEnv(seed=42)
//! obs = env.reset()
//!
//! # Opponent picks the first empty cell
//! env.set_opponent_policy(lambda obs: next(i for i, c in enumerate(obs) if c == 0))
//!
//! obs, reward, done, info = env.step(4)
//! ```

use pyo3::prelude::*;

mod py_env;

pub use py_env::*;

/// turnflow: turn-based game reducer with a gym-style environment.
#[pymodule]
fn turnflow(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTicTacToeEnv>()?;
    m.add_class::<PyDiscrete>()?;
    m.add_class::<PyBox>()?;
    Ok(())
}
