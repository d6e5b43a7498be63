//! Python bindings for the guardian-battles match engine.
//!
//! # Quick Start
//!
//! ```python
//! import guardian_battles as gb
//! import json
//!
//! game = gb.Match(seed=42)
//! game.start()
//!
//! report = json.loads(game.choose_stat("power"))
//! print(report["winner"])
//! game.continue_round()
//!
//! while game.automated_choice() is not None:
//!     game.submit_automated_choice()
//!     game.continue_round()
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod py_cards;
mod py_match;

pub use py_cards::*;
pub use py_match::*;

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// guardian_battles: stat-battle card match engine.
#[pymodule]
fn guardian_battles(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCard>()?;
    m.add_class::<PyMatch>()?;
    Ok(())
}
