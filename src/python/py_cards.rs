//! Card bindings for Python.

use pyo3::prelude::*;

use crate::cards::{Card, StatKey};

/// Python wrapper for Card (read-only).
#[pyclass(name = "Card", frozen)]
#[derive(Clone, Debug)]
pub struct PyCard(pub Card);

#[pymethods]
impl PyCard {
    #[getter]
    fn id(&self) -> &str {
        self.0.id.as_str()
    }

    #[getter]
    fn name(&self) -> &str {
        &self.0.name
    }

    #[getter]
    fn faction(&self) -> String {
        format!("{:?}", self.0.faction)
    }

    #[getter]
    fn rarity(&self) -> String {
        format!("{:?}", self.0.rarity)
    }

    #[getter]
    fn hero_type(&self) -> &str {
        &self.0.hero_type
    }

    /// Stat value by name. Raises ValueError for unknown names.
    fn stat(&self, name: &str) -> PyResult<u32> {
        let key: StatKey = name.parse().map_err(super::value_error)?;
        Ok(self.0.stat(key))
    }

    /// All nine stats as (name, value) pairs in canonical order.
    fn stats(&self) -> Vec<(&'static str, u32)> {
        self.0.stats.iter().map(|(k, v)| (k.name(), v)).collect()
    }

    fn __repr__(&self) -> String {
        format!("Card(id={}, name={:?})", self.0.id, self.0.name)
    }
}
