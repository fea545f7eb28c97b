use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A molecule together with every property value computed for it so far.
///
/// Property values are keyed first by property name (e.g. `"ionization_potential"`)
/// and then by the level of theory used to compute them (e.g. `"xtb-vertical"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoleculeRecord {
    /// Canonical identifier of the molecule, used as the database key.
    pub identifier: String,
    /// Known property values, indexed by property name then level.
    pub properties: HashMap<String, HashMap<String, f64>>,
}

impl MoleculeRecord {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            properties: HashMap::new(),
        }
    }

    /// Stores a property value, replacing any previous value at the same name and level.
    pub fn set_property(&mut self, name: impl Into<String>, level: impl Into<String>, value: f64) {
        self.properties
            .entry(name.into())
            .or_default()
            .insert(level.into(), value);
    }

    pub fn property(&self, name: &str, level: &str) -> Option<f64> {
        self.properties
            .get(name)
            .and_then(|levels| levels.get(level))
            .copied()
    }
}
