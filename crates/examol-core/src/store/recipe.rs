use super::record::MoleculeRecord;

/// Defines how one scalar property value is read out of a molecule record.
///
/// Missing data is always reported as `None`, which keeps it distinct from
/// legitimate zero or negative values.
pub trait PropertyRecipe {
    /// Name of the property this recipe computes.
    fn name(&self) -> &str;

    /// Level of theory the property is computed at.
    fn level(&self) -> &str;

    /// Looks up the value of this property for a record.
    ///
    /// # Return
    ///
    /// Returns `Some(value)` if the record holds the property at this recipe's level,
    /// otherwise `None`.
    fn lookup(&self, record: &MoleculeRecord) -> Option<f64> {
        record.property(self.name(), self.level())
    }
}

impl<R: PropertyRecipe + ?Sized> PropertyRecipe for &R {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn level(&self) -> &str {
        (**self).level()
    }
    fn lookup(&self, record: &MoleculeRecord) -> Option<f64> {
        (**self).lookup(record)
    }
}

impl<R: PropertyRecipe + ?Sized> PropertyRecipe for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn level(&self) -> &str {
        (**self).level()
    }
    fn lookup(&self, record: &MoleculeRecord) -> Option<f64> {
        (**self).lookup(record)
    }
}

/// A recipe that reads a stored value directly by name and level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleRecipe {
    pub name: String,
    pub level: String,
}

impl SimpleRecipe {
    pub fn new(name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
        }
    }
}

impl PropertyRecipe for SimpleRecipe {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> &str {
        &self.level
    }
}
