use super::record::MoleculeRecord;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const IDENTIFIER_COLUMN: &str = "identifier";
const LEVEL_SEPARATOR: char = '@';

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("First column must be 'identifier', found '{found}'")]
    MissingIdentifierColumn { found: String },
    #[error("Column '{column}' is not of the form '<name>@<level>'")]
    MalformedColumn { column: String },
    #[error("Invalid value '{value}' for column '{column}' on line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },
}

/// A collection of molecule records keyed by identifier.
///
/// Iteration always follows insertion order, which is what fixes the row order
/// of arrays extracted from the database.
#[derive(Debug, Clone, Default)]
pub struct MoleculeDatabase {
    /// Records in insertion order.
    records: Vec<MoleculeRecord>,
    /// Lookup map from identifier to position in `records`.
    index: HashMap<String, usize>,
}

impl MoleculeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the record it replaced if the identifier was already present.
    ///
    /// A replaced record keeps its original position in the iteration order.
    pub fn insert(&mut self, record: MoleculeRecord) -> Option<MoleculeRecord> {
        match self.index.get(&record.identifier) {
            Some(&position) => Some(std::mem::replace(&mut self.records[position], record)),
            None => {
                self.index
                    .insert(record.identifier.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&MoleculeRecord> {
        self.index.get(identifier).map(|&i| &self.records[i])
    }

    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut MoleculeRecord> {
        self.index.get(identifier).map(|&i| &mut self.records[i])
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.index.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over `(identifier, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MoleculeRecord)> {
        self.records.iter().map(|r| (r.identifier.as_str(), r))
    }

    /// Returns an iterator over records in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &MoleculeRecord> {
        self.records.iter()
    }

    /// Reads a database from CSV.
    ///
    /// The header must start with an `identifier` column, followed by one column per
    /// property named `<name>@<level>`. Empty cells denote missing values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the header is malformed, a cell is not a number,
    /// or the underlying reader fails.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let first = headers.get(0).unwrap_or_default();
        if first != IDENTIFIER_COLUMN {
            return Err(StoreError::MissingIdentifierColumn {
                found: first.to_string(),
            });
        }

        let columns = headers
            .iter()
            .skip(1)
            .map(|column| {
                column
                    .split_once(LEVEL_SEPARATOR)
                    .filter(|(name, level)| !name.is_empty() && !level.is_empty())
                    .map(|(name, level)| (name.to_string(), level.to_string()))
                    .ok_or_else(|| StoreError::MalformedColumn {
                        column: column.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut database = Self::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map_or(0, |p| p.line());

            let mut record = MoleculeRecord::new(row.get(0).unwrap_or_default());
            for ((name, level), cell) in columns.iter().zip(row.iter().skip(1)) {
                if cell.is_empty() {
                    continue;
                }
                let value = cell.parse::<f64>().map_err(|_| StoreError::InvalidValue {
                    line,
                    column: format!("{name}{LEVEL_SEPARATOR}{level}"),
                    value: cell.to_string(),
                })?;
                record.set_property(name.as_str(), level.as_str(), value);
            }
            database.insert(record);
        }

        debug!(
            num_records = database.len(),
            num_columns = columns.len(),
            "Loaded molecule database from CSV."
        );
        Ok(database)
    }

    pub fn from_csv_path(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }
}

impl FromIterator<MoleculeRecord> for MoleculeDatabase {
    fn from_iter<T: IntoIterator<Item = MoleculeRecord>>(iter: T) -> Self {
        let mut database = Self::new();
        for record in iter {
            database.insert(record);
        }
        database
    }
}
