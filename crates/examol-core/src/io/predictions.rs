use super::IoError;
use ndarray::Array3;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const KEY_COLUMN: &str = "key";
const OBJECTIVE_COLUMN: &str = "objective";

/// Candidate keys with their prediction samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Predictions {
    pub keys: Vec<String>,
    /// Shaped `(objectives, candidates, ensemble members)`.
    pub samples: Array3<f64>,
}

#[derive(Debug, Default)]
struct ObjectiveBlock {
    keys: Vec<String>,
    values: Vec<f64>,
}

/// Reads ensemble predictions from CSV.
///
/// The first column holds candidate keys and every following column one ensemble member.
/// When the second column is named `objective`, each row carries the samples of one
/// objective for one candidate; rows of every objective must list the same keys in the
/// same order.
///
/// ```text
/// key,m0,m1,m2
/// CCO,1.2,1.4,1.1
/// CCN,0.3,0.2,0.6
/// ```
pub fn read_predictions<R: Read>(reader: R) -> Result<Predictions, IoError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let first = headers.get(0).unwrap_or_default();
    if first != KEY_COLUMN {
        return Err(IoError::MissingKeyColumn {
            found: first.to_string(),
        });
    }
    let has_objective = headers.get(1) == Some(OBJECTIVE_COLUMN);
    let first_member = if has_objective { 2 } else { 1 };
    let member_names: Vec<&str> = headers.iter().skip(first_member).collect();
    if member_names.is_empty() {
        return Err(IoError::NoMemberColumns);
    }

    let mut blocks: BTreeMap<usize, ObjectiveBlock> = BTreeMap::new();
    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map_or(0, |p| p.line());

        let objective = if has_objective {
            let cell = row.get(1).unwrap_or_default();
            cell.parse::<usize>().map_err(|_| IoError::InvalidObjective {
                line,
                value: cell.to_string(),
            })?
        } else {
            0
        };

        let block = blocks.entry(objective).or_default();
        block.keys.push(row.get(0).unwrap_or_default().to_string());
        for (name, cell) in member_names.iter().zip(row.iter().skip(first_member)) {
            let value = cell.parse::<f64>().map_err(|_| IoError::InvalidValue {
                line,
                column: name.to_string(),
                value: cell.to_string(),
            })?;
            block.values.push(value);
        }
    }

    if let Some((&last, _)) = blocks.last_key_value() {
        if let Some(missing) = (0..=last).find(|i| !blocks.contains_key(i)) {
            return Err(IoError::MissingObjective { objective: missing });
        }
    }

    let num_objectives = blocks.len().max(1);
    let mut blocks = blocks.into_values();
    let ObjectiveBlock { keys, mut values } = blocks.next().unwrap_or_default();
    for (offset, block) in blocks.enumerate() {
        if block.keys != keys {
            return Err(IoError::MismatchedKeys {
                objective: offset + 1,
            });
        }
        values.extend(block.values);
    }

    let shape = (num_objectives, keys.len(), member_names.len());
    let samples = Array3::from_shape_vec(shape, values)?;

    debug!(
        num_objectives,
        num_candidates = keys.len(),
        num_members = member_names.len(),
        "Read prediction samples."
    );
    Ok(Predictions { keys, samples })
}

pub fn read_predictions_from_path(path: &Path) -> Result<Predictions, IoError> {
    read_predictions(File::open(path)?)
}
