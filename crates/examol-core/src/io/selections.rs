use super::IoError;
use serde::Serialize;
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct SelectionRow {
    rank: usize,
    key: String,
    score: f64,
}

/// Writes dispensed selections as a `rank,key,score` table, ranks starting at 1.
///
/// # Return
///
/// The number of rows written.
pub fn write_selections<W, K, I>(writer: W, selections: I) -> Result<usize, IoError>
where
    W: Write,
    K: Display,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut written = 0;
    for (i, (key, score)) in selections.into_iter().enumerate() {
        csv_writer.serialize(SelectionRow {
            rank: i + 1,
            key: key.to_string(),
            score,
        })?;
        written += 1;
    }
    if written == 0 {
        csv_writer.write_record(["rank", "key", "score"])?;
    }
    csv_writer.flush()?;
    Ok(written)
}

pub fn write_selections_to_path<K, I>(path: &Path, selections: I) -> Result<usize, IoError>
where
    K: Display,
    I: IntoIterator<Item = (K, f64)>,
{
    write_selections(File::create(path)?, selections)
}
