//! Splitting labelled molecules for surrogate model fitting.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("Validation fraction must lie strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),
    #[error("Validation set would be empty: {fraction} of {total} examples rounds to zero")]
    EmptyValidationSet { total: usize, fraction: f64 },
}

/// Indices of a shuffled train/validation split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub validation: Vec<usize>,
}

/// Shuffles `0..total` and holds out `validation_fraction` of it for validation.
///
/// The validation size is `floor(total * validation_fraction)`; a split that would leave
/// the validation set empty is an error.
pub fn train_validation_split(
    total: usize,
    validation_fraction: f64,
    rng: &mut impl Rng,
) -> Result<Split, SplitError> {
    if !(validation_fraction > 0.0 && validation_fraction < 1.0) {
        return Err(SplitError::InvalidFraction(validation_fraction));
    }

    let num_validation = (total as f64 * validation_fraction).floor() as usize;
    if num_validation == 0 {
        return Err(SplitError::EmptyValidationSet {
            total,
            fraction: validation_fraction,
        });
    }

    let mut indices: Vec<usize> = (0..total).collect();
    indices.shuffle(rng);
    let train = indices.split_off(num_validation);
    Ok(Split {
        train,
        validation: indices,
    })
}
