use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error(
        "Expected samples dimension of 3 (objective, candidate, ensemble member). Found {ndim}"
    )]
    Shape { ndim: usize },

    #[error("Samples contain no objectives; axis 0 must hold at least one")]
    NoObjectives,

    #[error(
        "Provided {num_objectives} objectives but the selector does not support multi-objective selection"
    )]
    MultiObjectiveUnsupported { num_objectives: usize },

    #[error(
        "Different number of objectives ({num_objectives}) and maximization flags ({num_flags})"
    )]
    MaximizeFlagCount {
        num_objectives: usize,
        num_flags: usize,
    },

    #[error("Number of keys and number of samples differ. Keys={keys}. Samples={samples}")]
    KeyCountMismatch { keys: usize, samples: usize },

    #[error("Samples for {candidates} candidates contain no ensemble members")]
    EmptyEnsemble { candidates: usize },

    #[error("Scoring policy '{policy}' returned {found} scores for {expected} candidates")]
    PolicyOutputLength {
        policy: &'static str,
        expected: usize,
        found: usize,
    },
}

impl SelectionError {
    /// Whether this error reports a mismatch in the number of objectives.
    pub fn is_objective_count(&self) -> bool {
        matches!(
            self,
            Self::NoObjectives
                | Self::MultiObjectiveUnsupported { .. }
                | Self::MaximizeFlagCount { .. }
        )
    }
}
