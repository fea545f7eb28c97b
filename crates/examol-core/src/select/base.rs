use super::error::SelectionError;
use crate::store::database::MoleculeDatabase;
use crate::store::recipe::PropertyRecipe;
use ndarray::{ArrayView3, ArrayViewD, Ix3};
use tracing::info;

/// The phase of a selection round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Accepting new batches of possibilities.
    #[default]
    Gathering,
    /// A ranked selection has been handed out; the next batch starts a new round.
    Dispensing,
}

/// Bookkeeping shared by every selector implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorState {
    /// Number of computations to select per round.
    pub to_select: usize,
    phase: Phase,
}

impl SelectorState {
    pub fn new(to_select: usize) -> Self {
        Self {
            to_select,
            phase: Phase::Gathering,
        }
    }

    /// Current phase of the round.
    ///
    /// Only the protocol methods of [`Selector`] move a selector between phases.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }
}

/// A selection algorithm driven by the gather/dispense protocol.
///
/// Selectors start in the [`Phase::Gathering`] phase. Batches of candidate computations
/// are added with [`add_possibilities`](Selector::add_possibilities), each paired with a
/// distribution of probable scores shaped `(objectives, candidates, ensemble members)`.
/// Calling [`dispense`](Selector::dispense) switches to [`Phase::Dispensing`] and yields
/// `(key, score)` pairs from highest to lowest priority.
///
/// Adding possibilities after a dispense silently starts a new round and discards
/// everything gathered before it. The return value of `add_possibilities` reports when
/// that happened, so callers that did not intend it can notice.
///
/// # Implementing a Selector
///
/// Implementors provide three pieces:
///
/// - [`clear_possibilities`](Selector::clear_possibilities), which drops all state from the previous round.
/// - [`prepare_batch`](Selector::prepare_batch), which checks and scores a validated batch
///   without touching selector state, and [`accumulate_batch`](Selector::accumulate_batch),
///   which folds a prepared batch into the round. Splitting the two keeps a failed call
///   from leaving the selector half-updated.
/// - [`selections`](Selector::selections), which produces the round's ranking.
///
/// Selectors hold no locks. Sharing one between threads requires the caller to serialize access.
pub trait Selector {
    /// Identifier of a candidate computation.
    type Key;
    /// A scored batch ready to be merged into the round.
    type Batch;
    /// Iterator over the ranked `(key, score)` pairs of a round.
    type Selections: Iterator<Item = (Self::Key, f64)>;

    fn state(&self) -> &SelectorState;

    /// Mutable bookkeeping for implementors. The phase is not reachable through it;
    /// drivers change phases with [`start_gathering`](Selector::start_gathering),
    /// [`add_possibilities`](Selector::add_possibilities) and [`dispense`](Selector::dispense).
    fn state_mut(&mut self) -> &mut SelectorState;

    /// Whether the selector accepts more than one objective on axis 0 of the samples.
    fn supports_multiobjective(&self) -> bool {
        false
    }

    /// Drops every possibility gathered in the current round.
    fn clear_possibilities(&mut self);

    /// Checks and scores a batch whose shape has already been validated.
    ///
    /// Must not modify the selector; any error here leaves the round untouched.
    fn prepare_batch(
        &self,
        keys: Vec<Self::Key>,
        samples: ArrayView3<'_, f64>,
    ) -> Result<Self::Batch, SelectionError>;

    /// Merges a prepared batch into the possibilities of the current round.
    fn accumulate_batch(&mut self, batch: Self::Batch);

    /// Produces the ranked selections for the possibilities currently held.
    fn selections(&self) -> Self::Selections;

    fn to_select(&self) -> usize {
        self.state().to_select
    }

    fn phase(&self) -> Phase {
        self.state().phase()
    }

    fn is_gathering(&self) -> bool {
        self.phase() == Phase::Gathering
    }

    /// Prepares to gather new batches of potential computations, clearing the previous round.
    fn start_gathering(&mut self) {
        self.clear_possibilities();
        self.state_mut().set_phase(Phase::Gathering);
    }

    /// Adds potential computations to the current round.
    ///
    /// # Arguments
    ///
    /// * `keys` - Labels identifying each candidate. Duplicates are treated as independent options.
    /// * `samples` - Score distribution for each candidate, shaped
    ///   `(objectives, candidates, ensemble members)`.
    ///
    /// # Return
    ///
    /// Returns `Ok(true)` if the call restarted gathering because the selector was
    /// dispensing, discarding the previous round, and `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] if the samples are not 3-dimensional, carry more
    /// objectives than the selector supports, or disagree with the number of keys.
    /// The selector is unchanged on error.
    fn add_possibilities(
        &mut self,
        keys: Vec<Self::Key>,
        samples: ArrayViewD<'_, f64>,
    ) -> Result<bool, SelectionError> {
        let samples = validate_samples(keys.len(), samples, self.supports_multiobjective())?;
        let batch = self.prepare_batch(keys, samples)?;

        let restarted = !self.is_gathering();
        if restarted {
            info!("Switching selector back to gathering phase. Clearing any previous selection information.");
            self.start_gathering();
        }
        self.accumulate_batch(batch);
        Ok(restarted)
    }

    /// Refreshes internal policy parameters from the molecules already computed.
    ///
    /// The default does nothing.
    fn update<R: PropertyRecipe>(
        &mut self,
        _database: &MoleculeDatabase,
        _recipes: &[R],
    ) -> Result<(), SelectionError> {
        Ok(())
    }

    /// Dispenses the selected computations from highest to lowest rated.
    ///
    /// The returned iterator is consumed once. Calling `dispense` again without adding
    /// possibilities ranks the same held options again.
    fn dispense(&mut self) -> Self::Selections {
        self.state_mut().set_phase(Phase::Dispensing);
        self.selections()
    }
}

/// Checks the shape invariants every batch of samples must satisfy.
pub fn validate_samples(
    num_keys: usize,
    samples: ArrayViewD<'_, f64>,
    multiobjective: bool,
) -> Result<ArrayView3<'_, f64>, SelectionError> {
    let ndim = samples.ndim();
    let samples = samples
        .into_dimensionality::<Ix3>()
        .map_err(|_| SelectionError::Shape { ndim })?;

    let (num_objectives, num_candidates, num_members) = samples.dim();
    if num_objectives == 0 {
        return Err(SelectionError::NoObjectives);
    }
    if num_objectives > 1 && !multiobjective {
        return Err(SelectionError::MultiObjectiveUnsupported { num_objectives });
    }
    if num_candidates != num_keys {
        return Err(SelectionError::KeyCountMismatch {
            keys: num_keys,
            samples: num_candidates,
        });
    }
    if num_members == 0 && num_candidates > 0 {
        return Err(SelectionError::EmptyEnsemble {
            candidates: num_candidates,
        });
    }
    Ok(samples)
}
