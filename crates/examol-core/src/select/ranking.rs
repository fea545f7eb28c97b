use super::base::{Selector, SelectorState};
use super::error::SelectionError;
use super::observations::extract_observations;
use super::policy::ScoringPolicy;
use crate::store::database::MoleculeDatabase;
use crate::store::recipe::PropertyRecipe;
use ndarray::{ArrayView3, Axis};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, instrument, warn};

/// Whether each objective should be maximized or minimized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Maximize {
    /// The same direction for every objective.
    All(bool),
    /// One flag per objective, in axis-0 order.
    PerObjective(Vec<bool>),
}

impl Default for Maximize {
    fn default() -> Self {
        Self::All(true)
    }
}

impl From<bool> for Maximize {
    fn from(value: bool) -> Self {
        Self::All(value)
    }
}

impl From<Vec<bool>> for Maximize {
    fn from(value: Vec<bool>) -> Self {
        Self::PerObjective(value)
    }
}

impl Maximize {
    /// Expands the setting into one flag per objective.
    pub fn flags(&self, num_objectives: usize) -> Result<Vec<bool>, SelectionError> {
        match self {
            Self::All(maximize) => Ok(vec![*maximize; num_objectives]),
            Self::PerObjective(flags) if flags.len() == num_objectives => Ok(flags.clone()),
            Self::PerObjective(flags) => Err(SelectionError::MaximizeFlagCount {
                num_objectives,
                num_flags: flags.len(),
            }),
        }
    }
}

/// A retained option. Ordering puts better options first: higher score, then earlier arrival.
#[derive(Debug, Clone)]
struct RankedOption<K> {
    key: K,
    score: f64,
    arrival: u64,
}

impl<K> PartialEq for RankedOption<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<K> Eq for RankedOption<K> {}

impl<K> PartialOrd for RankedOption<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for RankedOption<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.arrival.cmp(&self.arrival))
    }
}

/// Ranked `(key, score)` pairs handed out by [`RankingSelector::dispense`].
#[derive(Debug)]
pub struct RankedSelections<K> {
    inner: std::vec::IntoIter<Reverse<RankedOption<K>>>,
}

impl<K> Iterator for RankedSelections<K> {
    type Item = (K, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|Reverse(option)| (option.key, option.score))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for RankedSelections<K> {}

/// Selects the best-scored candidates, scoring each one independently.
///
/// Samples for minimized objectives are negated before they reach the scoring policy,
/// so the policy always maximizes and dispensed scores follow that sign convention.
///
/// Only the best `to_select` options are kept between batches, in a min-heap whose root
/// is the weakest retained option, so memory stays proportional to `to_select` plus the
/// current batch no matter how many candidates a round sees. Equal scores are ranked by
/// arrival order within the round, earliest first.
#[derive(Debug)]
pub struct RankingSelector<K, P> {
    state: SelectorState,
    maximize: Maximize,
    policy: P,
    options: BinaryHeap<Reverse<RankedOption<K>>>,
    arrivals: u64,
}

impl<K, P: ScoringPolicy> RankingSelector<K, P> {
    pub fn new(to_select: usize, maximize: impl Into<Maximize>, policy: P) -> Self {
        Self {
            state: SelectorState::new(to_select),
            maximize: maximize.into(),
            policy,
            options: BinaryHeap::with_capacity(to_select),
            arrivals: 0,
        }
    }

    pub fn maximize(&self) -> &Maximize {
        &self.maximize
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Number of options currently retained for this round.
    pub fn num_retained(&self) -> usize {
        self.options.len()
    }

    fn offer(&mut self, key: K, score: f64) {
        let candidate = RankedOption {
            key,
            score,
            arrival: self.arrivals,
        };
        self.arrivals += 1;

        if self.options.len() < self.state.to_select {
            self.options.push(Reverse(candidate));
        } else if let Some(mut weakest) = self.options.peek_mut() {
            if candidate > weakest.0 {
                *weakest = Reverse(candidate);
            }
        }
    }
}

impl<K: Clone, P: ScoringPolicy> Selector for RankingSelector<K, P> {
    type Key = K;
    type Batch = Vec<(K, f64)>;
    type Selections = RankedSelections<K>;

    fn state(&self) -> &SelectorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SelectorState {
        &mut self.state
    }

    fn supports_multiobjective(&self) -> bool {
        self.policy.supports_multiobjective()
    }

    fn clear_possibilities(&mut self) {
        self.options.clear();
        self.arrivals = 0;
    }

    #[instrument(level = "debug", skip_all, fields(policy = self.policy.name(), batch_size = keys.len()))]
    fn prepare_batch(
        &self,
        keys: Vec<K>,
        samples: ArrayView3<'_, f64>,
    ) -> Result<Self::Batch, SelectionError> {
        let flags = self.maximize.flags(samples.len_of(Axis(0)))?;

        let scores = if flags.iter().all(|&m| m) {
            self.policy.score(samples)
        } else {
            let mut adjusted = samples.to_owned();
            for (i, _) in flags.iter().enumerate().filter(|(_, m)| !**m) {
                adjusted
                    .index_axis_mut(Axis(0), i)
                    .mapv_inplace(|v| -v);
            }
            self.policy.score(adjusted.view())
        };

        if scores.len() != keys.len() {
            return Err(SelectionError::PolicyOutputLength {
                policy: self.policy.name(),
                expected: keys.len(),
                found: scores.len(),
            });
        }
        Ok(keys.into_iter().zip(scores.iter().copied()).collect())
    }

    fn accumulate_batch(&mut self, batch: Self::Batch) {
        let batch_size = batch.len();
        let mut skipped = 0usize;
        for (key, score) in batch {
            if score.is_nan() {
                skipped += 1;
                continue;
            }
            self.offer(key, score);
        }

        if skipped > 0 {
            warn!(skipped, "Dropped candidates whose score is NaN.");
        }
        debug!(
            batch_size,
            retained = self.options.len(),
            to_select = self.state.to_select,
            "Merged batch into ranked options."
        );
    }

    fn selections(&self) -> Self::Selections {
        RankedSelections {
            inner: self.options.clone().into_sorted_vec().into_iter(),
        }
    }

    /// Passes sign-adjusted observations of every recipe to the scoring policy.
    ///
    /// Leaves the policy untouched when no molecule has values for all recipes.
    fn update<R: PropertyRecipe>(
        &mut self,
        database: &MoleculeDatabase,
        recipes: &[R],
    ) -> Result<(), SelectionError> {
        let flags = self.maximize.flags(recipes.len())?;
        let mut observations = extract_observations(database, recipes);
        if observations.nrows() == 0 {
            warn!(
                num_records = database.len(),
                "No molecules have values for every recipe; scoring policy not updated."
            );
            return Ok(());
        }

        for (i, _) in flags.iter().enumerate().filter(|(_, m)| !**m) {
            observations.column_mut(i).mapv_inplace(|v| -v);
        }
        self.policy.update(observations.view());
        Ok(())
    }
}
