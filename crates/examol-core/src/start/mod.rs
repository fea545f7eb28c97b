//! Cold-start selection of an initial training set.
//!
//! Before enough molecules have been computed to fit a surrogate model, a campaign picks
//! its first computations without any scores. [`RandomStarter`] draws them uniformly.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartError {
    #[error("Cannot select {requested} distinct entries from a pool of {available}")]
    PoolTooSmall { requested: usize, available: usize },
}

/// Picks initial computations uniformly at random.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomStarter {
    /// Database size below which the campaign should still use this starter.
    pub threshold: usize,
    /// Lower bound on the number of entries selected.
    pub min_to_select: usize,
    /// Only the first `max_to_consider` entries of a pool are eligible, if set.
    pub max_to_consider: Option<usize>,
}

impl RandomStarter {
    pub fn new(threshold: usize, min_to_select: usize) -> Self {
        Self {
            threshold,
            min_to_select,
            max_to_consider: None,
        }
    }

    pub fn with_max_to_consider(mut self, max_to_consider: usize) -> Self {
        self.max_to_consider = Some(max_to_consider);
        self
    }

    /// Whether a database of the given size is still too small for model-driven selection.
    pub fn should_start(&self, database_size: usize) -> bool {
        database_size < self.threshold
    }

    /// Selects distinct entries from the pool.
    ///
    /// # Arguments
    ///
    /// * `pool` - Candidates to draw from, in a stable order.
    /// * `to_select` - Requested number of entries; raised to `min_to_select` if smaller.
    /// * `rng` - Source of randomness.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::PoolTooSmall`] if the eligible part of the pool holds fewer
    /// entries than must be selected.
    pub fn select<T: Clone>(
        &self,
        pool: &[T],
        to_select: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<T>, StartError> {
        let eligible = match self.max_to_consider {
            Some(limit) => &pool[..limit.min(pool.len())],
            None => pool,
        };
        let requested = to_select.max(self.min_to_select);
        if requested > eligible.len() {
            return Err(StartError::PoolTooSmall {
                requested,
                available: eligible.len(),
            });
        }

        debug!(
            requested,
            eligible = eligible.len(),
            "Drawing initial computations at random."
        );
        Ok(eligible
            .choose_multiple(rng, requested)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn pool() -> Vec<String> {
        (0..10).map(|i| i.to_string()).collect()
    }

    #[test]
    fn selects_requested_number_of_distinct_entries() {
        let starter = RandomStarter::new(1, 2);
        let mut rng = StdRng::seed_from_u64(0);

        let sample = starter.select(&pool(), 3, &mut rng).unwrap();

        assert_eq!(sample.iter().collect::<HashSet<_>>().len(), 3);
    }

    #[test]
    fn minimum_overrides_smaller_request_and_limit_restricts_pool() {
        let starter = RandomStarter::new(1, 3).with_max_to_consider(5);
        let mut rng = StdRng::seed_from_u64(7);

        let sample = starter.select(&pool(), 1, &mut rng).unwrap();

        assert_eq!(sample.iter().collect::<HashSet<_>>().len(), 3);
        assert!(sample.iter().all(|x| x.parse::<u32>().unwrap() < 5));
    }

    #[test]
    fn fails_when_eligible_pool_is_too_small() {
        let starter = RandomStarter::new(1, 4).with_max_to_consider(3);
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            starter.select(&pool(), 1, &mut rng),
            Err(StartError::PoolTooSmall {
                requested: 4,
                available: 3
            })
        );
    }

    #[test]
    fn should_start_below_threshold_only() {
        let starter = RandomStarter::new(5, 1);
        assert!(starter.should_start(4));
        assert!(!starter.should_start(5));
    }
}
