use ndarray::{Array1, ArrayView2, ArrayView3, Axis};
use tracing::debug;

/// Computes a scalar priority for each candidate from its sample distribution.
///
/// Policies always treat higher values as better; selectors negate samples for
/// objectives that are minimized before calling [`score`](ScoringPolicy::score).
/// Implementations must be deterministic and must not modify their input.
pub trait ScoringPolicy {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Scores every candidate in a batch.
    ///
    /// # Arguments
    ///
    /// * `samples` - Sign-adjusted samples shaped `(objectives, candidates, ensemble members)`.
    ///
    /// # Return
    ///
    /// One score per candidate, in candidate order.
    fn score(&self, samples: ArrayView3<'_, f64>) -> Array1<f64>;

    /// Whether the policy can score samples with more than one objective.
    fn supports_multiobjective(&self) -> bool {
        false
    }

    /// Refreshes policy parameters from sign-adjusted observations shaped
    /// `(molecules, objectives)`. The default does nothing.
    fn update(&mut self, _observations: ArrayView2<'_, f64>) {}
}

impl<P: ScoringPolicy + ?Sized> ScoringPolicy for Box<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn score(&self, samples: ArrayView3<'_, f64>) -> Array1<f64> {
        (**self).score(samples)
    }
    fn supports_multiobjective(&self) -> bool {
        (**self).supports_multiobjective()
    }
    fn update(&mut self, observations: ArrayView2<'_, f64>) {
        (**self).update(observations)
    }
}

/// Ensemble samples of the first objective, shaped `(candidates, members)`.
///
/// # Panics
///
/// Panics if `samples` has no objectives.
fn first_objective<'a>(samples: &'a ArrayView3<'_, f64>) -> ArrayView2<'a, f64> {
    samples.index_axis(Axis(0), 0)
}

fn ensemble_mean(ensemble: &ArrayView2<'_, f64>) -> Array1<f64> {
    ensemble
        .mean_axis(Axis(1))
        .unwrap_or_else(|| Array1::from_elem(ensemble.nrows(), f64::NAN))
}

/// Ranks candidates by the mean of their ensemble predictions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Greedy;

impl ScoringPolicy for Greedy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn score(&self, samples: ArrayView3<'_, f64>) -> Array1<f64> {
        ensemble_mean(&first_objective(&samples))
    }
}

/// Ranks candidates by `mean + alpha * std` of their ensemble predictions.
///
/// Larger `alpha` favours candidates the ensemble disagrees on. The standard deviation
/// is the population value over ensemble members.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpperConfidenceBound {
    pub alpha: f64,
}

impl UpperConfidenceBound {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl ScoringPolicy for UpperConfidenceBound {
    fn name(&self) -> &'static str {
        "ucb"
    }

    fn score(&self, samples: ArrayView3<'_, f64>) -> Array1<f64> {
        let ensemble = first_objective(&samples);
        if ensemble.ncols() == 0 {
            return Array1::from_elem(ensemble.nrows(), f64::NAN);
        }
        let mean = ensemble_mean(&ensemble);
        let std = ensemble.std_axis(Axis(1), 0.0);
        mean + std * self.alpha
    }
}

/// Ranks candidates by the fraction of ensemble members that beat `threshold + epsilon`.
///
/// The threshold is expressed after sign adjustment, so for a minimized objective it is
/// the negated target value. [`update`](ScoringPolicy::update) moves the threshold to the
/// best observation seen so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityOfImprovement {
    pub threshold: f64,
    pub epsilon: f64,
}

impl ProbabilityOfImprovement {
    pub fn new(threshold: f64, epsilon: f64) -> Self {
        Self { threshold, epsilon }
    }
}

impl ScoringPolicy for ProbabilityOfImprovement {
    fn name(&self) -> &'static str {
        "probability-of-improvement"
    }

    fn score(&self, samples: ArrayView3<'_, f64>) -> Array1<f64> {
        let cutoff = self.threshold + self.epsilon;
        first_objective(&samples).map_axis(Axis(1), |members| {
            let above = members.iter().filter(|&&v| v > cutoff).count();
            above as f64 / members.len() as f64
        })
    }

    fn update(&mut self, observations: ArrayView2<'_, f64>) {
        if observations.ncols() == 0 {
            return;
        }
        let best = observations
            .column(0)
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(f64::NEG_INFINITY, f64::max);
        if best.is_finite() {
            debug!(
                previous = self.threshold,
                threshold = best,
                "Updated improvement threshold from observations."
            );
            self.threshold = best;
        }
    }
}
