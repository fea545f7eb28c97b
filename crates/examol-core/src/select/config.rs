use super::policy::{Greedy, ProbabilityOfImprovement, ScoringPolicy, UpperConfidenceBound};
use super::ranking::{Maximize, RankingSelector};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PolicyConfig {
    Greedy,
    UpperConfidenceBound { alpha: f64 },
    ProbabilityOfImprovement { threshold: f64, epsilon: f64 },
}

impl PolicyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Greedy => Ok(()),
            Self::UpperConfidenceBound { alpha } if !alpha.is_finite() => {
                Err(ConfigError::InvalidParameter {
                    name: "alpha",
                    value: alpha,
                    reason: "must be finite",
                })
            }
            Self::UpperConfidenceBound { .. } => Ok(()),
            Self::ProbabilityOfImprovement { threshold, .. } if threshold.is_nan() => {
                Err(ConfigError::InvalidParameter {
                    name: "threshold",
                    value: threshold,
                    reason: "must be a number",
                })
            }
            Self::ProbabilityOfImprovement { epsilon, .. }
                if !(epsilon.is_finite() && epsilon >= 0.0) =>
            {
                Err(ConfigError::InvalidParameter {
                    name: "epsilon",
                    value: epsilon,
                    reason: "must be finite and non-negative",
                })
            }
            Self::ProbabilityOfImprovement { .. } => Ok(()),
        }
    }

    pub fn build(&self) -> Box<dyn ScoringPolicy + Send + Sync> {
        match *self {
            Self::Greedy => Box::new(Greedy),
            Self::UpperConfidenceBound { alpha } => Box::new(UpperConfidenceBound::new(alpha)),
            Self::ProbabilityOfImprovement { threshold, epsilon } => {
                Box::new(ProbabilityOfImprovement::new(threshold, epsilon))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionConfig {
    pub to_select: usize,
    pub maximize: Maximize,
    pub policy: PolicyConfig,
}

#[derive(Default)]
pub struct SelectionConfigBuilder {
    to_select: Option<usize>,
    maximize: Option<Maximize>,
    policy: Option<PolicyConfig>,
}

impl SelectionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_select(mut self, n: usize) -> Self {
        self.to_select = Some(n);
        self
    }
    pub fn maximize(mut self, maximize: impl Into<Maximize>) -> Self {
        self.maximize = Some(maximize.into());
        self
    }
    pub fn policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<SelectionConfig, ConfigError> {
        let policy = self
            .policy
            .ok_or(ConfigError::MissingParameter("policy"))?;
        policy.validate()?;
        Ok(SelectionConfig {
            to_select: self
                .to_select
                .ok_or(ConfigError::MissingParameter("to_select"))?,
            maximize: self.maximize.unwrap_or_default(),
            policy,
        })
    }
}

impl<K> RankingSelector<K, Box<dyn ScoringPolicy + Send + Sync>> {
    pub fn from_config(config: &SelectionConfig) -> Self {
        Self::new(config.to_select, config.maximize.clone(), config.policy.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::base::Selector;
    use ndarray::array;

    #[test]
    fn builder_requires_to_select_and_policy() {
        let missing_policy = SelectionConfigBuilder::new().to_select(3).build();
        assert_eq!(missing_policy, Err(ConfigError::MissingParameter("policy")));

        let missing_count = SelectionConfigBuilder::new()
            .policy(PolicyConfig::Greedy)
            .build();
        assert_eq!(missing_count, Err(ConfigError::MissingParameter("to_select")));
    }

    #[test]
    fn builder_defaults_to_maximizing() {
        let config = SelectionConfigBuilder::new()
            .to_select(3)
            .policy(PolicyConfig::Greedy)
            .build()
            .unwrap();
        assert_eq!(config.maximize, Maximize::All(true));
    }

    #[test]
    fn builder_rejects_invalid_policy_parameters() {
        let result = SelectionConfigBuilder::new()
            .to_select(1)
            .policy(PolicyConfig::UpperConfidenceBound { alpha: f64::INFINITY })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "alpha", .. })
        ));

        let result = SelectionConfigBuilder::new()
            .to_select(1)
            .policy(PolicyConfig::ProbabilityOfImprovement {
                threshold: 0.0,
                epsilon: -1.0,
            })
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "epsilon", .. })
        ));
    }

    #[test]
    fn selector_from_config_uses_configured_policy() {
        let config = SelectionConfigBuilder::new()
            .to_select(1)
            .maximize(false)
            .policy(PolicyConfig::UpperConfidenceBound { alpha: 1.0 })
            .build()
            .unwrap();
        let mut selector = RankingSelector::<&str, _>::from_config(&config);

        selector
            .add_possibilities(
                vec!["a", "b"],
                array![[[1.0, 1.0], [2.0, 6.0]]].view().into_dyn(),
            )
            .unwrap();

        assert_eq!(selector.policy().name(), "ucb");
        assert_eq!(selector.dispense().collect::<Vec<_>>(), vec![("a", -1.0)]);
    }
}
