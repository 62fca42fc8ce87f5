//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Hyperparameters of a Q-learning agent, fixed for the whole run.
///
/// # Examples
///
/// ```
/// use qlearn::app::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_epsilon(0.1)
///     .with_alpha(0.5)
///     .with_num_training(200)
///     .with_seed(42);
/// config.validate()?;
/// # Ok::<(), qlearn::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Exploration probability ε in [0, 1]
    pub epsilon: f64,
    /// Learning rate α in (0, 1]
    pub alpha: f64,
    /// Discount factor γ in [0, 1]
    pub gamma: f64,
    /// Episodes after which the agent stops exploring and learning
    pub num_training: usize,
    /// Registered feature extractor name (approximate agent only)
    pub extractor: String,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.05,
            alpha: 0.2,
            gamma: 0.8,
            num_training: 0,
            extractor: "IdentityExtractor".to_string(),
            seed: None,
        }
    }
}

impl AgentConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_num_training(mut self, num_training: usize) -> Self {
        self.num_training = num_training;
        self
    }

    pub fn with_extractor(mut self, extractor: impl Into<String>) -> Self {
        self.extractor = extractor.into();
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject out-of-range hyperparameters instead of clamping them.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(invalid(format!(
                "epsilon must be in [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(invalid(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(invalid(format!(
                "gamma must be in [0, 1], got {}",
                self.gamma
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
