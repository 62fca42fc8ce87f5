//! Q-learning decision agents
//!
//! This crate provides:
//! - A tabular action-value estimator updated by temporal-difference learning
//! - A linear function-approximation estimator over named features
//! - Greedy and ε-greedy action selection with random tie-breaking
//! - Agents that tie an estimator to an episode lifecycle
//! - Ports for environments and observers, and a reference episode runner

pub mod app;
pub mod error;
pub mod features;
pub mod logging;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use app::AgentConfig;
pub use error::{Error, Result};
pub use features::{ExtractorRegistry, FeatureExtractor, FeatureVector};
pub use q_learning::{
    ApproximateQAgent, EpsilonGreedy, QFunction, QLearningAgent, QTable, TabularQAgent,
    Transition,
};
