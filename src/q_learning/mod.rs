//! Q-learning: temporal difference control over action values
//!
//! This module implements off-policy TD control for episodic environments.
//! TD methods bootstrap value estimates from successor states, so every
//! observed transition can be learned from immediately.
//!
//! ## Estimators
//!
//! | Estimator | Parameters | Generalizes across states |
//! |-----------|------------|---------------------------|
//! | [`QTable`] | one value per (state, action) | No |
//! | [`LinearQFunction`] | one weight per feature | Yes |
//!
//! Both implement [`QFunction`]; the greedy policy, ε-greedy exploration
//! and [`QLearningAgent`] only ever talk to that trait.
//!
//! ## Usage Example
//!
//! ```
//! use qlearn::{
//!     app::AgentConfig,
//!     q_learning::{TabularQAgent, Transition},
//! };
//!
//! let config = AgentConfig::default()
//!     .with_epsilon(0.0)
//!     .with_alpha(0.5)
//!     .with_gamma(0.9)
//!     .with_num_training(10)
//!     .with_seed(7);
//! let mut agent: TabularQAgent<&str, char> = TabularQAgent::new(config)?;
//!
//! // The successor has no legal actions, so its value is 0.
//! agent.update(&Transition::new("S", 'A', "S", 10.0), &[]);
//! assert_eq!(agent.q_value(&"S", &'A'), 5.0);
//! assert_eq!(agent.get_action(&"S", &['A', 'B']), Some('A'));
//! # Ok::<(), qlearn::Error>(())
//! ```

pub mod agent;
pub mod exploration;
pub mod linear;
pub mod policy;
pub mod q_function;
pub mod q_table;

// Public re-exports
pub use agent::{ApproximateQAgent, QLearningAgent, TabularQAgent};
pub use exploration::EpsilonGreedy;
pub use linear::{FeatureWeights, LinearQFunction};
pub use policy::{greedy_action, state_value};
pub use q_function::{QFunction, TdParams, Transition};
pub use q_table::QTable;
