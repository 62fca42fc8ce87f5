//! Ports (trait boundaries) for external collaborators.
//!
//! The environment, the episode runner's view of an agent and training
//! observers are all traits owned here; concrete adapters live elsewhere.

pub mod environment;
pub mod learner;
pub mod observer;

pub use environment::Environment;
pub use learner::Learner;
pub use observer::{EpisodeSummary, Observer};
