//! Environment port - the episodic world an agent acts in
//!
//! Dynamics, legal-move generation and rewards all live behind this trait;
//! the crate never implements an environment itself.

use std::hash::Hash;

use crate::Result;

/// Episodic environment driven by [`TrainingPipeline`](crate::pipeline::TrainingPipeline).
pub trait Environment {
    /// Opaque state identifier
    type State: Clone + Eq + Hash;
    /// Opaque action identifier
    type Action: Clone + Eq + Hash;

    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> Result<Self::State>;

    /// Legal actions in `state`. An empty vector marks a terminal state.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Execute `action` from the current state, returning the successor
    /// state and the reward for the step.
    fn step(&mut self, action: &Self::Action) -> Result<(Self::State, f64)>;
}
