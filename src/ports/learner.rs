//! Learner port - abstraction for agents driven by an episode runner
//!
//! The runner owns the environment loop; a learner only chooses actions,
//! absorbs transitions and keeps the episode counters the runner reads to
//! decide whether the agent is still training.

use crate::{Result, q_learning::Transition};

/// Learner trait - interface every runnable agent implements
///
/// # Event Sequence
///
/// For each episode the runner calls:
/// 1. `start_episode()`
/// 2. repeatedly `select_action(...)` then `observe_transition(...)`
/// 3. `stop_episode()` once the environment reports no legal actions
///
/// # Examples
///
/// ```no_run
/// use qlearn::ports::Learner;
///
/// fn still_learning<S, A>(agent: &dyn Learner<S, A>) -> bool {
///     agent.is_in_training()
/// }
/// ```
pub trait Learner<S, A>: Send {
    /// Choose an action among `legal_actions`.
    ///
    /// Returns `None` exactly when `legal_actions` is empty.
    fn select_action(&mut self, state: &S, legal_actions: &[A]) -> Option<A>;

    /// Called by the runner before the first step of an episode.
    fn start_episode(&mut self) {}

    /// Absorb one observed transition.
    ///
    /// `next_legal` are the legal actions in `transition.next_state`; the
    /// runner passes an empty slice for the terminal state.
    fn observe_transition(&mut self, transition: &Transition<S, A>, next_legal: &[A])
    -> Result<()>;

    /// Called by the runner after the last step of an episode.
    ///
    /// Returns the total reward collected during the episode.
    fn stop_episode(&mut self) -> f64;

    /// Number of completed episodes.
    fn episodes_so_far(&self) -> usize;

    /// Whether the agent is still inside its training budget.
    fn is_in_training(&self) -> bool;

    /// Get the learner's name.
    ///
    /// Used for identification in logs and reports.
    fn name(&self) -> &str;

    /// Reset learner state to initial conditions.
    ///
    /// # Default Implementation
    ///
    /// The default implementation does nothing, suitable for stateless
    /// learners.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// Seed the learner's internal random number generator.
    ///
    /// Training pipelines call this method when supplied with a deterministic
    /// seed to ensure reproducible results. Stateless learners can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
