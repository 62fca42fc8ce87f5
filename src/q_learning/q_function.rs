//! The action-value capability shared by every estimator
//!
//! Policies, exploration and the agent only see estimators through
//! [`QFunction`], so the tabular and the linear estimator are
//! interchangeable everywhere above this module.

/// One observed step of an episode: `(s, a, s', r)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, A> {
    pub state: S,
    pub action: A,
    pub next_state: S,
    pub reward: f64,
}

impl<S, A> Transition<S, A> {
    pub fn new(state: S, action: A, next_state: S, reward: f64) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
        }
    }
}

/// Step sizes for a single temporal-difference update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdParams {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
}

/// Estimator of Q(s, a) that can be moved toward a TD target.
pub trait QFunction<S, A>: Send {
    /// Current estimate for `(state, action)`. Unseen pairs read as 0.0.
    fn q_value(&self, state: &S, action: &A) -> f64;

    /// Apply one temporal-difference update for `transition`.
    ///
    /// `next_legal` are the legal actions in `transition.next_state`; an
    /// empty slice marks a terminal successor whose value is 0.
    fn update(&mut self, transition: &Transition<S, A>, next_legal: &[A], params: TdParams);

    /// Drop everything learned so far.
    fn clear(&mut self);

    /// Diagnostic hook run once when the training phase ends.
    fn report_training_complete(&self) {}
}
