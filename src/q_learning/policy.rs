//! Greedy policy over an action-value estimator

use rand::{Rng, seq::IndexedRandom};

use super::q_function::QFunction;

/// Value of `state`: the best Q-value over `legal_actions`, or 0.0 when
/// there are none (terminal state).
pub fn state_value<S, A, Q>(q: &Q, state: &S, legal_actions: &[A]) -> f64
where
    Q: QFunction<S, A> + ?Sized,
{
    if legal_actions.is_empty() {
        return 0.0;
    }
    legal_actions
        .iter()
        .map(|action| q.q_value(state, action))
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Greedy action in `state`, breaking ties uniformly at random.
///
/// Every legal action whose value equals the state value exactly is a
/// candidate. Early in training all actions read 0.0, so picking the first
/// or last candidate would bias exploration toward the environment's
/// ordering of actions.
pub fn greedy_action<S, A, Q, R>(
    q: &Q,
    state: &S,
    legal_actions: &[A],
    rng: &mut R,
) -> Option<A>
where
    A: Clone,
    Q: QFunction<S, A> + ?Sized,
    R: Rng + ?Sized,
{
    if legal_actions.is_empty() {
        return None;
    }
    let values: Vec<f64> = legal_actions
        .iter()
        .map(|action| q.q_value(state, action))
        .collect();
    let limit = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let tied: Vec<&A> = legal_actions
        .iter()
        .zip(&values)
        .filter(|&(_, &value)| value == limit)
        .map(|(action, _)| action)
        .collect();
    if tied.is_empty() {
        // NaN estimates compare unequal to everything, including the max.
        return legal_actions.choose(rng).cloned();
    }
    tied.choose(rng).map(|&action| action.clone())
}
