//! ε-greedy exploration layered over the greedy policy

use rand::{Rng, seq::IndexedRandom};

use super::{policy::greedy_action, q_function::QFunction};

/// Explores uniformly with probability ε, otherwise exploits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Pick an action for `state`, or `None` when no action is legal.
    ///
    /// Exactly one Bernoulli(ε) draw decides between a uniform random legal
    /// action and [`greedy_action`].
    pub fn choose_action<S, A, Q, R>(
        &self,
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
        if rng.random::<f64>() < self.epsilon {
            // Explore: random action
            legal_actions.choose(rng).cloned()
        } else {
            // Exploit: greedy action based on Q-values
            greedy_action(q, state, legal_actions, rng)
        }
    }
}
