//! Q-table implementation for temporal difference learning

use std::{collections::HashMap, hash::Hash};

use super::{
    policy::state_value,
    q_function::{QFunction, TdParams, Transition},
};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Only pairs that have been updated are stored; every other pair reads as
/// 0.0 without being inserted. Entries are grouped by state so lookups
/// borrow the key instead of building an owned pair.
#[derive(Debug, Clone)]
pub struct QTable<S, A> {
    q_values: HashMap<S, HashMap<A, f64>>,
}

impl<S, A> QTable<S, A>
where
    S: Eq + Hash + Clone,
    A: Eq + Hash + Clone,
{
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self {
            q_values: HashMap::new(),
        }
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &S, action: &A) -> f64 {
        self.q_values
            .get(state)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: S, action: A, value: f64) {
        self.q_values.entry(state).or_default().insert(action, value);
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.q_values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.values().all(HashMap::is_empty)
    }

    /// Iterate over stored `(state, action, value)` entries
    pub fn iter(&self) -> impl Iterator<Item = (&S, &A, f64)> {
        self.q_values.iter().flat_map(|(state, actions)| {
            actions
                .iter()
                .map(move |(action, &value)| (state, action, value))
        })
    }
}

impl<S, A> Default for QTable<S, A>
where
    S: Eq + Hash + Clone,
    A: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> QFunction<S, A> for QTable<S, A>
where
    S: Eq + Hash + Clone + Send,
    A: Eq + Hash + Clone + Send,
{
    fn q_value(&self, state: &S, action: &A) -> f64 {
        self.get(state, action)
    }

    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    fn update(&mut self, transition: &Transition<S, A>, next_legal: &[A], params: TdParams) {
        let current_q = self.get(&transition.state, &transition.action);
        let max_next_q = state_value(&*self, &transition.next_state, next_legal);
        let td_target = transition.reward + params.gamma * max_next_q;
        let new_q = current_q + params.alpha * (td_target - current_q);
        self.set(
            transition.state.clone(),
            transition.action.clone(),
            new_q,
        );
    }

    fn clear(&mut self) {
        self.q_values.clear();
    }
}
