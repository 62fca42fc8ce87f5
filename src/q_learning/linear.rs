//! Linear approximation of Q-values over extracted features
//!
//! Q(s, a) = Σ_f w_f · φ_f(s, a). The weight vector is shared across every
//! state and action, which is what lets an update for one pair generalize to
//! every other pair that shares a feature.

use std::collections::{BTreeMap, HashMap};

use log::info;

use super::{
    policy::state_value,
    q_function::{QFunction, TdParams, Transition},
};
use crate::features::FeatureExtractor;

/// Learned weight per feature name. Missing weights read as 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureWeights {
    weights: HashMap<String, f64>,
}

impl FeatureWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight for `feature`, 0.0 if it has never been updated
    pub fn weight(&self, feature: &str) -> f64 {
        self.weights.get(feature).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, feature: impl Into<String>, value: f64) {
        self.weights.insert(feature.into(), value);
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(name, &value)| (name.as_str(), value))
    }

    /// Weights ordered by feature name
    pub fn sorted(&self) -> BTreeMap<&str, f64> {
        self.iter().collect()
    }

    pub fn clear(&mut self) {
        self.weights.clear();
    }
}

/// Approximate Q-function: feature weights dotted with extracted features.
pub struct LinearQFunction<S, A> {
    extractor: Box<dyn FeatureExtractor<S, A>>,
    weights: FeatureWeights,
}

impl<S, A> LinearQFunction<S, A> {
    pub fn new(extractor: Box<dyn FeatureExtractor<S, A>>) -> Self {
        Self {
            extractor,
            weights: FeatureWeights::new(),
        }
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut FeatureWeights {
        &mut self.weights
    }
}

impl<S, A> std::fmt::Debug for LinearQFunction<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearQFunction")
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

impl<S, A> QFunction<S, A> for LinearQFunction<S, A> {
    fn q_value(&self, state: &S, action: &A) -> f64 {
        self.extractor
            .features(state, action)
            .iter()
            .map(|(feature, value)| self.weights.weight(feature) * value)
            .sum()
    }

    /// w_f ← w_f + α · [r + γ max_a' Q(s',a') - Q(s,a)] · φ_f(s,a)
    fn update(&mut self, transition: &Transition<S, A>, next_legal: &[A], params: TdParams) {
        let features = self
            .extractor
            .features(&transition.state, &transition.action);
        let next_value = state_value(&*self, &transition.next_state, next_legal);
        let difference = transition.reward + params.gamma * next_value
            - self.q_value(&transition.state, &transition.action);

        for (feature, value) in features {
            let updated = self.weights.weight(&feature) + params.alpha * difference * value;
            self.weights.set(feature, updated);
        }
    }

    fn clear(&mut self) {
        self.weights.clear();
    }

    fn report_training_complete(&self) {
        match serde_json::to_string(&self.weights.sorted()) {
            Ok(json) => info!("Weights: {json}"),
            Err(err) => info!("Weights: <unserializable: {err}>"),
        }
    }
}
