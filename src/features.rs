//! Feature extraction for linear Q-value approximation
//!
//! A [`FeatureExtractor`] describes a (state, action) pair as a sparse map
//! from feature name to value. Extractors are chosen by name when an
//! approximate agent is built; the [`ExtractorRegistry`] resolves that name
//! once, up front, to a boxed extractor.

use std::{collections::HashMap, fmt::Debug};

use crate::{Error, Result};

/// Sparse feature vector: feature name → feature value
pub type FeatureVector = HashMap<String, f64>;

/// Name of the feature emitted by [`BiasExtractor`]
pub const BIAS_FEATURE: &str = "bias";

/// Maps a (state, action) pair to named numeric features.
pub trait FeatureExtractor<S, A>: Send {
    fn features(&self, state: &S, action: &A) -> FeatureVector;
}

impl<S, A, F> FeatureExtractor<S, A> for F
where
    F: Fn(&S, &A) -> FeatureVector + Send,
{
    fn features(&self, state: &S, action: &A) -> FeatureVector {
        self(state, action)
    }
}

/// One indicator feature per (state, action) pair.
///
/// With this extractor the linear estimator degenerates to a Q-table.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityExtractor;

impl<S: Debug, A: Debug> FeatureExtractor<S, A> for IdentityExtractor {
    fn features(&self, state: &S, action: &A) -> FeatureVector {
        FeatureVector::from([(format!("({state:?}, {action:?})"), 1.0)])
    }
}

/// A single constant `"bias" = 1.0` feature shared by every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct BiasExtractor;

impl<S, A> FeatureExtractor<S, A> for BiasExtractor {
    fn features(&self, _state: &S, _action: &A) -> FeatureVector {
        FeatureVector::from([(BIAS_FEATURE.to_string(), 1.0)])
    }
}

type ExtractorConstructor<S, A> = Box<dyn Fn() -> Box<dyn FeatureExtractor<S, A>> + Send + Sync>;

/// Name → constructor table for feature extractors.
pub struct ExtractorRegistry<S, A> {
    constructors: HashMap<String, ExtractorConstructor<S, A>>,
}

impl<S, A> ExtractorRegistry<S, A> {
    /// Registry with no extractors registered
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn FeatureExtractor<S, A>> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Box::new(constructor));
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Box<dyn FeatureExtractor<S, A>> + Send + Sync + 'static,
    {
        self.register(name, constructor);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build a fresh extractor registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn FeatureExtractor<S, A>>> {
        self.constructors
            .get(name)
            .map(|constructor| constructor())
            .ok_or_else(|| Error::UnknownExtractor {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }
}

impl<S, A> ExtractorRegistry<S, A>
where
    S: Debug + 'static,
    A: Debug + 'static,
{
    /// Registry holding the built-in `IdentityExtractor` and `BiasExtractor`.
    pub fn with_builtins() -> Self {
        Self::empty()
            .with("IdentityExtractor", || Box::new(IdentityExtractor))
            .with("BiasExtractor", || Box::new(BiasExtractor))
    }
}

impl<S, A> Default for ExtractorRegistry<S, A>
where
    S: Debug + 'static,
    A: Debug + 'static,
{
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl<S, A> Debug for ExtractorRegistry<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorRegistry")
            .field("names", &self.names())
            .finish()
    }
}
