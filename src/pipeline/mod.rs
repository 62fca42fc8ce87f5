//! Episode-running pipeline
//!
//! This module provides:
//! - A reference episode runner that drives a learner through an environment
//! - Observers that record and report training statistics

pub mod observers;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver, StatusObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Environment, Learner, Observer};
