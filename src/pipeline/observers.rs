//! Observer implementations for training pipelines
//!
//! Observers allow composable data collection during training without
//! coupling the episode loop to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{EpisodeSummary, Observer},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    total_reward: f64,
    episodes: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            total_reward: 0.0,
            episodes: 0,
        }
    }

    fn message(&self) -> String {
        let average = if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        };
        format!("{average:.2}")
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (avg reward: {msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.total_reward += summary.reward;
        self.episodes += 1;

        if let Some(pb) = &self.progress_bar {
            pb.set_position(self.episodes as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks per-episode rewards and lengths
#[derive(Debug, Default)]
pub struct MetricsObserver {
    episodes: Vec<EpisodeSummary>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> &[EpisodeSummary] {
        &self.episodes
    }

    /// Mean reward over all recorded episodes
    pub fn average_reward(&self) -> f64 {
        average(self.episodes.iter().map(|summary| summary.reward))
    }

    /// Mean reward over the most recent `window` episodes
    pub fn recent_average_reward(&self, window: usize) -> f64 {
        let start = self.episodes.len().saturating_sub(window);
        average(self.episodes[start..].iter().map(|summary| summary.reward))
    }

    /// Get average episode length
    pub fn average_episode_length(&self) -> f64 {
        average(self.episodes.iter().map(|summary| summary.steps as f64))
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.episodes.len(),
            training_episodes: self.episodes.iter().filter(|s| s.training).count(),
            average_reward: self.average_reward(),
            average_episode_length: self.average_episode_length(),
        }
    }
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub training_episodes: usize,
    pub average_reward: f64,
    pub average_episode_length: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.episodes.push(*summary);
        Ok(())
    }
}

/// Logs a reinforcement-learning status report every `interval` episodes.
///
/// Each report covers the overall training and testing averages plus the
/// average over the last `interval` episodes.
#[derive(Debug)]
pub struct StatusObserver {
    interval: usize,
    metrics: MetricsObserver,
    total_episodes: usize,
}

impl StatusObserver {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            metrics: MetricsObserver::new(),
            total_episodes: 0,
        }
    }

    fn report(&self) {
        let episodes = self.metrics.episodes();
        let completed = episodes.len();
        let training: Vec<f64> = episodes
            .iter()
            .filter(|s| s.training)
            .map(|s| s.reward)
            .collect();
        let testing: Vec<f64> = episodes
            .iter()
            .filter(|s| !s.training)
            .map(|s| s.reward)
            .collect();

        info!("Reinforcement Learning Status:");
        if testing.is_empty() {
            info!(
                "\tCompleted {completed} out of {} training episodes",
                self.total_episodes
            );
            info!(
                "\tAverage Rewards over all training: {:.2}",
                average(training.iter().copied())
            );
        } else {
            info!("\tCompleted {} test episodes", testing.len());
            info!(
                "\tAverage Rewards over testing: {:.2}",
                average(testing.iter().copied())
            );
        }
        info!(
            "\tAverage Rewards for last {} episodes: {:.2}",
            self.interval,
            self.metrics.recent_average_reward(self.interval)
        );
    }
}

impl Observer for StatusObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        self.total_episodes = total_episodes;
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        self.metrics.on_episode_end(summary)?;
        if self.metrics.episodes().len() % self.interval == 0 {
            self.report();
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if self.metrics.episodes().len() % self.interval != 0 {
            self.report();
        }
        Ok(())
    }
}
