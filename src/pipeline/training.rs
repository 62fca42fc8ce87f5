//! Episode runner for learners acting in an environment

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::{Environment, EpisodeSummary, Learner, Observer},
    q_learning::Transition,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of episodes to run (training and testing together)
    pub num_episodes: usize,

    /// Cut an episode short after this many steps
    pub max_steps: Option<usize>,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_episodes: 100,
            max_steps: None,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played
    pub total_episodes: usize,

    /// Episodes played while the learner was training
    pub training_episodes: usize,

    /// Episodes played after training finished
    pub testing_episodes: usize,

    /// Transitions observed over the whole run
    pub total_steps: usize,

    /// Mean episode reward during training
    pub average_training_reward: f64,

    /// Mean episode reward after training
    pub average_testing_reward: f64,
}

impl TrainingResult {
    fn from_episodes(episodes: &[EpisodeSummary]) -> Self {
        let (training, testing): (Vec<_>, Vec<_>) =
            episodes.iter().partition(|summary| summary.training);
        Self {
            total_episodes: episodes.len(),
            training_episodes: training.len(),
            testing_episodes: testing.len(),
            total_steps: episodes.iter().map(|summary| summary.steps).sum(),
            average_training_reward: mean_reward(&training),
            average_testing_reward: mean_reward(&testing),
        }
    }
}

fn mean_reward(episodes: &[&EpisodeSummary]) -> f64 {
    if episodes.is_empty() {
        0.0
    } else {
        episodes.iter().map(|summary| summary.reward).sum::<f64>() / episodes.len() as f64
    }
}

/// Runs a learner through episodes of an environment.
///
/// The pipeline owns the transition loop: it asks the environment for
/// legal actions, lets the learner pick one, steps the environment and
/// hands the resulting transition back to the learner. An episode ends
/// when the environment reports no legal actions or `max_steps` is hit.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run `config.num_episodes` episodes of `env` with `agent`
    pub fn run<E, L>(&mut self, agent: &mut L, env: &mut E) -> Result<TrainingResult>
    where
        E: Environment,
        L: Learner<E::State, E::Action> + ?Sized,
    {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.num_episodes)?;
        }

        let mut episodes = Vec::with_capacity(self.config.num_episodes);
        for episode in 0..self.config.num_episodes {
            let summary = self.play_episode(episode, agent, env)?;
            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
            episodes.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::from_episodes(&episodes))
    }

    fn play_episode<E, L>(
        &mut self,
        episode: usize,
        agent: &mut L,
        env: &mut E,
    ) -> Result<EpisodeSummary>
    where
        E: Environment,
        L: Learner<E::State, E::Action> + ?Sized,
    {
        let training = agent.is_in_training();
        agent.start_episode();
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let mut state = env.reset()?;
        let mut legal = env.legal_actions(&state);
        let mut steps = 0;

        loop {
            if self.config.max_steps.is_some_and(|max| steps >= max) {
                warn!(
                    "{}: episode {episode} cut off after {steps} steps",
                    agent.name()
                );
                break;
            }
            let Some(action) = agent.select_action(&state, &legal) else {
                break;
            };

            let (next_state, reward) = env.step(&action)?;
            let next_legal = env.legal_actions(&next_state);
            let transition = Transition::new(state, action, next_state, reward);
            agent.observe_transition(&transition, &next_legal)?;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, reward)?;
            }
            steps += 1;

            state = transition.next_state;
            legal = next_legal;
        }

        let reward = agent.stop_episode();
        debug!(
            "{}: episode {episode} finished in {steps} steps with reward {reward}",
            agent.name()
        );

        Ok(EpisodeSummary {
            episode,
            reward,
            steps,
            training,
        })
    }
}
