//! Q-learning agents
//!
//! [`QLearningAgent`] wires an estimator, ε-greedy exploration and the
//! episode lifecycle together. It is generic over the estimator, so the
//! tabular and the approximate agent share every line of selection and
//! update logic and differ only in the [`QFunction`] they own.

use std::{fmt, marker::PhantomData};

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use super::{
    exploration::EpsilonGreedy,
    linear::{FeatureWeights, LinearQFunction},
    policy::{greedy_action, state_value},
    q_function::{QFunction, TdParams, Transition},
    q_table::QTable,
};
use crate::{Result, app::AgentConfig, features::ExtractorRegistry, ports::Learner};

/// Agent learning a Q-table
pub type TabularQAgent<S, A> = QLearningAgent<S, A, QTable<S, A>>;

/// Agent learning linear feature weights
pub type ApproximateQAgent<S, A> = QLearningAgent<S, A, LinearQFunction<S, A>>;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

fn exploration_for(config: &AgentConfig, frozen: bool) -> EpsilonGreedy {
    EpsilonGreedy::new(if frozen { 0.0 } else { config.epsilon })
}

/// Q-learning agent (off-policy TD control)
///
/// Learns Q* by always updating toward the best next-state value,
/// regardless of the action actually taken next. Once `num_training`
/// episodes have completed the agent freezes: it stops updating and acts
/// purely greedily.
pub struct QLearningAgent<S, A, Q> {
    name: &'static str,
    q: Q,
    config: AgentConfig,
    exploration: EpsilonGreedy,
    rng: StdRng,
    rng_seed: Option<u64>,
    frozen: bool,
    episodes_so_far: usize,
    episode_rewards: f64,
    accum_train_rewards: f64,
    accum_test_rewards: f64,
    _marker: PhantomData<fn(&S, &A)>,
}

impl<S, A> TabularQAgent<S, A>
where
    S: Eq + std::hash::Hash + Clone + Send,
    A: Eq + std::hash::Hash + Clone + Send,
{
    /// Create a Q-learning agent with an empty Q-table
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::with_estimator("Q-Learning", config, QTable::new())
    }
}

impl<S, A> ApproximateQAgent<S, A>
where
    S: fmt::Debug + 'static,
    A: fmt::Debug + 'static,
{
    /// Create an approximate agent using the built-in extractor registry
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::from_registry(config, &ExtractorRegistry::with_builtins())
    }
}

impl<S, A> ApproximateQAgent<S, A> {
    /// Create an approximate agent whose extractor is `config.extractor`
    /// looked up in `registry`.
    pub fn from_registry(config: AgentConfig, registry: &ExtractorRegistry<S, A>) -> Result<Self> {
        let extractor = registry.resolve(&config.extractor)?;
        Self::with_estimator(
            "Approximate Q-Learning",
            config,
            LinearQFunction::new(extractor),
        )
    }

    pub fn weights(&self) -> &FeatureWeights {
        self.q.weights()
    }
}

impl<S, A, Q> QLearningAgent<S, A, Q>
where
    Q: QFunction<S, A>,
{
    /// Create an agent around an arbitrary estimator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// if the hyperparameters are out of range.
    pub fn with_estimator(name: &'static str, config: AgentConfig, q: Q) -> Result<Self> {
        config.validate()?;
        let rng_seed = config.seed;
        // A zero training budget is already exhausted.
        let frozen = config.num_training == 0;
        Ok(Self {
            name,
            q,
            exploration: exploration_for(&config, frozen),
            config,
            rng: build_rng(rng_seed),
            rng_seed,
            frozen,
            episodes_so_far: 0,
            episode_rewards: 0.0,
            accum_train_rewards: 0.0,
            accum_test_rewards: 0.0,
            _marker: PhantomData,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The estimator this agent learns
    pub fn estimator(&self) -> &Q {
        &self.q
    }

    /// Exploration rate currently in effect (0 once frozen)
    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    /// Learning rate currently in effect (0 once frozen)
    pub fn alpha(&self) -> f64 {
        if self.frozen { 0.0 } else { self.config.alpha }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn q_value(&self, state: &S, action: &A) -> f64 {
        self.q.q_value(state, action)
    }

    /// Max Q-value over `legal_actions`, 0.0 if there are none.
    pub fn value(&self, state: &S, legal_actions: &[A]) -> f64 {
        state_value(&self.q, state, legal_actions)
    }

    /// Greedy action with random tie-breaking, no exploration.
    pub fn policy(&mut self, state: &S, legal_actions: &[A]) -> Option<A>
    where
        A: Clone,
    {
        greedy_action(&self.q, state, legal_actions, &mut self.rng)
    }

    /// ε-greedy action for `state`, or `None` when no action is legal.
    pub fn get_action(&mut self, state: &S, legal_actions: &[A]) -> Option<A>
    where
        A: Clone,
    {
        self.exploration
            .choose_action(&self.q, state, legal_actions, &mut self.rng)
    }

    /// Apply exactly one TD update for `transition`.
    ///
    /// Ignored once the agent is frozen.
    pub fn update(&mut self, transition: &Transition<S, A>, next_legal: &[A]) {
        if self.frozen {
            return;
        }
        let params = TdParams {
            alpha: self.config.alpha,
            gamma: self.config.gamma,
        };
        self.q.update(transition, next_legal, params);
    }

    pub fn episodes_so_far(&self) -> usize {
        self.episodes_so_far
    }

    pub fn is_in_training(&self) -> bool {
        self.episodes_so_far < self.config.num_training
    }

    pub fn is_in_testing(&self) -> bool {
        !self.is_in_training()
    }

    /// Reward collected so far in the current episode
    pub fn episode_rewards(&self) -> f64 {
        self.episode_rewards
    }

    /// Total reward over all completed training episodes
    pub fn accum_train_rewards(&self) -> f64 {
        self.accum_train_rewards
    }

    /// Total reward over all completed testing episodes
    pub fn accum_test_rewards(&self) -> f64 {
        self.accum_test_rewards
    }

    pub fn start_episode(&mut self) {
        self.episode_rewards = 0.0;
    }

    /// Record the reward of `transition` and learn from it.
    pub fn observe_transition(&mut self, transition: &Transition<S, A>, next_legal: &[A]) {
        self.episode_rewards += transition.reward;
        self.update(transition, next_legal);
    }

    /// Close the current episode and return its total reward.
    ///
    /// When this completes the `num_training`-th episode the agent freezes.
    pub fn stop_episode(&mut self) -> f64 {
        let reward = self.episode_rewards;
        if self.is_in_training() {
            self.accum_train_rewards += reward;
        } else {
            self.accum_test_rewards += reward;
        }
        self.episodes_so_far += 1;
        self.episode_rewards = 0.0;

        if !self.frozen && self.episodes_so_far >= self.config.num_training {
            self.freeze();
        }
        reward
    }

    fn freeze(&mut self) {
        self.frozen = true;
        self.exploration = EpsilonGreedy::new(0.0);
        info!(
            "{}: training finished after {} episodes, acting greedily",
            self.name, self.episodes_so_far
        );
        if self.episodes_so_far == self.config.num_training {
            self.q.report_training_complete();
        }
    }

    /// Forget everything learned and restart the episode counters.
    pub fn reset(&mut self) {
        self.q.clear();
        self.frozen = self.config.num_training == 0;
        self.exploration = exploration_for(&self.config, self.frozen);
        self.episodes_so_far = 0;
        self.episode_rewards = 0.0;
        self.accum_train_rewards = 0.0;
        self.accum_test_rewards = 0.0;
        self.rng = build_rng(self.rng_seed);
        debug!("{}: reset", self.name);
    }
}

impl<S, A, Q: fmt::Debug> fmt::Debug for QLearningAgent<S, A, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QLearningAgent")
            .field("name", &self.name)
            .field("q", &self.q)
            .field("config", &self.config)
            .field("frozen", &self.frozen)
            .field("episodes_so_far", &self.episodes_so_far)
            .finish_non_exhaustive()
    }
}

impl<S, A, Q> Learner<S, A> for QLearningAgent<S, A, Q>
where
    A: Clone,
    Q: QFunction<S, A>,
{
    fn select_action(&mut self, state: &S, legal_actions: &[A]) -> Option<A> {
        self.get_action(state, legal_actions)
    }

    fn start_episode(&mut self) {
        QLearningAgent::start_episode(self);
    }

    fn observe_transition(
        &mut self,
        transition: &Transition<S, A>,
        next_legal: &[A],
    ) -> Result<()> {
        QLearningAgent::observe_transition(self, transition, next_legal);
        Ok(())
    }

    fn stop_episode(&mut self) -> f64 {
        QLearningAgent::stop_episode(self)
    }

    fn episodes_so_far(&self) -> usize {
        self.episodes_so_far
    }

    fn is_in_training(&self) -> bool {
        QLearningAgent::is_in_training(self)
    }

    fn name(&self) -> &str {
        self.name
    }

    fn reset(&mut self) -> Result<()> {
        QLearningAgent::reset(self);
        Ok(())
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        features::{BIAS_FEATURE, FeatureVector},
    };

    fn scenario_config() -> AgentConfig {
        AgentConfig::default()
            .with_epsilon(0.0)
            .with_alpha(0.5)
            .with_gamma(0.9)
            .with_num_training(10)
            .with_seed(42)
    }

    #[test]
    fn test_tabular_scenario() {
        let mut agent: TabularQAgent<&str, char> = TabularQAgent::new(scenario_config()).unwrap();
        let legal = ['A', 'B'];
        assert_eq!(agent.value(&"S", &legal), 0.0);
        assert_eq!(agent.q_value(&"S", &'A'), 0.0);

        let transition = Transition::new("S", 'A', "S", 10.0);
        agent.update(&transition, &[]);
        assert_eq!(agent.q_value(&"S", &'A'), 5.0);

        agent.update(&transition, &[]);
        assert_eq!(agent.q_value(&"S", &'A'), 7.5);
        assert_eq!(agent.estimator().len(), 1);
    }

    #[test]
    fn test_update_matches_td_formula() {
        let mut agent: TabularQAgent<u8, u8> = TabularQAgent::new(scenario_config()).unwrap();
        agent.update(&Transition::new(1, 0, 2, 4.0), &[]);
        agent.update(&Transition::new(0, 1, 1, 1.0), &[0, 7]);

        // Q(1,0) = 2.0 and Q(1,7) = 0.0, so max next = 2.0
        let expected = 0.0 + 0.5 * (1.0 + 0.9 * 2.0 - 0.0);
        assert!((agent.q_value(&0, &1) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_approximate_scenario() {
        let config = AgentConfig::default()
            .with_epsilon(0.0)
            .with_alpha(1.0)
            .with_gamma(0.0)
            .with_num_training(5)
            .with_extractor("BiasExtractor");
        let mut agent: ApproximateQAgent<u32, u32> = ApproximateQAgent::new(config).unwrap();

        agent.update(&Transition::new(0, 0, 1, 3.0), &[0, 1]);

        assert_eq!(agent.weights().weight(BIAS_FEATURE), 3.0);
        assert_eq!(agent.q_value(&17, &4), 3.0);
        assert_eq!(agent.q_value(&0, &0), 3.0);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let result: Result<TabularQAgent<u8, u8>> =
            TabularQAgent::new(AgentConfig::default().with_alpha(0.0));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));

        let result: Result<ApproximateQAgent<u8, u8>> =
            ApproximateQAgent::new(AgentConfig::default().with_epsilon(1.2));
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_unknown_extractor_fails_construction() {
        let result: Result<ApproximateQAgent<u8, u8>> =
            ApproximateQAgent::new(AgentConfig::default().with_extractor("NoSuchExtractor"));
        assert!(matches!(result, Err(Error::UnknownExtractor { .. })));
    }

    #[test]
    fn test_custom_registry_extractor() {
        let registry = ExtractorRegistry::<i32, i32>::empty().with("Distance", || {
            Box::new(|state: &i32, action: &i32| {
                FeatureVector::from([("distance".to_string(), f64::from((state + action).abs()))])
            })
        });
        let config = AgentConfig::default()
            .with_alpha(0.5)
            .with_gamma(0.0)
            .with_num_training(1)
            .with_extractor("Distance");
        let mut agent = ApproximateQAgent::from_registry(config, &registry).unwrap();

        agent.update(&Transition::new(1, 1, 0, 4.0), &[]);
        // w = 0 + 0.5 * 4.0 * 2.0
        assert_eq!(agent.weights().weight("distance"), 4.0);
        assert_eq!(agent.q_value(&-3, &0), 12.0);
    }

    #[test]
    fn test_from_registry_rejects_invalid_config() {
        let registry = ExtractorRegistry::<u8, u8>::with_builtins();
        let config = AgentConfig::default()
            .with_gamma(1.5)
            .with_extractor("BiasExtractor");
        let result = ApproximateQAgent::from_registry(config, &registry);
        assert!(matches!(result, Err(Error::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_no_legal_actions() {
        let mut agent: TabularQAgent<u8, u8> = TabularQAgent::new(scenario_config()).unwrap();
        assert_eq!(agent.get_action(&0, &[]), None);
        assert_eq!(agent.policy(&0, &[]), None);
        assert_eq!(agent.value(&0, &[]), 0.0);
    }

    #[test]
    fn test_lifecycle_freezes_after_training() {
        let config = AgentConfig::default()
            .with_epsilon(0.5)
            .with_alpha(0.5)
            .with_num_training(2);
        let mut agent: TabularQAgent<u8, u8> = TabularQAgent::new(config).unwrap().with_seed(1);
        let transition = Transition::new(0, 0, 1, 2.0);

        for _ in 0..2 {
            assert!(agent.is_in_training());
            agent.start_episode();
            agent.observe_transition(&transition, &[]);
            assert_eq!(agent.stop_episode(), 2.0);
        }

        assert_eq!(agent.episodes_so_far(), 2);
        assert!(agent.is_in_testing());
        assert!(agent.is_frozen());
        assert_eq!(agent.epsilon(), 0.0);
        assert_eq!(agent.alpha(), 0.0);
        assert_eq!(agent.accum_train_rewards(), 4.0);

        let learned = agent.q_value(&0, &0);
        agent.start_episode();
        agent.observe_transition(&transition, &[]);
        agent.stop_episode();
        assert_eq!(agent.q_value(&0, &0), learned);
        assert_eq!(agent.accum_test_rewards(), 2.0);
    }

    #[test]
    fn test_zero_training_budget_starts_frozen() {
        let config = AgentConfig::default()
            .with_epsilon(1.0)
            .with_alpha(1.0)
            .with_num_training(0);
        let mut agent: TabularQAgent<u8, u8> = TabularQAgent::new(config).unwrap().with_seed(4);
        assert!(agent.is_frozen());
        assert!(agent.is_in_testing());
        assert_eq!(agent.epsilon(), 0.0);
        assert_eq!(agent.alpha(), 0.0);

        agent.start_episode();
        agent.observe_transition(&Transition::new(0, 0, 1, 1.0), &[]);
        assert_eq!(agent.stop_episode(), 1.0);
        assert_eq!(agent.q_value(&0, &0), 0.0);
        assert_eq!(agent.accum_test_rewards(), 1.0);
        assert_eq!(agent.accum_train_rewards(), 0.0);

        agent.reset();
        assert!(agent.is_frozen());
        assert_eq!(agent.epsilon(), 0.0);
    }

    #[test]
    fn test_zero_training_budget_acts_greedily() {
        let mut table = QTable::new();
        table.set(0u8, 1u8, 2.0);
        let config = AgentConfig::default().with_epsilon(1.0).with_num_training(0);
        let mut agent: TabularQAgent<u8, u8> =
            QLearningAgent::with_estimator("Q-Learning", config, table)
                .unwrap()
                .with_seed(8);

        for _ in 0..200 {
            assert_eq!(agent.get_action(&0, &[0, 1, 2]), Some(1));
        }
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut agent: TabularQAgent<u8, u8> =
            TabularQAgent::new(scenario_config().with_num_training(1)).unwrap();
        agent.start_episode();
        agent.observe_transition(&Transition::new(0, 0, 1, 1.0), &[]);
        agent.stop_episode();
        assert!(agent.is_frozen());

        agent.reset();
        assert!(!agent.is_frozen());
        assert_eq!(agent.episodes_so_far(), 0);
        assert!(agent.estimator().is_empty());
        assert_eq!(agent.epsilon(), 0.0);
        assert_eq!(agent.alpha(), 0.5);
    }

    #[test]
    fn test_same_seed_same_choices() {
        let config = AgentConfig::default().with_epsilon(0.5).with_num_training(10);
        let mut a: TabularQAgent<u8, u8> = TabularQAgent::new(config.clone()).unwrap().with_seed(9);
        let mut b: TabularQAgent<u8, u8> = TabularQAgent::new(config).unwrap().with_seed(9);
        let legal = [0, 1, 2, 3];
        for _ in 0..64 {
            assert_eq!(a.get_action(&0, &legal), b.get_action(&0, &legal));
        }
    }

    #[test]
    fn test_agents_are_independent() {
        let mut a: TabularQAgent<u8, u8> = TabularQAgent::new(scenario_config()).unwrap();
        let b: TabularQAgent<u8, u8> = TabularQAgent::new(scenario_config()).unwrap();
        a.update(&Transition::new(0, 0, 0, 1.0), &[]);
        assert_eq!(b.q_value(&0, &0), 0.0);
    }
}
