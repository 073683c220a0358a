//! Learning agent: value store plus the bound selector and update rule

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    config::{Algorithm, LearnerConfig},
    selector::{ActionSelector, greedy_action, random_action, selector_from_config},
    update::{Step, Transition, UpdateRule},
    value_store::ValueStore,
};
use crate::{
    Result,
    blackjack::{Action, BLACKJACK, StateIndex},
};

/// Chance of starting an exploring-start hand with a usable ace.
pub const EXPLORING_SOFT_PROBABILITY: f64 = 4.0 / 52.0;

/// Smallest total that can hold a usable ace (A + A).
const MIN_SOFT_TOTAL: u8 = 12;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular learner for one configuration.
///
/// Owns the [`ValueStore`] exclusively while training; the selector and the
/// update rule are resolved once from the [`LearnerConfig`].
#[derive(Debug)]
pub struct Agent {
    config: LearnerConfig,
    store: ValueStore,
    selector: Box<dyn ActionSelector>,
    rule: UpdateRule,
    step: u64,
    rng: StdRng,
}

impl Agent {
    /// Create an agent with fresh tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        Self::with_store(config, ValueStore::new())
    }

    /// Create an agent that continues from existing tables.
    pub fn with_store(config: LearnerConfig, store: ValueStore) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            selector: selector_from_config(&config),
            rule: UpdateRule::from_config(&config),
            rng: build_rng(config.seed),
            step: 1,
            store,
            config,
        })
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn algorithm(&self) -> Algorithm {
        self.rule.algorithm()
    }

    pub fn selector(&self) -> &dyn ActionSelector {
        self.selector.as_ref()
    }

    pub fn store(&self) -> &ValueStore {
        &self.store
    }

    pub fn into_store(self) -> ValueStore {
        self.store
    }

    /// Global time step `t`, starting at 1.
    pub fn step_count(&self) -> u64 {
        self.step
    }

    /// Random starting total in `2..=21`, soft with a small probability
    /// when the total can hold a usable ace.
    pub fn exploring_start(&mut self) -> (u8, bool) {
        let total = self.rng.random_range(2..=BLACKJACK);
        let soft = total >= MIN_SOFT_TOTAL && self.rng.random_bool(EXPLORING_SOFT_PROBABILITY);
        (total, soft)
    }

    /// Action actually played in `state`.
    ///
    /// Q-learning explores uniformly since its target is off-policy anyway.
    pub fn behaviour_action(&mut self, state: StateIndex) -> Action {
        match self.rule.algorithm() {
            Algorithm::QLearning => random_action(&mut self.rng),
            Algorithm::MonteCarlo | Algorithm::Sarsa => {
                self.selector
                    .select(&self.store, state, self.step, &mut self.rng)
            }
        }
    }

    /// Greedy action under the current policy, ties broken at random.
    pub fn greedy_action(&mut self, state: StateIndex) -> Action {
        greedy_action(&self.store, state, &mut self.rng)
    }

    /// Count a visit of `(state, action)` and advance the time step.
    pub fn record_visit(&mut self, state: StateIndex, action: Action) {
        self.store.record_visit(state, action);
        self.step += 1;
    }

    /// Feed one step to the online rule and pick the next action to play.
    ///
    /// Returns `None` once the hand is over.
    pub fn observe(&mut self, transition: &Transition) -> Option<Action> {
        if transition.done {
            self.rule
                .on_step(&mut self.store, transition, transition.action);
            return None;
        }

        let next_state = transition.next_state;
        let next_action = match self.rule.algorithm() {
            Algorithm::Sarsa => {
                let next_action = self.behaviour_action(next_state);
                self.rule.on_step(&mut self.store, transition, next_action);
                next_action
            }
            Algorithm::QLearning => {
                let target_action = self.greedy_action(next_state);
                self.rule
                    .on_step(&mut self.store, transition, target_action);
                self.behaviour_action(next_state)
            }
            Algorithm::MonteCarlo => self.behaviour_action(next_state),
        };
        Some(next_action)
    }

    /// Apply the end-of-episode update and re-derive the greedy policy of
    /// every visited state.
    pub fn finish_episode(&mut self, trajectory: &[Step], episode_return: f64) {
        self.rule
            .on_episode_end(&mut self.store, trajectory, episode_return);
        for step in trajectory {
            self.store.improve_policy(step.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(algorithm: Algorithm) -> Agent {
        Agent::new(LearnerConfig::new(algorithm).with_seed(9)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = LearnerConfig::default().with_exploration(-0.1);
        assert!(Agent::new(config).is_err());
    }

    #[test]
    fn test_exploring_start_stays_in_range() {
        let mut agent = agent(Algorithm::MonteCarlo);
        let mut saw_soft = false;
        for _ in 0..5_000 {
            let (total, soft) = agent.exploring_start();
            assert!((2..=21).contains(&total));
            if soft {
                assert!(total >= 12);
                saw_soft = true;
            }
        }
        assert!(saw_soft);
    }

    #[test]
    fn test_record_visit_advances_time() {
        let mut agent = agent(Algorithm::Sarsa);
        let state = StateIndex::new(13, 5);
        agent.record_visit(state, Action::Hit);
        assert_eq!(agent.step_count(), 2);
        assert_eq!(agent.store().visits(state, Action::Hit), 2);
    }

    #[test]
    fn test_observe_returns_none_when_done() {
        let mut agent = agent(Algorithm::Sarsa);
        let state = StateIndex::new(20, 10);
        let transition = Transition {
            state,
            action: Action::Stand,
            reward: 1.0,
            next_state: state,
            done: true,
        };
        assert_eq!(agent.observe(&transition), None);
        // sample-average step with N = 1 jumps straight to the reward
        assert_eq!(agent.store().value(state, Action::Stand), 1.0);
    }

    fn step_from(state: StateIndex, next_state: StateIndex) -> Transition {
        Transition {
            state,
            action: Action::Hit,
            reward: 0.0,
            next_state,
            done: false,
        }
    }

    /// Stand is clearly greedy at `next`; hit and double-down are not.
    fn store_with_greedy_stand(next: StateIndex) -> ValueStore {
        let mut store = ValueStore::new();
        store.set_value(next, Action::Hit, -0.6);
        store.set_value(next, Action::Stand, 0.8);
        store.set_value(next, Action::DoubleDown, 0.2);
        store.improve_policy(next);
        store
    }

    #[test]
    fn test_q_learning_bootstraps_from_greedy_next_action() {
        let (state, next) = (StateIndex::new(12, 10), StateIndex::new(15, 10));
        let mut played = Vec::new();
        for seed in 0..100 {
            let config = LearnerConfig::new(Algorithm::QLearning)
                .with_average_update(false)
                .with_learning_rate(0.5)
                .with_seed(seed);
            let mut agent = Agent::with_store(config, store_with_greedy_stand(next)).unwrap();

            let next_action = agent.observe(&step_from(state, next)).unwrap();
            // 0 + 0.5 * (0 + 1.0 * Q(s', stand) - 0)
            assert!((agent.store().value(state, Action::Hit) - 0.4).abs() < 1e-12);
            played.push(next_action);
        }
        // behaviour is drawn separately from the greedy target
        assert!(played.contains(&Action::Hit));
        assert!(played.contains(&Action::DoubleDown));
    }

    #[test]
    fn test_sarsa_bootstraps_from_returned_action() {
        let (state, next) = (StateIndex::new(12, 10), StateIndex::new(15, 10));
        let mut played = Vec::new();
        for seed in 0..100 {
            let config = LearnerConfig::new(Algorithm::Sarsa)
                .with_average_update(false)
                .with_learning_rate(0.5)
                .with_exploration(1.0)
                .with_seed(seed);
            let mut agent = Agent::with_store(config, store_with_greedy_stand(next)).unwrap();

            let next_action = agent.observe(&step_from(state, next)).unwrap();
            let expected = 0.5 * agent.store().value(next, next_action);
            assert!((agent.store().value(state, Action::Hit) - expected).abs() < 1e-12);
            played.push(next_action);
        }
        assert!(played.iter().any(|&action| action != Action::Stand));
    }

    #[test]
    fn test_finish_episode_improves_visited_states() {
        let mut agent = agent(Algorithm::MonteCarlo);
        let state = StateIndex::new(20, 10);
        agent.record_visit(state, Action::Stand);
        let trajectory = [Step {
            state,
            action: Action::Stand,
            reward: 1.0,
        }];
        agent.finish_episode(&trajectory, 1.0);

        assert!((agent.store().value(state, Action::Stand) - 0.5).abs() < 1e-12);
        assert_eq!(agent.store().policy(state), [0.0, 1.0, 0.0]);
    }
}
