//! Exploration strategies
//!
//! Selectors read the [`ValueStore`] and never mutate it. Randomness is
//! passed in so that runs can be replayed from a seed.

use std::fmt;

use rand::{Rng, RngCore, seq::IndexedRandom};

use super::{
    config::{LearnerConfig, SelectorKind, UcbRanking},
    value_store::{ValueStore, maximizers},
};
use crate::blackjack::{ACTION_COUNT, Action, StateIndex};

/// Uniform over hit, stand and double-down.
pub fn random_action<R: Rng + ?Sized>(rng: &mut R) -> Action {
    Action::ALL[rng.random_range(0..ACTION_COUNT)]
}

/// Uniform among the actions holding the largest policy probability.
pub fn greedy_action<R: Rng + ?Sized>(store: &ValueStore, state: StateIndex, rng: &mut R) -> Action {
    choose_among(&store.policy_maximizers(state), rng)
}

/// Random action with probability `epsilon`, greedy otherwise.
pub fn epsilon_greedy_action<R: Rng + ?Sized>(
    store: &ValueStore,
    state: StateIndex,
    epsilon: f64,
    rng: &mut R,
) -> Action {
    if rng.random::<f64>() < epsilon {
        random_action(rng)
    } else {
        greedy_action(store, state, rng)
    }
}

/// Upper-confidence-bound scores `Q + c·sqrt(ln t / N)` for one state.
pub fn ucb_scores(store: &ValueStore, state: StateIndex, c: f64, step: u64) -> [f64; ACTION_COUNT] {
    let log_t = (step.max(1) as f64).ln();
    let mut scores = [0.0; ACTION_COUNT];
    for action in Action::ALL {
        let visits = store.visits(state, action) as f64;
        scores[action.index()] = store.value(state, action) + c * (log_t / visits).sqrt();
    }
    scores
}

/// UCB selection, ranking either by score or by the greedy policy.
pub fn ucb_action<R: Rng + ?Sized>(
    store: &ValueStore,
    state: StateIndex,
    c: f64,
    step: u64,
    ranking: UcbRanking,
    rng: &mut R,
) -> Action {
    match ranking {
        UcbRanking::Score => choose_among(&maximizers(&ucb_scores(store, state, c, step)), rng),
        UcbRanking::Policy => greedy_action(store, state, rng),
    }
}

fn choose_among<R: Rng + ?Sized>(candidates: &[Action], rng: &mut R) -> Action {
    // maximizers always keeps the row maximum itself
    *candidates
        .choose(rng)
        .unwrap_or_else(|| panic!("no candidate actions to choose from"))
}

/// Strategy picking the behaviour action for a state.
pub trait ActionSelector: Send + fmt::Debug {
    /// `step` is the global time step, starting at 1.
    fn select(
        &self,
        store: &ValueStore,
        state: StateIndex,
        step: u64,
        rng: &mut dyn RngCore,
    ) -> Action;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy)]
pub struct EpsilonGreedy {
    pub epsilon: f64,
}

impl ActionSelector for EpsilonGreedy {
    fn select(
        &self,
        store: &ValueStore,
        state: StateIndex,
        _step: u64,
        rng: &mut dyn RngCore,
    ) -> Action {
        epsilon_greedy_action(store, state, self.epsilon, rng)
    }

    fn name(&self) -> &str {
        "epsilon-greedy"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Ucb {
    pub c: f64,
    pub ranking: UcbRanking,
}

impl ActionSelector for Ucb {
    fn select(
        &self,
        store: &ValueStore,
        state: StateIndex,
        step: u64,
        rng: &mut dyn RngCore,
    ) -> Action {
        ucb_action(store, state, self.c, step, self.ranking, rng)
    }

    fn name(&self) -> &str {
        "ucb"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Greedy;

impl ActionSelector for Greedy {
    fn select(
        &self,
        store: &ValueStore,
        state: StateIndex,
        _step: u64,
        rng: &mut dyn RngCore,
    ) -> Action {
        greedy_action(store, state, rng)
    }

    fn name(&self) -> &str {
        "greedy"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl ActionSelector for UniformRandom {
    fn select(
        &self,
        _store: &ValueStore,
        _state: StateIndex,
        _step: u64,
        rng: &mut dyn RngCore,
    ) -> Action {
        random_action(rng)
    }

    fn name(&self) -> &str {
        "uniform-random"
    }
}

/// Bind the configured selector once.
pub fn selector_from_config(config: &LearnerConfig) -> Box<dyn ActionSelector> {
    match config.selector {
        SelectorKind::EpsilonGreedy => Box::new(EpsilonGreedy {
            epsilon: config.exploration,
        }),
        SelectorKind::Ucb => Box::new(Ucb {
            c: config.exploration,
            ranking: config.ucb_ranking,
        }),
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn state() -> StateIndex {
        StateIndex::new(12, 4)
    }

    #[test]
    fn test_greedy_follows_policy() {
        let mut store = ValueStore::new();
        store.set_value(state(), Action::DoubleDown, 1.0);
        store.improve_policy(state());

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(greedy_action(&store, state(), &mut rng), Action::DoubleDown);
        }
    }

    #[test]
    fn test_greedy_breaks_ties_randomly() {
        let mut store = ValueStore::new();
        store.set_value(state(), Action::Hit, 0.3);
        store.set_value(state(), Action::Stand, 0.3);
        store.improve_policy(state());

        let mut rng = StdRng::seed_from_u64(2);
        let mut counts = [0usize; ACTION_COUNT];
        for _ in 0..1_000 {
            counts[greedy_action(&store, state(), &mut rng).index()] += 1;
        }
        assert!(counts[Action::Hit.index()] > 400);
        assert!(counts[Action::Stand.index()] > 400);
        assert_eq!(counts[Action::DoubleDown.index()], 0);
    }

    #[test]
    fn test_epsilon_zero_is_greedy() {
        let mut store = ValueStore::new();
        store.set_value(state(), Action::Stand, 1.0);
        store.improve_policy(state());

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert_eq!(
                epsilon_greedy_action(&store, state(), 0.0, &mut rng),
                Action::Stand
            );
        }
    }

    #[test]
    fn test_ucb_score_prefers_unvisited_actions() {
        let mut store = ValueStore::new();
        store.set_visits(state(), Action::Hit, 500);
        store.set_visits(state(), Action::Stand, 500);

        let mut rng = StdRng::seed_from_u64(4);
        let action = ucb_action(&store, state(), 1.0, 1_000, UcbRanking::Score, &mut rng);
        assert_eq!(action, Action::DoubleDown);
    }

    #[test]
    fn test_ucb_policy_ranking_ignores_score() {
        let mut store = ValueStore::new();
        store.set_value(state(), Action::Hit, 0.2);
        store.improve_policy(state());
        store.set_visits(state(), Action::Hit, 500);

        let mut rng = StdRng::seed_from_u64(5);
        let action = ucb_action(&store, state(), 10.0, 1_000, UcbRanking::Policy, &mut rng);
        assert_eq!(action, Action::Hit);
    }

    #[test]
    fn test_ucb_scores_at_first_step_equal_values() {
        let mut store = ValueStore::new();
        store.set_value(state(), Action::Stand, 0.4);
        let scores = ucb_scores(&store, state(), 2.0, 1);
        assert_eq!(scores, store.action_values(state()));
    }

    #[test]
    fn test_selector_from_config() {
        let config = LearnerConfig::default().with_selector(SelectorKind::Ucb);
        assert_eq!(selector_from_config(&config).name(), "ucb");
        assert_eq!(
            selector_from_config(&LearnerConfig::default()).name(),
            "epsilon-greedy"
        );
    }
}
