//! Learner configuration

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, blackjack::TableRules};

/// Episodes between two convergence checks unless configured otherwise.
pub const DEFAULT_CONVERGENCE_INTERVAL: usize = 20_000;

/// Value-update algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Every-visit Monte-Carlo control, updated at episode end.
    #[default]
    MonteCarlo,
    /// On-policy TD(0), updated after every step.
    Sarsa,
    /// Off-policy TD(0), updated after every step.
    QLearning,
}

impl Algorithm {
    /// TD methods update during the episode; Monte-Carlo waits for the return.
    pub fn is_online(self) -> bool {
        !matches!(self, Algorithm::MonteCarlo)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Algorithm::MonteCarlo => "mc",
            Algorithm::Sarsa => "sarsa",
            Algorithm::QLearning => "ql",
        };
        f.write_str(label)
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mc" | "monte-carlo" | "montecarlo" | "monte_carlo" => Ok(Algorithm::MonteCarlo),
            "sarsa" => Ok(Algorithm::Sarsa),
            "ql" | "q-learning" | "qlearning" | "q_learning" => Ok(Algorithm::QLearning),
            _ => Err(Error::ParseAlgorithm {
                input: s.to_string(),
                expected: "mc, sarsa, ql".to_string(),
            }),
        }
    }
}

/// Exploration strategy used to pick behaviour actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    #[default]
    EpsilonGreedy,
    Ucb,
}

impl fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SelectorKind::EpsilonGreedy => "eps",
            SelectorKind::Ucb => "ucb",
        };
        f.write_str(label)
    }
}

impl FromStr for SelectorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eps" | "epsilon" | "epsilon-greedy" | "epsilon_greedy" => {
                Ok(SelectorKind::EpsilonGreedy)
            }
            "ucb" => Ok(SelectorKind::Ucb),
            _ => Err(Error::ParseSelector {
                input: s.to_string(),
                expected: "eps, ucb".to_string(),
            }),
        }
    }
}

/// What UCB ranks actions by.
///
/// `Score` is the textbook rule `Q + c·sqrt(ln t / N)`. `Policy` ranks by
/// the current greedy policy and therefore behaves like pure greedy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UcbRanking {
    #[default]
    Score,
    Policy,
}

impl fmt::Display for UcbRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UcbRanking::Score => "score",
            UcbRanking::Policy => "policy",
        };
        f.write_str(label)
    }
}

impl FromStr for UcbRanking {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(UcbRanking::Score),
            "policy" => Ok(UcbRanking::Policy),
            _ => Err(Error::ParseUcbRanking {
                input: s.to_string(),
                expected: "score, policy".to_string(),
            }),
        }
    }
}

/// Configuration for a learning run.
///
/// # Examples
///
/// ```
/// use blackjack_rl::learning::{Algorithm, LearnerConfig, SelectorKind};
///
/// let config = LearnerConfig::new(Algorithm::Sarsa)
///     .with_selector(SelectorKind::EpsilonGreedy)
///     .with_exploration(0.1)
///     .with_iterations(10_000)
///     .with_seed(42);
/// config.validate()?;
/// # Ok::<(), blackjack_rl::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerConfig {
    pub algorithm: Algorithm,
    pub selector: SelectorKind,
    /// Fixed step size α, ignored when `average_update` is on
    pub learning_rate: f64,
    /// Discount factor γ (TD methods only)
    pub discount_factor: f64,
    /// ε for ε-greedy, c for UCB
    pub exploration: f64,
    /// Number of training episodes
    pub iterations: usize,
    /// Use α = 1/N(s,a) instead of the fixed step size
    pub average_update: bool,
    /// Stop early when the convergence heuristic passes
    pub check_convergence: bool,
    /// Episodes between convergence checks
    pub convergence_interval: usize,
    pub ucb_ranking: UcbRanking,
    pub rules: TableRules,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl LearnerConfig {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            selector: SelectorKind::default(),
            learning_rate: 0.1,
            discount_factor: 1.0,
            exploration: 0.15,
            iterations: 2_500_000,
            average_update: true,
            check_convergence: false,
            convergence_interval: DEFAULT_CONVERGENCE_INTERVAL,
            ucb_ranking: UcbRanking::default(),
            rules: TableRules::default(),
            seed: None,
        }
    }

    pub fn with_selector(mut self, selector: SelectorKind) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_learning_rate(mut self, alpha: f64) -> Self {
        self.learning_rate = alpha;
        self
    }

    pub fn with_discount_factor(mut self, gamma: f64) -> Self {
        self.discount_factor = gamma;
        self
    }

    pub fn with_exploration(mut self, value: f64) -> Self {
        self.exploration = value;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_average_update(mut self, enabled: bool) -> Self {
        self.average_update = enabled;
        self
    }

    pub fn with_convergence_check(mut self, enabled: bool) -> Self {
        self.check_convergence = enabled;
        self
    }

    pub fn with_convergence_interval(mut self, interval: usize) -> Self {
        self.convergence_interval = interval;
        self
    }

    pub fn with_ucb_ranking(mut self, ranking: UcbRanking) -> Self {
        self.ucb_ranking = ranking;
        self
    }

    pub fn with_rules(mut self, rules: TableRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameters outside their documented ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.average_update {
            check_range(
                "learning_rate",
                self.learning_rate,
                "(0, 1]",
                |v| v > 0.0 && v <= 1.0,
            )?;
        }
        if self.algorithm.is_online() {
            check_range(
                "discount_factor",
                self.discount_factor,
                "[0, 1]",
                |v| (0.0..=1.0).contains(&v),
            )?;
        }
        match self.selector {
            SelectorKind::EpsilonGreedy => {
                check_range("epsilon", self.exploration, "[0, 1]", |v| {
                    (0.0..=1.0).contains(&v)
                })?;
            }
            SelectorKind::Ucb => {
                check_range("ucb_c", self.exploration, "a finite value >= 0", |v| {
                    v.is_finite() && v >= 0.0
                })?;
            }
        }
        if self.check_convergence && self.convergence_interval == 0 {
            return Err(Error::InvalidConfiguration {
                message: "convergence_interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    expected: &'static str,
    accept: impl Fn(f64) -> bool,
) -> Result<()> {
    if accept(value) {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_algorithm() {
        assert_eq!("MC".parse::<Algorithm>().unwrap(), Algorithm::MonteCarlo);
        assert_eq!("sarsa".parse::<Algorithm>().unwrap(), Algorithm::Sarsa);
        assert_eq!("QL".parse::<Algorithm>().unwrap(), Algorithm::QLearning);
        assert!(matches!(
            "td-lambda".parse::<Algorithm>(),
            Err(Error::ParseAlgorithm { .. })
        ));
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!(
            "EPS".parse::<SelectorKind>().unwrap(),
            SelectorKind::EpsilonGreedy
        );
        assert_eq!("ucb".parse::<SelectorKind>().unwrap(), SelectorKind::Ucb);
        assert!(matches!(
            "softmax".parse::<SelectorKind>(),
            Err(Error::ParseSelector { .. })
        ));
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for algorithm in [Algorithm::MonteCarlo, Algorithm::Sarsa, Algorithm::QLearning] {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
        for ranking in [UcbRanking::Score, UcbRanking::Policy] {
            assert_eq!(ranking.to_string().parse::<UcbRanking>().unwrap(), ranking);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        LearnerConfig::default().validate().unwrap();
    }

    #[test]
    fn test_epsilon_out_of_range_is_rejected() {
        let config = LearnerConfig::default().with_exploration(1.5);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter { name: "epsilon", .. })
        ));
    }

    #[test]
    fn test_learning_rate_only_checked_without_average_update() {
        let config = LearnerConfig::default().with_learning_rate(0.0);
        config.validate().unwrap();
        assert!(config.with_average_update(false).validate().is_err());
    }

    #[test]
    fn test_discount_checked_for_td_methods() {
        let config = LearnerConfig::new(Algorithm::QLearning).with_discount_factor(1.2);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidParameter {
                name: "discount_factor",
                ..
            })
        ));
        LearnerConfig::new(Algorithm::MonteCarlo)
            .with_discount_factor(1.2)
            .validate()
            .unwrap();
    }

    #[test]
    fn test_ucb_allows_large_c() {
        LearnerConfig::default()
            .with_selector(SelectorKind::Ucb)
            .with_exploration(2.0)
            .validate()
            .unwrap();
    }

    #[test]
    fn test_zero_convergence_interval_is_rejected() {
        let config = LearnerConfig::default()
            .with_convergence_check(true)
            .with_convergence_interval(0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
