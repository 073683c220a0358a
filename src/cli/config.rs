//! Shared argument groups for CLI commands

use std::path::Path;

use clap::Args;

use crate::{
    Result,
    adapters::{JsonRepository, MsgPackRepository, RepositoryFormat},
    app::{App, AppBuilder},
    blackjack::TableRules,
    learning::{
        Algorithm, DEFAULT_CONVERGENCE_INTERVAL, LearnerConfig, SelectorKind, UcbRanking,
    },
};

/// Learner settings shared by `train` and `sweep`.
#[derive(Args, Debug, Clone)]
pub struct LearnerArgs {
    /// Algorithm: mc, sarsa or ql
    #[arg(long, short = 'a', default_value = "mc")]
    pub algorithm: String,

    /// Exploration strategy: eps or ucb
    #[arg(long, short = 's', default_value = "eps")]
    pub selector: String,

    /// Fixed learning rate α (only used with --no-average-update)
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Discount factor γ for SARSA and Q-learning
    #[arg(long, default_value_t = 1.0)]
    pub discount: f64,

    /// ε for eps, c for ucb
    #[arg(long, short = 'e', default_value_t = 0.15)]
    pub exploration: f64,

    /// Number of training episodes
    #[arg(long, short = 'n', default_value_t = 2_500_000)]
    pub iterations: usize,

    /// Use the fixed learning rate instead of α = 1/N
    #[arg(long, default_value_t = false)]
    pub no_average_update: bool,

    /// Stop early once the values are stable
    #[arg(long, default_value_t = false)]
    pub check_convergence: bool,

    /// Episodes between convergence checks
    #[arg(long, default_value_t = DEFAULT_CONVERGENCE_INTERVAL)]
    pub convergence_interval: usize,

    /// What UCB ranks by: score or policy
    #[arg(long, default_value = "score")]
    pub ucb_ranking: String,

    /// Dealer stands on soft 17
    #[arg(long, default_value_t = false)]
    pub stand_soft_17: bool,

    /// Allow doubling down on 21
    #[arg(long, default_value_t = false)]
    pub double_on_21: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl LearnerArgs {
    /// Parse the string options and build a validated configuration.
    pub fn to_config(&self) -> Result<LearnerConfig> {
        let rules = TableRules::default()
            .with_dealer_hits_soft_17(!self.stand_soft_17)
            .with_double_on_21(self.double_on_21);
        let mut config = LearnerConfig::new(self.algorithm.parse::<Algorithm>()?)
            .with_selector(self.selector.parse::<SelectorKind>()?)
            .with_learning_rate(self.learning_rate)
            .with_discount_factor(self.discount)
            .with_exploration(self.exploration)
            .with_iterations(self.iterations)
            .with_average_update(!self.no_average_update)
            .with_convergence_check(self.check_convergence)
            .with_convergence_interval(self.convergence_interval)
            .with_ucb_ranking(self.ucb_ranking.parse::<UcbRanking>()?)
            .with_rules(rules);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Build an app whose repository matches `format`, or the extension of
/// `path` when no format is given.
pub fn app_for(path: &Path, format: Option<&str>) -> Result<App> {
    let format = match format {
        Some(name) => name.parse()?,
        None => RepositoryFormat::from_path(path),
    };
    let builder = AppBuilder::new();
    let builder = match format {
        RepositoryFormat::MsgPack => builder.with_repository(MsgPackRepository::new()),
        RepositoryFormat::Json => builder.with_repository(JsonRepository::pretty()),
    };
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        learner: LearnerArgs,
    }

    #[test]
    fn test_defaults_match_library_defaults() {
        let harness = Harness::parse_from(["test"]);
        let config = harness.learner.to_config().unwrap();
        assert_eq!(config, LearnerConfig::default());
    }

    #[test]
    fn test_flags_reach_the_config() {
        let harness = Harness::parse_from([
            "test",
            "-a",
            "ql",
            "-s",
            "ucb",
            "-e",
            "2.0",
            "--stand-soft-17",
            "--seed",
            "9",
        ]);
        let config = harness.learner.to_config().unwrap();
        assert_eq!(config.algorithm, Algorithm::QLearning);
        assert_eq!(config.selector, SelectorKind::Ucb);
        assert_eq!(config.exploration, 2.0);
        assert!(!config.rules.dealer_hits_soft_17);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_unknown_algorithm_fails_fast() {
        let harness = Harness::parse_from(["test", "-a", "td-lambda"]);
        assert!(matches!(
            harness.learner.to_config(),
            Err(crate::Error::ParseAlgorithm { .. })
        ));
    }

    #[test]
    fn test_app_for_unknown_format() {
        assert!(app_for(Path::new("t.msgpack"), Some("yaml")).is_err());
        assert!(app_for(Path::new("t.json"), None).is_ok());
    }
}
