//! Dependency injection container for the Blackjack learner.
//!
//! The container owns infrastructure dependencies (table persistence, the
//! default seed) and provides factory methods for agents and pipelines.

use std::{path::Path, sync::Arc};

use crate::{
    Result,
    adapters::MsgPackRepository,
    learning::{Agent, LearnerConfig, SavedTables},
    pipeline::{TrainingPipeline, TrainingResult},
    ports::{Observer, TableRepository},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use blackjack_rl::app::App;
/// use blackjack_rl::learning::LearnerConfig;
///
/// let app = App::new();
/// let agent = app.create_agent(LearnerConfig::default().with_seed(42))?;
/// # Ok::<(), blackjack_rl::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use blackjack_rl::app::App;
/// use blackjack_rl::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for table persistence
    repository: Arc<dyn TableRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults: MessagePack persistence
    /// and no default seed.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn repository(&self) -> Arc<dyn TableRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Fill in the container's default seed when the config has none.
    pub fn resolve_config(&self, config: LearnerConfig) -> LearnerConfig {
        match (config.seed, self.default_seed) {
            (None, Some(seed)) => config.with_seed(seed),
            _ => config,
        }
    }

    /// Create a fresh agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of range.
    pub fn create_agent(&self, config: LearnerConfig) -> Result<Agent> {
        Agent::new(self.resolve_config(config))
    }

    /// Create a training pipeline on an infinite shoe.
    pub fn create_pipeline(&self, config: &LearnerConfig) -> TrainingPipeline {
        TrainingPipeline::new(&self.resolve_config(config.clone()))
    }

    /// Train a fresh agent with the given observers attached.
    pub fn train(
        &self,
        config: LearnerConfig,
        observers: Vec<Box<dyn Observer>>,
    ) -> Result<(Agent, TrainingResult)> {
        let config = self.resolve_config(config);
        let mut agent = Agent::new(config.clone())?;
        let mut pipeline = observers
            .into_iter()
            .fold(TrainingPipeline::new(&config), |pipeline, observer| {
                pipeline.with_observer(observer)
            });
        let result = pipeline.run(&mut agent)?;
        Ok((agent, result))
    }

    /// Persist the agent's tables along with the run summary.
    pub fn save_agent(&self, agent: &Agent, result: &TrainingResult, path: &Path) -> Result<()> {
        let tables = SavedTables::new(agent.store(), agent.config().clone(), result.metadata());
        self.repository.save(&tables, path)
    }

    pub fn load_tables(&self, path: &Path) -> Result<SavedTables> {
        self.repository.load(path)
    }

    /// Rebuild an agent from saved tables, keeping the saved configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use blackjack_rl::app::App;
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let agent = app.load_agent(Path::new("tables.msgpack"))?;
    /// # Ok::<(), blackjack_rl::Error>(())
    /// ```
    pub fn load_agent(&self, path: &Path) -> Result<Agent> {
        let tables = self.load_tables(path)?;
        let store = tables.to_store()?;
        let mut config = tables.config;
        if let Some(seed) = self.default_seed {
            config = config.with_seed(seed);
        }
        Agent::with_store(config, store)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
pub struct AppBuilder {
    repository: Option<Arc<dyn TableRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    /// Set a custom table repository.
    pub fn with_repository<R: TableRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for every agent created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app; falls back to `MsgPackRepository`.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryRepository, learning::Algorithm};

    #[test]
    fn test_app_applies_default_seed() {
        let app = App::for_testing().with_default_seed(42).build();
        let agent = app.create_agent(LearnerConfig::default()).unwrap();
        assert_eq!(agent.config().seed, Some(42));
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(42).build();
        let agent = app
            .create_agent(LearnerConfig::default().with_seed(123))
            .unwrap();
        assert_eq!(agent.config().seed, Some(123));
    }

    #[test]
    fn test_train_save_and_load() {
        let repo = InMemoryRepository::new();
        let app = App::for_testing()
            .with_repository(repo.clone())
            .with_default_seed(7)
            .build();

        let config = LearnerConfig::new(Algorithm::Sarsa).with_iterations(200);
        let (agent, result) = app.train(config, Vec::new()).unwrap();
        let path = Path::new("sarsa");
        app.save_agent(&agent, &result, path).unwrap();
        assert_eq!(repo.count(), 1);

        let loaded = app.load_agent(path).unwrap();
        assert_eq!(loaded.store(), agent.store());
        assert_eq!(loaded.algorithm(), Algorithm::Sarsa);
        assert_eq!(app.load_tables(path).unwrap().metadata.episodes, 200);
    }
}
