//! Application layer
//!
//! [`App`] owns the table repository and a default seed, and hands out
//! agents and training pipelines configured from a [`LearnerConfig`].
//!
//! ```text
//! cli ──▶ App ──▶ TrainingPipeline ──▶ Agent ──▶ ValueStore
//!          │
//!          └──▶ dyn TableRepository (MsgPack, JSON, in-memory)
//! ```
//!
//! Tests swap the repository through [`App::for_testing`]:
//!
//! ```
//! use blackjack_rl::adapters::InMemoryRepository;
//! use blackjack_rl::app::App;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .with_default_seed(42)
//!     .build();
//! ```

pub mod container;

pub use container::{App, AppBuilder};

pub use crate::learning::LearnerConfig;
