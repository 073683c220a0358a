//! Ports (trait boundaries) for external collaborators.
//!
//! The learning core owns these traits; progress reporting, persistence and
//! the drivers that play hands implement them.

pub mod observer;
pub mod player;
pub mod repository;

pub use observer::Observer;
pub use player::Player;
pub use repository::TableRepository;
