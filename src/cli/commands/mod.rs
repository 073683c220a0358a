//! Subcommands of the `blackjack` binary

pub mod evaluate;
pub mod play;
pub mod show;
pub mod sweep;
pub mod train;
