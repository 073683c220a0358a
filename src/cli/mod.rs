//! CLI infrastructure for the Blackjack learner
//!
//! This module provides the command-line interface for training, evaluating,
//! sweeping and inspecting tabular Blackjack policies.

pub mod commands;
pub mod config;
pub mod output;
