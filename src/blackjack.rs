//! Simplified Blackjack environment
//!
//! One player against the dealer on an infinite shoe, with hit, stand and
//! double-down as the only decisions.

pub mod card;
pub mod game;
pub mod hand;
pub mod rules;
pub mod state;

pub use card::{Card, CardSource, InfiniteShoe, Rank, StackedDeck, Suit};
pub use game::{DEALER_STAND_TOTAL, Game};
pub use hand::{BLACKJACK, Hand};
pub use rules::TableRules;
pub use state::{
    ACTION_COUNT, Action, DEALER_BUCKETS, PLAYER_BUCKETS, SOFT_OFFSET, StateIndex,
};
