//! Running total of one set of dealt cards

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Best total a hand may reach before it is bust.
pub const BLACKJACK: u8 = 21;

/// A hand of cards with soft-ace accounting.
///
/// `sum` is always the best total not exceeding 21 that can be reached by
/// counting some aces as 1 instead of 11. Aces are softened eagerly as soon
/// as the total passes 21; once no soft ace is left the hand is bust.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
    sum: u8,
    soft_aces: u8,
    first_card_value: u8,
    bust: bool,
    terminal: bool,
    doubled: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card and re-balance soft aces.
    pub fn add_card(&mut self, card: Card) {
        if card.rank.is_ace() {
            self.soft_aces += 1;
        }
        self.cards.push(card);
        self.sum += card.value();

        while self.sum > BLACKJACK && self.soft_aces > 0 {
            self.sum -= 10;
            self.soft_aces -= 1;
        }

        if self.sum > BLACKJACK {
            self.bust = true;
            self.terminal = true;
        }

        if self.cards.len() == 1 {
            self.first_card_value = self.sum;
        }
    }

    /// Overwrite the running total, keeping the dealt cards for display.
    ///
    /// Used to start an episode from an arbitrary player total. Callers are
    /// responsible for passing a total of at most 21.
    pub(crate) fn force(&mut self, total: u8, soft: bool) {
        self.sum = total;
        self.soft_aces = u8::from(soft);
        self.bust = false;
        self.terminal = false;
    }

    pub(crate) fn set_terminal(&mut self) {
        self.terminal = true;
    }

    pub(crate) fn set_doubled(&mut self) {
        self.doubled = true;
    }

    pub fn value(&self) -> u8 {
        self.sum
    }

    pub fn is_21(&self) -> bool {
        self.sum == BLACKJACK
    }

    pub fn is_bust(&self) -> bool {
        self.bust
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// True while at least one ace is still counted as 11.
    pub fn has_usable_ace(&self) -> bool {
        self.soft_aces > 0
    }

    pub fn soft_aces(&self) -> u8 {
        self.soft_aces
    }

    /// Value of the first dealt card (the dealer's upcard).
    pub fn first_card_value(&self) -> u8 {
        self.first_card_value
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
