//! Cards and card sources
//!
//! Draws are sampled independently (an infinite shoe): every rank is equally
//! likely on every draw, and the suit only matters for display.

use std::{collections::VecDeque, fmt};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Card rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Blackjack value with the ace counted high (11).
    pub fn value(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    pub fn is_ace(self) -> bool {
        self == Rank::Ace
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// Card suit (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Spades,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Spades, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
        }
    }
}

/// A dealt card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Sample a rank and a suit uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let rank = Rank::ALL[rng.random_range(0..Rank::ALL.len())];
        let suit = Suit::ALL[rng.random_range(0..Suit::ALL.len())];
        Self { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }
}

impl From<Rank> for Card {
    fn from(rank: Rank) -> Self {
        Card::new(rank, Suit::Spades)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.symbol(), self.rank.symbol())
    }
}

/// Anything that can deal the next card.
pub trait CardSource {
    fn next_card(&mut self) -> Card;
}

/// Infinite shoe: each draw is an independent uniform sample.
#[derive(Debug, Clone)]
pub struct InfiniteShoe<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> InfiniteShoe<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl InfiniteShoe<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when `seed` is given, otherwise drawn from entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::new(StdRng::from_rng(&mut rand::rng())),
        }
    }
}

impl<R: Rng> CardSource for InfiniteShoe<R> {
    fn next_card(&mut self) -> Card {
        Card::random(&mut self.rng)
    }
}

/// Scripted card order, dealt front to back.
///
/// Useful for replaying a known hand. Dealing order in [`super::Game::reset`]
/// is: two player cards, then the dealer upcard.
#[derive(Debug, Clone, Default)]
pub struct StackedDeck {
    cards: VecDeque<Card>,
}

impl StackedDeck {
    pub fn new<I, C>(cards: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Card>,
    {
        Self {
            cards: cards.into_iter().map(Into::into).collect(),
        }
    }

    /// Append more cards to the bottom of the stack.
    pub fn extend<I, C>(&mut self, cards: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Card>,
    {
        self.cards.extend(cards.into_iter().map(Into::into));
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl CardSource for StackedDeck {
    /// # Panics
    ///
    /// Panics when the scripted cards run out.
    fn next_card(&mut self) -> Card {
        self.cards
            .pop_front()
            .unwrap_or_else(|| panic!("stacked deck exhausted"))
    }
}

impl<S: CardSource + ?Sized> CardSource for &mut S {
    fn next_card(&mut self) -> Card {
        (**self).next_card()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_cards_are_worth_ten() {
        for rank in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
            assert_eq!(rank.value(), 10);
        }
        assert_eq!(Rank::Ace.value(), 11);
        assert_eq!(Rank::Two.value(), 2);
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).to_string(), "HA");
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).to_string(), "C10");
    }

    #[test]
    fn test_seeded_shoe_is_reproducible() {
        let mut a = InfiniteShoe::seeded(3);
        let mut b = InfiniteShoe::seeded(3);
        for _ in 0..50 {
            assert_eq!(a.next_card(), b.next_card());
        }
    }

    #[test]
    fn test_infinite_shoe_covers_all_ranks() {
        let mut shoe = InfiniteShoe::seeded(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2_000 {
            seen.insert(shoe.next_card().rank);
        }
        assert_eq!(seen.len(), Rank::ALL.len());
    }

    #[test]
    fn test_stacked_deck_deals_in_order() {
        let mut deck = StackedDeck::new([Rank::Ace, Rank::Five]);
        assert_eq!(deck.next_card().rank, Rank::Ace);
        assert_eq!(deck.next_card().rank, Rank::Five);
        assert_eq!(deck.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "stacked deck exhausted")]
    fn test_stacked_deck_panics_when_empty() {
        StackedDeck::default().next_card();
    }
}
