//! One hand of Blackjack as a turn-based state machine

use super::{
    card::{CardSource, InfiniteShoe},
    hand::{BLACKJACK, Hand},
    rules::TableRules,
    state::{Action, StateIndex},
};
use crate::{Error, Result};

/// Dealer stands once reaching this total (soft 17 depending on the rules).
pub const DEALER_STAND_TOTAL: u8 = 17;

/// Environment owning the player and dealer hands of the current episode.
///
/// The hand is driven through [`Game::apply_player_action`] until the
/// player's turn ends, then through [`Game::apply_dealer_action`] until the
/// game stops. [`Game::reward`] is only non-zero once the game has stopped.
#[derive(Debug, Clone)]
pub struct Game<S: CardSource = InfiniteShoe> {
    running: bool,
    player_turn: bool,
    player: Hand,
    dealer: Hand,
    rules: TableRules,
    source: S,
}

impl<S: CardSource> Game<S> {
    /// Create a game and deal the first hand.
    pub fn new(source: S, rules: TableRules) -> Self {
        let mut game = Self {
            running: false,
            player_turn: false,
            player: Hand::new(),
            dealer: Hand::new(),
            rules,
            source,
        };
        game.reset();
        game
    }

    /// Deal a fresh hand: two cards to the player, one face-up to the dealer.
    pub fn reset(&mut self) {
        self.player = Hand::new();
        self.dealer = Hand::new();
        for _ in 0..2 {
            let card = self.source.next_card();
            self.player.add_card(card);
        }
        let upcard = self.source.next_card();
        self.dealer.add_card(upcard);
        self.running = true;
        self.player_turn = true;
    }

    /// Start the player from an arbitrary total (exploring starts).
    ///
    /// # Errors
    ///
    /// Rejects totals outside `2..=21`, soft totals below 12, and calls made
    /// after the player's turn has ended.
    pub fn force_player_state(&mut self, total: u8, soft: bool) -> Result<()> {
        let reject = |reason| Error::InvalidForcedState {
            total,
            soft,
            reason,
        };
        if !(2..=BLACKJACK).contains(&total) {
            return Err(reject("total must lie in 2..=21"));
        }
        if soft && total < 12 {
            return Err(reject("a usable ace implies a total of at least 12"));
        }
        if !self.running || !self.player_turn {
            return Err(reject("the player's turn is over"));
        }
        self.player.force(total, soft);
        Ok(())
    }

    /// Apply a player decision. Ignored unless it is the player's turn.
    pub fn apply_player_action(&mut self, action: Action) {
        if !self.running || self.player.is_bust() || !self.player_turn {
            return;
        }

        match action {
            Action::Hit => {
                let card = self.source.next_card();
                self.player.add_card(card);
            }
            Action::Stand => self.player.set_terminal(),
            Action::DoubleDown if self.player.is_21() && !self.rules.allow_double_on_21 => {
                self.player.set_terminal();
            }
            Action::DoubleDown => {
                let card = self.source.next_card();
                self.player.add_card(card);
                self.player.set_doubled();
                self.player.set_terminal();
            }
        }

        if self.player.is_bust() {
            self.player.set_terminal();
            self.running = false;
        }

        if self.player.is_terminal() {
            self.player_turn = false;
        }
    }

    /// Play one dealer step. Ignored while it is the player's turn.
    ///
    /// The first step reveals the hole card; later steps draw below 17 (and
    /// on soft 17 when the rules say so) and otherwise stand, ending the game.
    pub fn apply_dealer_action(&mut self) {
        if self.player_turn || !self.running || self.dealer.is_bust() {
            return;
        }

        if self.dealer.len() == 1 {
            let card = self.source.next_card();
            self.dealer.add_card(card);
            return;
        }

        if self.dealer_must_draw() {
            let card = self.source.next_card();
            self.dealer.add_card(card);
            if self.dealer.is_bust() {
                self.dealer.set_terminal();
                self.running = false;
            }
        } else {
            self.dealer.set_terminal();
            self.running = false;
        }
    }

    /// Play the dealer out until the game stops.
    pub fn play_out_dealer(&mut self) {
        while !self.player_turn && self.running {
            self.apply_dealer_action();
        }
    }

    fn dealer_must_draw(&self) -> bool {
        let total = self.dealer.value();
        total < DEALER_STAND_TOTAL
            || (self.rules.dealer_hits_soft_17
                && total == DEALER_STAND_TOTAL
                && self.dealer.has_usable_ace())
    }

    /// Payoff from the player's point of view; zero while the game runs.
    pub fn reward(&self) -> f64 {
        if self.running {
            return 0.0;
        }

        let stake = if self.player.is_doubled() { 2.0 } else { 1.0 };
        let player = &self.player;
        let dealer = &self.dealer;

        if player.is_21() && dealer.is_21() {
            0.0
        } else if player.is_21() {
            1.5 * stake
        } else if dealer.is_21() {
            -stake
        } else if dealer.is_bust() {
            stake
        } else if player.is_bust() {
            -stake
        } else if dealer.value() > player.value() {
            -stake
        } else if dealer.value() < player.value() {
            stake
        } else {
            0.0
        }
    }

    /// Key of the current state into the value grids.
    pub fn state(&self) -> StateIndex {
        StateIndex::from_totals(
            self.player.value(),
            self.player.has_usable_ace(),
            self.dealer.first_card_value(),
        )
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_player_turn(&self) -> bool {
        self.player_turn
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer
    }

    pub fn rules(&self) -> TableRules {
        self.rules
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl Game<InfiniteShoe> {
    /// Game on an infinite shoe, seeded when `seed` is given.
    pub fn with_seed(seed: Option<u64>, rules: TableRules) -> Self {
        Self::new(InfiniteShoe::from_seed(seed), rules)
    }
}
