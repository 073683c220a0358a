//! Reward and dealer-rule behaviour of the environment on scripted decks

use blackjack_rl::{
    Error,
    blackjack::{Action, Game, Rank, StackedDeck, TableRules},
};

fn game(cards: &[Rank], rules: TableRules) -> Game<StackedDeck> {
    Game::new(StackedDeck::new(cards.iter().copied()), rules)
}

fn finish(game: &mut Game<StackedDeck>, actions: &[Action]) -> f64 {
    for &action in actions {
        game.apply_player_action(action);
    }
    game.play_out_dealer();
    assert!(!game.is_running());
    game.reward()
}

#[test]
fn test_player_21_against_dealer_20_pays_one_and_a_half() {
    let mut game = game(
        &[Rank::Ace, Rank::King, Rank::Ten, Rank::Queen],
        TableRules::default(),
    );
    assert!(game.player_hand().is_21());
    assert_eq!(finish(&mut game, &[Action::Stand]), 1.5);
    assert_eq!(game.dealer_hand().value(), 20);
}

#[test]
fn test_doubled_21_pays_three_when_permitted() {
    // 5 + 6 doubles into a king
    let mut game = game(
        &[Rank::Five, Rank::Six, Rank::Ten, Rank::King, Rank::Nine],
        TableRules::default().with_double_on_21(true),
    );
    assert_eq!(finish(&mut game, &[Action::DoubleDown]), 3.0);
    assert!(game.player_hand().is_doubled());
}

#[test]
fn test_double_on_21_is_a_stand_by_default() {
    let mut game = game(
        &[Rank::Ace, Rank::King, Rank::Ten, Rank::Queen],
        TableRules::default(),
    );
    assert_eq!(finish(&mut game, &[Action::DoubleDown]), 1.5);
    assert!(!game.player_hand().is_doubled());
    assert_eq!(game.player_hand().len(), 2);
}

#[test]
fn test_player_bust_loses_stake() {
    let mut plain = game(
        &[Rank::Ten, Rank::Six, Rank::Seven, Rank::King],
        TableRules::default(),
    );
    assert_eq!(finish(&mut plain, &[Action::Hit]), -1.0);
    assert!(plain.player_hand().is_bust());
    // dealer never reveals the hole card after a player bust
    assert_eq!(plain.dealer_hand().len(), 1);

    let mut doubled = game(
        &[Rank::Ten, Rank::Six, Rank::Seven, Rank::King],
        TableRules::default(),
    );
    assert_eq!(finish(&mut doubled, &[Action::DoubleDown]), -2.0);
}

#[test]
fn test_equal_totals_push() {
    let mut game = game(
        &[Rank::Ten, Rank::Nine, Rank::Ten, Rank::Nine],
        TableRules::default(),
    );
    assert_eq!(finish(&mut game, &[Action::Stand]), 0.0);
}

#[test]
fn test_both_21_push() {
    let mut game = game(
        &[Rank::Ace, Rank::Jack, Rank::Ace, Rank::King],
        TableRules::default(),
    );
    assert_eq!(finish(&mut game, &[Action::Stand]), 0.0);
}

#[test]
fn test_dealer_21_beats_player_20() {
    let mut game = game(
        &[Rank::Ten, Rank::King, Rank::Ace, Rank::Queen],
        TableRules::default(),
    );
    assert_eq!(finish(&mut game, &[Action::Stand]), -1.0);
}

#[test]
fn test_dealer_hits_soft_17_by_default() {
    // dealer A + 6 is soft 17, draws 5 (hard 12) then 10 and busts
    let cards = [
        Rank::Ten,
        Rank::Eight,
        Rank::Ace,
        Rank::Six,
        Rank::Five,
        Rank::Ten,
    ];
    let mut hits = game(&cards, TableRules::default());
    assert_eq!(finish(&mut hits, &[Action::Stand]), 1.0);
    assert!(hits.dealer_hand().is_bust());
    assert_eq!(hits.dealer_hand().len(), 4);

    let mut stands = game(&cards, TableRules::default().with_dealer_hits_soft_17(false));
    assert_eq!(finish(&mut stands, &[Action::Stand]), 1.0);
    assert_eq!(stands.dealer_hand().value(), 17);
    assert_eq!(stands.dealer_hand().len(), 2);
}

#[test]
fn test_reward_is_zero_while_running() {
    let mut game = game(
        &[Rank::Two, Rank::Three, Rank::Nine, Rank::Four],
        TableRules::default(),
    );
    assert_eq!(game.reward(), 0.0);
    game.apply_player_action(Action::Hit);
    assert!(game.is_running());
    assert!(game.is_player_turn());
    assert_eq!(game.reward(), 0.0);
}

#[test]
fn test_actions_after_the_hand_are_ignored() {
    let mut game = game(
        &[Rank::Ten, Rank::Six, Rank::Seven, Rank::King],
        TableRules::default(),
    );
    game.apply_player_action(Action::Hit);
    let cards = game.player_hand().len();
    game.apply_player_action(Action::Hit);
    game.apply_dealer_action();
    assert_eq!(game.player_hand().len(), cards);
    assert_eq!(game.reward(), -1.0);
}

#[test]
fn test_soft_ace_accounting() {
    let mut game = game(
        &[Rank::Ace, Rank::Ace, Rank::Seven, Rank::Nine, Rank::Five],
        TableRules::default(),
    );
    assert_eq!(game.player_hand().value(), 12);
    assert!(game.player_hand().has_usable_ace());
    assert_eq!(game.state().player, 112);

    game.apply_player_action(Action::Hit);
    assert_eq!(game.player_hand().value(), 21);
    assert!(game.player_hand().has_usable_ace());

    game.apply_player_action(Action::Hit);
    assert_eq!(game.player_hand().value(), 16);
    assert!(!game.player_hand().has_usable_ace());
    assert!(!game.player_hand().is_bust());
}

#[test]
fn test_forced_state_validation() {
    let mut game = game(
        &[Rank::Two, Rank::Three, Rank::Nine, Rank::Ten],
        TableRules::default(),
    );
    assert!(matches!(
        game.force_player_state(22, false),
        Err(Error::InvalidForcedState { total: 22, .. })
    ));
    assert!(game.force_player_state(11, true).is_err());

    game.force_player_state(16, true).unwrap();
    assert_eq!(game.state().player, 116);
    assert_eq!(game.state().dealer, 9);

    game.apply_player_action(Action::Stand);
    assert!(game.force_player_state(16, false).is_err());
}
