//! Shoe ledger, bust probability and dealer simulation tests.

#![allow(clippy::float_cmp)]

use bjcount::probability::bust_probability;
use bjcount::shoe::{RankShoe, SuitedShoe, new_shoe};
use bjcount::simulate::{DealerRules, DealerState, ShoeSnapshot, simulate_dealer_turn};
use bjcount::{Card, LedgerError, Precision, Rank, ShoeLedger, Suit};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn remove_all(shoe: &mut dyn ShoeLedger, cards: &[Card]) {
    for &c in cards {
        shoe.remove(c).unwrap();
    }
}

/// Removes every card except `keep`.
fn drain_except(shoe: &mut dyn ShoeLedger, keep: &[Card]) {
    for (c, count) in shoe.composition() {
        for _ in 0..count {
            if !keep.contains(&c) {
                shoe.remove(c).unwrap();
            }
        }
    }
}

#[test]
fn fresh_suited_shoe() {
    let shoe = SuitedShoe::new(1);
    assert_eq!(shoe.precision(), Precision::Exact);
    assert_eq!(shoe.cards_remaining(), 52);
    assert_eq!(shoe.cards_seen(), 0);
    assert_eq!(shoe.running_count(), 0);
    assert_eq!(shoe.true_count(), 0.0);
    assert_eq!(shoe.aces_remaining(), 4);
    assert_eq!(shoe.tens_remaining(), 16);
    assert_eq!(shoe.composition().len(), 52);
    assert_eq!(shoe.last_removed(), None);
}

#[test]
fn remove_then_undo_restores_counters() {
    let mut shoe = SuitedShoe::new(1);
    let ace = card(Rank::Ace, Suit::Hearts);

    let removal = shoe.remove(ace).unwrap();
    assert_eq!(removal.card, ace);
    assert_eq!(removal.remaining, 0);
    assert_eq!(removal.running_count, -1);
    assert_eq!(removal.cards_seen, 1);
    assert_eq!(shoe.remaining_of(ace), 0);
    assert_eq!(shoe.aces_remaining(), 3);
    assert_eq!(shoe.last_removed(), Some(ace));

    let restored = shoe.undo_last(ace).unwrap();
    assert_eq!(restored.remaining, 1);
    assert_eq!(shoe.cards_seen(), 0);
    assert_eq!(shoe.running_count(), 0);
    assert_eq!(shoe, SuitedShoe::new(1));
}

#[test]
fn removing_a_depleted_card_leaves_ledger_unchanged() {
    let mut shoe = SuitedShoe::new(1);
    let king = card(Rank::King, Suit::Clubs);
    shoe.remove(king).unwrap();

    assert_eq!(shoe.remove(king), Err(LedgerError::Depleted));
    assert_eq!(shoe.cards_seen(), 1);
    assert_eq!(shoe.running_count(), -1);
}

#[test]
fn suited_shoe_rejects_cards_without_suit() {
    let mut shoe = SuitedShoe::new(1);
    assert_eq!(
        shoe.remove(Card::rank_only(Rank::Seven)),
        Err(LedgerError::InvalidCard)
    );
    assert_eq!(shoe.cards_seen(), 0);
}

#[test]
fn undo_requires_the_last_removed_card() {
    let mut shoe = SuitedShoe::new(1);
    assert_eq!(
        shoe.undo_last(card(Rank::Two, Suit::Spades)),
        Err(LedgerError::UndoMismatch)
    );

    shoe.remove(card(Rank::Two, Suit::Spades)).unwrap();
    shoe.remove(card(Rank::Nine, Suit::Spades)).unwrap();
    assert_eq!(
        shoe.undo_last(card(Rank::Two, Suit::Spades)),
        Err(LedgerError::UndoMismatch)
    );
    assert_eq!(shoe.cards_seen(), 2);

    shoe.undo_last(card(Rank::Nine, Suit::Spades)).unwrap();
    shoe.undo_last(card(Rank::Two, Suit::Spades)).unwrap();
    assert_eq!(shoe.cards_remaining(), 52);
}

#[test]
fn reset_refills_the_shoe() {
    let mut shoe = SuitedShoe::new(1);
    remove_all(
        &mut shoe,
        &[card(Rank::Five, Suit::Hearts), card(Rank::Six, Suit::Hearts)],
    );
    shoe.reset();
    assert_eq!(shoe, SuitedShoe::new(1));
}

#[test]
fn true_count_divides_by_decks_remaining() {
    let mut shoe = SuitedShoe::new(1);
    remove_all(
        &mut shoe,
        &[
            card(Rank::Two, Suit::Hearts),
            card(Rank::Three, Suit::Hearts),
            card(Rank::Four, Suit::Hearts),
            card(Rank::Five, Suit::Hearts),
            card(Rank::Six, Suit::Hearts),
        ],
    );
    assert_eq!(shoe.running_count(), 5);
    assert!((shoe.true_count() - 5.0 * 52.0 / 47.0).abs() < 1e-9);
}

#[test]
fn true_count_divisor_is_floored() {
    let ace = card(Rank::Ace, Suit::Spades);
    let king = card(Rank::King, Suit::Spades);
    let mut shoe = SuitedShoe::new(1);
    drain_except(&mut shoe, &[ace, king]);

    assert_eq!(shoe.cards_remaining(), 2);
    assert_eq!(shoe.running_count(), 2);
    assert!((shoe.true_count() - 20.0).abs() < 1e-9);

    let mut shoe = SuitedShoe::new(1).with_min_decks(0.5);
    drain_except(&mut shoe, &[ace, king]);
    assert!((shoe.true_count() - 4.0).abs() < 1e-9);
}

#[test]
fn empty_shoe_has_zero_true_count() {
    let mut shoe = SuitedShoe::new(1);
    drain_except(&mut shoe, &[]);
    assert_eq!(shoe.cards_remaining(), 0);
    assert_eq!(shoe.running_count(), 0);
    assert_eq!(shoe.true_count(), 0.0);
    assert!(shoe.composition().is_empty());
}

#[test]
fn composition_skips_depleted_cards() {
    let mut shoe = SuitedShoe::new(1);
    let queen = card(Rank::Queen, Suit::Diamonds);
    shoe.remove(queen).unwrap();

    let composition = shoe.composition();
    assert_eq!(composition.len(), 51);
    assert!(composition.iter().all(|&(c, count)| c != queen && count == 1));
}

#[test]
fn multi_deck_shoe_counts_by_rank() {
    let mut shoe = new_shoe(6, 0.1);
    assert_eq!(shoe.precision(), Precision::RankOnly);
    assert_eq!(shoe.total_cards(), 312);
    assert_eq!(shoe.remaining_of(Card::rank_only(Rank::Ace)), 24);

    shoe.remove(card(Rank::Ace, Suit::Hearts)).unwrap();
    shoe.remove(card(Rank::Ace, Suit::Hearts)).unwrap();
    shoe.remove(Card::rank_only(Rank::Ace)).unwrap();
    assert_eq!(shoe.remaining_of(card(Rank::Ace, Suit::Spades)), 21);
    assert_eq!(shoe.running_count(), -3);
    assert_eq!(shoe.composition().len(), 13);

    shoe.undo_last(card(Rank::Ace, Suit::Clubs)).unwrap();
    assert_eq!(shoe.aces_remaining(), 22);
}

#[test]
fn rank_shoe_undo_without_removal_fails() {
    let mut shoe = RankShoe::new(2);
    assert_eq!(
        shoe.undo_last(Card::rank_only(Rank::Two)),
        Err(LedgerError::UndoMismatch)
    );
    assert_eq!(shoe.remaining_of(Card::rank_only(Rank::Two)), 8);
}

#[test]
fn reshuffle_after_penetration() {
    let mut shoe = SuitedShoe::new(1);
    let cards: Vec<Card> = shoe.composition().into_iter().map(|(c, _)| c).collect();

    remove_all(&mut shoe, &cards[..38]);
    assert!(!shoe.needs_reshuffle(0.75));
    shoe.remove(cards[38]).unwrap();
    assert!(shoe.needs_reshuffle(0.75));
    assert!(!shoe.needs_reshuffle(0.0));
}

#[test]
fn bust_probability_counts_busting_cards() {
    let mut shoe = SuitedShoe::new(1);
    let hand = [card(Rank::Ten, Suit::Hearts), card(Rank::Six, Suit::Clubs)];
    remove_all(&mut shoe, &hand);

    // Sixes through nines and every ten-value card bust a 16.
    let probability = bust_probability(&shoe, &hand);
    assert!((probability - 30.0 / 50.0).abs() < 1e-12);
}

#[test]
fn bust_probability_soft_hand_never_busts() {
    let shoe = SuitedShoe::new(1);
    let hand = [card(Rank::Ace, Suit::Hearts), card(Rank::Six, Suit::Clubs)];
    assert_eq!(bust_probability(&shoe, &hand), 0.0);
}

#[test]
fn bust_probability_edges() {
    let shoe = SuitedShoe::new(1);
    let bust = [
        card(Rank::Ten, Suit::Hearts),
        card(Rank::Ten, Suit::Clubs),
        card(Rank::Five, Suit::Clubs),
    ];
    assert_eq!(bust_probability(&shoe, &bust), 1.0);

    let twenty_one = [card(Rank::Ace, Suit::Hearts), card(Rank::King, Suit::Clubs)];
    assert_eq!(bust_probability(&shoe, &twenty_one), 0.0);

    let mut empty = SuitedShoe::new(1);
    drain_except(&mut empty, &[]);
    let twelve = [card(Rank::Ten, Suit::Hearts), card(Rank::Two, Suit::Clubs)];
    assert_eq!(bust_probability(&empty, &twelve), 0.0);
}

#[test]
fn simulation_leaves_the_live_shoe_untouched() {
    let mut shoe = SuitedShoe::new(1);
    let dealer = [card(Rank::Six, Suit::Hearts), card(Rank::Ten, Suit::Spades)];
    remove_all(&mut shoe, &dealer);
    let before = shoe.clone();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let turn = simulate_dealer_turn(&shoe, &dealer, DealerRules::default(), &mut rng);

    assert_eq!(shoe, before);
    assert!(turn.state.is_terminal());
    assert!(turn.draws >= 1);
    assert_eq!(&turn.hand[..2], &dealer);
    assert_eq!(turn.hand.len(), 2 + turn.draws);
    match turn.state {
        DealerState::Stood(total) => assert!((17..=21).contains(&total)),
        DealerState::Busted => assert!(bjcount::hand::value(&turn.hand) > 21),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn simulation_is_reproducible_with_a_seed() {
    let shoe = SuitedShoe::new(1);
    let dealer = [card(Rank::Two, Suit::Hearts), card(Rank::Three, Suit::Spades)];

    let first = simulate_dealer_turn(
        &shoe,
        &dealer,
        DealerRules::default(),
        &mut ChaCha8Rng::seed_from_u64(99),
    );
    let second = simulate_dealer_turn(
        &shoe,
        &dealer,
        DealerRules::default(),
        &mut ChaCha8Rng::seed_from_u64(99),
    );
    assert_eq!(first, second);
}

#[test]
fn soft_17_rule() {
    let shoe = SuitedShoe::new(1);
    let soft_17 = [card(Rank::Ace, Suit::Hearts), card(Rank::Six, Suit::Spades)];
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let stand = simulate_dealer_turn(&shoe, &soft_17, DealerRules::default(), &mut rng);
    assert_eq!(stand.state, DealerState::Stood(17));
    assert_eq!(stand.draws, 0);

    let hit_rules = DealerRules {
        stand_on_soft_17: false,
    };
    let hit = simulate_dealer_turn(&shoe, &soft_17, hit_rules, &mut rng);
    assert!(hit.draws >= 1);
}

#[test]
fn simulation_reports_an_exhausted_shoe() {
    let mut shoe = SuitedShoe::new(1);
    drain_except(&mut shoe, &[]);
    let dealer = [card(Rank::Two, Suit::Hearts), card(Rank::Three, Suit::Spades)];

    let turn = simulate_dealer_turn(
        &shoe,
        &dealer,
        DealerRules::default(),
        &mut ChaCha8Rng::seed_from_u64(3),
    );
    assert_eq!(turn.state, DealerState::Exhausted);
    assert_eq!(turn.draws, 0);
}

#[test]
fn snapshot_draws_are_private() {
    let shoe = SuitedShoe::new(1);
    let mut snapshot = ShoeSnapshot::of(&shoe);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..52 {
        assert!(snapshot.draw(&mut rng).is_some());
    }
    assert_eq!(snapshot.remaining(), 0);
    assert_eq!(snapshot.running_count(), 0);
    assert_eq!(snapshot.draw(&mut rng), None);
    assert_eq!(shoe.cards_remaining(), 52);
}
