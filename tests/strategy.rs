//! Card parsing, hand classification, basic strategy and deviation tests.

#![allow(clippy::float_cmp)]

use bjcount::bet::{recommend_bet, recommend_units};
use bjcount::deviation::{DeviationRules, IndexKey, apply_deviations, find_index_play};
use bjcount::hand;
use bjcount::strategy::{LookupMiss, fallback, lookup, resolve};
use bjcount::{
    Action, Card, Hand, HandClass, InsuranceAdvice, OverrideReason, ParseCardError, Rank, Suit,
};

const fn card(rank: Rank) -> Card {
    Card::new(rank, Suit::Spades)
}

const DEALER_VALUES: [u8; 10] = [2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

fn upcard(value: u8) -> Card {
    let rank = match value {
        2 => Rank::Two,
        3 => Rank::Three,
        4 => Rank::Four,
        5 => Rank::Five,
        6 => Rank::Six,
        7 => Rank::Seven,
        8 => Rank::Eight,
        9 => Rank::Nine,
        10 => Rank::Ten,
        _ => Rank::Ace,
    };
    Card::new(rank, Suit::Hearts)
}

#[test]
fn parse_detector_labels() {
    assert_eq!(Card::parse("AS"), Ok(Card::new(Rank::Ace, Suit::Spades)));
    assert_eq!(Card::parse("10d"), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
    assert_eq!(Card::parse("Td"), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
    assert_eq!(Card::parse("k♠"), Ok(Card::new(Rank::King, Suit::Spades)));
    assert_eq!(Card::parse(" 7 "), Ok(Card::rank_only(Rank::Seven)));
    assert_eq!(Card::parse("10"), Ok(Card::rank_only(Rank::Ten)));
    assert_eq!(Card::parse(""), Err(ParseCardError::Empty));
    assert_eq!(Card::parse("Zx"), Err(ParseCardError::UnknownRank));
    assert_eq!(Card::parse("1h"), Err(ParseCardError::UnknownRank));
    assert_eq!(Card::parse("7x"), Err(ParseCardError::UnknownSuit));
    assert_eq!(Card::parse("7hh"), Err(ParseCardError::UnknownSuit));
}

#[test]
fn card_display_uses_chart_letters() {
    assert_eq!(Card::new(Rank::Ten, Suit::Spades).to_string(), "TS");
    assert_eq!(Card::new(Rank::Queen, Suit::Hearts).to_string(), "QH");
    assert_eq!(Card::rank_only(Rank::Ace).to_string(), "A");
}

#[test]
fn hi_lo_tags() {
    let tags: i32 = Rank::ALL.iter().map(|rank| rank.hi_lo()).sum();
    assert_eq!(tags, 0);
    assert_eq!(Rank::Six.hi_lo(), 1);
    assert_eq!(Rank::Eight.hi_lo(), 0);
    assert_eq!(Rank::Jack.hi_lo(), -1);
    assert_eq!(Rank::Ace.hi_lo(), -1);
}

#[test]
fn hand_value_ignores_order() {
    let a = [card(Rank::Ace), card(Rank::Six), card(Rank::Nine)];
    let b = [card(Rank::Nine), card(Rank::Ace), card(Rank::Six)];
    assert_eq!(hand::value(&a), 16);
    assert_eq!(hand::value(&b), 16);
    assert!(!hand::is_soft(&a));
    assert_eq!(HandClass::of(&a), HandClass::Hard(16));
    assert_eq!(hand::value(&[]), 0);
}

#[test]
fn pair_of_aces_is_soft_12() {
    let aces = [card(Rank::Ace), Card::new(Rank::Ace, Suit::Hearts)];
    assert_eq!(hand::value(&aces), 12);
    assert!(hand::is_soft(&aces));
    assert_eq!(HandClass::of(&aces), HandClass::Pair(Rank::Ace));
    assert_eq!(HandClass::of_total(&aces), HandClass::Soft(12));
}

#[test]
fn hand_struct_tracks_cards() {
    let mut hand = Hand::new();
    assert!(hand.is_empty());
    hand.add_card(card(Rank::Ace));
    hand.add_card(card(Rank::King));
    assert!(hand.is_blackjack());
    assert!(hand.is_soft());
    assert_eq!(hand.first(), Some(card(Rank::Ace)));

    hand.add_card(card(Rank::Five));
    assert_eq!(hand.value(), 16);
    assert!(!hand.is_blackjack());
    assert_eq!(hand.pop(), Some(card(Rank::Five)));
    assert_eq!(hand.len(), 2);

    hand.add_card(card(Rank::Queen));
    hand.add_card(card(Rank::Two));
    assert!(hand.is_bust());
}

#[test]
fn soft_17_doubles_against_small_cards() {
    let hand = [card(Rank::Ace), card(Rank::Six)];
    for value in 2..=6 {
        assert_eq!(resolve(&hand, upcard(value)).action, Action::Double);
    }
    assert_eq!(resolve(&hand, upcard(7)).action, Action::Stand);
    assert_eq!(resolve(&hand, upcard(9)).action, Action::Hit);
}

#[test]
fn eights_always_split() {
    let eights = [card(Rank::Eight), Card::new(Rank::Eight, Suit::Clubs)];
    for value in DEALER_VALUES {
        let resolution = resolve(&eights, upcard(value));
        assert_eq!(resolution.action, Action::Split);
        assert_eq!(resolution.class, HandClass::Pair(Rank::Eight));
    }
}

#[test]
fn ten_value_pairs_use_the_tens_row() {
    let kings = [card(Rank::King), Card::new(Rank::King, Suit::Clubs)];
    assert_eq!(resolve(&kings, upcard(6)).action, Action::Stand);
    assert_eq!(
        lookup(HandClass::Pair(Rank::Jack), 5),
        lookup(HandClass::Pair(Rank::Ten), 5)
    );
    assert_eq!(IndexKey::of(&kings), IndexKey::Pair(Rank::Ten));

    let mixed = [card(Rank::Jack), card(Rank::Queen)];
    assert_eq!(HandClass::of(&mixed), HandClass::Hard(20));
    assert_eq!(IndexKey::of(&mixed), IndexKey::Total(20));
}

#[test]
fn pair_of_fives_plays_as_ten() {
    let fives = [card(Rank::Five), Card::new(Rank::Five, Suit::Clubs)];
    assert_eq!(resolve(&fives, upcard(9)).action, Action::Double);
    assert_eq!(resolve(&fives, upcard(10)).action, Action::Hit);
}

#[test]
fn three_card_hands_use_totals() {
    let hand = [card(Rank::Ace), card(Rank::Six), card(Rank::Nine)];
    let resolution = resolve(&hand, upcard(10));
    assert_eq!(resolution.class, HandClass::Hard(16));
    assert_eq!(resolution.action, Action::Hit);
    assert_eq!(resolution.miss, None);

    let soft_18 = [card(Rank::Ace), card(Rank::Two), card(Rank::Five)];
    assert_eq!(resolve(&soft_18, upcard(9)).action, Action::Hit);
    assert_eq!(resolve(&soft_18, upcard(7)).action, Action::Stand);
}

#[test]
fn bust_and_low_totals() {
    let bust = [card(Rank::Ten), card(Rank::Nine), card(Rank::Five)];
    assert_eq!(resolve(&bust, upcard(6)).action, Action::Bust);

    let lone_two = [card(Rank::Two)];
    assert_eq!(resolve(&lone_two, upcard(6)).action, Action::Hit);
}

#[test]
fn chart_miss_stands_on_hard_17_and_soft_19() {
    let cases = [
        (HandClass::Hard(16), Action::Hit),
        (HandClass::Hard(17), Action::Stand),
        (HandClass::Soft(18), Action::Hit),
        (HandClass::Soft(19), Action::Stand),
        (HandClass::Pair(Rank::Eight), Action::Hit),
        (HandClass::Pair(Rank::Nine), Action::Stand),
        (HandClass::Pair(Rank::Ace), Action::Hit),
    ];
    for (class, expected) in cases {
        let resolution = fallback(class, 10);
        assert_eq!(resolution.action, expected, "{class:?}");
        assert_eq!(resolution.class, class);
        assert_eq!(
            resolution.miss,
            Some(LookupMiss {
                class,
                dealer_value: 10
            })
        );
    }
}

#[test]
fn every_chart_cell_is_defined() {
    for value in DEALER_VALUES {
        for total in 5..=21 {
            assert!(lookup(HandClass::Hard(total), value).is_some());
        }
        for total in 13..=21 {
            assert!(lookup(HandClass::Soft(total), value).is_some());
        }
        for rank in Rank::ALL {
            assert!(lookup(HandClass::Pair(rank), value).is_some());
        }
    }
    assert_eq!(lookup(HandClass::Hard(4), 6), None);
    assert_eq!(lookup(HandClass::Hard(12), 1), None);
}

#[test]
fn action_display() {
    assert_eq!(Action::Double.to_string(), "Double Down");
    assert_eq!(Action::Split.letter(), "P");
}

#[test]
fn sixteen_stands_against_ten_at_zero() {
    let hand = [card(Rank::Ten), card(Rank::Six)];
    let rules = DeviationRules::default();

    let deviation = apply_deviations(&hand, upcard(10), Action::Hit, 0.0, &rules, || {
        unreachable!("a stand never needs a bust probability")
    });
    assert_eq!(deviation.action, Action::Stand);
    assert_eq!(
        deviation.reason,
        Some(OverrideReason::Index { true_count: 0.0 })
    );
    assert_eq!(deviation.bust_probability, None);
    assert_eq!(deviation.reason.unwrap().to_string(), "Index (TC +0.0)");
}

#[test]
fn high_bust_probability_turns_a_hit_into_a_stand() {
    let hand = [card(Rank::Ten), card(Rank::Six)];
    let rules = DeviationRules::default();

    let deviation = apply_deviations(&hand, upcard(10), Action::Hit, -1.0, &rules, || 0.6);
    assert_eq!(deviation.action, Action::Stand);
    assert_eq!(
        deviation.reason,
        Some(OverrideReason::HighBust { probability: 0.6 })
    );
    assert_eq!(deviation.reason.unwrap().to_string(), "High Bust% (60.0%)");

    let deviation = apply_deviations(&hand, upcard(10), Action::Hit, -1.0, &rules, || 0.4);
    assert_eq!(deviation.action, Action::Hit);
    assert_eq!(deviation.reason, None);
    assert_eq!(deviation.bust_probability, Some(0.4));

    let strict = DeviationRules {
        bust_threshold: 0.35,
        ..DeviationRules::default()
    };
    let deviation = apply_deviations(&hand, upcard(10), Action::Hit, -1.0, &strict, || 0.4);
    assert_eq!(deviation.action, Action::Stand);
}

#[test]
fn negative_count_index_hits_twelve() {
    let hand = [card(Rank::Ten), card(Rank::Two)];
    let rules = DeviationRules::default();
    let basic = resolve(&hand, upcard(4)).action;
    assert_eq!(basic, Action::Stand);

    let deviation = apply_deviations(&hand, upcard(4), basic, -1.0, &rules, || 0.31);
    assert_eq!(deviation.action, Action::Hit);
    assert_eq!(
        deviation.reason,
        Some(OverrideReason::Index { true_count: -1.0 })
    );
    assert_eq!(deviation.bust_probability, Some(0.31));

    let deviation = apply_deviations(&hand, upcard(4), basic, 0.0, &rules, || 0.31);
    assert_eq!(deviation.action, Action::Stand);
    assert_eq!(deviation.reason, None);
}

#[test]
fn tens_split_against_six_at_high_counts() {
    let tens = [card(Rank::Queen), Card::new(Rank::Queen, Suit::Hearts)];
    let rules = DeviationRules::default();

    let play = find_index_play(IndexKey::of(&tens), 6).unwrap();
    assert_eq!(play.action, Action::Split);

    let deviation = apply_deviations(&tens, upcard(6), Action::Stand, 4.0, &rules, || 0.0);
    assert_eq!(deviation.action, Action::Split);
    let deviation = apply_deviations(&tens, upcard(6), Action::Stand, 3.9, &rules, || 0.0);
    assert_eq!(deviation.action, Action::Stand);
}

#[test]
fn insurance_against_an_ace() {
    let hand = [card(Rank::Ten), card(Rank::Nine)];
    let rules = DeviationRules::default();

    let deviation = apply_deviations(&hand, upcard(11), Action::Stand, 1.4, &rules, || 0.0);
    assert_eq!(
        deviation.insurance,
        Some(InsuranceAdvice { true_count: 1.4 })
    );
    assert_eq!(
        deviation.insurance.unwrap().to_string(),
        "Take Insurance (TC +1.4)"
    );
    assert_eq!(deviation.action, Action::Stand);

    let deviation = apply_deviations(&hand, upcard(11), Action::Stand, 1.3, &rules, || 0.0);
    assert_eq!(deviation.insurance, None);

    let deviation = apply_deviations(&hand, upcard(10), Action::Stand, 5.0, &rules, || 0.0);
    assert_eq!(deviation.insurance, None);
}

#[test]
fn busted_hands_are_not_adjusted() {
    let hand = [card(Rank::Ten), card(Rank::Nine), card(Rank::Five)];
    let deviation = apply_deviations(
        &hand,
        upcard(11),
        Action::Bust,
        5.0,
        &DeviationRules::default(),
        || unreachable!("bust probability of a busted hand is known"),
    );
    assert_eq!(deviation.action, Action::Bust);
    assert_eq!(deviation.insurance, None);
    assert_eq!(deviation.bust_probability, Some(1.0));
}

#[test]
fn bet_units_follow_the_true_count() {
    assert_eq!(recommend_units(-3.0), 1);
    assert_eq!(recommend_units(1.99), 1);
    assert_eq!(recommend_units(2.0), 2);
    assert_eq!(recommend_units(5.9), 5);
    assert_eq!(recommend_bet(3.2, 10), 30);
    assert_eq!(recommend_bet(0.5, 25), 25);
}
