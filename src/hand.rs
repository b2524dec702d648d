//! Hand valuation and classification.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::{Card, Rank};

fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank == Rank::Ace {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    // Any ace not demoted above is still counted as 11.
    let is_soft = aces > 0 && value <= 21;
    (value, is_soft)
}

/// Blackjack total of a card sequence.
///
/// Aces count as 11 and are demoted to 1 one at a time while the total
/// exceeds 21. An empty slice is worth 0.
#[must_use]
pub fn value(cards: &[Card]) -> u8 {
    evaluate_cards(cards).0
}

/// Returns whether an ace in the sequence still counts as 11.
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate_cards(cards).1
}

/// Classification of a hand for strategy lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandClass {
    /// No ace counted as 11.
    Hard(u8),
    /// At least one ace still counted as 11.
    Soft(u8),
    /// Exactly two cards of the same rank.
    Pair(Rank),
}

impl HandClass {
    /// Classifies a card sequence.
    #[must_use]
    pub fn of(cards: &[Card]) -> Self {
        if let [a, b] = cards {
            if a.rank == b.rank {
                return Self::Pair(a.rank);
            }
        }
        Self::of_total(cards)
    }

    /// Classifies by total only, ignoring pairs.
    #[must_use]
    pub fn of_total(cards: &[Card]) -> Self {
        let (total, soft) = evaluate_cards(cards);
        if soft {
            Self::Soft(total)
        } else {
            Self::Hard(total)
        }
    }
}

/// A participant's hand: an ordered list of observed cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a hand from the given cards.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes and returns the last card.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the first card (the dealer's upcard for a dealer hand).
    #[must_use]
    pub fn first(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        value(&self.cards)
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }

    /// Returns the strategy classification of the hand.
    #[must_use]
    pub fn classify(&self) -> HandClass {
        HandClass::of(&self.cards)
    }

    /// Returns whether the hand is bust (over 21).
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand is a natural (two-card 21).
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
