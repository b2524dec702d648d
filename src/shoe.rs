//! Shoe ledger: exact remaining-card tracking and the Hi-Lo count.
//!
//! A single-deck shoe is tracked per rank and suit ([`SuitedShoe`]); larger
//! shoes are tracked per rank only ([`RankShoe`]). Both sit behind the
//! [`ShoeLedger`] trait so callers can check [`ShoeLedger::precision`]
//! instead of being surprised by the coarser variant.

extern crate alloc;

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::LedgerError;

/// Default floor, in decks, for the true-count divisor.
pub const DEFAULT_MIN_DECKS_REMAINING: f64 = 0.1;

/// How precisely a ledger identifies cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Every card is tracked by rank and suit.
    Exact,
    /// Only rank multiplicities are tracked.
    RankOnly,
}

/// Outcome of a successful removal or restoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removal {
    /// The ledger identifier that changed.
    pub card: Card,
    /// Copies of that identifier left afterwards.
    pub remaining: u16,
    /// Running count afterwards.
    pub running_count: i32,
    /// Cards seen afterwards.
    pub cards_seen: u16,
}

/// Identifier under which a ledger counts cards.
pub trait CardKey: Copy + Ord + fmt::Debug + Send + 'static {
    /// Copies of one identifier in a single deck.
    const PER_DECK: u8;
    /// Precision reported by a ledger keyed by this type.
    const PRECISION: Precision;

    /// Maps a detected card to its key, if the card carries enough detail.
    fn from_card(card: Card) -> Option<Self>;

    /// Converts the key back to a card.
    fn to_card(self) -> Card;

    /// Returns every distinct key in a deck.
    fn keys() -> Vec<Self>;
}

impl CardKey for Card {
    const PER_DECK: u8 = 1;
    const PRECISION: Precision = Precision::Exact;

    fn from_card(card: Card) -> Option<Self> {
        card.suit.map(|_| card)
    }

    fn to_card(self) -> Card {
        self
    }

    fn keys() -> Vec<Self> {
        Rank::ALL
            .iter()
            .flat_map(|&rank| Suit::ALL.iter().map(move |&suit| Self::new(rank, suit)))
            .collect()
    }
}

impl CardKey for Rank {
    const PER_DECK: u8 = 4;
    const PRECISION: Precision = Precision::RankOnly;

    fn from_card(card: Card) -> Option<Self> {
        Some(card.rank)
    }

    fn to_card(self) -> Card {
        Card::rank_only(self)
    }

    fn keys() -> Vec<Self> {
        Rank::ALL.to_vec()
    }
}

/// Capability interface shared by every shoe ledger.
pub trait ShoeLedger: Send {
    /// Returns how precisely this ledger identifies cards.
    fn precision(&self) -> Precision;

    /// Number of decks in a full shoe.
    fn decks(&self) -> u8;

    /// Restores a full shoe and zeroes all counters.
    fn reset(&mut self);

    /// Removes an observed card from the shoe.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidCard`] if the card cannot be mapped to
    /// a tracked identifier and [`LedgerError::Depleted`] if none remain.
    /// The ledger is unchanged on error.
    fn remove(&mut self, card: Card) -> Result<Removal, LedgerError>;

    /// Reverses the most recent removal, which must be `card`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidCard`] if the card cannot be mapped to
    /// a tracked identifier and [`LedgerError::UndoMismatch`] if it is not
    /// the last card removed or the shoe already holds every copy.
    fn undo_last(&mut self, card: Card) -> Result<Removal, LedgerError>;

    /// Returns the most recently removed identifier.
    fn last_removed(&self) -> Option<Card>;

    /// Hi-Lo running count.
    fn running_count(&self) -> i32;

    /// Cards removed since the last reset.
    fn cards_seen(&self) -> u16;

    /// Cards in a full shoe.
    fn total_cards(&self) -> u16;

    /// Copies remaining of the identifier `card` maps to (0 if untracked).
    fn remaining_of(&self, card: Card) -> u16;

    /// Copies remaining of every card of `rank`.
    fn rank_remaining(&self, rank: Rank) -> u16;

    /// Every distinct identifier with at least one copy left, with its count.
    ///
    /// The returned list is an independent copy of the ledger state.
    fn composition(&self) -> Vec<(Card, u16)>;

    /// Floor, in decks, applied to the true-count divisor.
    fn min_decks_remaining(&self) -> f64;

    /// Cards still in the shoe.
    fn cards_remaining(&self) -> u16 {
        self.total_cards().saturating_sub(self.cards_seen())
    }

    /// Running count divided by the decks remaining.
    ///
    /// Returns 0 for an empty shoe.
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    fn true_count(&self) -> f64 {
        let remaining = self.cards_remaining();
        if remaining == 0 {
            return 0.0;
        }
        let decks = (f64::from(remaining) / DECK_SIZE as f64).max(self.min_decks_remaining());
        f64::from(self.running_count()) / decks
    }

    /// Aces still in the shoe.
    fn aces_remaining(&self) -> u16 {
        self.rank_remaining(Rank::Ace)
    }

    /// Ten-value cards still in the shoe.
    fn tens_remaining(&self) -> u16 {
        Rank::ALL
            .iter()
            .filter(|rank| rank.is_ten())
            .map(|&rank| self.rank_remaining(rank))
            .sum()
    }

    /// Returns whether the seen fraction has reached `penetration`.
    ///
    /// A penetration of 0 or less never asks for a reshuffle.
    fn needs_reshuffle(&self, penetration: f64) -> bool {
        if penetration <= 0.0 {
            return false;
        }
        let used_ratio = f64::from(self.cards_seen()) / f64::from(self.total_cards().max(1));
        used_ratio >= penetration
    }
}

/// A shoe ledger counting cards under key type `K`.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger<K: CardKey> {
    decks: u8,
    min_decks: f64,
    remaining: BTreeMap<K, u16>,
    cards_seen: u16,
    running_count: i32,
    history: Vec<K>,
}

/// Exact single-deck ledger keyed by rank and suit.
pub type SuitedShoe = Ledger<Card>;

/// Multi-deck ledger keyed by rank only.
pub type RankShoe = Ledger<Rank>;

impl<K: CardKey> Ledger<K> {
    /// Creates a full shoe of `decks` decks (at least one).
    #[must_use]
    pub fn new(decks: u8) -> Self {
        let mut ledger = Self {
            decks: decks.max(1),
            min_decks: DEFAULT_MIN_DECKS_REMAINING,
            remaining: BTreeMap::new(),
            cards_seen: 0,
            running_count: 0,
            history: Vec::new(),
        };
        ledger.refill();
        ledger
    }

    /// Sets the floor, in decks, for the true-count divisor.
    #[must_use]
    pub const fn with_min_decks(mut self, min_decks: f64) -> Self {
        self.min_decks = min_decks;
        self
    }

    fn max_copies(&self) -> u16 {
        u16::from(K::PER_DECK) * u16::from(self.decks)
    }

    fn refill(&mut self) {
        let copies = self.max_copies();
        self.remaining = K::keys().into_iter().map(|key| (key, copies)).collect();
        self.cards_seen = 0;
        self.running_count = 0;
        self.history.clear();
    }

    fn snapshot(&self, key: K) -> Removal {
        Removal {
            card: key.to_card(),
            remaining: self.remaining.get(&key).copied().unwrap_or(0),
            running_count: self.running_count,
            cards_seen: self.cards_seen,
        }
    }
}

impl<K: CardKey> ShoeLedger for Ledger<K> {
    fn precision(&self) -> Precision {
        K::PRECISION
    }

    fn decks(&self) -> u8 {
        self.decks
    }

    fn reset(&mut self) {
        self.refill();
    }

    fn remove(&mut self, card: Card) -> Result<Removal, LedgerError> {
        let key = K::from_card(card).ok_or(LedgerError::InvalidCard)?;
        let count = self
            .remaining
            .get_mut(&key)
            .ok_or(LedgerError::InvalidCard)?;
        if *count == 0 {
            return Err(LedgerError::Depleted);
        }

        *count -= 1;
        self.cards_seen += 1;
        self.running_count += card.rank.hi_lo();
        self.history.push(key);

        Ok(self.snapshot(key))
    }

    fn undo_last(&mut self, card: Card) -> Result<Removal, LedgerError> {
        let key = K::from_card(card).ok_or(LedgerError::InvalidCard)?;
        if self.history.last() != Some(&key) {
            return Err(LedgerError::UndoMismatch);
        }
        let max = self.max_copies();
        let count = self
            .remaining
            .get_mut(&key)
            .ok_or(LedgerError::InvalidCard)?;
        if *count >= max {
            return Err(LedgerError::UndoMismatch);
        }

        *count += 1;
        self.cards_seen -= 1;
        self.running_count -= card.rank.hi_lo();
        self.history.pop();

        Ok(self.snapshot(key))
    }

    fn last_removed(&self) -> Option<Card> {
        self.history.last().map(|key| key.to_card())
    }

    fn running_count(&self) -> i32 {
        self.running_count
    }

    fn cards_seen(&self) -> u16 {
        self.cards_seen
    }

    fn total_cards(&self) -> u16 {
        u16::from(self.decks) * DECK_SIZE as u16
    }

    fn remaining_of(&self, card: Card) -> u16 {
        K::from_card(card)
            .and_then(|key| self.remaining.get(&key).copied())
            .unwrap_or(0)
    }

    fn rank_remaining(&self, rank: Rank) -> u16 {
        self.remaining
            .iter()
            .filter(|(key, _)| key.to_card().rank == rank)
            .map(|(_, &count)| count)
            .sum()
    }

    fn composition(&self) -> Vec<(Card, u16)> {
        self.remaining
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(key, &count)| (key.to_card(), count))
            .collect()
    }

    fn min_decks_remaining(&self) -> f64 {
        self.min_decks
    }
}

/// Creates the ledger suited to a shoe of `decks` decks.
///
/// One deck is tracked exactly by rank and suit; more decks are tracked by
/// rank only.
///
/// # Example
///
/// ```
/// use bjcount::shoe::{Precision, new_shoe};
///
/// assert_eq!(new_shoe(1, 0.1).precision(), Precision::Exact);
/// assert_eq!(new_shoe(6, 0.1).precision(), Precision::RankOnly);
/// ```
#[must_use]
pub fn new_shoe(decks: u8, min_decks: f64) -> Box<dyn ShoeLedger> {
    if decks <= 1 {
        Box::new(SuitedShoe::new(1).with_min_decks(min_decks))
    } else {
        Box::new(RankShoe::new(decks).with_min_decks(min_decks))
    }
}
