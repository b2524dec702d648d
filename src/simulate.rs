//! Dealer turn simulation on a private copy of the shoe.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;

use crate::card::Card;
use crate::hand;
use crate::shoe::ShoeLedger;

/// State of a simulated dealer turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealerState {
    /// The dealer still has to draw.
    Drawing,
    /// The dealer stood on this total.
    Stood(u8),
    /// The dealer went over 21.
    Busted,
    /// The dealer had to draw but the private shoe was empty.
    Exhausted,
}

impl DealerState {
    /// Returns whether the turn is finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Drawing)
    }
}

/// Result of a simulated dealer turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerTurn {
    /// The dealer's starting cards followed by every simulated draw.
    pub hand: Vec<Card>,
    /// Terminal state.
    pub state: DealerState,
    /// Cards drawn by the simulation.
    pub draws: usize,
}

/// Independent copy of the remaining cards used for one simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoeSnapshot {
    cards: Vec<(Card, u16)>,
    remaining: u32,
    running_count: i32,
}

impl ShoeSnapshot {
    /// Copies the current state of `shoe`.
    #[must_use]
    pub fn of(shoe: &dyn ShoeLedger) -> Self {
        let cards = shoe.composition();
        let remaining = cards.iter().map(|&(_, count)| u32::from(count)).sum();
        Self {
            cards,
            remaining,
            running_count: shoe.running_count(),
        }
    }

    /// Cards left in the snapshot.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Running count including simulated draws.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running_count
    }

    /// Draws one card, weighted by the copies of each identifier left.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> Option<Card> {
        if self.remaining == 0 {
            return None;
        }
        let mut pick = rng.random_range(0..self.remaining);
        for (card, count) in &mut self.cards {
            let copies = u32::from(*count);
            if pick < copies {
                *count -= 1;
                self.remaining -= 1;
                self.running_count += card.rank.hi_lo();
                return Some(*card);
            }
            pick -= copies;
        }
        None
    }
}

/// Dealer drawing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerRules {
    /// Whether the dealer stands on soft 17.
    pub stand_on_soft_17: bool,
}

impl Default for DealerRules {
    fn default() -> Self {
        Self {
            stand_on_soft_17: true,
        }
    }
}

impl DealerRules {
    fn next_state(self, cards: &[Card]) -> DealerState {
        let value = hand::value(cards);
        if value > 21 {
            DealerState::Busted
        } else if value > 17 || (value == 17 && (self.stand_on_soft_17 || !hand::is_soft(cards))) {
            DealerState::Stood(value)
        } else {
            DealerState::Drawing
        }
    }
}

/// Plays out the dealer's hand against a copy of `shoe`.
///
/// The live ledger is never modified; cards drawn here exist only inside
/// the simulation.
pub fn simulate_dealer_turn<R: Rng>(
    shoe: &dyn ShoeLedger,
    dealer_cards: &[Card],
    rules: DealerRules,
    rng: &mut R,
) -> DealerTurn {
    let mut snapshot = ShoeSnapshot::of(shoe);
    let mut cards = dealer_cards.to_vec();
    let mut draws = 0;

    let mut state = rules.next_state(&cards);
    while state == DealerState::Drawing {
        state = match snapshot.draw(rng) {
            Some(card) => {
                cards.push(card);
                draws += 1;
                rules.next_state(&cards)
            }
            None => DealerState::Exhausted,
        };
    }

    DealerTurn {
        hand: cards,
        state,
        draws,
    }
}
