//! Session state types.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::tracker::DealerOutcome;

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing recorded yet this round.
    Start,
    /// At least one player hand recorded, dealer upcard still missing.
    PlayerInput,
    /// Dealer upcard recorded; hits, analysis and dealer play allowed.
    DealerInput,
    /// Dealer hand finalized.
    RoundOver,
}

/// A recorded session step that can be undone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// A player hand was recorded.
    PlayerHand(Vec<Card>),
    /// The dealer upcard was recorded.
    DealerUpcard(Card),
    /// The first player hand drew a card.
    Hit(Card),
    /// The dealer hand was finalized.
    Finalize {
        /// Dealer upcard.
        upcard: Card,
        /// Hole card removed from the shoe.
        hole: Card,
        /// Recorded outcome, if the simulation finished the hand.
        outcome: Option<DealerOutcome>,
    },
}

impl SessionAction {
    /// Cards this step removed from the live shoe, in removal order.
    #[must_use]
    pub fn removed_cards(&self) -> Vec<Card> {
        match self {
            Self::PlayerHand(cards) => cards.clone(),
            Self::DealerUpcard(card) | Self::Hit(card) => alloc::vec![*card],
            Self::Finalize { hole, .. } => alloc::vec![*hole],
        }
    }
}
