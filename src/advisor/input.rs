use crate::card::Card;
use crate::error::AdviceError;
use crate::hand::Hand;

use super::{Advisor, Phase, SessionAction};

impl Advisor {
    /// Records a player hand from detector labels and removes its cards
    /// from the shoe.
    ///
    /// Unparseable labels are reported and skipped. If the shoe rejects any
    /// card, no card of the hand is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `Start` or `PlayerInput`, no
    /// label is usable, or the ledger rejects a card.
    pub fn add_player_hand(&self, labels: &[&str]) -> Result<Hand, AdviceError> {
        let phase = self.phase();
        if phase != Phase::Start && phase != Phase::PlayerInput {
            return Err(AdviceError::InvalidPhase);
        }

        let cards = self.normalize(labels);
        if cards.is_empty() {
            return Err(AdviceError::NoCardDetected);
        }

        self.take_cards(&cards)?;

        let hand = Hand::from_cards(&cards);
        self.player_hands.lock().push(hand.clone());
        self.record_action(SessionAction::PlayerHand(cards));
        *self.phase.lock() = Phase::PlayerInput;

        Ok(hand)
    }

    /// Records the dealer upcard from the first usable detector label.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `Start` or `PlayerInput`, no
    /// label is usable, or the ledger rejects the card.
    pub fn set_dealer_upcard(&self, labels: &[&str]) -> Result<Card, AdviceError> {
        let phase = self.phase();
        if phase != Phase::Start && phase != Phase::PlayerInput {
            return Err(AdviceError::InvalidPhase);
        }

        let card = self
            .normalize(labels)
            .first()
            .copied()
            .ok_or(AdviceError::NoCardDetected)?;

        self.take_cards(&[card])?;

        {
            let mut dealer = self.dealer_hand.lock();
            dealer.clear();
            dealer.add_card(card);
        }
        self.record_action(SessionAction::DealerUpcard(card));
        *self.phase.lock() = Phase::DealerInput;

        Ok(card)
    }

    /// Adds the first usable detector label to the first player hand.
    ///
    /// Returns the updated hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `DealerInput`, no player hand
    /// is recorded, no label is usable, or the ledger rejects the card.
    pub fn hit(&self, labels: &[&str]) -> Result<Hand, AdviceError> {
        if self.phase() != Phase::DealerInput {
            return Err(AdviceError::InvalidPhase);
        }
        if self.player_hands.lock().is_empty() {
            return Err(AdviceError::NoPlayerHand);
        }

        let card = self
            .normalize(labels)
            .first()
            .copied()
            .ok_or(AdviceError::NoCardDetected)?;

        self.take_cards(&[card])?;

        let hand = {
            let mut hands = self.player_hands.lock();
            let hand = hands.first_mut().ok_or(AdviceError::NoPlayerHand)?;
            hand.add_card(card);
            hand.clone()
        };
        self.record_action(SessionAction::Hit(card));
        *self.last_analysis.lock() = None;

        Ok(hand)
    }
}
