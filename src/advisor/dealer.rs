use crate::error::AdviceError;
use crate::events::Event;
use crate::hand::Hand;
use crate::simulate::{DealerTurn, simulate_dealer_turn};
use crate::tracker::DealerOutcome;

use super::{Advisor, Phase, SessionAction};

impl Advisor {
    /// Records the dealer's hole card and plays out the rest of the dealer
    /// hand by simulation.
    ///
    /// The labels are those the detector sees in the dealer area; the hole
    /// card is the first one that is not the upcard. It is removed from the
    /// live shoe. Further dealer cards are drawn from a private copy of the
    /// shoe with the advisor's seeded random source and never touch the
    /// live counts. A finished hand is added to the dealer outcome history
    /// and the pair (upcard, hole card) to the hole-card history.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `DealerInput`, the dealer hand
    /// is not exactly the upcard, no hole card is detected, or the ledger
    /// rejects the hole card.
    pub fn finalize_dealer(&self, labels: &[&str]) -> Result<DealerTurn, AdviceError> {
        if self.phase() != Phase::DealerInput {
            return Err(AdviceError::InvalidPhase);
        }
        let upcard = {
            let dealer = self.dealer_hand.lock();
            match dealer.cards() {
                [upcard] => *upcard,
                [] => return Err(AdviceError::NoDealerUpcard),
                _ => return Err(AdviceError::InvalidPhase),
            }
        };

        let hole = self
            .normalize(labels)
            .into_iter()
            .find(|&card| card != upcard)
            .ok_or(AdviceError::NoHoleCard)?;

        self.take_cards(&[hole])?;
        let turn = {
            let shoe = self.shoe.lock();
            let mut rng = self.rng.lock();
            simulate_dealer_turn(
                &**shoe,
                &[upcard, hole],
                self.options.dealer_rules(),
                &mut *rng,
            )
        };
        self.emit(&Event::DealerSimulated {
            hand: &turn.hand,
            state: turn.state,
        });

        let outcome = DealerOutcome::from_state(turn.state);
        if let Some(outcome) = outcome {
            self.outcomes.lock().record(upcard.rank, outcome);
        }
        self.hole_cards.lock().push(upcard, hole);
        self.record_action(SessionAction::Finalize {
            upcard,
            hole,
            outcome,
        });

        *self.dealer_hand.lock() = Hand::from_cards(&turn.hand);
        *self.phase.lock() = Phase::RoundOver;

        Ok(turn)
    }
}
