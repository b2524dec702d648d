use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{AdviceError, LedgerError};
use crate::events::Event;
use crate::shoe::{Removal, ShoeLedger};

use super::{Advisor, Phase, Rejection, SessionAction};

impl Advisor {
    /// Reverts the most recent session step and returns it.
    ///
    /// Cards the step removed are restored to the shoe in reverse order and
    /// the hands, phase and histories go back to what they were before the
    /// step. Simulated dealer draws never left the live shoe, so undoing a
    /// finalize only restores the hole card. On error nothing changes and
    /// the step stays in the history.
    ///
    /// # Errors
    ///
    /// Returns [`AdviceError::NothingToUndo`] if the history is empty,
    /// [`AdviceError::InvalidPhase`] if the session no longer matches the
    /// step, or a ledger error if a card cannot be restored.
    pub fn undo(&self) -> Result<SessionAction, AdviceError> {
        let action = self
            .actions
            .lock()
            .pop_back()
            .ok_or(AdviceError::NothingToUndo)?;

        if let Err(error) = self.revert(&action) {
            self.actions.lock().push_back(action);
            return Err(error);
        }
        Ok(action)
    }

    fn revert(&self, action: &SessionAction) -> Result<(), AdviceError> {
        if !self.matches_session(action) {
            return Err(AdviceError::InvalidPhase);
        }

        self.put_back(&action.removed_cards())?;

        match action {
            SessionAction::PlayerHand(_) => {
                let no_hands = {
                    let mut hands = self.player_hands.lock();
                    hands.pop();
                    hands.is_empty()
                };
                *self.phase.lock() = if no_hands { Phase::Start } else { Phase::PlayerInput };
            }
            SessionAction::DealerUpcard(_) => {
                self.dealer_hand.lock().clear();
                let no_hands = self.player_hands.lock().is_empty();
                *self.phase.lock() = if no_hands { Phase::Start } else { Phase::PlayerInput };
            }
            SessionAction::Hit(_) => {
                if let Some(hand) = self.player_hands.lock().first_mut() {
                    hand.pop();
                }
            }
            SessionAction::Finalize {
                upcard,
                hole,
                outcome,
            } => {
                {
                    let mut dealer = self.dealer_hand.lock();
                    dealer.clear();
                    dealer.add_card(*upcard);
                }
                if let Some(outcome) = outcome {
                    self.outcomes.lock().retract(upcard.rank, *outcome);
                }
                self.hole_cards.lock().retract(*upcard, *hole);
                *self.phase.lock() = Phase::DealerInput;
            }
        }
        *self.last_analysis.lock() = None;

        Ok(())
    }

    /// Returns whether the hands and phase are still what `action` left.
    fn matches_session(&self, action: &SessionAction) -> bool {
        let phase = self.phase();
        match action {
            SessionAction::PlayerHand(cards) => {
                phase == Phase::PlayerInput
                    && self
                        .player_hands
                        .lock()
                        .last()
                        .is_some_and(|hand| hand.cards() == cards.as_slice())
            }
            SessionAction::DealerUpcard(card) => {
                phase == Phase::DealerInput && self.dealer_hand.lock().cards() == [*card]
            }
            SessionAction::Hit(card) => {
                phase == Phase::DealerInput
                    && self
                        .player_hands
                        .lock()
                        .first()
                        .and_then(|hand| hand.cards().last().copied())
                        == Some(*card)
            }
            SessionAction::Finalize { upcard, .. } => {
                phase == Phase::RoundOver && self.dealer_hand.lock().first() == Some(*upcard)
            }
        }
    }

    /// Restores `cards` to the live shoe, all or none, newest first.
    ///
    /// Events go out after the shoe lock is released.
    fn put_back(&self, cards: &[Card]) -> Result<Vec<Removal>, LedgerError> {
        let restored = restore_all(&mut **self.shoe.lock(), cards);
        match restored {
            Ok(removals) => {
                for removal in &removals {
                    self.emit(&Event::CardRestored(*removal));
                }
                Ok(removals)
            }
            Err(Rejection { card, error }) => {
                self.emit(&Event::UndoRejected { card, error });
                Err(error)
            }
        }
    }
}

/// Restores `cards` newest first; on failure takes back the ones already
/// restored.
fn restore_all(shoe: &mut dyn ShoeLedger, cards: &[Card]) -> Result<Vec<Removal>, Rejection> {
    let mut restored = Vec::with_capacity(cards.len());
    for &card in cards.iter().rev() {
        match shoe.undo_last(card) {
            Ok(removal) => restored.push(removal),
            Err(error) => {
                for removal in restored.iter().rev() {
                    let taken = shoe.remove(removal.card);
                    debug_assert!(taken.is_ok(), "restored card not removable: {taken:?}");
                }
                return Err(Rejection { card, error });
            }
        }
    }
    Ok(restored)
}
