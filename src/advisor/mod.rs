//! Advisor session: shoe tracking, hands and histories for one table.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::sync::Mutex;

use crate::card::Card;
use crate::error::LedgerError;
use crate::events::{Event, Observer};
use crate::hand::Hand;
use crate::options::AdviceOptions;
use crate::shoe::{Precision, Removal, ShoeLedger, new_shoe};
use crate::tracker::{HoleCardHistory, OutcomeTracker};

mod analysis;
mod dealer;
mod input;
pub mod state;
mod undo;

pub use analysis::{Analysis, TableReport};
pub use state::{Phase, SessionAction};

/// A card-counting advisor for one table.
///
/// The advisor owns the live shoe ledger, the recorded hands, the dealer
/// outcome history and the seeded random source used for dealer
/// simulations. All methods take `&self`; each operation holds the shoe
/// lock for its whole update so counters never disagree. Observers are
/// notified after the lock is released and may read the advisor.
pub struct Advisor {
    /// Advisor options.
    pub options: AdviceOptions,
    /// Live shoe ledger.
    shoe: Mutex<Box<dyn ShoeLedger>>,
    /// Current phase.
    phase: Mutex<Phase>,
    /// Recorded player hands; the first is the one analyzed.
    player_hands: Mutex<Vec<Hand>>,
    /// Dealer's hand (upcard first).
    dealer_hand: Mutex<Hand>,
    /// Undoable session steps, newest last.
    actions: Mutex<VecDeque<SessionAction>>,
    /// Dealer outcomes per upcard.
    outcomes: Mutex<OutcomeTracker>,
    /// Recent dealer hole cards.
    hole_cards: Mutex<HoleCardHistory>,
    /// Result of the last analysis this round.
    last_analysis: Mutex<Option<Analysis>>,
    /// Random number generator for dealer simulations.
    rng: Mutex<ChaCha8Rng>,
    /// Event subscribers.
    observers: Vec<Box<dyn Observer>>,
}

impl Advisor {
    /// Creates an advisor with a fresh shoe and the given simulation seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::{AdviceOptions, Advisor};
    ///
    /// let advisor = Advisor::new(AdviceOptions::default(), 42);
    /// assert_eq!(advisor.cards_remaining(), 52);
    /// ```
    #[must_use]
    pub fn new(options: AdviceOptions, seed: u64) -> Self {
        let shoe = new_shoe(options.decks, options.min_decks_remaining);
        let outcomes = OutcomeTracker::new(
            options.outcome_history,
            options.anomaly_min_samples,
            options.anomaly_multiplier,
        );
        let hole_cards = HoleCardHistory::new(options.hole_card_history);

        Self {
            shoe: Mutex::new(shoe),
            phase: Mutex::new(Phase::Start),
            player_hands: Mutex::new(Vec::new()),
            dealer_hand: Mutex::new(Hand::new()),
            actions: Mutex::new(VecDeque::new()),
            outcomes: Mutex::new(outcomes),
            hole_cards: Mutex::new(hole_cards),
            last_analysis: Mutex::new(None),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
            observers: Vec::new(),
            options,
        }
    }

    /// Registers an observer for advisor events.
    #[must_use]
    pub fn with_observer<O: Observer + 'static>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    fn emit(&self, event: &Event<'_>) {
        for observer in &self.observers {
            observer.notify(event);
        }
    }

    /// Parses detector labels, reporting and skipping the ones that fail.
    fn normalize(&self, labels: &[&str]) -> Vec<Card> {
        labels
            .iter()
            .filter_map(|&label| match Card::parse(label) {
                Ok(card) => Some(card),
                Err(error) => {
                    self.emit(&Event::LabelRejected { label, error });
                    None
                }
            })
            .collect()
    }

    /// Removes `cards` from the live shoe, all or none.
    ///
    /// Events go out after the shoe lock is released, so observers may
    /// call back into the advisor.
    fn take_cards(&self, cards: &[Card]) -> Result<Vec<Removal>, LedgerError> {
        let taken = remove_all(&mut **self.shoe.lock(), cards);
        match taken {
            Ok(removals) => {
                for removal in &removals {
                    self.emit(&Event::CardRemoved(*removal));
                }
                Ok(removals)
            }
            Err(Rejection { card, error }) => {
                self.emit(&Event::RemovalRejected { card, error });
                Err(error)
            }
        }
    }

    fn record_action(&self, action: SessionAction) {
        let mut actions = self.actions.lock();
        actions.push_back(action);
        while actions.len() > self.options.action_history {
            actions.pop_front();
        }
    }

    /// Starts a fresh shoe and clears the round.
    ///
    /// Hole card and dealer outcome histories are kept.
    pub fn reset_shoe(&self) {
        let decks = {
            let mut shoe = self.shoe.lock();
            shoe.reset();
            shoe.decks()
        };
        self.clear_round();
        self.emit(&Event::ShoeReset { decks });
    }

    /// Starts a fresh shoe of `decks` decks and clears the round.
    ///
    /// The precision follows the new deck count: one deck is tracked by
    /// rank and suit, more by rank. `options.decks` keeps the value the
    /// advisor was built with.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::{AdviceOptions, Advisor, Precision};
    ///
    /// let advisor = Advisor::new(AdviceOptions::default(), 42);
    /// advisor.reset_shoe_with(2);
    /// assert_eq!(advisor.cards_remaining(), 104);
    /// assert_eq!(advisor.precision(), Precision::RankOnly);
    /// ```
    pub fn reset_shoe_with(&self, decks: u8) {
        let shoe = new_shoe(decks, self.options.min_decks_remaining);
        let decks = shoe.decks();
        *self.shoe.lock() = shoe;
        self.clear_round();
        self.emit(&Event::ShoeReset { decks });
    }

    /// Clears hands and the undo history, keeping the shoe as it is.
    pub fn new_round(&self) {
        self.clear_round();
    }

    fn clear_round(&self) {
        self.player_hands.lock().clear();
        self.dealer_hand.lock().clear();
        self.actions.lock().clear();
        *self.last_analysis.lock() = None;
        *self.phase.lock() = Phase::Start;
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    /// Returns the ledger precision.
    pub fn precision(&self) -> Precision {
        self.shoe.lock().precision()
    }

    /// Returns the Hi-Lo running count.
    pub fn running_count(&self) -> i32 {
        self.shoe.lock().running_count()
    }

    /// Returns the Hi-Lo true count.
    pub fn true_count(&self) -> f64 {
        self.shoe.lock().true_count()
    }

    /// Returns the number of cards seen since the last reset.
    pub fn cards_seen(&self) -> u16 {
        self.shoe.lock().cards_seen()
    }

    /// Returns the number of cards left in the shoe.
    pub fn cards_remaining(&self) -> u16 {
        self.shoe.lock().cards_remaining()
    }

    /// Returns the copies left of the identifier `card` maps to.
    pub fn remaining_of(&self, card: Card) -> u16 {
        self.shoe.lock().remaining_of(card)
    }

    /// Returns whether the shoe has reached the configured penetration.
    pub fn needs_reshuffle(&self) -> bool {
        self.shoe.lock().needs_reshuffle(self.options.penetration)
    }

    /// Returns the recorded player hands.
    pub fn player_hands(&self) -> Vec<Hand> {
        self.player_hands.lock().clone()
    }

    /// Returns a clone of the dealer's hand.
    pub fn dealer_hand(&self) -> Hand {
        self.dealer_hand.lock().clone()
    }

    /// Returns the undoable session steps, oldest first.
    pub fn action_history(&self) -> Vec<SessionAction> {
        self.actions.lock().iter().cloned().collect()
    }

    /// Returns the recent (upcard, hole card) pairs, oldest first.
    pub fn hole_card_history(&self) -> Vec<(Card, Card)> {
        self.hole_cards.lock().iter().copied().collect()
    }

    /// Returns a clone of the dealer outcome tracker.
    pub fn outcome_tracker(&self) -> OutcomeTracker {
        self.outcomes.lock().clone()
    }
}

/// A card the ledger refused during a batch update.
#[derive(Debug, Clone, Copy)]
struct Rejection {
    card: Card,
    error: LedgerError,
}

/// Removes `cards` in order; on failure restores the ones already taken.
fn remove_all(shoe: &mut dyn ShoeLedger, cards: &[Card]) -> Result<Vec<Removal>, Rejection> {
    let mut removals = Vec::with_capacity(cards.len());
    for &card in cards {
        match shoe.remove(card) {
            Ok(removal) => removals.push(removal),
            Err(error) => {
                for removal in removals.iter().rev() {
                    let restored = shoe.undo_last(removal.card);
                    debug_assert!(restored.is_ok(), "fresh removal not restorable: {restored:?}");
                }
                return Err(Rejection { card, error });
            }
        }
    }
    Ok(removals)
}
