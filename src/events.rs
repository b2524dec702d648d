//! Structured diagnostics and observers.
//!
//! The advisor never writes log lines itself. Each state change or
//! recovered error is published as an [`Event`] to the registered
//! [`Observer`]s; [`LogObserver`] forwards them to the `log` facade.

use crate::card::Card;
use crate::deviation::{InsuranceAdvice, OverrideReason};
use crate::error::{LedgerError, ParseCardError};
use crate::shoe::Removal;
use crate::simulate::DealerState;
use crate::strategy::{Action, LookupMiss};
use crate::tracker::AnomalyWarning;

/// Something the advisor did or refused to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// The shoe was refilled.
    ShoeReset {
        /// Decks in the new shoe.
        decks: u8,
    },
    /// A card left the shoe.
    CardRemoved(Removal),
    /// A card was put back into the shoe.
    CardRestored(Removal),
    /// A detector label could not be parsed.
    LabelRejected {
        /// The raw label.
        label: &'a str,
        /// Why it was rejected.
        error: ParseCardError,
    },
    /// The ledger refused to remove a card.
    RemovalRejected {
        /// The card.
        card: Card,
        /// Why it was refused.
        error: LedgerError,
    },
    /// The ledger refused to restore a card.
    UndoRejected {
        /// The card.
        card: Card,
        /// Why it was refused.
        error: LedgerError,
    },
    /// The strategy chart had no entry and the fallback rule was used.
    LookupMiss(LookupMiss),
    /// The recommended action differs from basic strategy.
    Override {
        /// Basic strategy action.
        basic: Action,
        /// Recommended action.
        action: Action,
        /// Why.
        reason: OverrideReason,
    },
    /// Insurance is recommended.
    Insurance(InsuranceAdvice),
    /// A dealer turn was simulated.
    DealerSimulated {
        /// Final simulated dealer hand.
        hand: &'a [Card],
        /// Terminal state.
        state: DealerState,
    },
    /// The dealer's bust rate looks suspicious.
    Anomaly(AnomalyWarning),
}

/// Receives advisor events.
pub trait Observer: Send + Sync {
    /// Called for every event, in order.
    fn notify(&self, event: &Event<'_>);
}

/// Observer that writes events through the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&self, event: &Event<'_>) {
        match event {
            Event::ShoeReset { decks } => log::info!("shoe reset: {decks} deck(s)"),
            Event::CardRemoved(removal) => log::debug!(
                "removed {}: {} left, seen {}, running count {}",
                removal.card,
                removal.remaining,
                removal.cards_seen,
                removal.running_count
            ),
            Event::CardRestored(removal) => log::debug!(
                "restored {}: {} left, seen {}, running count {}",
                removal.card,
                removal.remaining,
                removal.cards_seen,
                removal.running_count
            ),
            Event::LabelRejected { label, error } => {
                log::warn!("skipping label {label:?}: {error}");
            }
            Event::RemovalRejected {
                card,
                error: LedgerError::Depleted,
            } => log::error!("tried to remove {card}, but none remain; tracker out of sync"),
            Event::RemovalRejected { card, error } => log::warn!("cannot remove {card}: {error}"),
            Event::UndoRejected { card, error } => log::warn!("cannot restore {card}: {error}"),
            Event::LookupMiss(miss) => log::warn!(
                "strategy chart has no entry for {:?} vs {}; using fallback",
                miss.class,
                miss.dealer_value
            ),
            Event::Override {
                basic,
                action,
                reason,
            } => log::info!("override: basic {basic}, playing {action} ({reason})"),
            Event::Insurance(advice) => log::info!("{advice}"),
            Event::DealerSimulated {
                hand,
                state: DealerState::Exhausted,
            } => log::warn!(
                "dealer simulation ran out of cards after {} card(s)",
                hand.len()
            ),
            Event::DealerSimulated { hand, state } => {
                log::debug!("dealer simulated {} card(s): {state:?}", hand.len());
            }
            Event::Anomaly(warning) => log::warn!("dealer anomaly: {warning}"),
        }
    }
}
