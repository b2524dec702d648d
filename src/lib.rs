//! A single-deck blackjack card-counting advisor with optional `no_std`
//! support.
//!
//! The crate tracks the cards seen from a shoe with a Hi-Lo count and
//! recommends a play for the player's hand: basic strategy, adjusted by
//! count-based index plays and by the exact probability of busting on the
//! next card. It also sizes bets from the true count, plays out the dealer's
//! hand on a private copy of the shoe and flags dealers that bust less
//! often than expected.
//!
//! [`Advisor`] ties everything together for one table. The building blocks
//! ([`shoe`], [`strategy`], [`deviation`], [`probability`], [`simulate`])
//! can also be used on their own.
//!
//! # Example
//!
//! ```
//! use bjcount::{Action, AdviceOptions, Advisor};
//!
//! let advisor = Advisor::new(AdviceOptions::default(), 42);
//! advisor.add_player_hand(&["Th", "6c"]).unwrap();
//! advisor.set_dealer_upcard(&["Ts"]).unwrap();
//!
//! let analysis = advisor.analyze().unwrap();
//! assert_eq!(analysis.basic_action, Action::Hit);
//! assert_eq!(advisor.cards_seen(), 3);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod advisor;
pub mod bet;
pub mod card;
pub mod deviation;
pub mod error;
pub mod events;
pub mod hand;
pub mod narrative;
pub mod options;
pub mod probability;
pub mod shoe;
pub mod simulate;
pub mod strategy;
pub mod tracker;
mod sync;

// Re-export main types
pub use advisor::{Advisor, Analysis, Phase, SessionAction, TableReport};
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use deviation::{InsuranceAdvice, OverrideReason};
pub use error::{AdviceError, LedgerError, ParseCardError};
pub use events::{Event, LogObserver, Observer};
pub use hand::{Hand, HandClass};
pub use narrative::{ExplanationRequest, Explainer};
pub use options::AdviceOptions;
pub use shoe::{Precision, ShoeLedger};
pub use strategy::Action;
pub use tracker::{AnomalyWarning, DealerOutcome};
