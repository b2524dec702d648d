//! Error types for advisor operations.

use thiserror::Error;

/// Errors that can occur while parsing a detector label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The label is empty.
    #[error("empty card label")]
    Empty,
    /// The label does not start with a known rank.
    #[error("unknown rank")]
    UnknownRank,
    /// The label carries an unknown suit.
    #[error("unknown suit")]
    UnknownSuit,
}

/// Errors that can occur while updating the shoe ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The card is not an identifier this ledger tracks.
    #[error("card is not tracked by this shoe")]
    InvalidCard,
    /// No copies of the card remain in the shoe.
    #[error("no copies of this card remain in the shoe")]
    Depleted,
    /// The card is not the last one removed, or restoring it would
    /// overfill the shoe.
    #[error("card does not match the last removal")]
    UndoMismatch,
}

/// Errors that can occur during advisor session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdviceError {
    /// The operation is not valid in the current phase.
    #[error("invalid phase for this operation")]
    InvalidPhase,
    /// No player hand has been recorded.
    #[error("no player hand recorded")]
    NoPlayerHand,
    /// No dealer upcard has been recorded.
    #[error("no dealer upcard recorded")]
    NoDealerUpcard,
    /// None of the supplied labels produced a usable card.
    #[error("no usable card detected")]
    NoCardDetected,
    /// No dealer card distinct from the upcard was detected.
    #[error("no hole card detected")]
    NoHoleCard,
    /// The action history is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The shoe ledger rejected the update.
    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),
}
