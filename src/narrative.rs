//! Inputs for the external explanation service.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::deviation::OverrideReason;
use crate::shoe::ShoeLedger;
use crate::strategy::Action;

/// Short description of what is left in the shoe.
#[must_use]
pub fn composition_summary(shoe: &dyn ShoeLedger) -> String {
    format!(
        "Rem Cards: {}. Rem A/T: {}/{}.",
        shoe.cards_remaining(),
        shoe.aces_remaining(),
        shoe.tens_remaining()
    )
}

/// Everything the explanation service needs about one decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationRequest {
    /// Player cards.
    pub player_hand: Vec<Card>,
    /// Dealer upcard.
    pub dealer_upcard: Card,
    /// Player total.
    pub player_total: u8,
    /// Dealer upcard value (11 for an ace).
    pub dealer_value: u8,
    /// Hi-Lo true count.
    pub true_count: f64,
    /// Basic strategy action.
    pub basic_action: Action,
    /// Recommended action.
    pub final_action: Action,
    /// Bust probability on a hit (0 when not computed).
    pub bust_probability: f64,
    /// Output of [`composition_summary`].
    pub composition: String,
    /// Why the recommendation differs from basic strategy.
    pub reason: Option<OverrideReason>,
}

impl ExplanationRequest {
    /// Renders the request as a prompt for a text-generation service.
    #[must_use]
    pub fn prompt(&self) -> String {
        let hand = self
            .player_hand
            .iter()
            .map(|card| format!("{card}"))
            .collect::<Vec<_>>()
            .join(", ");
        let reason = self
            .reason
            .map_or_else(|| String::from("none"), |reason| format!("{reason}"));

        format!(
            "Analyze the Blackjack situation and explain the final recommendation:\n\
             \n\
             Player Hand: {hand} (Total: {total})\n\
             Dealer Shows: {upcard} (Value: {dealer})\n\
             Hi-Lo True Count: {tc:+.1}\n\
             Deck: {composition}\n\
             Basic Strategy Move: {basic}\n\
             Calculated Bust Probability on Hit: {bust:.1}%\n\
             Final Recommended Move: {action}\n\
             Override Reason: {reason}\n\
             \n\
             Task: Explain concisely (2-3 sentences) why \"{action}\" is the final recommended action. \
             Start with the basic strategy move; if the final move differs, explain the adjustment \
             using the override reason; mention the true count if relevant.",
            total = self.player_total,
            upcard = self.dealer_upcard,
            dealer = self.dealer_value,
            tc = self.true_count,
            composition = self.composition,
            basic = self.basic_action,
            bust = self.bust_probability * 100.0,
            action = self.final_action,
        )
    }
}

/// A text service that explains a decision.
///
/// Implementations own their own latency and retry policy; the returned
/// text is for display only.
pub trait Explainer {
    /// Returns an explanation for `request`.
    fn explain(&self, request: &ExplanationRequest) -> String;
}
