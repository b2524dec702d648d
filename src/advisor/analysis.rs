use alloc::vec::Vec;

use crate::bet;
use crate::card::Card;
use crate::deviation::{InsuranceAdvice, OverrideReason, apply_deviations};
use crate::error::AdviceError;
use crate::events::Event;
use crate::hand::{self, Hand, HandClass};
use crate::narrative::{ExplanationRequest, composition_summary};
use crate::probability::bust_probability;
use crate::shoe::Precision;
use crate::strategy::{Action, resolve};
use crate::tracker::AnomalyWarning;

use super::{Advisor, Phase};

/// Recommendation for the first player hand against the dealer upcard.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Player cards analyzed.
    pub player_hand: Vec<Card>,
    /// Dealer upcard.
    pub dealer_upcard: Card,
    /// Player total.
    pub player_total: u8,
    /// Dealer upcard value (11 for an ace).
    pub dealer_value: u8,
    /// Classification the basic action was taken from.
    pub class: HandClass,
    /// Basic strategy action.
    pub basic_action: Action,
    /// Recommended action after deviations.
    pub action: Action,
    /// Why `action` differs from `basic_action`.
    pub reason: Option<OverrideReason>,
    /// Insurance recommendation.
    pub insurance: Option<InsuranceAdvice>,
    /// Bust probability on a hit, when it was computed.
    pub bust_probability: Option<f64>,
    /// True count used for the decision.
    pub true_count: f64,
    /// Recommended bet for the next round.
    pub bet: u32,
    /// Dealer bust-rate warning for the upcard rank.
    pub anomaly: Option<AnomalyWarning>,
}

impl Analysis {
    /// Returns whether the recommendation deviates from basic strategy.
    #[must_use]
    pub const fn is_override(&self) -> bool {
        self.reason.is_some()
    }
}

/// Snapshot of the table for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TableReport {
    /// Current phase.
    pub phase: Phase,
    /// Ledger precision.
    pub precision: Precision,
    /// Hi-Lo running count.
    pub running_count: i32,
    /// Hi-Lo true count.
    pub true_count: f64,
    /// Cards seen since the last reset.
    pub cards_seen: u16,
    /// Cards left in the shoe.
    pub cards_remaining: u16,
    /// Aces left in the shoe.
    pub aces_remaining: u16,
    /// Ten-value cards left in the shoe.
    pub tens_remaining: u16,
    /// Recorded player hands.
    pub player_hands: Vec<Hand>,
    /// Dealer hand.
    pub dealer_hand: Hand,
    /// Last analysis this round.
    pub analysis: Option<Analysis>,
    /// Recommended bet for the next round.
    pub bet: u32,
    /// Recent (upcard, hole card) pairs, oldest first.
    pub hole_cards: Vec<(Card, Card)>,
    /// How many of `hole_cards` were a ten or an ace.
    pub hole_tens_and_aces: usize,
    /// Whether the shoe has reached the configured penetration.
    pub needs_reshuffle: bool,
}

impl Advisor {
    /// Recommends an action for the first player hand.
    ///
    /// Runs basic strategy, the count-based index plays, the insurance check
    /// and the bust-probability override against the live shoe, and checks
    /// the dealer's recorded bust rate for the upcard.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase is not `DealerInput` or a player hand
    /// or dealer upcard is missing.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::{AdviceOptions, Advisor, Action};
    ///
    /// let advisor = Advisor::new(AdviceOptions::default(), 7);
    /// advisor.add_player_hand(&["8h", "8s"]).unwrap();
    /// advisor.set_dealer_upcard(&["6d"]).unwrap();
    ///
    /// let analysis = advisor.analyze().unwrap();
    /// assert_eq!(analysis.action, Action::Split);
    /// ```
    pub fn analyze(&self) -> Result<Analysis, AdviceError> {
        if self.phase() != Phase::DealerInput {
            return Err(AdviceError::InvalidPhase);
        }
        let player_hand = self
            .player_hands
            .lock()
            .first()
            .map(|hand| hand.cards().to_vec())
            .ok_or(AdviceError::NoPlayerHand)?;
        let dealer_upcard = self
            .dealer_hand
            .lock()
            .first()
            .ok_or(AdviceError::NoDealerUpcard)?;

        let resolution = resolve(&player_hand, dealer_upcard);
        if let Some(miss) = resolution.miss {
            self.emit(&Event::LookupMiss(miss));
        }

        let rules = self.options.deviation_rules();
        let (true_count, deviation) = {
            let shoe = self.shoe.lock();
            let true_count = shoe.true_count();
            let deviation = apply_deviations(
                &player_hand,
                dealer_upcard,
                resolution.action,
                true_count,
                &rules,
                || bust_probability(&**shoe, &player_hand),
            );
            (true_count, deviation)
        };

        if let Some(reason) = deviation.reason {
            self.emit(&Event::Override {
                basic: resolution.action,
                action: deviation.action,
                reason,
            });
        }
        if let Some(advice) = deviation.insurance {
            self.emit(&Event::Insurance(advice));
        }

        let anomaly = self.outcomes.lock().check_anomaly(dealer_upcard.rank);
        if let Some(warning) = anomaly {
            self.emit(&Event::Anomaly(warning));
        }

        let analysis = Analysis {
            player_total: hand::value(&player_hand),
            dealer_value: dealer_upcard.value(),
            player_hand,
            dealer_upcard,
            class: resolution.class,
            basic_action: resolution.action,
            action: deviation.action,
            reason: deviation.reason,
            insurance: deviation.insurance,
            bust_probability: deviation.bust_probability,
            true_count,
            bet: bet::recommend_bet(true_count, self.options.base_bet),
            anomaly,
        };
        *self.last_analysis.lock() = Some(analysis.clone());

        Ok(analysis)
    }

    /// Recommended bet for the next round at the current true count.
    pub fn recommend_bet(&self) -> u32 {
        bet::recommend_bet(self.true_count(), self.options.base_bet)
    }

    /// Returns the last analysis of the current round.
    pub fn last_analysis(&self) -> Option<Analysis> {
        self.last_analysis.lock().clone()
    }

    /// Collects everything a display needs in one snapshot.
    #[expect(
        clippy::significant_drop_tightening,
        reason = "the shoe lock is held while the report is built"
    )]
    pub fn report(&self) -> TableReport {
        let (hole_cards, hole_tens_and_aces) = {
            let history = self.hole_cards.lock();
            (history.iter().copied().collect(), history.tens_and_aces())
        };

        // All counters come from one lock.
        let shoe = self.shoe.lock();
        let true_count = shoe.true_count();

        TableReport {
            phase: self.phase(),
            precision: shoe.precision(),
            running_count: shoe.running_count(),
            true_count,
            cards_seen: shoe.cards_seen(),
            cards_remaining: shoe.cards_remaining(),
            aces_remaining: shoe.aces_remaining(),
            tens_remaining: shoe.tens_remaining(),
            player_hands: self.player_hands(),
            dealer_hand: self.dealer_hand(),
            analysis: self.last_analysis(),
            bet: bet::recommend_bet(true_count, self.options.base_bet),
            hole_cards,
            hole_tens_and_aces,
            needs_reshuffle: shoe.needs_reshuffle(self.options.penetration),
        }
    }

    /// Builds the input for an [`Explainer`](crate::narrative::Explainer)
    /// from the last analysis and the current shoe.
    ///
    /// Returns `None` until [`analyze`](Self::analyze) has run this round.
    pub fn explanation_request(&self) -> Option<ExplanationRequest> {
        let analysis = self.last_analysis()?;
        let composition = composition_summary(&**self.shoe.lock());

        Some(ExplanationRequest {
            player_hand: analysis.player_hand,
            dealer_upcard: analysis.dealer_upcard,
            player_total: analysis.player_total,
            dealer_value: analysis.dealer_value,
            true_count: analysis.true_count,
            basic_action: analysis.basic_action,
            final_action: analysis.action,
            bust_probability: analysis.bust_probability.unwrap_or(0.0),
            composition,
            reason: analysis.reason,
        })
    }
}
