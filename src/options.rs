//! Advisor configuration options.

use crate::deviation::{DEFAULT_BUST_THRESHOLD, DEFAULT_INSURANCE_THRESHOLD, DeviationRules};
use crate::shoe::DEFAULT_MIN_DECKS_REMAINING;
use crate::simulate::DealerRules;

/// Configuration options for an advisor session.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjcount::AdviceOptions;
///
/// let options = AdviceOptions::default()
///     .with_bust_threshold(0.6)
///     .with_base_bet(5);
/// assert_eq!(options.decks, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceOptions {
    /// Number of decks. One deck is tracked by rank and suit, more by rank.
    pub decks: u8,
    /// Floor, in decks, for the true-count divisor.
    pub min_decks_remaining: f64,
    /// Bust probability above which a hit is turned into a stand.
    pub bust_threshold: f64,
    /// True count at or above which insurance is recommended.
    pub insurance_threshold: f64,
    /// Betting unit multiplied by the recommended units.
    pub base_bet: u32,
    /// Outcomes needed for an upcard before its bust rate is checked.
    pub anomaly_min_samples: usize,
    /// Fraction of the expected bust rate below which the dealer is flagged.
    pub anomaly_multiplier: f64,
    /// Outcomes kept per upcard.
    pub outcome_history: usize,
    /// Hole cards kept for display.
    pub hole_card_history: usize,
    /// Session actions kept for undo.
    pub action_history: usize,
    /// Fraction of the shoe seen before a reshuffle is suggested.
    /// 0 to disable.
    pub penetration: f64,
    /// Whether the dealer stands on soft 17.
    pub stand_on_soft_17: bool,
}

impl Default for AdviceOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            min_decks_remaining: DEFAULT_MIN_DECKS_REMAINING,
            bust_threshold: DEFAULT_BUST_THRESHOLD,
            insurance_threshold: DEFAULT_INSURANCE_THRESHOLD,
            base_bet: 1,
            anomaly_min_samples: 10,
            anomaly_multiplier: 0.70,
            outcome_history: 100,
            hole_card_history: 10,
            action_history: 10,
            penetration: 0.75,
            stand_on_soft_17: true,
        }
    }
}

impl AdviceOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::AdviceOptions;
    ///
    /// let options = AdviceOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the floor, in decks, for the true-count divisor.
    #[must_use]
    pub const fn with_min_decks_remaining(mut self, decks: f64) -> Self {
        self.min_decks_remaining = decks;
        self
    }

    /// Sets the bust probability above which a hit becomes a stand.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::AdviceOptions;
    ///
    /// let options = AdviceOptions::default().with_bust_threshold(0.65);
    /// assert_eq!(options.bust_threshold, 0.65);
    /// ```
    #[must_use]
    pub const fn with_bust_threshold(mut self, threshold: f64) -> Self {
        self.bust_threshold = threshold;
        self
    }

    /// Sets the true count at which insurance is recommended.
    #[must_use]
    pub const fn with_insurance_threshold(mut self, threshold: f64) -> Self {
        self.insurance_threshold = threshold;
        self
    }

    /// Sets the betting unit.
    #[must_use]
    pub const fn with_base_bet(mut self, base_bet: u32) -> Self {
        self.base_bet = base_bet;
        self
    }

    /// Sets the outcomes needed before the bust rate of an upcard is checked.
    #[must_use]
    pub const fn with_anomaly_min_samples(mut self, samples: usize) -> Self {
        self.anomaly_min_samples = samples;
        self
    }

    /// Sets the fraction of the expected bust rate that triggers a warning.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::AdviceOptions;
    ///
    /// let options = AdviceOptions::default().with_anomaly_multiplier(0.5);
    /// assert_eq!(options.anomaly_multiplier, 0.5);
    /// ```
    #[must_use]
    pub const fn with_anomaly_multiplier(mut self, multiplier: f64) -> Self {
        self.anomaly_multiplier = multiplier;
        self
    }

    /// Sets how many outcomes are kept per upcard.
    #[must_use]
    pub const fn with_outcome_history(mut self, capacity: usize) -> Self {
        self.outcome_history = capacity;
        self
    }

    /// Sets how many hole cards are kept for display.
    #[must_use]
    pub const fn with_hole_card_history(mut self, capacity: usize) -> Self {
        self.hole_card_history = capacity;
        self
    }

    /// Sets how many session actions are kept for undo.
    #[must_use]
    pub const fn with_action_history(mut self, capacity: usize) -> Self {
        self.action_history = capacity;
        self
    }

    /// Sets the deck penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use bjcount::AdviceOptions;
    ///
    /// let options = AdviceOptions::default().with_penetration(0.80);
    /// assert_eq!(options.penetration, 0.80);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets whether the dealer stands on soft 17.
    #[must_use]
    pub const fn with_stand_on_soft_17(mut self, stand: bool) -> Self {
        self.stand_on_soft_17 = stand;
        self
    }

    /// Thresholds for the deviation engine.
    #[must_use]
    pub const fn deviation_rules(&self) -> DeviationRules {
        DeviationRules {
            insurance_threshold: self.insurance_threshold,
            bust_threshold: self.bust_threshold,
        }
    }

    /// Drawing rule for dealer simulations.
    #[must_use]
    pub const fn dealer_rules(&self) -> DealerRules {
        DealerRules {
            stand_on_soft_17: self.stand_on_soft_17,
        }
    }
}
