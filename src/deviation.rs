//! Count-based index plays and the bust-probability override.

use core::fmt;

use crate::card::{Card, Rank};
use crate::hand::HandClass;
use crate::strategy::Action;

/// Default true count at or above which insurance is taken.
pub const DEFAULT_INSURANCE_THRESHOLD: f64 = 1.4;

/// Default bust probability above which a hit is turned into a stand.
pub const DEFAULT_BUST_THRESHOLD: f64 = 0.50;

/// Key of an index play: the pair rank for pairs, the total otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexKey {
    /// Any hand with this total.
    Total(u8),
    /// A pair of this rank.
    Pair(Rank),
}

impl IndexKey {
    /// Builds the key for a hand the same way strategy lookups do.
    ///
    /// Ten-value pairs share the `T,T` key.
    #[must_use]
    pub fn of(cards: &[Card]) -> Self {
        match HandClass::of(cards) {
            HandClass::Pair(rank) if rank.is_ten() => Self::Pair(Rank::Ten),
            HandClass::Pair(rank) => Self::Pair(rank),
            HandClass::Hard(total) | HandClass::Soft(total) => Self::Total(total),
        }
    }
}

/// How the true count is compared with an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Fires when the true count is at or above the index.
    AtLeast,
    /// Fires when the true count is at or below the index.
    AtMost,
}

impl Comparator {
    /// Returns whether `true_count` triggers against `threshold`.
    #[must_use]
    pub fn triggers(self, true_count: f64, threshold: f64) -> bool {
        match self {
            Self::AtLeast => true_count >= threshold,
            Self::AtMost => true_count <= threshold,
        }
    }
}

/// A single count-triggered deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexPlay {
    /// Hand the play applies to.
    pub key: IndexKey,
    /// Dealer upcard value (11 for an ace).
    pub dealer_value: u8,
    /// Comparison against the index.
    pub comparator: Comparator,
    /// True-count index.
    pub threshold: f64,
    /// Action taken when triggered.
    pub action: Action,
}

const fn play(
    key: IndexKey,
    dealer_value: u8,
    comparator: Comparator,
    threshold: f64,
    action: Action,
) -> IndexPlay {
    IndexPlay {
        key,
        dealer_value,
        comparator,
        threshold,
        action,
    }
}

use Comparator::{AtLeast, AtMost};
use IndexKey::{Pair, Total};

/// Single-deck S17 index plays.
pub const INDEX_PLAYS: &[IndexPlay] = &[
    play(Total(16), 10, AtLeast, 0.0, Action::Stand),
    play(Total(15), 10, AtLeast, 4.0, Action::Stand),
    play(Total(13), 2, AtMost, -1.0, Action::Hit),
    play(Total(12), 2, AtLeast, 3.0, Action::Stand),
    play(Total(12), 3, AtLeast, 2.0, Action::Stand),
    play(Total(12), 4, AtMost, -1.0, Action::Hit),
    play(Total(12), 5, AtMost, -2.0, Action::Hit),
    play(Total(12), 6, AtMost, -1.0, Action::Hit),
    play(Total(11), 11, AtLeast, -1.0, Action::Double),
    play(Total(10), 10, AtLeast, 4.0, Action::Double),
    play(Total(10), 11, AtLeast, 3.0, Action::Double),
    play(Total(9), 2, AtLeast, 1.0, Action::Double),
    play(Total(9), 7, AtLeast, 3.0, Action::Double),
    play(Pair(Rank::Ten), 4, AtLeast, 6.0, Action::Split),
    play(Pair(Rank::Ten), 5, AtLeast, 5.0, Action::Split),
    play(Pair(Rank::Ten), 6, AtLeast, 4.0, Action::Split),
];

/// Finds the index play for a key and dealer value.
#[must_use]
pub fn find_index_play(key: IndexKey, dealer_value: u8) -> Option<&'static IndexPlay> {
    INDEX_PLAYS
        .iter()
        .find(|play| play.key == key && play.dealer_value == dealer_value)
}

/// Why the recommended action differs from basic strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideReason {
    /// An index play fired at this true count.
    Index {
        /// True count at the time of the decision.
        true_count: f64,
    },
    /// The chance of busting on a hit exceeded the threshold.
    HighBust {
        /// Probability of busting on one more card.
        probability: f64,
    },
}

impl fmt::Display for OverrideReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index { true_count } => write!(f, "Index (TC {true_count:+.1})"),
            Self::HighBust { probability } => write!(f, "High Bust% ({:.1}%)", probability * 100.0),
        }
    }
}

/// Side recommendation to take insurance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsuranceAdvice {
    /// True count at the time of the decision.
    pub true_count: f64,
}

impl fmt::Display for InsuranceAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Take Insurance (TC {:+.1})", self.true_count)
    }
}

/// Thresholds used when applying deviations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationRules {
    /// True count at or above which insurance is taken.
    pub insurance_threshold: f64,
    /// Bust probability above which a hit becomes a stand.
    pub bust_threshold: f64,
}

impl Default for DeviationRules {
    fn default() -> Self {
        Self {
            insurance_threshold: DEFAULT_INSURANCE_THRESHOLD,
            bust_threshold: DEFAULT_BUST_THRESHOLD,
        }
    }
}

/// The action after count and bust-probability adjustments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    /// Final action.
    pub action: Action,
    /// Why it differs from basic strategy, if it does.
    pub reason: Option<OverrideReason>,
    /// Insurance recommendation, if the dealer shows an ace and the count
    /// is high enough.
    pub insurance: Option<InsuranceAdvice>,
    /// Bust probability on a hit, computed when the count-adjusted action
    /// was [`Action::Hit`].
    pub bust_probability: Option<f64>,
}

/// Applies insurance, index plays and the bust override to `basic`.
///
/// `bust_probability` is only called when the count-adjusted action is
/// [`Action::Hit`]; if it returns more than the bust threshold the action
/// becomes [`Action::Stand`], overriding any index play.
pub fn apply_deviations<F>(
    cards: &[Card],
    upcard: Card,
    basic: Action,
    true_count: f64,
    rules: &DeviationRules,
    bust_probability: F,
) -> Deviation
where
    F: FnOnce() -> f64,
{
    let mut deviation = Deviation {
        action: basic,
        reason: None,
        insurance: None,
        bust_probability: None,
    };
    if basic == Action::Bust {
        deviation.bust_probability = Some(1.0);
        return deviation;
    }

    if upcard.rank == Rank::Ace && true_count >= rules.insurance_threshold {
        deviation.insurance = Some(InsuranceAdvice { true_count });
    }

    if let Some(play) = find_index_play(IndexKey::of(cards), upcard.value()) {
        if play.comparator.triggers(true_count, play.threshold) && play.action != basic {
            deviation.action = play.action;
            deviation.reason = Some(OverrideReason::Index { true_count });
        }
    }

    if deviation.action == Action::Hit {
        let probability = bust_probability();
        deviation.bust_probability = Some(probability);
        if probability > rules.bust_threshold {
            deviation.action = Action::Stand;
            deviation.reason = Some(OverrideReason::HighBust { probability });
        }
    }

    deviation
}
