//! Dealer outcome history and bust-rate anomaly checks.

extern crate alloc;

use alloc::collections::VecDeque;
use core::fmt;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::{Card, Rank};
use crate::simulate::DealerState;

/// Final result of a dealer hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealerOutcome {
    /// The dealer finished on this total (17 to 21).
    Total(u8),
    /// The dealer busted.
    Bust,
}

impl DealerOutcome {
    /// Converts a terminal simulation state into an outcome.
    ///
    /// Returns `None` for states that did not finish the hand.
    #[must_use]
    pub const fn from_state(state: DealerState) -> Option<Self> {
        match state {
            DealerState::Stood(total) => Some(Self::Total(total)),
            DealerState::Busted => Some(Self::Bust),
            DealerState::Drawing | DealerState::Exhausted => None,
        }
    }
}

/// Theoretical dealer bust rate by upcard, single deck, dealer stands on
/// soft 17.
#[must_use]
pub const fn expected_bust_rate(upcard: Rank) -> f64 {
    match upcard {
        Rank::Two => 0.35,
        Rank::Three => 0.37,
        Rank::Four => 0.39,
        Rank::Five | Rank::Six => 0.42,
        Rank::Seven => 0.26,
        Rank::Eight => 0.24,
        Rank::Nine | Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 0.23,
        Rank::Ace => 0.17,
    }
}

/// Warning that the dealer is busting less often than expected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyWarning {
    /// Upcard rank the warning is about.
    pub upcard: Rank,
    /// Observed bust rate.
    pub observed: f64,
    /// Theoretical bust rate.
    pub expected: f64,
    /// Number of recorded outcomes.
    pub samples: usize,
}

impl fmt::Display for AnomalyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Low bust rate vs {}: {:.0}% over {} hands (expected ~{:.0}%)",
            self.upcard,
            self.observed * 100.0,
            self.samples,
            self.expected * 100.0
        )
    }
}

/// Bounded per-upcard history of dealer outcomes.
#[derive(Debug, Clone)]
pub struct OutcomeTracker {
    capacity: usize,
    min_samples: usize,
    multiplier: f64,
    history: HashMap<Rank, VecDeque<DealerOutcome>>,
}

impl OutcomeTracker {
    /// Creates a tracker keeping at most `capacity` outcomes per upcard and
    /// checking anomalies once `min_samples` are recorded.
    #[must_use]
    pub fn new(capacity: usize, min_samples: usize, multiplier: f64) -> Self {
        Self {
            capacity,
            min_samples,
            multiplier,
            history: HashMap::new(),
        }
    }

    /// Records an outcome, evicting the oldest beyond capacity.
    pub fn record(&mut self, upcard: Rank, outcome: DealerOutcome) {
        if self.capacity == 0 {
            return;
        }
        let outcomes = self.history.entry(upcard).or_default();
        outcomes.push_back(outcome);
        while outcomes.len() > self.capacity {
            outcomes.pop_front();
        }
    }

    /// Removes the most recent outcome for `upcard` if it equals `outcome`.
    pub fn retract(&mut self, upcard: Rank, outcome: DealerOutcome) -> bool {
        let Some(outcomes) = self.history.get_mut(&upcard) else {
            return false;
        };
        if outcomes.back() == Some(&outcome) {
            outcomes.pop_back();
            true
        } else {
            false
        }
    }

    /// Outcomes recorded for `upcard`, oldest first.
    pub fn outcomes(&self, upcard: Rank) -> impl Iterator<Item = &DealerOutcome> {
        self.history.get(&upcard).into_iter().flatten()
    }

    /// Number of outcomes recorded for `upcard`.
    #[must_use]
    pub fn samples(&self, upcard: Rank) -> usize {
        self.history.get(&upcard).map_or(0, VecDeque::len)
    }

    /// Observed bust rate for `upcard`, if anything was recorded.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for sample counts"
    )]
    pub fn bust_rate(&self, upcard: Rank) -> Option<f64> {
        let samples = self.samples(upcard);
        if samples == 0 {
            return None;
        }
        let busts = self
            .outcomes(upcard)
            .filter(|outcome| **outcome == DealerOutcome::Bust)
            .count();
        Some(busts as f64 / samples as f64)
    }

    /// Flags an upcard whose observed bust rate is below the expected rate
    /// times the multiplier.
    ///
    /// Returns `None` until enough outcomes are recorded.
    #[must_use]
    pub fn check_anomaly(&self, upcard: Rank) -> Option<AnomalyWarning> {
        let samples = self.samples(upcard);
        if samples < self.min_samples.max(1) {
            return None;
        }
        let observed = self.bust_rate(upcard)?;
        let expected = expected_bust_rate(upcard);
        (observed < expected * self.multiplier).then_some(AnomalyWarning {
            upcard,
            observed,
            expected,
            samples,
        })
    }
}

/// Bounded history of dealer (upcard, hole card) pairs.
#[derive(Debug, Clone, Default)]
pub struct HoleCardHistory {
    capacity: usize,
    entries: VecDeque<(Card, Card)>,
}

impl HoleCardHistory {
    /// Creates a history keeping the last `capacity` pairs.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
        }
    }

    /// Appends a pair, evicting the oldest beyond capacity.
    pub fn push(&mut self, upcard: Card, hole: Card) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_back((upcard, hole));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Removes the newest pair if it equals `(upcard, hole)`.
    pub fn retract(&mut self, upcard: Card, hole: Card) -> bool {
        if self.entries.back() == Some(&(upcard, hole)) {
            self.entries.pop_back();
            true
        } else {
            false
        }
    }

    /// Recorded pairs, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &(Card, Card)> {
        self.entries.iter()
    }

    /// Number of recorded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded hole cards that were a ten-value card or an ace.
    #[must_use]
    pub fn tens_and_aces(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, hole)| hole.rank.is_ten() || hole.rank == Rank::Ace)
            .count()
    }
}
