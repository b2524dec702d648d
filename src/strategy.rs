//! Basic strategy resolution.
//!
//! The tables cover single deck, dealer stands on soft 17, double after
//! split, double on any two cards and no surrender. Rows are player totals
//! (or pair ranks), columns are the dealer upcard value from 2 to 11 (ace).

use core::fmt;

use crate::card::{Card, Rank};
use crate::hand::{self, HandClass};

/// A playing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Draw another card.
    Hit,
    /// Take no more cards.
    Stand,
    /// Double the bet and draw exactly one card.
    Double,
    /// Split the pair into two hands.
    Split,
    /// The hand is already over 21.
    Bust,
}

impl Action {
    /// Returns the chart letter for the action (`H`, `S`, `D`, `P`).
    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Self::Hit => "H",
            Self::Stand => "S",
            Self::Double => "D",
            Self::Split => "P",
            Self::Bust => "Bust",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hit => "Hit",
            Self::Stand => "Stand",
            Self::Double => "Double Down",
            Self::Split => "Split",
            Self::Bust => "Bust",
        };
        f.write_str(name)
    }
}

use Action::{Double as D, Hit as H, Split as P, Stand as S};

/// Hard totals 5 through 21.
const HARD: [[Action; 10]; 17] = [
    [H, H, H, H, H, H, H, H, H, H], // 5
    [H, H, H, H, H, H, H, H, H, H], // 6
    [H, H, H, H, H, H, H, H, H, H], // 7
    [H, D, D, D, D, H, H, H, H, H], // 8
    [D, D, D, D, D, H, H, H, H, H], // 9
    [D, D, D, D, D, D, D, D, H, H], // 10
    [D, D, D, D, D, D, D, D, D, H], // 11
    [H, H, S, S, S, H, H, H, H, H], // 12
    [S, S, S, S, S, H, H, H, H, H], // 13
    [S, S, S, S, S, H, H, H, H, H], // 14
    [S, S, S, S, S, H, H, H, H, H], // 15
    [S, S, S, S, S, H, H, H, H, H], // 16
    [S, S, S, S, S, S, S, S, S, S], // 17
    [S, S, S, S, S, S, S, S, S, S], // 18
    [S, S, S, S, S, S, S, S, S, S], // 19
    [S, S, S, S, S, S, S, S, S, S], // 20
    [S, S, S, S, S, S, S, S, S, S], // 21
];

/// Soft totals 13 through 21.
const SOFT: [[Action; 10]; 9] = [
    [H, D, D, D, D, H, H, H, H, H], // A,2
    [H, D, D, D, D, H, H, H, H, H], // A,3
    [H, D, D, D, D, H, H, H, H, H], // A,4
    [H, D, D, D, D, H, H, H, H, H], // A,5
    [D, D, D, D, D, S, S, H, H, H], // A,6
    [S, D, D, D, D, S, S, H, H, H], // A,7
    [S, S, S, D, D, S, S, S, S, S], // A,8
    [S, S, S, S, S, S, S, S, S, S], // A,9
    [S, S, S, S, S, S, S, S, S, S], // A,T
];

/// Pairs, aces first, then tens down to deuces.
const PAIRS: [[Action; 10]; 10] = [
    [P, P, P, P, P, P, P, P, P, P], // A,A
    [S, S, S, S, S, S, S, S, S, S], // T,T
    [P, P, P, P, P, S, P, S, S, S], // 9,9
    [P, P, P, P, P, P, P, P, P, P], // 8,8
    [P, P, P, P, P, P, H, H, H, H], // 7,7
    [P, P, P, P, P, H, H, H, H, H], // 6,6
    [D, D, D, D, D, D, D, D, H, H], // 5,5
    [H, H, H, P, P, H, H, H, H, H], // 4,4
    [P, P, H, P, P, H, H, H, H, H], // 3,3
    [P, P, H, P, P, H, H, H, H, H], // 2,2
];

const fn pair_row(rank: Rank) -> usize {
    match rank {
        Rank::Ace => 0,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 1,
        Rank::Nine => 2,
        Rank::Eight => 3,
        Rank::Seven => 4,
        Rank::Six => 5,
        Rank::Five => 6,
        Rank::Four => 7,
        Rank::Three => 8,
        Rank::Two => 9,
    }
}

/// Looks up the chart entry for a classified hand against a dealer value.
///
/// Ten-value pairs share the `T,T` row. Returns `None` when the chart has
/// no entry for the key.
#[must_use]
pub fn lookup(class: HandClass, dealer_value: u8) -> Option<Action> {
    let column = usize::from(dealer_value.checked_sub(2)?);
    if column >= 10 {
        return None;
    }
    let row = match class {
        HandClass::Pair(rank) => PAIRS.get(pair_row(rank)),
        HandClass::Hard(total) => HARD.get(usize::from(total.checked_sub(5)?)),
        HandClass::Soft(total) => SOFT.get(usize::from(total.checked_sub(13)?)),
    }?;
    Some(row[column])
}

/// A chart key with no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupMiss {
    /// The key that was looked up.
    pub class: HandClass,
    /// The dealer upcard value.
    pub dealer_value: u8,
}

/// Result of resolving basic strategy for a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The basic strategy action.
    pub action: Action,
    /// The classification the action was taken from.
    pub class: HandClass,
    /// Set when the chart had no entry and the fallback rule was used.
    pub miss: Option<LookupMiss>,
}

/// Resolves the basic strategy action for `cards` against `upcard`.
///
/// Pairs are looked up first and fall back to their total. Hands over 21
/// resolve to [`Action::Bust`]; totals under 5 (a lone low card) resolve to
/// [`Action::Hit`]. When the chart has no entry, the hand stands on hard
/// 17 or soft 19 and above, otherwise hits, and the miss is reported.
#[must_use]
pub fn resolve(cards: &[Card], upcard: Card) -> Resolution {
    let dealer_value = upcard.value();
    let total_class = HandClass::of_total(cards);
    let total = hand::value(cards);

    if total > 21 {
        return Resolution {
            action: Action::Bust,
            class: total_class,
            miss: None,
        };
    }
    if total < 5 {
        return Resolution {
            action: Action::Hit,
            class: total_class,
            miss: None,
        };
    }

    let class = HandClass::of(cards);
    if let HandClass::Pair(_) = class {
        if let Some(action) = lookup(class, dealer_value) {
            return Resolution {
                action,
                class,
                miss: None,
            };
        }
    }

    if let Some(action) = lookup(total_class, dealer_value) {
        return Resolution {
            action,
            class: total_class,
            miss: None,
        };
    }

    fallback(total_class, dealer_value)
}

/// Action for a hand the chart has no entry for.
///
/// Stands on hard 17 or soft 19 and above, otherwise hits. Pairs are
/// played as their total. The miss is always reported.
#[must_use]
pub const fn fallback(class: HandClass, dealer_value: u8) -> Resolution {
    let (total, stand_on) = match class {
        HandClass::Hard(total) => (total, 17),
        HandClass::Soft(total) => (total, 19),
        HandClass::Pair(Rank::Ace) => (12, 19),
        HandClass::Pair(rank) => (rank.value() * 2, 17),
    };
    Resolution {
        action: if total >= stand_on {
            Action::Stand
        } else {
            Action::Hit
        },
        class,
        miss: Some(LookupMiss {
            class,
            dealer_value,
        }),
    }
}
