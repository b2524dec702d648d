//! Exact bust probability for one more draw.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::hand;
use crate::shoe::ShoeLedger;

/// Probability that drawing one card from `shoe` busts `cards`.
///
/// Every distinct identifier left in the shoe is appended to the hand once;
/// the copies of those that push the total past 21 are summed and divided
/// by the cards remaining. A hand already over 21 returns 1, a hand of
/// exactly 21 returns 0, and so does an empty shoe.
#[must_use]
pub fn bust_probability(shoe: &dyn ShoeLedger, cards: &[Card]) -> f64 {
    let total = hand::value(cards);
    if total > 21 {
        return 1.0;
    }
    if total == 21 {
        return 0.0;
    }

    let composition = shoe.composition();
    let remaining: u32 = composition.iter().map(|&(_, count)| u32::from(count)).sum();
    if remaining == 0 {
        return 0.0;
    }

    let mut drawn: Vec<Card> = Vec::with_capacity(cards.len() + 1);
    drawn.extend_from_slice(cards);

    let mut bust_cards: u32 = 0;
    for (card, count) in composition {
        drawn.truncate(cards.len());
        drawn.push(card);
        if hand::value(&drawn) > 21 {
            bust_cards += u32::from(count);
        }
    }

    f64::from(bust_cards) / f64::from(remaining)
}
