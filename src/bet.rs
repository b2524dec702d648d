//! Bet sizing from the true count.

#[cfg(feature = "std")]
fn floor(value: f64) -> f64 {
    value.floor()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn floor(value: f64) -> f64 {
    libm::floor(value)
}

/// Recommended bet in betting units for a true count.
///
/// Below +2 the bet is one unit; from +2 up it is the floored true count.
/// Never less than one unit.
///
/// # Example
///
/// ```
/// use bjcount::bet::recommend_units;
///
/// assert_eq!(recommend_units(0.0), 1);
/// assert_eq!(recommend_units(1.99), 1);
/// assert_eq!(recommend_units(3.7), 3);
/// ```
#[must_use]
pub fn recommend_units(true_count: f64) -> u32 {
    if true_count < 2.0 {
        return 1;
    }
    (floor(true_count) as u32).max(1)
}

/// Recommended bet amount: units for `true_count` times `base_unit`.
#[must_use]
pub fn recommend_bet(true_count: f64, base_unit: u32) -> u32 {
    recommend_units(true_count).saturating_mul(base_unit)
}
