//! Resistance - Elemental resistance multiplier with shred
//!
//! Resistance is a fraction (0.1 = 10%). Shred subtracts from it directly
//! and can push it negative.
//!
//! Formula, for effective resistance `r`:
//! - r < 0: multiplier = 1 - r / 2 (negative resistance is half as effective)
//! - 0 <= r < threshold: multiplier = 1 - r
//! - r >= threshold: multiplier = 1 / (4r + 1)

/// Resistance left after shred
pub fn effective_resistance(base_resistance: f64, reduction: f64) -> f64 {
    base_resistance - reduction
}

/// Damage multiplier for an effective resistance
///
/// # Arguments
/// * `resistance` - Effective resistance after shred
/// * `high_threshold` - Resistance where the reciprocal branch starts (0.75 in game)
///
/// # Returns
/// A multiplier in `(0, inf)`; 1.0 at zero resistance
pub fn res_multiplier(resistance: f64, high_threshold: f64) -> f64 {
    if resistance < 0.0 {
        1.0 - resistance / 2.0
    } else if resistance < high_threshold {
        1.0 - resistance
    } else {
        1.0 / (4.0 * resistance + 1.0)
    }
}

/// Resistance multiplier from base resistance and shred in one step
pub fn resistance_multiplier(base_resistance: f64, reduction: f64, high_threshold: f64) -> f64 {
    res_multiplier(effective_resistance(base_resistance, reduction), high_threshold)
}
