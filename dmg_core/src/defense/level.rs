//! Level-based defense multiplier
//!
//! Formula:
//! damage_mult = (cl + 100) / ((cl + 100) + (el + 100) * (1 - reduction) * (1 - ignore))
//!
//! where `reduction` is capped (0.9 in game) and `ignore` is clamped to [0, 1].

/// Calculate the defense multiplier
///
/// # Arguments
/// * `character_level` - Attacker level
/// * `enemy_level` - Target level
/// * `def_reduction` - Fraction of target defense removed; negative values raise it
/// * `def_ignore` - Fraction of target defense ignored
/// * `reduction_cap` - Upper bound applied to `def_reduction`
///
/// # Returns
/// A multiplier in `(0, 1]`
pub fn def_multiplier(
    character_level: u32,
    enemy_level: u32,
    def_reduction: f64,
    def_ignore: f64,
    reduction_cap: f64,
) -> f64 {
    let attacker = character_level as f64 + 100.0;
    let target = enemy_level as f64 + 100.0;
    let reduction = def_reduction.min(reduction_cap);
    let ignore = def_ignore.clamp(0.0, 1.0);

    let effective_def = (target * (1.0 - reduction) * (1.0 - ignore)).max(0.0);
    attacker / (attacker + effective_def)
}
