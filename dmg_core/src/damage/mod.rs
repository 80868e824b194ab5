//! Damage system - Totals, reaction amplification and the hit formula

mod calculation;
mod formulas;
mod reaction;

pub use calculation::{calculate_damage, DamageBreakdown, DamageCalculator, Hit};
pub use formulas::{
    avg_crit_multiplier, crit_multiplier, scaling_base, total_atk, total_def, total_dmg_bonus, total_hp,
};
pub use reaction::ReactionAmplifierTable;
