//! Reaction, target and energy constants

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionConstants {
    /// Base multiplier of a forward amplifying reaction (2.0 = double damage)
    #[serde(default = "default_forward_multiplier")]
    pub forward_multiplier: f64,
    #[serde(default = "default_reverse_multiplier")]
    pub reverse_multiplier: f64,
    /// Asymptotic EM bonus: bonus = scaling * em / (em + offset)
    #[serde(default = "default_em_scaling")]
    pub em_scaling: f64,
    #[serde(default = "default_em_offset")]
    pub em_offset: f64,
}

impl Default for ReactionConstants {
    fn default() -> Self {
        ReactionConstants {
            forward_multiplier: default_forward_multiplier(),
            reverse_multiplier: default_reverse_multiplier(),
            em_scaling: default_em_scaling(),
            em_offset: default_em_offset(),
        }
    }
}

fn default_forward_multiplier() -> f64 {
    2.0
}
fn default_reverse_multiplier() -> f64 {
    1.5
}
fn default_em_scaling() -> f64 {
    2.78
}
fn default_em_offset() -> f64 {
    1400.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetConstants {
    /// Defense reduction stops counting past this fraction
    #[serde(default = "default_def_reduction_cap")]
    pub def_reduction_cap: f64,
    /// Resistance at or above this uses the 1 / (4r + 1) branch
    #[serde(default = "default_high_resistance_threshold")]
    pub high_resistance_threshold: f64,
    /// Standard benchmark target
    #[serde(default = "default_kqmc_character_level")]
    pub kqmc_character_level: u32,
    #[serde(default = "default_kqmc_enemy_level")]
    pub kqmc_enemy_level: u32,
    #[serde(default = "default_kqmc_enemy_resistance")]
    pub kqmc_enemy_resistance: f64,
}

impl Default for TargetConstants {
    fn default() -> Self {
        TargetConstants {
            def_reduction_cap: default_def_reduction_cap(),
            high_resistance_threshold: default_high_resistance_threshold(),
            kqmc_character_level: default_kqmc_character_level(),
            kqmc_enemy_level: default_kqmc_enemy_level(),
            kqmc_enemy_resistance: default_kqmc_enemy_resistance(),
        }
    }
}

fn default_def_reduction_cap() -> f64 {
    0.9
}
fn default_high_resistance_threshold() -> f64 {
    0.75
}
fn default_kqmc_character_level() -> u32 {
    90
}
fn default_kqmc_enemy_level() -> u32 {
    100
}
fn default_kqmc_enemy_resistance() -> f64 {
    0.1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyConstants {
    /// Flat energy of one particle matching the catcher's element
    #[serde(default = "default_same_element")]
    pub same_element: f64,
    /// Colorless particle
    #[serde(default = "default_neutral")]
    pub neutral: f64,
    #[serde(default = "default_different_element")]
    pub different_element: f64,
    /// An orb is worth this many particles
    #[serde(default = "default_orb_multiplier")]
    pub orb_multiplier: f64,
    /// Off-field catch multiplier indexed by party size - 1
    #[serde(default = "default_off_field")]
    pub off_field_multipliers: [f64; 4],
}

impl Default for EnergyConstants {
    fn default() -> Self {
        EnergyConstants {
            same_element: default_same_element(),
            neutral: default_neutral(),
            different_element: default_different_element(),
            orb_multiplier: default_orb_multiplier(),
            off_field_multipliers: default_off_field(),
        }
    }
}

fn default_same_element() -> f64 {
    3.0
}
fn default_neutral() -> f64 {
    2.0
}
fn default_different_element() -> f64 {
    1.0
}
fn default_orb_multiplier() -> f64 {
    6.0
}
fn default_off_field() -> [f64; 4] {
    [0.0, 0.8, 0.7, 0.6]
}
