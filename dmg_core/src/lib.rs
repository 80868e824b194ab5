//! dmg_core - Stat aggregation and damage formulas for Genshin-style characters
//!
//! This library provides:
//! - StatTable: Additive accumulator over every stat kind
//! - ArtifactBuilder: Main stat assignment and budgeted substat rolling
//! - DamageCalculator: Crit, bonus, reaction and target mitigation math
//! - GameData: Versioned numeric tables loaded from TOML
//! - Energy and optimizer helpers built on the above

pub mod artifact;
pub mod config;
pub mod damage;
pub mod defense;
pub mod energy;
pub mod error;
pub mod optimize;
pub mod prelude;
pub mod source;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use artifact::{ArtifactBuilder, ArtifactPiece, RollQuality, RollQualityTable};
pub use config::{ConfigError, GameData};
pub use damage::{
    avg_crit_multiplier, calculate_damage, total_atk, total_def, total_hp, DamageBreakdown,
    DamageCalculator, Hit, ReactionAmplifierTable,
};
pub use defense::TargetProfile;
pub use energy::{EnergyCalculator, EnergyIntake, ParticleCounts};
pub use error::CalcError;
pub use source::{BaseStatsSource, Buff, BuffPresets, BuffStage, StatSource};
pub use stats::{StatKind, StatTable};
pub use types::{Amplifier, ArtifactSlot, BaseScaling, DamageType, Element, Rarity};
