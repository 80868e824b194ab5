//! Prelude module for convenient imports
//!
//! ```rust
//! use dmg_core::prelude::*;
//! ```

// Core types
pub use crate::stats::{StatKind, StatTable};
pub use crate::types::{Amplifier, ArtifactSlot, BaseScaling, DamageType, Element, Rarity};
pub use crate::error::CalcError;

// Artifacts
pub use crate::artifact::{ArtifactBuilder, ArtifactPiece, RollQuality, RollQualityTable};

// Damage
pub use crate::damage::{avg_crit_multiplier, calculate_damage, total_atk, total_def, total_hp};
pub use crate::damage::{DamageCalculator, Hit, ReactionAmplifierTable};
pub use crate::defense::TargetProfile;

// Sources
pub use crate::source::{combine, BaseStatsSource, Buff, BuffPresets, BuffStage, StatSource};

// Config
pub use crate::config::GameData;
