//! Game data loading from TOML files
//!
//! All game-specific numbers (roll tiers, artifact stat values, roll
//! budgets, reaction and target constants) live in a versioned
//! [`GameData`] table. A copy ships with the crate and is parsed once on
//! first use; callers can load their own with [`GameData::load`].

mod artifacts;
mod constants;

pub use artifacts::{MainStatRow, RarityData, RollTier, RollTiers, StatEntry};
pub use constants::{EnergyConstants, ReactionConstants, TargetConstants};

use crate::stats::StatKind;
use crate::types::{ArtifactSlot, Rarity};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

const BUNDLED_GAME_DATA: &str = include_str!("../../config/game_data.toml");

static BUNDLED: OnceLock<Arc<GameData>> = OnceLock::new();

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Versioned game data table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    /// Game version the numbers were taken from
    pub version: String,
    #[serde(default)]
    pub reaction: ReactionConstants,
    #[serde(default)]
    pub target: TargetConstants,
    #[serde(default)]
    pub energy: EnergyConstants,
    pub five_star: RarityData,
    pub four_star: RarityData,
}

impl Default for GameData {
    fn default() -> Self {
        GameData {
            version: "builtin".to_string(),
            reaction: ReactionConstants::default(),
            target: TargetConstants::default(),
            energy: EnergyConstants::default(),
            five_star: RarityData::five_star(),
            four_star: RarityData::four_star(),
        }
    }
}

impl GameData {
    /// The table shipped with the crate
    pub fn bundled() -> Arc<GameData> {
        BUNDLED
            .get_or_init(|| {
                let data = GameData::parse(BUNDLED_GAME_DATA).unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "bundled game data rejected, using built-in defaults");
                    GameData::default()
                });
                Arc::new(data)
            })
            .clone()
    }

    /// Parse and validate a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let data: GameData = parse_toml(content)?;
        data.validate()?;
        tracing::debug!(version = %data.version, "loaded game data");
        Ok(data)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data: GameData = load_toml(path)?;
        data.validate()?;
        tracing::debug!(version = %data.version, path = %path.display(), "loaded game data");
        Ok(data)
    }

    pub fn rarity(&self, rarity: Rarity) -> &RarityData {
        match rarity {
            Rarity::FourStar => &self.four_star,
            Rarity::FiveStar => &self.five_star,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for rarity in Rarity::all() {
            validate_rarity(*rarity, self.rarity(*rarity))?;
        }

        let r = &self.reaction;
        for (name, value) in [
            ("forward_multiplier", r.forward_multiplier),
            ("reverse_multiplier", r.reverse_multiplier),
            ("em_scaling", r.em_scaling),
            ("em_offset", r.em_offset),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("reaction.{} must be positive, got {}", name, value)));
            }
        }

        let t = &self.target;
        if !(0.0..1.0).contains(&t.def_reduction_cap) {
            return Err(invalid(format!(
                "target.def_reduction_cap must be in [0, 1), got {}",
                t.def_reduction_cap
            )));
        }
        if !t.kqmc_enemy_resistance.is_finite() || !t.high_resistance_threshold.is_finite() {
            return Err(invalid("target resistances must be finite".to_string()));
        }

        let e = &self.energy;
        let particle_values = [e.same_element, e.neutral, e.different_element, e.orb_multiplier];
        if particle_values.iter().chain(e.off_field_multipliers.iter()).any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid("energy constants must be finite and non-negative".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}

fn validate_rarity(rarity: Rarity, data: &RarityData) -> Result<(), ConfigError> {
    let mut previous = 0.0;
    for (quality, tier) in data.roll_tiers.iter() {
        if !tier.ratio.is_finite() || tier.ratio <= previous {
            return Err(invalid(format!(
                "{} {} roll ratio {} must be finite and above the tier below it",
                rarity, quality, tier.ratio
            )));
        }
        if !tier.weight.is_finite() || tier.weight <= 0.0 {
            return Err(invalid(format!("{} {} roll weight must be positive", rarity, quality)));
        }
        previous = tier.ratio;
    }

    for entry in &data.substats {
        if !entry.stat.is_substat() {
            return Err(invalid(format!("{} is listed as a {} substat", entry.stat, rarity)));
        }
    }
    for stat in StatKind::substats() {
        match data.substat_value(*stat) {
            Some(v) if v.is_finite() && v > 0.0 => {}
            _ => return Err(invalid(format!("missing {} substat value for {}", rarity, stat))),
        }
    }

    let levels = rarity.max_level() as usize + 1;
    for slot in ArtifactSlot::all() {
        for stat in slot.main_stat_pool() {
            let values = data.main_stat_values(*stat).ok_or_else(|| {
                invalid(format!("missing {} main stat values for {} ({})", rarity, stat, slot))
            })?;
            if values.len() != levels {
                return Err(invalid(format!(
                    "{} main stat {} needs {} levels, got {}",
                    rarity,
                    stat,
                    levels,
                    values.len()
                )));
            }
            if values.iter().any(|v| !v.is_finite() || *v <= 0.0) || values.windows(2).any(|w| w[1] < w[0]) {
                return Err(invalid(format!(
                    "{} main stat {} must be positive and non-decreasing by level",
                    rarity, stat
                )));
            }
        }
    }

    Ok(())
}
