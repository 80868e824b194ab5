//! Error types for stat, artifact and damage operations

use crate::stats::StatKind;
use crate::types::{ArtifactSlot, Rarity};
use thiserror::Error;

/// Failure of a parsing, building or calculation step
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid {kind} value: {value:?}")]
    InvalidEnumValue { kind: &'static str, value: String },
    #[error("Roll budget exceeded: requested {requested} rolls with {current}/{max} already used")]
    RollBudgetExceeded {
        requested: u32,
        current: u32,
        max: u32,
    },
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("{0} cannot roll as a substat")]
    InvalidSubstat(StatKind),
    #[error("{stat} is not a valid {slot} main stat")]
    InvalidMainStat { slot: ArtifactSlot, stat: StatKind },
    #[error("Level {level} is out of range for a {rarity} artifact")]
    InvalidLevel { rarity: Rarity, level: u32 },
    #[error("Artifact slot {0} appears more than once")]
    DuplicateSlot(ArtifactSlot),
    #[error("Cannot remove {requested} rolls of {stat}: only {available} recorded")]
    NotRolled {
        stat: StatKind,
        requested: u32,
        available: u32,
    },
    #[error("Game data rejected: {0}")]
    InvalidGameData(String),
}

impl CalcError {
    pub(crate) fn non_finite(what: &str, value: f64) -> Self {
        CalcError::MalformedInput(format!("{} must be finite, got {}", what, value))
    }
}
