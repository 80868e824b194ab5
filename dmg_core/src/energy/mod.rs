//! Energy - Particle and orb accounting for burst uptime
//!
//! Energy from a particle depends on whether its element matches the
//! catcher, whether the catcher is on field, and party size. Everything
//! except flat energy scales with energy recharge.

use crate::config::{EnergyConstants, GameData};
use crate::error::CalcError;
use crate::stats::{StatKind, StatTable};
use serde::{Deserialize, Serialize};

/// Counts of particles (or orbs) by element relation to the catcher
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleCounts {
    #[serde(default)]
    pub same: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub different: f64,
}

impl ParticleCounts {
    pub fn new(same: f64, neutral: f64, different: f64) -> Self {
        ParticleCounts {
            same,
            neutral,
            different,
        }
    }

    fn energy(&self, constants: &EnergyConstants) -> f64 {
        self.same * constants.same_element
            + self.neutral * constants.neutral
            + self.different * constants.different_element
    }

    fn validate(&self) -> Result<(), CalcError> {
        for value in [self.same, self.neutral, self.different] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::MalformedInput(format!(
                    "particle counts must be finite and non-negative, got {}",
                    value
                )));
            }
        }
        Ok(())
    }
}

/// Everything a character catches over one rotation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyIntake {
    #[serde(default)]
    pub on_field_particles: ParticleCounts,
    #[serde(default)]
    pub off_field_particles: ParticleCounts,
    #[serde(default)]
    pub on_field_orbs: ParticleCounts,
    #[serde(default)]
    pub off_field_orbs: ParticleCounts,
    /// Energy restored directly, unaffected by energy recharge
    #[serde(default)]
    pub flat_energy: f64,
}

impl EnergyIntake {
    fn validate(&self) -> Result<(), CalcError> {
        self.on_field_particles.validate()?;
        self.off_field_particles.validate()?;
        self.on_field_orbs.validate()?;
        self.off_field_orbs.validate()?;
        if !self.flat_energy.is_finite() {
            return Err(CalcError::non_finite("flat energy", self.flat_energy));
        }
        Ok(())
    }
}

/// Energy accounting against a set of constants
#[derive(Debug, Clone)]
pub struct EnergyCalculator {
    constants: EnergyConstants,
}

impl Default for EnergyCalculator {
    fn default() -> Self {
        EnergyCalculator::new(GameData::bundled().energy.clone())
    }
}

impl EnergyCalculator {
    pub fn new(constants: EnergyConstants) -> Self {
        EnergyCalculator { constants }
    }

    /// Off-field catch multiplier for a party of `party_size` (1..=4)
    pub fn off_field_multiplier(&self, party_size: u32) -> Result<f64, CalcError> {
        match party_size {
            1..=4 => Ok(self.constants.off_field_multipliers[party_size as usize - 1]),
            _ => Err(CalcError::MalformedInput(format!(
                "party size must be between 1 and 4, got {}",
                party_size
            ))),
        }
    }

    /// Energy before energy recharge and flat energy
    pub fn raw_energy(&self, party_size: u32, intake: &EnergyIntake) -> Result<f64, CalcError> {
        intake.validate()?;
        let off_field = self.off_field_multiplier(party_size)?;
        let c = &self.constants;

        let particles = intake.on_field_particles.energy(c) + intake.off_field_particles.energy(c) * off_field;
        let orbs = (intake.on_field_orbs.energy(c) + intake.off_field_orbs.energy(c) * off_field)
            * c.orb_multiplier;
        Ok(particles + orbs)
    }

    /// Total energy gained, where `energy_recharge` is the full multiplier (1.0 = 100%)
    pub fn energy_gained(
        &self,
        party_size: u32,
        energy_recharge: f64,
        intake: &EnergyIntake,
    ) -> Result<f64, CalcError> {
        if !energy_recharge.is_finite() {
            return Err(CalcError::non_finite("energy recharge", energy_recharge));
        }
        Ok(self.raw_energy(party_size, intake)? * energy_recharge.max(0.0) + intake.flat_energy)
    }

    /// Energy recharge needed to fill `burst_cost` from `intake`; never below 1.0
    pub fn energy_recharge_requirement(
        &self,
        party_size: u32,
        burst_cost: f64,
        intake: &EnergyIntake,
    ) -> Result<f64, CalcError> {
        if !burst_cost.is_finite() || burst_cost < 0.0 {
            return Err(CalcError::MalformedInput(format!("invalid burst cost {}", burst_cost)));
        }
        let remaining = burst_cost - intake.flat_energy;
        if remaining <= 0.0 {
            return Ok(1.0);
        }
        let raw = self.raw_energy(party_size, intake)?;
        if raw <= 0.0 {
            return Err(CalcError::MalformedInput(
                "no particle energy to recharge from".to_string(),
            ));
        }
        Ok((remaining / raw).max(1.0))
    }
}

/// Total energy recharge of a stat table. Character sources carry the
/// base 100%, so this reads the stat as is.
pub fn energy_recharge(stats: &StatTable) -> f64 {
    stats.get(StatKind::EnergyRecharge)
}
