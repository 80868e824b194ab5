//! Target mitigation - Defense and resistance multipliers
//!
//! Enemy-side numbers are not stats; they come from an explicit
//! [`TargetProfile`]. The default profile models no target at all and
//! leaves damage unmitigated.

mod level;
mod resistance;

pub use level::def_multiplier;
pub use resistance::{effective_resistance, res_multiplier, resistance_multiplier};

use crate::config::{GameData, TargetConstants};
use crate::error::CalcError;
use crate::stats::{StatKind, StatTable};
use crate::types::Element;
use serde::{Deserialize, Serialize};

/// The enemy a hit lands on
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetProfile {
    /// No defense or resistance; mitigation is exactly 1.0 and shred
    /// stats have no effect
    #[default]
    Unmodeled,
    Enemy {
        character_level: u32,
        enemy_level: u32,
        /// Resistance before shred, as a fraction
        base_resistance: f64,
    },
}

impl TargetProfile {
    pub fn enemy(character_level: u32, enemy_level: u32, base_resistance: f64) -> Self {
        TargetProfile::Enemy {
            character_level,
            enemy_level,
            base_resistance,
        }
    }

    /// Level 90 attacker against a level 100 target with 10% resistance
    pub fn kqmc() -> Self {
        Self::kqmc_from(&GameData::bundled().target)
    }

    pub fn kqmc_from(constants: &TargetConstants) -> Self {
        Self::enemy(
            constants.kqmc_character_level,
            constants.kqmc_enemy_level,
            constants.kqmc_enemy_resistance,
        )
    }

    /// Reject a non-finite base resistance
    pub fn validate(&self) -> Result<(), CalcError> {
        if let TargetProfile::Enemy { base_resistance, .. } = *self {
            if !base_resistance.is_finite() {
                return Err(CalcError::non_finite("base resistance", base_resistance));
            }
        }
        Ok(())
    }

    /// Combined defense and resistance multiplier for a hit of `element`,
    /// folding in the attacker's shred stats.
    pub fn mitigation(&self, stats: &StatTable, element: Element, constants: &TargetConstants) -> f64 {
        match *self {
            TargetProfile::Unmodeled => 1.0,
            TargetProfile::Enemy {
                character_level,
                enemy_level,
                base_resistance,
            } => {
                let def = def_multiplier(
                    character_level,
                    enemy_level,
                    stats.get(StatKind::DefReduction),
                    stats.get(StatKind::DefIgnore),
                    constants.def_reduction_cap,
                );
                let res = resistance_multiplier(
                    base_resistance,
                    stats.get(element.res_reduction_stat()),
                    constants.high_resistance_threshold,
                );
                def * res
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmodeled_ignores_shred() {
        let stats = StatTable::of(&[
            (StatKind::DefReduction, 0.5),
            (StatKind::PyroResReduction, 0.4),
        ])
        .unwrap();
        let constants = TargetConstants::default();
        assert_eq!(TargetProfile::default().mitigation(&stats, Element::Pyro, &constants), 1.0);
    }

    #[test]
    fn test_kqmc_mitigation() {
        let constants = TargetConstants::default();
        let mult = TargetProfile::kqmc().mitigation(&StatTable::new(), Element::Pyro, &constants);
        assert!((mult - 190.0 / 390.0 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_shred_only_counts_for_its_element() {
        let constants = TargetConstants::default();
        let stats = StatTable::of(&[(StatKind::HydroResReduction, 0.4)]).unwrap();
        let target = TargetProfile::kqmc();
        let pyro = target.mitigation(&stats, Element::Pyro, &constants);
        let hydro = target.mitigation(&stats, Element::Hydro, &constants);
        assert!(hydro > pyro);
        assert!((hydro / pyro - 1.15 / 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_profile_serde() {
        let json = serde_json::to_string(&TargetProfile::enemy(90, 100, 0.1)).unwrap();
        assert!(json.contains("\"kind\":\"enemy\""));
        let back: TargetProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TargetProfile::enemy(90, 100, 0.1));
    }

    #[test]
    fn test_validate_resistance() {
        assert!(TargetProfile::kqmc().validate().is_ok());
        assert!(TargetProfile::Unmodeled.validate().is_ok());
        assert!(matches!(
            TargetProfile::enemy(90, 100, f64::INFINITY).validate(),
            Err(CalcError::MalformedInput(_))
        ));
    }
}
