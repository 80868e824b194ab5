//! BaseStatsSource - Fixed stat blocks for characters and weapons

use crate::error::CalcError;
use crate::source::StatSource;
use crate::stats::{StatKind, StatTable};

/// Crit rate every character starts with
pub const BASE_CRIT_RATE: f64 = 0.05;
/// Crit damage every character starts with
pub const BASE_CRIT_DMG: f64 = 0.5;
/// Energy recharge every character starts with (100%)
pub const BASE_ENERGY_RECHARGE: f64 = 1.0;

/// A named, already-resolved stat block
#[derive(Debug, Clone)]
pub struct BaseStatsSource {
    id: String,
    priority: i32,
    stats: StatTable,
}

impl BaseStatsSource {
    pub fn new(id: impl Into<String>, priority: i32, stats: StatTable) -> Self {
        BaseStatsSource {
            id: id.into(),
            priority,
            stats,
        }
    }

    /// Character base stats plus the intrinsic crit and energy recharge
    pub fn character(name: &str, base_hp: f64, base_atk: f64, base_def: f64) -> Result<Self, CalcError> {
        let stats = StatTable::of(&[
            (StatKind::BaseHp, base_hp),
            (StatKind::BaseAtk, base_atk),
            (StatKind::BaseDef, base_def),
            (StatKind::CritRate, BASE_CRIT_RATE),
            (StatKind::CritDmg, BASE_CRIT_DMG),
            (StatKind::EnergyRecharge, BASE_ENERGY_RECHARGE),
        ])?;
        Ok(Self::new(name, -100, stats))
    }

    /// Weapon base ATK and its secondary stat
    pub fn weapon(name: &str, base_atk: f64, secondary: Option<(StatKind, f64)>) -> Result<Self, CalcError> {
        let mut stats = StatTable::of(&[(StatKind::BaseAtk, base_atk)])?;
        if let Some((stat, value)) = secondary {
            stats.add(stat, value)?;
        }
        Ok(Self::new(name, -50, stats))
    }

    /// Add an extra stat, such as an ascension bonus or passive
    pub fn with_stat(mut self, stat: StatKind, value: f64) -> Result<Self, CalcError> {
        self.stats.add(stat, value)?;
        Ok(self)
    }

    pub fn stats(&self) -> &StatTable {
        &self.stats
    }
}

impl StatSource for BaseStatsSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn apply(&self, stats: &mut StatTable) -> Result<(), CalcError> {
        stats.add_table(&self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_intrinsics() {
        let diluc = BaseStatsSource::character("diluc", 12981.0, 334.85, 783.0).unwrap();
        let mut acc = StatTable::new();
        diluc.apply(&mut acc).unwrap();
        assert_eq!(acc.get(StatKind::BaseAtk), 334.85);
        assert_eq!(acc.get(StatKind::CritRate), BASE_CRIT_RATE);
        assert_eq!(acc.get(StatKind::CritDmg), BASE_CRIT_DMG);
        assert_eq!(acc.get(StatKind::EnergyRecharge), 1.0);
        assert_eq!(diluc.id(), "diluc");
    }

    #[test]
    fn test_weapon_secondary() {
        let weapon = BaseStatsSource::weapon("rainslasher", 510.0, Some((StatKind::ElementalMastery, 165.0))).unwrap();
        assert_eq!(weapon.stats().get(StatKind::ElementalMastery), 165.0);
        assert!(weapon.priority() > -100);
    }

    #[test]
    fn test_rejects_nan_stat() {
        assert!(BaseStatsSource::weapon("broken", f64::NAN, None).is_err());
    }
}
