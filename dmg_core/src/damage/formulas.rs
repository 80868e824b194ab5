//! Derived totals: attack, HP, defense, crit and damage bonus

use crate::stats::{StatKind, StatTable};
use crate::types::{BaseScaling, DamageType, Element};

/// `base_atk * (1 + atk%) + flat_atk`
pub fn total_atk(stats: &StatTable) -> f64 {
    total(stats, StatKind::BaseAtk, StatKind::AtkPercent, StatKind::FlatAtk)
}

/// `base_hp * (1 + hp%) + flat_hp`
pub fn total_hp(stats: &StatTable) -> f64 {
    total(stats, StatKind::BaseHp, StatKind::HpPercent, StatKind::FlatHp)
}

/// `base_def * (1 + def%) + flat_def`
pub fn total_def(stats: &StatTable) -> f64 {
    total(stats, StatKind::BaseDef, StatKind::DefPercent, StatKind::FlatDef)
}

fn total(stats: &StatTable, base: StatKind, percent: StatKind, flat: StatKind) -> f64 {
    stats.get(base) * (1.0 + stats.get(percent)) + stats.get(flat)
}

/// The total a motion value multiplies
pub fn scaling_base(stats: &StatTable, scaling: BaseScaling) -> f64 {
    match scaling {
        BaseScaling::Atk => total_atk(stats),
        BaseScaling::Def => total_def(stats),
        BaseScaling::Hp => total_hp(stats),
    }
}

/// Expected crit multiplier of the table's crit stats
pub fn avg_crit_multiplier(stats: &StatTable) -> f64 {
    crit_multiplier(stats.get(StatKind::CritRate), stats.get(StatKind::CritDmg))
}

/// `1 + clamp(rate, 0, 1) * max(dmg, 0)`
pub fn crit_multiplier(crit_rate: f64, crit_dmg: f64) -> f64 {
    1.0 + crit_rate.clamp(0.0, 1.0) * crit_dmg.max(0.0)
}

/// Every damage bonus that applies to a hit, summed: the generic bonus,
/// the generic elemental bonus, the hit element's own bonus and the
/// damage type's bonus.
pub fn total_dmg_bonus(stats: &StatTable, element: Element, damage_type: DamageType) -> f64 {
    stats.get(StatKind::DmgBonus)
        + stats.get(StatKind::ElementalDmgBonus)
        + stats.get(element.dmg_bonus_stat())
        + stats.get(damage_type.dmg_bonus_stat())
}
