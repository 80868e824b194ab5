//! Damage calculation - turning a hit and a stat table into a number

use super::formulas::{avg_crit_multiplier, scaling_base, total_dmg_bonus};
use super::ReactionAmplifierTable;
use crate::config::{GameData, TargetConstants};
use crate::defense::TargetProfile;
use crate::error::CalcError;
use crate::source::{apply_stat_buffs, Buff, BuffStage, StageAdjustment};
use crate::stats::{StatKind, StatTable};
use crate::types::{Amplifier, BaseScaling, DamageType, Element};
use serde::{Deserialize, Serialize};

/// One ability hit: what it scales from and how it is classified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub element: Element,
    pub damage_type: DamageType,
    pub scaling: BaseScaling,
    #[serde(default)]
    pub amplifier: Amplifier,
    /// Number of identical hits; fractional values express an average
    #[serde(default = "default_instances")]
    pub instances: f64,
    /// Fraction of the scaling total (1.65 = 165%)
    pub motion_value: f64,
}

fn default_instances() -> f64 {
    1.0
}

impl Hit {
    pub fn new(element: Element, damage_type: DamageType, scaling: BaseScaling, motion_value: f64) -> Self {
        Hit {
            element,
            damage_type,
            scaling,
            amplifier: Amplifier::None,
            instances: 1.0,
            motion_value,
        }
    }

    pub fn with_amplifier(mut self, amplifier: Amplifier) -> Self {
        self.amplifier = amplifier;
        self
    }

    pub fn with_instances(mut self, instances: f64) -> Self {
        self.instances = instances;
        self
    }

    fn validate(&self) -> Result<(), CalcError> {
        for (what, value) in [("motion value", self.motion_value), ("instances", self.instances)] {
            if !value.is_finite() {
                return Err(CalcError::non_finite(what, value));
            }
            if value < 0.0 {
                return Err(CalcError::MalformedInput(format!("{} must not be negative, got {}", what, value)));
            }
        }
        Ok(())
    }
}

/// Every factor of a damage calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageBreakdown {
    pub scaling_base: f64,
    /// Motion value times scaling base, after base-damage buffs
    pub base_damage: f64,
    pub bonus_multiplier: f64,
    pub crit_multiplier: f64,
    pub amplifier_multiplier: f64,
    pub mitigation: f64,
    pub instances: f64,
    pub total: f64,
}

/// Evaluates hits against a configurable target
#[derive(Debug, Clone)]
pub struct DamageCalculator {
    target: TargetProfile,
    reactions: ReactionAmplifierTable,
    target_constants: TargetConstants,
}

impl Default for DamageCalculator {
    fn default() -> Self {
        DamageCalculator::new(&GameData::bundled())
    }
}

impl DamageCalculator {
    /// Calculator with an unmodeled target (mitigation 1.0)
    pub fn new(data: &GameData) -> Self {
        DamageCalculator {
            target: TargetProfile::Unmodeled,
            reactions: ReactionAmplifierTable::new(data.reaction.clone()),
            target_constants: data.target.clone(),
        }
    }

    pub fn with_target(mut self, target: TargetProfile) -> Self {
        self.target = target;
        self
    }

    pub fn target(&self) -> TargetProfile {
        self.target
    }

    pub fn reactions(&self) -> &ReactionAmplifierTable {
        &self.reactions
    }

    /// Final damage of `hit`
    pub fn calculate(&self, hit: &Hit, character: &StatTable, buffs: &[Buff]) -> Result<f64, CalcError> {
        Ok(self.breakdown(hit, character, buffs)?.total)
    }

    /// Final damage of `hit` with each factor kept
    pub fn breakdown(&self, hit: &Hit, character: &StatTable, buffs: &[Buff]) -> Result<DamageBreakdown, CalcError> {
        hit.validate()?;
        self.target.validate()?;
        for buff in buffs {
            buff.validate()?;
        }

        // Step 1: Stat-stage buffs on a private copy
        let stats = apply_stat_buffs(character, buffs)?;

        // Step 2: Base damage
        let scaling = scaling_base(&stats, hit.scaling);
        let base_damage =
            StageAdjustment::collect(buffs, BuffStage::BaseDamage).apply(hit.motion_value * scaling);

        // Step 3: Additive damage bonus
        let bonus_adjustment = StageAdjustment::collect(buffs, BuffStage::DamageBonus);
        let bonus = total_dmg_bonus(&stats, hit.element, hit.damage_type) + bonus_adjustment.added;
        let bonus_multiplier = ((1.0 + bonus) * bonus_adjustment.multiplier).max(0.0);

        // Step 4: Crit, reaction and target
        let crit_multiplier = avg_crit_multiplier(&stats);
        let amplifier_multiplier = self.reactions.multiplier(
            hit.amplifier,
            stats.get(StatKind::ElementalMastery),
            stats.get(StatKind::ReactionBonus),
        );
        let mitigation = self
            .target
            .mitigation(&stats, hit.element, &self.target_constants);

        // Step 5: Combine and apply final-stage buffs
        let raw = base_damage * bonus_multiplier * crit_multiplier * amplifier_multiplier * mitigation * hit.instances;
        let total = StageAdjustment::collect(buffs, BuffStage::Final).apply(raw);
        if !total.is_finite() {
            return Err(CalcError::non_finite("damage", total));
        }
        let total = total.max(0.0);

        tracing::trace!(
            element = %hit.element,
            damage_type = %hit.damage_type,
            total,
            "calculated hit"
        );

        Ok(DamageBreakdown {
            scaling_base: scaling,
            base_damage,
            bonus_multiplier,
            crit_multiplier,
            amplifier_multiplier,
            mitigation,
            instances: hit.instances,
            total,
        })
    }
}

/// Damage of one hit against an unmodeled target using the bundled game data
#[allow(clippy::too_many_arguments)]
pub fn calculate_damage(
    element: Element,
    damage_type: DamageType,
    scaling: BaseScaling,
    amplifier: Amplifier,
    instances: f64,
    motion_value: f64,
    character: &StatTable,
    buffs: Option<&[Buff]>,
) -> Result<f64, CalcError> {
    let hit = Hit {
        element,
        damage_type,
        scaling,
        amplifier,
        instances,
        motion_value,
    };
    DamageCalculator::default().calculate(&hit, character, buffs.unwrap_or(&[]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::BuffPresets;

    fn diluc() -> StatTable {
        StatTable::of(&[
            (StatKind::BaseAtk, 334.85),
            (StatKind::CritRate, 0.242),
            (StatKind::CritDmg, 0.5),
            (StatKind::EnergyRecharge, 1.0),
            (StatKind::BaseAtk, 510.0),
            (StatKind::ElementalMastery, 165.0),
            (StatKind::FlatHp, 4780.0),
            (StatKind::FlatAtk, 311.0),
            (StatKind::AtkPercent, 0.466),
            (StatKind::PyroDmgBonus, 0.466),
            (StatKind::CritRate, 0.311),
            (StatKind::AtkPercent, 0.0992),
            (StatKind::FlatAtk, 33.08),
            (StatKind::ElementalMastery, 39.64),
            (StatKind::CritRate, 0.0662),
            (StatKind::CritDmg, 0.1324),
            (StatKind::EnergyRecharge, 0.1102),
        ])
        .unwrap()
    }

    #[test]
    fn test_plain_hit_reduces_to_base_times_crit() {
        let stats = StatTable::of(&[
            (StatKind::BaseAtk, 1000.0),
            (StatKind::CritRate, 0.5),
            (StatKind::CritDmg, 1.0),
        ])
        .unwrap();
        let damage = calculate_damage(
            Element::Cryo,
            DamageType::Normal,
            BaseScaling::Atk,
            Amplifier::None,
            1.0,
            1.2,
            &stats,
            None,
        )
        .unwrap();
        assert!((damage - 1000.0 * 1.2 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_kqmc_skill_hit() {
        let calc = DamageCalculator::default().with_target(TargetProfile::kqmc());
        let hit = Hit::new(Element::Pyro, DamageType::Skill, BaseScaling::Atk, 1.0);
        let damage = calc.calculate(&hit, &diluc(), &[]).unwrap();
        assert!((damage - 1490.609).abs() < 0.1, "got {}", damage);
    }

    #[test]
    fn test_unmodeled_target_skips_mitigation() {
        let hit = Hit::new(Element::Pyro, DamageType::Skill, BaseScaling::Atk, 1.0);
        let unmitigated = DamageCalculator::default().calculate(&hit, &diluc(), &[]).unwrap();
        let kqmc = DamageCalculator::default()
            .with_target(TargetProfile::kqmc())
            .calculate(&hit, &diluc(), &[])
            .unwrap();
        assert!((kqmc / unmitigated - 190.0 / 390.0 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_instances_scale_linearly() {
        let calc = DamageCalculator::default();
        let hit = Hit::new(Element::Pyro, DamageType::Burst, BaseScaling::Atk, 2.04);
        let one = calc.calculate(&hit, &diluc(), &[]).unwrap();
        let three = calc.calculate(&hit.with_instances(3.0), &diluc(), &[]).unwrap();
        assert!((three - 3.0 * one).abs() < 1e-6);
    }

    #[test]
    fn test_forward_vaporize() {
        let stats = StatTable::of(&[(StatKind::BaseAtk, 1000.0)]).unwrap();
        let calc = DamageCalculator::default();
        let hit = Hit::new(Element::Hydro, DamageType::Skill, BaseScaling::Atk, 1.0);
        let plain = calc.calculate(&hit, &stats, &[]).unwrap();
        let vape = calc
            .calculate(&hit.with_amplifier(Amplifier::Forward), &stats, &[])
            .unwrap();
        assert!((vape - 2.0 * plain).abs() < 1e-9);
    }

    #[test]
    fn test_character_table_not_mutated() {
        let stats = diluc();
        let before = stats.clone();
        let buffs = vec![BuffPresets::noblesse_oblige(), BuffPresets::viridescent_venerer(Element::Pyro)];
        DamageCalculator::default()
            .with_target(TargetProfile::kqmc())
            .calculate(
                &Hit::new(Element::Pyro, DamageType::Normal, BaseScaling::Atk, 1.65),
                &stats,
                &buffs,
            )
            .unwrap();
        assert_eq!(stats, before);
    }

    #[test]
    fn test_buff_stages() {
        let stats = StatTable::of(&[(StatKind::BaseAtk, 1000.0)]).unwrap();
        let hit = Hit::new(Element::Geo, DamageType::Normal, BaseScaling::Atk, 1.0);
        let buffs = vec![
            Buff::new("flat")
                .with_modifier(BuffStage::BaseDamage, 500.0, false)
                .with_modifier(BuffStage::DamageBonus, 0.5, false),
            Buff::new("final").with_modifier(BuffStage::Final, 0.1, true),
        ];
        let breakdown = DamageCalculator::default().breakdown(&hit, &stats, &buffs).unwrap();
        assert!((breakdown.base_damage - 1500.0).abs() < 1e-9);
        assert!((breakdown.bonus_multiplier - 1.5).abs() < 1e-12);
        assert!((breakdown.total - 1500.0 * 1.5 * 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_hit_numbers() {
        let stats = diluc();
        let calc = DamageCalculator::default();
        let nan = Hit::new(Element::Pyro, DamageType::Skill, BaseScaling::Atk, f64::NAN);
        assert!(matches!(calc.calculate(&nan, &stats, &[]), Err(CalcError::MalformedInput(_))));
        let negative = Hit::new(Element::Pyro, DamageType::Skill, BaseScaling::Atk, 1.0).with_instances(-1.0);
        assert!(calc.calculate(&negative, &stats, &[]).is_err());
    }

    #[test]
    fn test_huge_negative_bonus_floors_at_zero() {
        let stats = StatTable::of(&[(StatKind::BaseAtk, 1000.0), (StatKind::DmgBonus, -3.0)]).unwrap();
        let hit = Hit::new(Element::Pyro, DamageType::Skill, BaseScaling::Atk, 1.0);
        assert_eq!(DamageCalculator::default().calculate(&hit, &stats, &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_nan_resistance_is_an_error() {
        let calc = DamageCalculator::default().with_target(TargetProfile::enemy(90, 100, f64::NAN));
        let hit = Hit::new(Element::Pyro, DamageType::Skill, BaseScaling::Atk, 1.0);
        assert!(matches!(
            calc.calculate(&hit, &diluc(), &[]),
            Err(CalcError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_overflow_times_zero_is_an_error() {
        let stats = StatTable::of(&[(StatKind::BaseAtk, 1e300), (StatKind::DmgBonus, -1.0)]).unwrap();
        let hit = Hit::new(Element::Pyro, DamageType::Skill, BaseScaling::Atk, 1e10).with_amplifier(Amplifier::Forward);
        assert!(matches!(
            DamageCalculator::default().calculate(&hit, &stats, &[]),
            Err(CalcError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_physical_takes_generic_elemental_bonus() {
        let stats = StatTable::of(&[(StatKind::BaseAtk, 1000.0), (StatKind::ElementalDmgBonus, 0.5)]).unwrap();
        let calc = DamageCalculator::default();
        for element in [Element::Physical, Element::Pyro] {
            let hit = Hit::new(element, DamageType::Normal, BaseScaling::Atk, 1.0);
            let damage = calc.calculate(&hit, &stats, &[]).unwrap();
            assert!((damage - 1500.0).abs() < 1e-9, "{} dealt {}", element, damage);
        }
    }
}
