//! Optimizer helpers - Marginal value of substat rolls
//!
//! Both helpers take an objective `Fn(&StatTable) -> f64` (usually a
//! damage calculation) and work only on caller-owned tables and builders.

use crate::artifact::{ArtifactBuilder, RollQuality, RollQualityTable};
use crate::error::CalcError;
use crate::stats::{StatKind, StatTable};
use crate::types::Rarity;
use std::collections::BTreeMap;

/// Gain in `objective` from one AVG roll of each substat, best first
pub fn substat_gradients<F>(
    base: &StatTable,
    rarity: Rarity,
    table: &RollQualityTable,
    objective: F,
) -> Result<Vec<(StatKind, f64)>, CalcError>
where
    F: Fn(&StatTable) -> f64,
{
    let baseline = objective(base);
    let mut gradients = Vec::with_capacity(StatKind::substats().len());
    for stat in StatKind::substats() {
        let value = table
            .roll_value(*stat, RollQuality::Avg, rarity)
            .ok_or(CalcError::InvalidSubstat(*stat))?;
        let mut nudged = base.clone();
        nudged.add(*stat, value)?;
        gradients.push((*stat, objective(&nudged) - baseline));
    }
    gradients.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(gradients)
}

/// Spend the builder's remaining rolls one AVG roll at a time on whichever
/// substat raises `objective` the most, respecting each substat's limit.
///
/// `base` holds everything that is not artifacts (character, weapon,
/// buffs already folded in). Returns how many rolls each stat received.
pub fn greedy_fill<F>(
    builder: &mut ArtifactBuilder,
    base: &StatTable,
    rarity: Rarity,
    objective: F,
) -> Result<BTreeMap<StatKind, u32>, CalcError>
where
    F: Fn(&StatTable) -> f64,
{
    let table = builder.roll_table().clone();
    let mut spent = BTreeMap::new();

    while builder.rolls_left() > 0 {
        let current = base.merged_with(&builder.build())?;
        let best = substat_gradients(&current, rarity, &table, &objective)?
            .into_iter()
            .find(|(stat, _)| builder.rolls_for(*stat) < builder.substat_limit(*stat));

        let Some((stat, gain)) = best else {
            tracing::debug!(left = builder.rolls_left(), "every substat at its limit");
            break;
        };
        builder.roll(stat, RollQuality::Avg, rarity, 1)?;
        *spent.entry(stat).or_insert(0) += 1;
        tracing::trace!(stat = %stat, gain, "greedy roll");
    }

    Ok(spent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{DamageCalculator, Hit};
    use crate::types::{BaseScaling, DamageType, Element};

    fn base_stats() -> StatTable {
        StatTable::of(&[
            (StatKind::BaseAtk, 844.85),
            (StatKind::CritRate, 0.05),
            (StatKind::CritDmg, 0.5),
            (StatKind::EnergyRecharge, 1.0),
        ])
        .unwrap()
    }

    fn skill_damage(stats: &StatTable) -> f64 {
        let hit = Hit::new(Element::Pyro, DamageType::Skill, BaseScaling::Atk, 1.0);
        DamageCalculator::default().calculate(&hit, stats, &[]).unwrap_or(0.0)
    }

    #[test]
    fn test_gradients_sorted_and_useless_stats_zero() {
        let gradients =
            substat_gradients(&base_stats(), Rarity::FiveStar, &RollQualityTable::default(), skill_damage)
                .unwrap();
        assert_eq!(gradients.len(), 10);
        for pair in gradients.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        let hp = gradients.iter().find(|(s, _)| *s == StatKind::FlatHp).unwrap();
        assert_eq!(hp.1, 0.0);
        assert!(gradients[0].1 > 0.0);
    }

    #[test]
    fn test_greedy_fill_respects_budget_and_limits() {
        let mut builder =
            ArtifactBuilder::preset(StatKind::AtkPercent, StatKind::PyroDmgBonus, StatKind::CritRate).unwrap();
        builder.apply_fixed_substats().unwrap();

        let spent = greedy_fill(&mut builder, &base_stats(), Rarity::FiveStar, skill_damage).unwrap();

        assert_eq!(builder.current_rolls(), builder.max_rolls());
        assert_eq!(spent.values().sum::<u32>(), 20);
        for stat in StatKind::substats() {
            assert!(builder.rolls_for(*stat) <= builder.substat_limit(*stat));
        }
        assert_eq!(spent.get(&StatKind::FlatHp), None);
    }
}
