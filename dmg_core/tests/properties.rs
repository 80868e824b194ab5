//! Algebraic properties of tables, crit, reactions and the roll budget

use dmg_core::prelude::*;
use proptest::prelude::*;

fn stat_kind() -> impl Strategy<Value = StatKind> {
    prop::sample::select(StatKind::all().to_vec())
}

fn substat() -> impl Strategy<Value = StatKind> {
    prop::sample::select(StatKind::substats().to_vec())
}

fn quality() -> impl Strategy<Value = RollQuality> {
    prop::sample::select(RollQuality::all().to_vec())
}

fn stat_table() -> impl Strategy<Value = StatTable> {
    prop::collection::vec((stat_kind(), -1000.0..1000.0f64), 0..12)
        .prop_map(|pairs| StatTable::of(&pairs).unwrap())
}

fn close(a: &StatTable, b: &StatTable) -> bool {
    StatKind::all()
        .iter()
        .all(|s| (a.get(*s) - b.get(*s)).abs() < 1e-9)
}

proptest! {
    #[test]
    fn merge_is_associative(a in stat_table(), b in stat_table(), c in stat_table()) {
        let mut left = a.clone();
        left.add_table(&b).unwrap();
        left.add_table(&c).unwrap();

        let mut right = a.clone();
        right.add_table(&b.merged_with(&c).unwrap()).unwrap();

        prop_assert!(close(&left, &right));
    }

    #[test]
    fn merge_is_commutative(a in stat_table(), b in stat_table()) {
        prop_assert!(close(&a.merged_with(&b).unwrap(), &b.merged_with(&a).unwrap()));
    }

    #[test]
    fn untouched_stats_read_zero(pairs in prop::collection::vec((stat_kind(), -10.0..10.0f64), 0..8)) {
        let table = StatTable::of(&pairs).unwrap();
        for stat in StatKind::all() {
            if !pairs.iter().any(|(s, _)| s == stat) {
                prop_assert_eq!(table.get(*stat), 0.0);
            }
        }
    }

    #[test]
    fn crit_is_monotone_and_clamped(rate in -1.0..3.0f64, dmg in -1.0..5.0f64, step in 0.0..1.0f64) {
        let base = StatTable::of(&[(StatKind::CritRate, rate), (StatKind::CritDmg, dmg)]).unwrap();
        let more_rate = StatTable::of(&[(StatKind::CritRate, rate + step), (StatKind::CritDmg, dmg)]).unwrap();
        let more_dmg = StatTable::of(&[(StatKind::CritRate, rate), (StatKind::CritDmg, dmg + step)]).unwrap();

        prop_assert!(avg_crit_multiplier(&more_rate) >= avg_crit_multiplier(&base));
        prop_assert!(avg_crit_multiplier(&more_dmg) >= avg_crit_multiplier(&base));

        if rate >= 1.0 {
            let capped = StatTable::of(&[(StatKind::CritRate, 1.0), (StatKind::CritDmg, dmg)]).unwrap();
            prop_assert_eq!(avg_crit_multiplier(&base), avg_crit_multiplier(&capped));
        }
    }

    #[test]
    fn amplifier_rises_with_em(em in 0.0..5000.0f64, extra in 1.0..1000.0f64, bonus in 0.0..1.0f64) {
        let table = ReactionAmplifierTable::default();
        for amplifier in [Amplifier::Forward, Amplifier::Reverse] {
            let low = table.multiplier(amplifier, em, bonus);
            let high = table.multiplier(amplifier, em + extra, bonus);
            prop_assert!(high > low);
            prop_assert!(high < table.asymptote(amplifier, bonus));
        }
    }

    #[test]
    fn rejected_rolls_change_nothing(
        rolls in prop::collection::vec((substat(), quality(), 1u32..8), 1..20),
    ) {
        let mut builder = ArtifactBuilder::preset(
            StatKind::AtkPercent,
            StatKind::PyroDmgBonus,
            StatKind::CritRate,
        ).unwrap();

        for (stat, quality, count) in rolls {
            let before_table = builder.build();
            let before_rolls = builder.current_rolls();
            match builder.roll(stat, quality, Rarity::FiveStar, count) {
                Ok(()) => prop_assert_eq!(builder.current_rolls(), before_rolls + count),
                Err(CalcError::RollBudgetExceeded { .. }) => {
                    prop_assert_eq!(builder.current_rolls(), before_rolls);
                    prop_assert_eq!(builder.build(), before_table);
                }
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }
            prop_assert!(builder.current_rolls() <= builder.max_rolls());
        }
    }

    #[test]
    fn plain_hit_is_base_times_crit(
        atk in 100.0..3000.0f64,
        rate in 0.0..1.0f64,
        dmg in 0.0..3.0f64,
        mv in 0.1..10.0f64,
    ) {
        let stats = StatTable::of(&[
            (StatKind::BaseAtk, atk),
            (StatKind::CritRate, rate),
            (StatKind::CritDmg, dmg),
        ]).unwrap();
        let damage = calculate_damage(
            Element::Anemo,
            DamageType::Plunging,
            BaseScaling::Atk,
            Amplifier::None,
            1.0,
            mv,
            &stats,
            None,
        ).unwrap();
        let expected = mv * atk * (1.0 + rate * dmg);
        prop_assert!((damage - expected).abs() <= expected * 1e-12);
    }
}

#[test]
fn avg_multiplier_is_weighted_mean_for_every_rarity() {
    let table = RollQualityTable::default();
    let data = GameData::bundled();
    for rarity in Rarity::all() {
        let tiers = &data.rarity(*rarity).roll_tiers;
        let (sum, weight) = tiers
            .iter()
            .fold((0.0, 0.0), |(s, w), (q, tier)| (s + table.multiplier(q, *rarity) * tier.weight, w + tier.weight));
        assert!((table.multiplier(RollQuality::Avg, *rarity) - sum / weight).abs() < 1e-12);
    }
}
