//! Artifact roll tiers, stat values and roll budgets per rarity

use crate::artifact::RollQuality;
use crate::stats::StatKind;
use serde::{Deserialize, Serialize};

/// One in-game roll tier: a fraction of the max roll and its relative odds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollTier {
    pub ratio: f64,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// The four tiers a substat roll can land on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollTiers {
    pub low: RollTier,
    pub mid: RollTier,
    pub high: RollTier,
    pub max: RollTier,
}

impl RollTiers {
    /// Tiers in ascending order; AVG is not a tier
    pub fn iter(&self) -> impl Iterator<Item = (RollQuality, &RollTier)> {
        [
            (RollQuality::Low, &self.low),
            (RollQuality::Mid, &self.mid),
            (RollQuality::High, &self.high),
            (RollQuality::Max, &self.max),
        ]
        .into_iter()
    }
}

impl Default for RollTiers {
    fn default() -> Self {
        RollTiers {
            low: RollTier { ratio: 0.7, weight: 1.0 },
            mid: RollTier { ratio: 0.8, weight: 1.0 },
            high: RollTier { ratio: 0.9, weight: 1.0 },
            max: RollTier { ratio: 1.0, weight: 1.0 },
        }
    }
}

/// A `(stat, value)` row of a data table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub stat: StatKind,
    pub value: f64,
}

impl From<(StatKind, f64)> for StatEntry {
    fn from((stat, value): (StatKind, f64)) -> Self {
        StatEntry { stat, value }
    }
}

/// Main stat value at every level from +0 to the rarity's cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainStatRow {
    pub stat: StatKind,
    pub values: Vec<f64>,
}

/// Everything that differs between 4★ and 5★ artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityData {
    #[serde(default)]
    pub roll_tiers: RollTiers,
    /// Value of a single MAX-tier substat roll
    pub substats: Vec<StatEntry>,
    /// Main stat value per level
    pub main_stats: Vec<MainStatRow>,
    /// KQM: AVG rolls granted to every substat before fluid rolls
    #[serde(default = "default_fixed_rolls_per_substat")]
    pub kqm_fixed_rolls_per_substat: u32,
    /// KQM: fluid rolls contributed by each piece
    pub kqm_fluid_rolls_per_piece: u32,
    /// KQM: fluid rolls a substat may take per piece whose main stat differs
    #[serde(default = "default_fluid_limit_per_piece")]
    pub kqm_fluid_limit_per_piece: u32,
}

fn default_fixed_rolls_per_substat() -> u32 {
    2
}
fn default_fluid_limit_per_piece() -> u32 {
    2
}

impl RarityData {
    pub fn substat_value(&self, stat: StatKind) -> Option<f64> {
        self.substats.iter().find(|e| e.stat == stat).map(|e| e.value)
    }

    /// Every level's value for a main stat, indexed by level
    pub fn main_stat_values(&self, stat: StatKind) -> Option<&[f64]> {
        self.main_stats
            .iter()
            .find(|row| row.stat == stat)
            .map(|row| row.values.as_slice())
    }

    pub fn main_stat_value(&self, stat: StatKind, level: u32) -> Option<f64> {
        self.main_stat_values(stat)
            .and_then(|values| values.get(level as usize))
            .copied()
    }

    /// Fixed rolls across the whole substat pool
    pub fn kqm_fixed_rolls(&self) -> u32 {
        self.kqm_fixed_rolls_per_substat * StatKind::substats().len() as u32
    }

    pub fn five_star() -> Self {
        use StatKind::*;
        RarityData {
            roll_tiers: RollTiers::default(),
            substats: entries(&[
                (FlatHp, 298.75),
                (FlatAtk, 19.45),
                (FlatDef, 23.15),
                (HpPercent, 0.0583),
                (AtkPercent, 0.0583),
                (DefPercent, 0.0729),
                (ElementalMastery, 23.31),
                (EnergyRecharge, 0.0648),
                (CritRate, 0.0389),
                (CritDmg, 0.0777),
            ]),
            main_stats: main_rows(
                &[
                    (FlatHp, &FIVE_STAR_HP[..]),
                    (FlatAtk, &FIVE_STAR_ATK[..]),
                    (HpPercent, &FIVE_STAR_PERCENT[..]),
                    (AtkPercent, &FIVE_STAR_PERCENT[..]),
                    (DefPercent, &FIVE_STAR_DEF_PERCENT[..]),
                    (ElementalMastery, &FIVE_STAR_EM[..]),
                    (EnergyRecharge, &FIVE_STAR_ER[..]),
                    (PhysicalDmgBonus, &FIVE_STAR_DEF_PERCENT[..]),
                    (CritRate, &FIVE_STAR_CRIT_RATE[..]),
                    (CritDmg, &FIVE_STAR_CRIT_DMG[..]),
                    (HealingBonus, &FIVE_STAR_HEALING[..]),
                ],
                &FIVE_STAR_PERCENT,
            ),
            kqm_fixed_rolls_per_substat: 2,
            kqm_fluid_rolls_per_piece: 4,
            kqm_fluid_limit_per_piece: 2,
        }
    }

    pub fn four_star() -> Self {
        use StatKind::*;
        RarityData {
            roll_tiers: RollTiers::default(),
            substats: entries(&[
                (FlatHp, 239.0),
                (FlatAtk, 15.56),
                (FlatDef, 18.52),
                (HpPercent, 0.0466),
                (AtkPercent, 0.0466),
                (DefPercent, 0.0583),
                (ElementalMastery, 18.65),
                (EnergyRecharge, 0.0518),
                (CritRate, 0.0311),
                (CritDmg, 0.0622),
            ]),
            main_stats: main_rows(
                &[
                    (FlatHp, &FOUR_STAR_HP[..]),
                    (FlatAtk, &FOUR_STAR_ATK[..]),
                    (HpPercent, &FOUR_STAR_PERCENT[..]),
                    (AtkPercent, &FOUR_STAR_PERCENT[..]),
                    (DefPercent, &FOUR_STAR_DEF_PERCENT[..]),
                    (ElementalMastery, &FOUR_STAR_EM[..]),
                    (EnergyRecharge, &FOUR_STAR_ER[..]),
                    (PhysicalDmgBonus, &FOUR_STAR_DEF_PERCENT[..]),
                    (CritRate, &FOUR_STAR_CRIT_RATE[..]),
                    (CritDmg, &FOUR_STAR_CRIT_DMG[..]),
                    (HealingBonus, &FOUR_STAR_HEALING[..]),
                ],
                &FOUR_STAR_PERCENT,
            ),
            kqm_fixed_rolls_per_substat: 2,
            kqm_fluid_rolls_per_piece: 2,
            kqm_fluid_limit_per_piece: 2,
        }
    }
}

fn entries(pairs: &[(StatKind, f64)]) -> Vec<StatEntry> {
    pairs.iter().copied().map(StatEntry::from).collect()
}

/// Rows for `pairs` plus the seven elemental goblet bonuses, which share
/// one progression
fn main_rows(pairs: &[(StatKind, &[f64])], elemental: &[f64]) -> Vec<MainStatRow> {
    let elementals = StatKind::all()
        .iter()
        .filter(|s| s.is_elemental_dmg_bonus() && s.element().is_some_and(|e| !e.is_physical()))
        .map(|s| (*s, elemental));
    pairs
        .iter()
        .copied()
        .chain(elementals)
        .map(|(stat, values)| MainStatRow {
            stat,
            values: values.to_vec(),
        })
        .collect()
}

const FIVE_STAR_HP: [f64; 21] = [
    717.0, 920.0, 1123.0, 1326.0, 1530.0, 1733.0, 1936.0, 2139.0, 2342.0, 2545.0, 2749.0,
    2952.0, 3155.0, 3358.0, 3561.0, 3764.0, 3967.0, 4171.0, 4374.0, 4577.0, 4780.0,
];

const FIVE_STAR_ATK: [f64; 21] = [
    47.0, 60.0, 73.0, 86.0, 100.0, 113.0, 126.0, 139.0, 152.0, 166.0, 179.0, 192.0, 205.0,
    219.0, 232.0, 245.0, 258.0, 272.0, 285.0, 298.0, 311.0,
];

const FIVE_STAR_PERCENT: [f64; 21] = [
    0.07, 0.09, 0.11, 0.129, 0.149, 0.169, 0.189, 0.209, 0.228, 0.248, 0.268, 0.288, 0.308,
    0.328, 0.347, 0.367, 0.387, 0.407, 0.427, 0.446, 0.466,
];

const FIVE_STAR_DEF_PERCENT: [f64; 21] = [
    0.087, 0.112, 0.137, 0.162, 0.186, 0.211, 0.236, 0.261, 0.286, 0.31, 0.335, 0.36, 0.385,
    0.409, 0.434, 0.459, 0.484, 0.508, 0.533, 0.558, 0.583,
];

const FIVE_STAR_EM: [f64; 21] = [
    28.0, 35.9, 43.9, 51.8, 59.7, 67.7, 75.6, 83.5, 91.4, 99.4, 107.3, 115.2, 123.2, 131.1,
    139.0, 147.0, 154.9, 162.8, 170.7, 178.6, 186.5,
];

const FIVE_STAR_ER: [f64; 21] = [
    0.078, 0.1, 0.122, 0.144, 0.166, 0.188, 0.21, 0.232, 0.254, 0.276, 0.298, 0.32, 0.342,
    0.364, 0.386, 0.408, 0.43, 0.452, 0.474, 0.496, 0.518,
];

const FIVE_STAR_CRIT_RATE: [f64; 21] = [
    0.047, 0.06, 0.073, 0.086, 0.099, 0.113, 0.126, 0.139, 0.152, 0.166, 0.179, 0.192, 0.205,
    0.218, 0.232, 0.245, 0.258, 0.271, 0.284, 0.298, 0.311,
];

const FIVE_STAR_CRIT_DMG: [f64; 21] = [
    0.093, 0.119, 0.146, 0.172, 0.199, 0.225, 0.252, 0.278, 0.305, 0.331, 0.358, 0.384, 0.411,
    0.437, 0.463, 0.49, 0.516, 0.543, 0.569, 0.596, 0.622,
];

const FIVE_STAR_HEALING: [f64; 21] = [
    0.054, 0.069, 0.084, 0.1, 0.115, 0.13, 0.145, 0.161, 0.176, 0.191, 0.206, 0.221, 0.237,
    0.252, 0.267, 0.282, 0.298, 0.313, 0.328, 0.343, 0.359,
];

const FOUR_STAR_HP: [f64; 17] = [
    645.0, 828.0, 1011.0, 1194.0, 1377.0, 1559.0, 1742.0, 1925.0, 2108.0, 2291.0, 2474.0,
    2657.0, 2839.0, 3022.0, 3205.0, 3388.0, 3571.0,
];

const FOUR_STAR_ATK: [f64; 17] = [
    42.0, 54.0, 66.0, 78.0, 90.0, 102.0, 113.0, 125.0, 137.0, 149.0, 161.0, 173.0, 185.0,
    197.0, 209.0, 221.0, 232.0,
];

const FOUR_STAR_PERCENT: [f64; 17] = [
    0.063, 0.081, 0.099, 0.116, 0.134, 0.152, 0.17, 0.188, 0.206, 0.223, 0.241, 0.259, 0.277,
    0.295, 0.313, 0.33, 0.348,
];

const FOUR_STAR_DEF_PERCENT: [f64; 17] = [
    0.079, 0.101, 0.123, 0.146, 0.168, 0.19, 0.212, 0.235, 0.257, 0.279, 0.302, 0.324, 0.346,
    0.368, 0.391, 0.413, 0.435,
];

const FOUR_STAR_EM: [f64; 17] = [
    25.2, 32.3, 39.4, 46.6, 53.7, 60.8, 68.0, 75.1, 82.2, 89.4, 96.5, 103.6, 110.8, 117.9,
    125.0, 132.2, 139.3,
];

const FOUR_STAR_ER: [f64; 17] = [
    0.07, 0.09, 0.11, 0.129, 0.149, 0.169, 0.189, 0.209, 0.228, 0.248, 0.268, 0.288, 0.308,
    0.328, 0.347, 0.367, 0.387,
];

const FOUR_STAR_CRIT_RATE: [f64; 17] = [
    0.042, 0.054, 0.066, 0.078, 0.09, 0.101, 0.113, 0.125, 0.137, 0.149, 0.161, 0.173, 0.185,
    0.197, 0.208, 0.22, 0.232,
];

const FOUR_STAR_CRIT_DMG: [f64; 17] = [
    0.084, 0.108, 0.131, 0.155, 0.179, 0.203, 0.227, 0.25, 0.274, 0.298, 0.322, 0.345, 0.369,
    0.393, 0.417, 0.441, 0.464,
];

const FOUR_STAR_HEALING: [f64; 17] = [
    0.048, 0.062, 0.076, 0.09, 0.103, 0.117, 0.131, 0.145, 0.159, 0.172, 0.186, 0.2, 0.214,
    0.228, 0.242, 0.255, 0.268,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_star_budget_numbers() {
        let data = RarityData::five_star();
        assert_eq!(data.kqm_fixed_rolls(), 20);
        assert_eq!(data.kqm_fixed_rolls() + 5 * data.kqm_fluid_rolls_per_piece, 40);
    }

    #[test]
    fn test_four_star_budget_numbers() {
        let data = RarityData::four_star();
        assert_eq!(data.kqm_fixed_rolls() + 5 * data.kqm_fluid_rolls_per_piece, 30);
    }

    #[test]
    fn test_elemental_goblets_share_value() {
        let data = RarityData::five_star();
        assert_eq!(data.main_stat_value(StatKind::PyroDmgBonus, 20), Some(0.466));
        assert_eq!(data.main_stat_value(StatKind::DendroDmgBonus, 20), Some(0.466));
        assert_eq!(data.main_stat_value(StatKind::PhysicalDmgBonus, 20), Some(0.583));
        assert_eq!(data.main_stat_value(StatKind::ElementalDmgBonus, 20), None);
    }

    #[test]
    fn test_main_stat_by_level() {
        let five = RarityData::five_star();
        assert_eq!(five.main_stat_value(StatKind::FlatHp, 0), Some(717.0));
        assert_eq!(five.main_stat_value(StatKind::FlatHp, 20), Some(4780.0));
        assert_eq!(five.main_stat_value(StatKind::FlatHp, 21), None);

        let four = RarityData::four_star();
        assert_eq!(four.main_stat_value(StatKind::EnergyRecharge, 16), Some(0.387));
        assert_eq!(four.main_stat_value(StatKind::EnergyRecharge, 17), None);
        for row in &four.main_stats {
            assert_eq!(row.values.len(), 17, "{}", row.stat);
            assert!(row.values.windows(2).all(|w| w[0] <= w[1]), "{}", row.stat);
        }
    }

    #[test]
    fn test_higher_rarity_rolls_higher() {
        let five = RarityData::five_star();
        let four = RarityData::four_star();
        for stat in StatKind::substats() {
            assert!(five.substat_value(*stat).unwrap() > four.substat_value(*stat).unwrap());
        }
    }
}
