//! Roll quality tiers and the per-roll value multiplier lookup

use crate::config::{ConfigError, GameData};
use crate::error::CalcError;
use crate::stats::StatKind;
use crate::types::{normalize_name, Rarity};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// How well a single substat roll landed.
///
/// `Avg` is not an in-game tier; it is the expected value of one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollQuality {
    Low,
    Mid,
    High,
    Max,
    Avg,
}

impl RollQuality {
    pub fn all() -> &'static [RollQuality] {
        &[
            RollQuality::Low,
            RollQuality::Mid,
            RollQuality::High,
            RollQuality::Max,
            RollQuality::Avg,
        ]
    }

    /// The four tiers a roll can actually land on
    pub fn tiers() -> &'static [RollQuality] {
        &RollQuality::all()[..4]
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Result<Self, CalcError> {
        Self::all()
            .get(id as usize)
            .copied()
            .ok_or(CalcError::InvalidEnumValue {
                kind: "roll quality",
                value: id.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            RollQuality::Low => "low",
            RollQuality::Mid => "mid",
            RollQuality::High => "high",
            RollQuality::Max => "max",
            RollQuality::Avg => "avg",
        }
    }
}

impl fmt::Display for RollQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RollQuality {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.trim().parse::<u32>() {
            return RollQuality::from_id(id);
        }
        let wanted = normalize_name(s);
        let quality = match wanted.as_str() {
            "low" => RollQuality::Low,
            "mid" | "medium" => RollQuality::Mid,
            "high" => RollQuality::High,
            "max" => RollQuality::Max,
            "avg" | "average" => RollQuality::Avg,
            _ => {
                return Err(CalcError::InvalidEnumValue {
                    kind: "roll quality",
                    value: s.to_string(),
                })
            }
        };
        Ok(quality)
    }
}

/// Lookup of `(quality, rarity) -> multiplier` and per-roll substat values
#[derive(Debug, Clone)]
pub struct RollQualityTable {
    data: Arc<GameData>,
}

impl Default for RollQualityTable {
    fn default() -> Self {
        // The bundled table is validated when it is first loaded
        RollQualityTable {
            data: GameData::bundled(),
        }
    }
}

impl RollQualityTable {
    /// Table over caller-supplied game data, which must pass validation
    pub fn new(data: Arc<GameData>) -> Result<Self, ConfigError> {
        data.validate()?;
        Ok(RollQualityTable { data })
    }

    /// Fraction of a MAX roll that a roll of `quality` yields.
    ///
    /// `Avg` is the weight-averaged ratio of the four tiers.
    pub fn multiplier(&self, quality: RollQuality, rarity: Rarity) -> f64 {
        let tiers = &self.data.rarity(rarity).roll_tiers;
        match quality {
            RollQuality::Low => tiers.low.ratio,
            RollQuality::Mid => tiers.mid.ratio,
            RollQuality::High => tiers.high.ratio,
            RollQuality::Max => tiers.max.ratio,
            RollQuality::Avg => {
                let (weighted, total) = tiers
                    .iter()
                    .fold((0.0, 0.0), |(sum, weight), (_, tier)| {
                        (sum + tier.ratio * tier.weight, weight + tier.weight)
                    });
                weighted / total
            }
        }
    }

    /// Value of a single MAX roll of `stat`, or `None` if it is not a substat
    pub fn substat_value(&self, stat: StatKind, rarity: Rarity) -> Option<f64> {
        self.data.rarity(rarity).substat_value(stat)
    }

    /// Value added by one roll of `stat` at `quality`
    pub fn roll_value(&self, stat: StatKind, quality: RollQuality, rarity: Rarity) -> Option<f64> {
        self.substat_value(stat, rarity)
            .map(|base| base * self.multiplier(quality, rarity))
    }

    /// Draw an in-game tier using the tier weights. Never returns `Avg`.
    pub fn sample<R: Rng + ?Sized>(&self, rarity: Rarity, rng: &mut R) -> Result<RollQuality, CalcError> {
        let tiers = &self.data.rarity(rarity).roll_tiers;
        let weights: Vec<f64> = tiers.iter().map(|(_, t)| t.weight).collect();
        let dist = WeightedIndex::new(&weights)
            .map_err(|err| CalcError::InvalidGameData(format!("{} roll weights: {}", rarity, err)))?;
        Ok(RollQuality::tiers()[dist.sample(rng)])
    }

    pub fn game_data(&self) -> &Arc<GameData> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tier_multipliers() {
        let table = RollQualityTable::default();
        let r = Rarity::FiveStar;
        assert!((table.multiplier(RollQuality::Max, r) - 1.0).abs() < f64::EPSILON);
        assert!((table.multiplier(RollQuality::High, r) - 0.9).abs() < f64::EPSILON);
        assert!((table.multiplier(RollQuality::Mid, r) - 0.8).abs() < f64::EPSILON);
        assert!((table.multiplier(RollQuality::Low, r) - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_avg_is_weighted_mean() {
        let table = RollQualityTable::default();
        for rarity in Rarity::all() {
            let mean: f64 = RollQuality::tiers()
                .iter()
                .map(|q| table.multiplier(*q, *rarity))
                .sum::<f64>()
                / 4.0;
            assert!((table.multiplier(RollQuality::Avg, *rarity) - mean).abs() < 1e-12);
            assert!((table.multiplier(RollQuality::Avg, *rarity) - 0.85).abs() < 1e-12);
        }
    }

    #[test]
    fn test_avg_follows_weights() {
        let mut data = GameData::default();
        data.five_star.roll_tiers.max.weight = 3.0;
        let table = RollQualityTable::new(Arc::new(data)).unwrap();
        let expected = (0.7 + 0.8 + 0.9 + 3.0 * 1.0) / 6.0;
        assert!((table.multiplier(RollQuality::Avg, Rarity::FiveStar) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_ordering_low_to_max() {
        let table = RollQualityTable::default();
        let r = Rarity::FourStar;
        let order = [
            RollQuality::Low,
            RollQuality::Mid,
            RollQuality::Avg,
            RollQuality::High,
            RollQuality::Max,
        ];
        for pair in order.windows(2) {
            assert!(table.multiplier(pair[0], r) < table.multiplier(pair[1], r));
        }
    }

    #[test]
    fn test_roll_value() {
        let table = RollQualityTable::default();
        let value = table
            .roll_value(StatKind::CritRate, RollQuality::Avg, Rarity::FiveStar)
            .unwrap();
        assert!((value - 0.0389 * 0.85).abs() < 1e-12);
        assert!(table
            .roll_value(StatKind::HealingBonus, RollQuality::Max, Rarity::FiveStar)
            .is_none());
    }

    #[test]
    fn test_sample_never_avg() {
        let table = RollQualityTable::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert_ne!(table.sample(Rarity::FiveStar, &mut rng).unwrap(), RollQuality::Avg);
        }
    }

    #[test]
    fn test_new_rejects_unusable_weights() {
        let mut data = GameData::default();
        data.four_star.roll_tiers.low.weight = 0.0;
        data.four_star.roll_tiers.mid.weight = 0.0;
        data.four_star.roll_tiers.high.weight = 0.0;
        data.four_star.roll_tiers.max.weight = 0.0;
        assert!(matches!(
            RollQualityTable::new(Arc::new(data)),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!("AVG".parse::<RollQuality>().unwrap(), RollQuality::Avg);
        assert_eq!("3".parse::<RollQuality>().unwrap(), RollQuality::Max);
        assert!("5".parse::<RollQuality>().is_err());
        assert!("perfect".parse::<RollQuality>().is_err());
    }
}
