//! StatSource - Trait and implementations for stat providers

mod base_stats;
mod buff;

pub use base_stats::{BaseStatsSource, BASE_CRIT_DMG, BASE_CRIT_RATE, BASE_ENERGY_RECHARGE};
pub use buff::{apply_stat_buffs, Buff, BuffModifier, BuffPresets, BuffStage, StageAdjustment};

use crate::artifact::ArtifactBuilder;
use crate::error::CalcError;
use crate::stats::StatTable;

/// Trait for anything that contributes stats to a StatTable
pub trait StatSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Suggested priorities:
    /// - Character: -100
    /// - Weapon: -50
    /// - Artifacts: 0
    fn priority(&self) -> i32 {
        0
    }

    /// Add this source's stats to the accumulator
    fn apply(&self, stats: &mut StatTable) -> Result<(), CalcError>;
}

impl StatSource for ArtifactBuilder {
    fn id(&self) -> &str {
        "artifacts"
    }

    fn apply(&self, stats: &mut StatTable) -> Result<(), CalcError> {
        stats.add_table(&self.build())
    }
}

/// Merge every source into one table, lowest priority first
pub fn combine(sources: &[&dyn StatSource]) -> Result<StatTable, CalcError> {
    let mut ordered: Vec<&dyn StatSource> = sources.to_vec();
    ordered.sort_by_key(|s| s.priority());

    let mut stats = StatTable::new();
    for source in ordered {
        source.apply(&mut stats)?;
        tracing::trace!(source = source.id(), priority = source.priority(), "applied stat source");
    }
    Ok(stats)
}
