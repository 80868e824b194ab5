//! ArtifactBuilder - Main stat assignment and budgeted substat rolling
//!
//! A builder owns up to five artifact pieces and a single roll budget
//! shared across all of them. Every roll either fully applies (stat value
//! and roll counter move together) or is rejected with the builder left
//! exactly as it was.

use super::{RollQuality, RollQualityTable};
use crate::config::GameData;
use crate::error::CalcError;
use crate::stats::{StatKind, StatTable};
use crate::types::{ArtifactSlot, Rarity};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// One equipped artifact: its slot, rarity, upgrade level and main stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactPiece {
    pub slot: ArtifactSlot,
    pub rarity: Rarity,
    pub level: u32,
    pub main_stat: StatKind,
}

impl ArtifactPiece {
    /// Create a piece, checking the level against the rarity's cap and the
    /// main stat against the slot's pool
    pub fn new(slot: ArtifactSlot, rarity: Rarity, level: u32, main_stat: StatKind) -> Result<Self, CalcError> {
        let piece = ArtifactPiece {
            slot,
            rarity,
            level,
            main_stat,
        };
        piece.validate()?;
        Ok(piece)
    }

    /// A piece upgraded to its rarity's max level
    pub fn maxed(slot: ArtifactSlot, rarity: Rarity, main_stat: StatKind) -> Result<Self, CalcError> {
        Self::new(slot, rarity, rarity.max_level(), main_stat)
    }

    fn validate(&self) -> Result<(), CalcError> {
        if self.level > self.rarity.max_level() {
            return Err(CalcError::InvalidLevel {
                rarity: self.rarity,
                level: self.level,
            });
        }
        if !self.slot.allows_main_stat(self.main_stat) {
            return Err(CalcError::InvalidMainStat {
                slot: self.slot,
                stat: self.main_stat,
            });
        }
        Ok(())
    }

    /// Upgrades reached so far: one every four levels
    pub fn upgrades(&self) -> u32 {
        self.level / 4
    }

    /// Substat rolls this piece holds at its level: its starting lines
    /// (stars - 1) plus one per upgrade.
    pub fn max_rolls(&self) -> u32 {
        (self.rarity.stars() - 1) + self.upgrades()
    }
}

/// How the roll budget and per-stat limits are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Budget {
    /// Sum of every piece's roll count at its level
    General,
    /// Fixed AVG rolls per substat plus fluid rolls per piece
    Kqm(Rarity),
}

type RollKey = (StatKind, RollQuality, Rarity);

#[derive(Debug, Clone)]
pub struct ArtifactBuilder {
    pieces: Vec<ArtifactPiece>,
    budget: Budget,
    max_rolls: u32,
    current_rolls: u32,
    main_stats: StatTable,
    substats: StatTable,
    /// Main stats plus substats, kept in step with every roll
    total: StatTable,
    rolls: HashMap<RollKey, u32>,
    table: RollQualityTable,
}

impl ArtifactBuilder {
    /// Builder over an arbitrary set of pieces with distinct slots
    pub fn new(pieces: &[ArtifactPiece]) -> Result<Self, CalcError> {
        Self::with_game_data(pieces, GameData::bundled())
    }

    pub fn with_game_data(pieces: &[ArtifactPiece], data: Arc<GameData>) -> Result<Self, CalcError> {
        let max_rolls = pieces.iter().map(ArtifactPiece::max_rolls).sum();
        Self::assemble(pieces.to_vec(), Budget::General, max_rolls, data)
    }

    /// The standard all-5★ KQM preset: HP flower, ATK plume and the given
    /// sands, goblet and circlet main stats, every piece at max level.
    pub fn preset(sands: StatKind, goblet: StatKind, circlet: StatKind) -> Result<Self, CalcError> {
        Self::preset_with_rarity(Rarity::FiveStar, sands, goblet, circlet)
    }

    pub fn preset_with_rarity(
        rarity: Rarity,
        sands: StatKind,
        goblet: StatKind,
        circlet: StatKind,
    ) -> Result<Self, CalcError> {
        Self::preset_with_game_data(rarity, sands, goblet, circlet, GameData::bundled())
    }

    pub fn preset_with_game_data(
        rarity: Rarity,
        sands: StatKind,
        goblet: StatKind,
        circlet: StatKind,
        data: Arc<GameData>,
    ) -> Result<Self, CalcError> {
        let pieces = vec![
            ArtifactPiece::maxed(ArtifactSlot::Flower, rarity, StatKind::FlatHp)?,
            ArtifactPiece::maxed(ArtifactSlot::Plume, rarity, StatKind::FlatAtk)?,
            ArtifactPiece::maxed(ArtifactSlot::Sands, rarity, sands)?,
            ArtifactPiece::maxed(ArtifactSlot::Goblet, rarity, goblet)?,
            ArtifactPiece::maxed(ArtifactSlot::Circlet, rarity, circlet)?,
        ];
        let rarity_data = data.rarity(rarity);
        let max_rolls =
            rarity_data.kqm_fixed_rolls() + rarity_data.kqm_fluid_rolls_per_piece * pieces.len() as u32;
        Self::assemble(pieces, Budget::Kqm(rarity), max_rolls, data)
    }

    fn assemble(
        pieces: Vec<ArtifactPiece>,
        budget: Budget,
        max_rolls: u32,
        data: Arc<GameData>,
    ) -> Result<Self, CalcError> {
        let table = RollQualityTable::new(data).map_err(|err| CalcError::InvalidGameData(err.to_string()))?;

        let mut main_stats = StatTable::new();
        for (i, piece) in pieces.iter().enumerate() {
            if pieces[..i].iter().any(|p| p.slot == piece.slot) {
                return Err(CalcError::DuplicateSlot(piece.slot));
            }
            piece.validate()?;
            let value = table
                .game_data()
                .rarity(piece.rarity)
                .main_stat_value(piece.main_stat, piece.level)
                .ok_or(CalcError::InvalidMainStat {
                    slot: piece.slot,
                    stat: piece.main_stat,
                })?;
            main_stats.add(piece.main_stat, value)?;
        }

        Ok(ArtifactBuilder {
            pieces,
            budget,
            max_rolls,
            current_rolls: 0,
            total: main_stats.clone(),
            main_stats,
            substats: StatTable::new(),
            rolls: HashMap::new(),
            table,
        })
    }

    /// Apply `count` rolls of `stat` at `quality`.
    ///
    /// Fails without side effects if `count` is zero, `stat` is not a
    /// substat, or the rolls would exceed the remaining budget.
    pub fn roll(
        &mut self,
        stat: StatKind,
        quality: RollQuality,
        rarity: Rarity,
        count: u32,
    ) -> Result<(), CalcError> {
        self.check_roll(stat, count)?;
        let value = self
            .table
            .roll_value(stat, quality, rarity)
            .ok_or(CalcError::InvalidSubstat(stat))?;

        self.shift_substat(stat, value * count as f64)?;
        self.current_rolls += count;
        *self.rolls.entry((stat, quality, rarity)).or_insert(0) += count;

        tracing::debug!(
            stat = %stat,
            quality = %quality,
            rarity = %rarity,
            count,
            used = self.current_rolls,
            max = self.max_rolls,
            "applied substat rolls"
        );
        Ok(())
    }

    /// Roll `count` times with each roll's tier drawn at random.
    /// Returns the tiers drawn, in order.
    pub fn roll_random<R: Rng + ?Sized>(
        &mut self,
        stat: StatKind,
        rarity: Rarity,
        count: u32,
        rng: &mut R,
    ) -> Result<Vec<RollQuality>, CalcError> {
        self.check_roll(stat, count)?;
        let mut next = self.clone();
        let mut drawn = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let quality = self.table.sample(rarity, rng)?;
            next.roll(stat, quality, rarity, 1)?;
            drawn.push(quality);
        }
        *self = next;
        Ok(drawn)
    }

    /// Give every substat its fixed AVG rolls, as the KQM convention does.
    ///
    /// Only preset builders carry fixed rolls; the rarity is the preset's.
    pub fn apply_fixed_substats(&mut self) -> Result<(), CalcError> {
        let Budget::Kqm(rarity) = self.budget else {
            return Err(CalcError::MalformedInput(
                "fixed substats apply only to preset builders".to_string(),
            ));
        };
        let data = self.table.game_data().rarity(rarity);
        let per_substat = data.kqm_fixed_rolls_per_substat;
        let total = data.kqm_fixed_rolls();
        if per_substat == 0 {
            return Ok(());
        }
        self.check_budget(total)?;

        let mut next = self.clone();
        for stat in StatKind::substats() {
            next.roll(*stat, RollQuality::Avg, rarity, per_substat)?;
        }
        *self = next;
        Ok(())
    }

    /// Take back `count` rolls previously applied with exactly this
    /// stat, quality and rarity.
    pub fn unroll(
        &mut self,
        stat: StatKind,
        quality: RollQuality,
        rarity: Rarity,
        count: u32,
    ) -> Result<(), CalcError> {
        if count == 0 {
            return Err(CalcError::MalformedInput("roll count must be at least 1".to_string()));
        }
        let key = (stat, quality, rarity);
        let available = self.rolls.get(&key).copied().unwrap_or(0);
        if available < count {
            return Err(CalcError::NotRolled {
                stat,
                requested: count,
                available,
            });
        }
        let value = self
            .table
            .roll_value(stat, quality, rarity)
            .ok_or(CalcError::InvalidSubstat(stat))?;

        self.shift_substat(stat, -value * count as f64)?;
        self.current_rolls -= count;
        if available == count {
            self.rolls.remove(&key);
        } else {
            self.rolls.insert(key, available - count);
        }
        Ok(())
    }

    /// Move `stat` by `amount` in both the substat and the combined table,
    /// or in neither
    fn shift_substat(&mut self, stat: StatKind, amount: f64) -> Result<(), CalcError> {
        self.substats.checked_sum(stat, amount)?;
        self.total.checked_sum(stat, amount)?;
        self.substats.add(stat, amount)?;
        self.total.add(stat, amount)
    }

    fn check_roll(&self, stat: StatKind, count: u32) -> Result<(), CalcError> {
        if count == 0 {
            return Err(CalcError::MalformedInput("roll count must be at least 1".to_string()));
        }
        if !stat.is_substat() {
            return Err(CalcError::InvalidSubstat(stat));
        }
        self.check_budget(count)
    }

    fn check_budget(&self, count: u32) -> Result<(), CalcError> {
        if self.current_rolls.saturating_add(count) > self.max_rolls {
            tracing::warn!(
                requested = count,
                used = self.current_rolls,
                max = self.max_rolls,
                "roll rejected, budget exhausted"
            );
            return Err(CalcError::RollBudgetExceeded {
                requested: count,
                current: self.current_rolls,
                max: self.max_rolls,
            });
        }
        Ok(())
    }

    /// Main stats merged with rolled substats. Does not consume or reset
    /// the builder.
    pub fn build(&self) -> StatTable {
        self.total.clone()
    }

    pub fn main_stats(&self) -> &StatTable {
        &self.main_stats
    }

    pub fn sub_stats(&self) -> &StatTable {
        &self.substats
    }

    pub fn pieces(&self) -> &[ArtifactPiece] {
        &self.pieces
    }

    /// Roll values this builder was created with
    pub fn roll_table(&self) -> &RollQualityTable {
        &self.table
    }

    pub fn current_rolls(&self) -> u32 {
        self.current_rolls
    }

    pub fn max_rolls(&self) -> u32 {
        self.max_rolls
    }

    pub fn rolls_left(&self) -> u32 {
        self.max_rolls - self.current_rolls
    }

    pub fn is_kqm(&self) -> bool {
        matches!(self.budget, Budget::Kqm(_))
    }

    /// Rolls applied to `stat` across all qualities and rarities
    pub fn rolls_for(&self, stat: StatKind) -> u32 {
        self.rolls
            .iter()
            .filter(|((s, _, _), _)| *s == stat)
            .map(|(_, count)| *count)
            .sum()
    }

    /// Advisory cap on how many rolls `stat` can plausibly hold.
    ///
    /// A substat cannot roll on a piece whose main stat is the same stat.
    /// [`ArtifactBuilder::roll`] does not enforce this; optimizers do.
    pub fn substat_limit(&self, stat: StatKind) -> u32 {
        if !stat.is_substat() {
            return 0;
        }
        let eligible = self.pieces.iter().filter(|p| p.main_stat != stat);
        match self.budget {
            Budget::General => eligible.map(|p| p.upgrades() + 1).sum(),
            Budget::Kqm(rarity) => {
                let data = self.table.game_data().rarity(rarity);
                data.kqm_fixed_rolls_per_substat + data.kqm_fluid_limit_per_piece * eligible.count() as u32
            }
        }
    }
}
