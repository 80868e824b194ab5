//! Buff - Caller-supplied damage modifiers applied at declared stages
//!
//! A buff never mutates the character table. During a damage calculation
//! each stage gathers the modifiers of every active buff, sums the
//! additive ones in order, then multiplies by `(1 + more)` for each
//! multiplicative one.

use crate::error::CalcError;
use crate::stats::{StatKind, StatTable};
use crate::types::Element;
use serde::{Deserialize, Serialize};

/// Where in the damage formula a modifier lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffStage {
    /// A stat, before totals are computed
    Stat(StatKind),
    /// `motion_value * scaling_base`
    BaseDamage,
    /// The summed damage bonus inside `1 + bonus`
    DamageBonus,
    /// The final damage number
    Final,
}

/// A modifier from a buff
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuffModifier {
    pub stage: BuffStage,
    /// Value per stack
    pub value_per_stack: f64,
    /// Whether this is a multiplicative "more" modifier
    pub is_more: bool,
}

/// Named, stackable group of modifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub name: String,
    /// Current stack count; a buff with no stacks does nothing
    pub stacks: u32,
    modifiers: Vec<BuffModifier>,
}

impl Buff {
    pub fn new(name: impl Into<String>) -> Self {
        Buff {
            name: name.into(),
            stacks: 1,
            modifiers: Vec::new(),
        }
    }

    /// Add a modifier to this buff
    pub fn with_modifier(mut self, stage: BuffStage, value_per_stack: f64, is_more: bool) -> Self {
        self.modifiers.push(BuffModifier {
            stage,
            value_per_stack,
            is_more,
        });
        self
    }

    /// Shorthand for an additive stat modifier
    pub fn with_stat(self, stat: StatKind, value_per_stack: f64) -> Self {
        self.with_modifier(BuffStage::Stat(stat), value_per_stack, false)
    }

    pub fn with_stacks(mut self, stacks: u32) -> Self {
        self.stacks = stacks;
        self
    }

    pub fn modifiers(&self) -> &[BuffModifier] {
        &self.modifiers
    }

    pub fn is_active(&self) -> bool {
        self.stacks > 0
    }

    /// Reject non-finite modifier values
    pub fn validate(&self) -> Result<(), CalcError> {
        for modifier in &self.modifiers {
            if !modifier.value_per_stack.is_finite() {
                return Err(CalcError::MalformedInput(format!(
                    "buff {:?} has non-finite modifier {}",
                    self.name, modifier.value_per_stack
                )));
            }
        }
        Ok(())
    }
}

/// Combined effect of every modifier at one stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageAdjustment {
    pub added: f64,
    pub multiplier: f64,
}

impl Default for StageAdjustment {
    fn default() -> Self {
        StageAdjustment {
            added: 0.0,
            multiplier: 1.0,
        }
    }
}

impl StageAdjustment {
    /// Gather the modifiers of all active `buffs` that target `stage`
    pub fn collect(buffs: &[Buff], stage: BuffStage) -> Self {
        let mut adjustment = StageAdjustment::default();
        for buff in buffs.iter().filter(|b| b.is_active()) {
            let stacks = buff.stacks as f64;
            for modifier in buff.modifiers.iter().filter(|m| m.stage == stage) {
                let value = modifier.value_per_stack * stacks;
                if modifier.is_more {
                    adjustment.multiplier *= 1.0 + value;
                } else {
                    adjustment.added += value;
                }
            }
        }
        adjustment
    }

    pub fn apply(&self, value: f64) -> f64 {
        (value + self.added) * self.multiplier
    }

    pub fn is_identity(&self) -> bool {
        self.added == 0.0 && self.multiplier == 1.0
    }
}

/// Copy of `stats` with every stat-stage modifier applied
pub fn apply_stat_buffs(stats: &StatTable, buffs: &[Buff]) -> Result<StatTable, CalcError> {
    let mut buffed = stats.clone();
    for stat in StatKind::all() {
        let adjustment = StageAdjustment::collect(buffs, BuffStage::Stat(*stat));
        if adjustment.is_identity() {
            continue;
        }
        let current = stats.get(*stat);
        buffed.add(*stat, adjustment.apply(current) - current)?;
    }
    Ok(buffed)
}

/// Common buff presets
pub struct BuffPresets;

impl BuffPresets {
    /// Flat ATK granted as a share of a supporter's base ATK
    pub fn base_atk_share(name: &str, supporter_base_atk: f64, ratio: f64) -> Buff {
        Buff::new(name).with_stat(StatKind::FlatAtk, supporter_base_atk * ratio)
    }

    /// Four-piece Noblesse Oblige
    pub fn noblesse_oblige() -> Buff {
        Buff::new("Noblesse Oblige").with_stat(StatKind::AtkPercent, 0.2)
    }

    /// Four-piece Viridescent Venerer shred on a swirled element
    pub fn viridescent_venerer(element: Element) -> Buff {
        Buff::new("Viridescent Venerer").with_stat(element.res_reduction_stat(), 0.4)
    }

    /// Jade Shield: 20% shred on every element
    pub fn jade_shield() -> Buff {
        Element::all()
            .iter()
            .fold(Buff::new("Jade Shield"), |buff, element| {
                buff.with_stat(element.res_reduction_stat(), 0.2)
            })
    }

    pub fn def_shred(name: &str, amount: f64) -> Buff {
        Buff::new(name).with_stat(StatKind::DefReduction, amount)
    }

    /// Flat damage added to each hit before bonuses
    pub fn flat_damage(name: &str, amount: f64) -> Buff {
        Buff::new(name).with_modifier(BuffStage::BaseDamage, amount, false)
    }
}
