//! StatTable - Additive accumulator over stat kinds

use super::StatKind;
use crate::error::CalcError;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Sum of every contribution to each stat.
///
/// Unset stats read as `0.0`. Values only change through [`StatTable::add`]
/// and [`StatTable::add_table`], and every stored value is finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTable {
    values: HashMap<StatKind, f64>,
}

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(stat, value)` pairs; repeated stats accumulate.
    pub fn of(pairs: &[(StatKind, f64)]) -> Result<Self, CalcError> {
        let mut table = StatTable::new();
        for (stat, value) in pairs {
            table.add(*stat, *value)?;
        }
        Ok(table)
    }

    /// Add `amount` to `stat`.
    ///
    /// Non-finite amounts, or sums that overflow to infinity, are rejected
    /// and leave the table untouched.
    pub fn add(&mut self, stat: StatKind, amount: f64) -> Result<(), CalcError> {
        let next = self.checked_sum(stat, amount)?;
        self.values.insert(stat, next);
        Ok(())
    }

    /// Add every entry of `other` into this table.
    ///
    /// Either every entry lands or, if any sum would leave the finite
    /// range, none does.
    pub fn add_table(&mut self, other: &StatTable) -> Result<(), CalcError> {
        let sums = other
            .values
            .iter()
            .map(|(stat, value)| Ok((*stat, self.checked_sum(*stat, *value)?)))
            .collect::<Result<Vec<_>, CalcError>>()?;
        self.values.extend(sums);
        Ok(())
    }

    /// Non-mutating merge
    pub fn merged_with(&self, other: &StatTable) -> Result<StatTable, CalcError> {
        let mut merged = self.clone();
        merged.add_table(other)?;
        Ok(merged)
    }

    /// What `stat` would hold after adding `amount`
    pub(crate) fn checked_sum(&self, stat: StatKind, amount: f64) -> Result<f64, CalcError> {
        if !amount.is_finite() {
            return Err(CalcError::non_finite(stat.name(), amount));
        }
        let next = self.get(stat) + amount;
        if !next.is_finite() {
            return Err(CalcError::non_finite(stat.name(), next));
        }
        Ok(next)
    }

    pub fn get(&self, stat: StatKind) -> f64 {
        self.values.get(&stat).copied().unwrap_or(0.0)
    }

    /// Entries in ascending stat-code order
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, f64)> + '_ {
        StatKind::all()
            .iter()
            .filter_map(move |stat| self.values.get(stat).map(|value| (*stat, *value)))
    }

    /// Number of stats that have been touched
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for StatTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for (stat, value) in self.iter() {
            seq.serialize_element(&(stat.code(), value))?;
        }
        seq.end()
    }
}

struct StatTableVisitor;

impl<'de> Visitor<'de> for StatTableVisitor {
    type Value = StatTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a list of (stat code, value) pairs")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<StatTable, A::Error> {
        let mut table = StatTable::new();
        while let Some((code, value)) = seq.next_element::<(u32, f64)>()? {
            let stat = StatKind::from_code(code).map_err(de::Error::custom)?;
            table.add(stat, value).map_err(de::Error::custom)?;
        }
        Ok(table)
    }
}

impl<'de> Deserialize<'de> for StatTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(StatTableVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_reads_zero() {
        let table = StatTable::new();
        assert_eq!(table.get(StatKind::CritRate), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_add_accumulates() {
        let mut table = StatTable::new();
        table.add(StatKind::FlatAtk, 311.0).unwrap();
        table.add(StatKind::FlatAtk, 33.08).unwrap();
        assert!((table.get(StatKind::FlatAtk) - 344.08).abs() < 1e-9);
    }

    #[test]
    fn test_add_rejects_non_finite() {
        let mut table = StatTable::of(&[(StatKind::CritDmg, 0.5)]).unwrap();
        let before = table.clone();
        assert!(matches!(
            table.add(StatKind::CritDmg, f64::NAN),
            Err(CalcError::MalformedInput(_))
        ));
        assert!(table.add(StatKind::CritDmg, f64::INFINITY).is_err());
        assert_eq!(table, before);
    }

    #[test]
    fn test_add_rejects_overflow() {
        let mut table = StatTable::of(&[(StatKind::FlatHp, f64::MAX)]).unwrap();
        assert!(table.add(StatKind::FlatHp, f64::MAX).is_err());
        assert_eq!(table.get(StatKind::FlatHp), f64::MAX);
    }

    #[test]
    fn test_add_table_overflow_leaves_table_alone() {
        let mut table = StatTable::of(&[(StatKind::FlatAtk, f64::MAX), (StatKind::CritRate, 0.05)]).unwrap();
        let other = StatTable::of(&[(StatKind::FlatAtk, f64::MAX), (StatKind::CritRate, 0.3)]).unwrap();
        let before = table.clone();

        assert!(matches!(table.add_table(&other), Err(CalcError::MalformedInput(_))));
        assert_eq!(table, before);
        assert!(table.merged_with(&table.clone()).is_err());
        assert!(table.iter().all(|(_, value)| value.is_finite()));
    }

    #[test]
    fn test_of_accumulates_duplicates() {
        let table = StatTable::of(&[
            (StatKind::AtkPercent, 0.2),
            (StatKind::AtkPercent, 0.48),
            (StatKind::CritRate, 0.05),
        ])
        .unwrap();
        assert!((table.get(StatKind::AtkPercent) - 0.68).abs() < 1e-9);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_merged_with_leaves_inputs_alone() {
        let a = StatTable::of(&[(StatKind::BaseAtk, 334.85)]).unwrap();
        let b = StatTable::of(&[(StatKind::BaseAtk, 510.0), (StatKind::ElementalMastery, 165.0)]).unwrap();
        let merged = a.merged_with(&b).unwrap();
        assert!((merged.get(StatKind::BaseAtk) - 844.85).abs() < 1e-9);
        assert_eq!(merged.get(StatKind::ElementalMastery), 165.0);
        assert_eq!(a.get(StatKind::ElementalMastery), 0.0);
    }

    #[test]
    fn test_iter_is_code_ordered() {
        let table = StatTable::of(&[
            (StatKind::PhysicalResReduction, 0.1),
            (StatKind::BaseHp, 1000.0),
            (StatKind::CritDmg, 0.5),
        ])
        .unwrap();
        let stats: Vec<StatKind> = table.iter().map(|(s, _)| s).collect();
        assert_eq!(
            stats,
            vec![StatKind::BaseHp, StatKind::CritDmg, StatKind::PhysicalResReduction]
        );
    }

    #[test]
    fn test_serializes_as_code_pairs() {
        let table = StatTable::of(&[(StatKind::CritDmg, 0.5), (StatKind::FlatAtk, 311.0)]).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, "[[4,311.0],[11,0.5]]");

        let back: StatTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_deserialize_rejects_reserved_code() {
        let result: Result<StatTable, _> = serde_json::from_str("[[29,1.0]]");
        assert!(result.is_err());
    }
}
