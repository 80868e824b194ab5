//! Core enumerations shared by the stat, artifact and damage modules
//!
//! Every enum carries a stable integer id used at the parsing boundary
//! (`from_id`) and a snake_case name accepted by `FromStr`.

use crate::error::CalcError;
use crate::stats::StatKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowercases and strips everything but ASCII alphanumerics, so that
/// `"Crit DMG"`, `"crit_dmg"` and `"CritDmg"` all compare equal.
/// A `%` is spelled out as `percent`.
pub(crate) fn normalize_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        if c == '%' {
            out.push_str("percent");
        } else if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

fn parse_by_name<T: Copy>(
    kind: &'static str,
    input: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
    from_id: impl Fn(u32) -> Result<T, CalcError>,
) -> Result<T, CalcError> {
    if let Ok(id) = input.trim().parse::<u32>() {
        return from_id(id);
    }
    let wanted = normalize_name(input);
    all.iter()
        .copied()
        .find(|v| normalize_name(name(*v)) == wanted)
        .ok_or_else(|| CalcError::InvalidEnumValue {
            kind,
            value: input.to_string(),
        })
}

/// Damage element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Pyro,
    Hydro,
    Electro,
    Cryo,
    Anemo,
    Geo,
    Dendro,
    Physical,
}

impl Element {
    pub fn all() -> &'static [Element] {
        &[
            Element::Pyro,
            Element::Hydro,
            Element::Electro,
            Element::Cryo,
            Element::Anemo,
            Element::Geo,
            Element::Dendro,
            Element::Physical,
        ]
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Result<Self, CalcError> {
        Self::all()
            .get(id as usize)
            .copied()
            .ok_or(CalcError::InvalidEnumValue {
                kind: "element",
                value: id.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Pyro => "pyro",
            Element::Hydro => "hydro",
            Element::Electro => "electro",
            Element::Cryo => "cryo",
            Element::Anemo => "anemo",
            Element::Geo => "geo",
            Element::Dendro => "dendro",
            Element::Physical => "physical",
        }
    }

    pub fn is_physical(self) -> bool {
        self == Element::Physical
    }

    /// The damage bonus stat specific to this element
    pub fn dmg_bonus_stat(self) -> StatKind {
        match self {
            Element::Pyro => StatKind::PyroDmgBonus,
            Element::Hydro => StatKind::HydroDmgBonus,
            Element::Electro => StatKind::ElectroDmgBonus,
            Element::Cryo => StatKind::CryoDmgBonus,
            Element::Anemo => StatKind::AnemoDmgBonus,
            Element::Geo => StatKind::GeoDmgBonus,
            Element::Dendro => StatKind::DendroDmgBonus,
            Element::Physical => StatKind::PhysicalDmgBonus,
        }
    }

    /// The resistance shred stat specific to this element
    pub fn res_reduction_stat(self) -> StatKind {
        match self {
            Element::Pyro => StatKind::PyroResReduction,
            Element::Hydro => StatKind::HydroResReduction,
            Element::Electro => StatKind::ElectroResReduction,
            Element::Cryo => StatKind::CryoResReduction,
            Element::Anemo => StatKind::AnemoResReduction,
            Element::Geo => StatKind::GeoResReduction,
            Element::Dendro => StatKind::DendroResReduction,
            Element::Physical => StatKind::PhysicalResReduction,
        }
    }
}

/// Attack category, each with its own damage bonus stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Normal,
    Charged,
    Plunging,
    Skill,
    Burst,
}

impl DamageType {
    pub fn all() -> &'static [DamageType] {
        &[
            DamageType::Normal,
            DamageType::Charged,
            DamageType::Plunging,
            DamageType::Skill,
            DamageType::Burst,
        ]
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Result<Self, CalcError> {
        Self::all()
            .get(id as usize)
            .copied()
            .ok_or(CalcError::InvalidEnumValue {
                kind: "damage type",
                value: id.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            DamageType::Normal => "normal",
            DamageType::Charged => "charged",
            DamageType::Plunging => "plunging",
            DamageType::Skill => "skill",
            DamageType::Burst => "burst",
        }
    }

    pub fn dmg_bonus_stat(self) -> StatKind {
        match self {
            DamageType::Normal => StatKind::NormalAtkDmgBonus,
            DamageType::Charged => StatKind::ChargedAtkDmgBonus,
            DamageType::Plunging => StatKind::PlungeAtkDmgBonus,
            DamageType::Skill => StatKind::SkillDmgBonus,
            DamageType::Burst => StatKind::BurstDmgBonus,
        }
    }
}

/// Which total stat a motion value scales from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseScaling {
    Atk,
    Def,
    Hp,
}

impl BaseScaling {
    pub fn all() -> &'static [BaseScaling] {
        &[BaseScaling::Atk, BaseScaling::Def, BaseScaling::Hp]
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Result<Self, CalcError> {
        Self::all()
            .get(id as usize)
            .copied()
            .ok_or(CalcError::InvalidEnumValue {
                kind: "base scaling",
                value: id.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseScaling::Atk => "atk",
            BaseScaling::Def => "def",
            BaseScaling::Hp => "hp",
        }
    }
}

/// Amplifying reaction direction (vaporize/melt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amplifier {
    #[default]
    None,
    Forward,
    Reverse,
}

impl Amplifier {
    pub fn all() -> &'static [Amplifier] {
        &[Amplifier::None, Amplifier::Forward, Amplifier::Reverse]
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Result<Self, CalcError> {
        Self::all()
            .get(id as usize)
            .copied()
            .ok_or(CalcError::InvalidEnumValue {
                kind: "amplifier",
                value: id.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            Amplifier::None => "none",
            Amplifier::Forward => "forward",
            Amplifier::Reverse => "reverse",
        }
    }
}

/// Artifact rarity. Only 4★ and 5★ artifacts roll substats worth modeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    FourStar,
    FiveStar,
}

impl Rarity {
    pub fn all() -> &'static [Rarity] {
        &[Rarity::FourStar, Rarity::FiveStar]
    }

    pub fn stars(self) -> u32 {
        match self {
            Rarity::FourStar => 4,
            Rarity::FiveStar => 5,
        }
    }

    pub fn max_level(self) -> u32 {
        match self {
            Rarity::FourStar => 16,
            Rarity::FiveStar => 20,
        }
    }

    /// Ids are the star count.
    pub fn id(self) -> u32 {
        self.stars()
    }

    pub fn from_id(id: u32) -> Result<Self, CalcError> {
        match id {
            4 => Ok(Rarity::FourStar),
            5 => Ok(Rarity::FiveStar),
            _ => Err(CalcError::InvalidEnumValue {
                kind: "rarity",
                value: id.to_string(),
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rarity::FourStar => "four_star",
            Rarity::FiveStar => "five_star",
        }
    }
}

/// Artifact slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactSlot {
    Flower,
    Plume,
    Sands,
    Goblet,
    Circlet,
}

impl ArtifactSlot {
    pub fn all() -> &'static [ArtifactSlot] {
        &[
            ArtifactSlot::Flower,
            ArtifactSlot::Plume,
            ArtifactSlot::Sands,
            ArtifactSlot::Goblet,
            ArtifactSlot::Circlet,
        ]
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Result<Self, CalcError> {
        Self::all()
            .get(id as usize)
            .copied()
            .ok_or(CalcError::InvalidEnumValue {
                kind: "artifact slot",
                value: id.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            ArtifactSlot::Flower => "flower",
            ArtifactSlot::Plume => "plume",
            ArtifactSlot::Sands => "sands",
            ArtifactSlot::Goblet => "goblet",
            ArtifactSlot::Circlet => "circlet",
        }
    }

    /// Main stats this slot can carry
    pub fn main_stat_pool(self) -> &'static [StatKind] {
        use StatKind::*;
        match self {
            ArtifactSlot::Flower => &[FlatHp],
            ArtifactSlot::Plume => &[FlatAtk],
            ArtifactSlot::Sands => &[
                HpPercent,
                AtkPercent,
                DefPercent,
                ElementalMastery,
                EnergyRecharge,
            ],
            ArtifactSlot::Goblet => &[
                HpPercent,
                AtkPercent,
                DefPercent,
                ElementalMastery,
                PyroDmgBonus,
                HydroDmgBonus,
                ElectroDmgBonus,
                CryoDmgBonus,
                AnemoDmgBonus,
                GeoDmgBonus,
                DendroDmgBonus,
                PhysicalDmgBonus,
            ],
            ArtifactSlot::Circlet => &[
                HpPercent,
                AtkPercent,
                DefPercent,
                ElementalMastery,
                CritRate,
                CritDmg,
                HealingBonus,
            ],
        }
    }

    pub fn allows_main_stat(self, stat: StatKind) -> bool {
        self.main_stat_pool().contains(&stat)
    }
}

macro_rules! impl_name_traits {
    ($($ty:ident => $kind:literal),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl FromStr for $ty {
                type Err = CalcError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    parse_by_name($kind, s, $ty::all(), $ty::name, $ty::from_id)
                }
            }
        )*
    };
}

impl_name_traits! {
    Element => "element",
    DamageType => "damage type",
    BaseScaling => "base scaling",
    Amplifier => "amplifier",
    Rarity => "rarity",
    ArtifactSlot => "artifact slot",
}
