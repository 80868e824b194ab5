//! StatKind - The closed set of stat identifiers and their metadata

use crate::error::CalcError;
use crate::types::{normalize_name, DamageType, Element};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every stat a character, weapon, artifact or buff can contribute.
///
/// The discriminant is the stable integer code used when a table is
/// serialized. Code 29 is reserved and never maps to a stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum StatKind {
    BaseHp = 0,
    FlatHp = 1,
    HpPercent = 2,
    BaseAtk = 3,
    FlatAtk = 4,
    AtkPercent = 5,
    BaseDef = 6,
    FlatDef = 7,
    DefPercent = 8,
    ElementalMastery = 9,
    CritRate = 10,
    CritDmg = 11,
    EnergyRecharge = 12,
    DmgBonus = 13,
    ElementalDmgBonus = 14,
    PyroDmgBonus = 15,
    CryoDmgBonus = 16,
    GeoDmgBonus = 17,
    DendroDmgBonus = 18,
    ElectroDmgBonus = 19,
    HydroDmgBonus = 20,
    AnemoDmgBonus = 21,
    PhysicalDmgBonus = 22,
    NormalAtkDmgBonus = 23,
    ChargedAtkDmgBonus = 24,
    PlungeAtkDmgBonus = 25,
    SkillDmgBonus = 26,
    BurstDmgBonus = 27,
    HealingBonus = 28,
    ReactionBonus = 30,
    DefReduction = 31,
    DefIgnore = 32,
    PyroResReduction = 33,
    HydroResReduction = 34,
    ElectroResReduction = 35,
    CryoResReduction = 36,
    AnemoResReduction = 37,
    GeoResReduction = 38,
    DendroResReduction = 39,
    PhysicalResReduction = 40,
}

use StatKind::*;

const ALL_STATS: [StatKind; 40] = [
    BaseHp,
    FlatHp,
    HpPercent,
    BaseAtk,
    FlatAtk,
    AtkPercent,
    BaseDef,
    FlatDef,
    DefPercent,
    ElementalMastery,
    CritRate,
    CritDmg,
    EnergyRecharge,
    DmgBonus,
    ElementalDmgBonus,
    PyroDmgBonus,
    CryoDmgBonus,
    GeoDmgBonus,
    DendroDmgBonus,
    ElectroDmgBonus,
    HydroDmgBonus,
    AnemoDmgBonus,
    PhysicalDmgBonus,
    NormalAtkDmgBonus,
    ChargedAtkDmgBonus,
    PlungeAtkDmgBonus,
    SkillDmgBonus,
    BurstDmgBonus,
    HealingBonus,
    ReactionBonus,
    DefReduction,
    DefIgnore,
    PyroResReduction,
    HydroResReduction,
    ElectroResReduction,
    CryoResReduction,
    AnemoResReduction,
    GeoResReduction,
    DendroResReduction,
    PhysicalResReduction,
];

/// Stats that can appear as artifact substats
const SUBSTATS: [StatKind; 10] = [
    HpPercent,
    FlatHp,
    AtkPercent,
    FlatAtk,
    DefPercent,
    FlatDef,
    ElementalMastery,
    CritRate,
    CritDmg,
    EnergyRecharge,
];

impl StatKind {
    /// All stats in ascending code order
    pub fn all() -> &'static [StatKind] {
        &ALL_STATS
    }

    /// The substat pool, in the order rolls are usually listed
    pub fn substats() -> &'static [StatKind] {
        &SUBSTATS
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn from_code(code: u32) -> Result<Self, CalcError> {
        ALL_STATS
            .iter()
            .copied()
            .find(|s| s.code() == code)
            .ok_or(CalcError::InvalidEnumValue {
                kind: "stat",
                value: code.to_string(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseHp => "base_hp",
            FlatHp => "flat_hp",
            HpPercent => "hp_percent",
            BaseAtk => "base_atk",
            FlatAtk => "flat_atk",
            AtkPercent => "atk_percent",
            BaseDef => "base_def",
            FlatDef => "flat_def",
            DefPercent => "def_percent",
            ElementalMastery => "elemental_mastery",
            CritRate => "crit_rate",
            CritDmg => "crit_dmg",
            EnergyRecharge => "energy_recharge",
            DmgBonus => "dmg_bonus",
            ElementalDmgBonus => "elemental_dmg_bonus",
            PyroDmgBonus => "pyro_dmg_bonus",
            CryoDmgBonus => "cryo_dmg_bonus",
            GeoDmgBonus => "geo_dmg_bonus",
            DendroDmgBonus => "dendro_dmg_bonus",
            ElectroDmgBonus => "electro_dmg_bonus",
            HydroDmgBonus => "hydro_dmg_bonus",
            AnemoDmgBonus => "anemo_dmg_bonus",
            PhysicalDmgBonus => "physical_dmg_bonus",
            NormalAtkDmgBonus => "normal_atk_dmg_bonus",
            ChargedAtkDmgBonus => "charged_atk_dmg_bonus",
            PlungeAtkDmgBonus => "plunge_atk_dmg_bonus",
            SkillDmgBonus => "skill_dmg_bonus",
            BurstDmgBonus => "burst_dmg_bonus",
            HealingBonus => "healing_bonus",
            ReactionBonus => "reaction_bonus",
            DefReduction => "def_reduction",
            DefIgnore => "def_ignore",
            PyroResReduction => "pyro_res_reduction",
            HydroResReduction => "hydro_res_reduction",
            ElectroResReduction => "electro_res_reduction",
            CryoResReduction => "cryo_res_reduction",
            AnemoResReduction => "anemo_res_reduction",
            GeoResReduction => "geo_res_reduction",
            DendroResReduction => "dendro_res_reduction",
            PhysicalResReduction => "physical_res_reduction",
        }
    }

    /// Parse a stat from its name or its integer code.
    ///
    /// Matching ignores case, whitespace and punctuation, and reads `%`
    /// as `percent`, so `"ATK%"`, `"atk_percent"` and `"5"` all resolve
    /// to [`StatKind::AtkPercent`].
    pub fn from_name(input: &str) -> Result<Self, CalcError> {
        if let Ok(code) = input.trim().parse::<u32>() {
            return Self::from_code(code);
        }
        let wanted = normalize_name(input);
        ALL_STATS
            .iter()
            .copied()
            .find(|s| normalize_name(s.name()) == wanted)
            .ok_or_else(|| CalcError::InvalidEnumValue {
                kind: "stat",
                value: input.to_string(),
            })
    }

    /// Whether the value is a fraction (0.466 = 46.6%) rather than a flat amount
    pub fn is_percentage(self) -> bool {
        !matches!(
            self,
            BaseHp | FlatHp | BaseAtk | FlatAtk | BaseDef | FlatDef | ElementalMastery
        )
    }

    /// The generic elemental bonus or one of the eight per-element bonuses
    pub fn is_elemental_dmg_bonus(self) -> bool {
        self == ElementalDmgBonus || (self.element().is_some() && !self.is_res_reduction())
    }

    pub fn is_res_reduction(self) -> bool {
        matches!(
            self,
            PyroResReduction
                | HydroResReduction
                | ElectroResReduction
                | CryoResReduction
                | AnemoResReduction
                | GeoResReduction
                | DendroResReduction
                | PhysicalResReduction
        )
    }

    pub fn is_substat(self) -> bool {
        SUBSTATS.contains(&self)
    }

    /// Element this stat is tied to, for per-element bonuses and shred
    pub fn element(self) -> Option<Element> {
        match self {
            PyroDmgBonus | PyroResReduction => Some(Element::Pyro),
            HydroDmgBonus | HydroResReduction => Some(Element::Hydro),
            ElectroDmgBonus | ElectroResReduction => Some(Element::Electro),
            CryoDmgBonus | CryoResReduction => Some(Element::Cryo),
            AnemoDmgBonus | AnemoResReduction => Some(Element::Anemo),
            GeoDmgBonus | GeoResReduction => Some(Element::Geo),
            DendroDmgBonus | DendroResReduction => Some(Element::Dendro),
            PhysicalDmgBonus | PhysicalResReduction => Some(Element::Physical),
            _ => None,
        }
    }

    /// Damage type gated by this stat
    pub fn damage_type(self) -> Option<DamageType> {
        match self {
            NormalAtkDmgBonus => Some(DamageType::Normal),
            ChargedAtkDmgBonus => Some(DamageType::Charged),
            PlungeAtkDmgBonus => Some(DamageType::Plunging),
            SkillDmgBonus => Some(DamageType::Skill),
            BurstDmgBonus => Some(DamageType::Burst),
            _ => None,
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKind::from_name(s)
    }
}
