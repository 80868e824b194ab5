//! Amplifying reaction multiplier
//!
//! multiplier = base(direction) * (1 + scaling * em / (em + offset) + reaction_bonus)
//!
//! Forward (e.g. hydro on pyro vaporize) and reverse reactions differ only
//! in their base. The EM term approaches `scaling` but never reaches it.

use crate::config::{GameData, ReactionConstants};
use crate::types::Amplifier;

#[derive(Debug, Clone, PartialEq)]
pub struct ReactionAmplifierTable {
    constants: ReactionConstants,
}

impl Default for ReactionAmplifierTable {
    fn default() -> Self {
        ReactionAmplifierTable::new(GameData::bundled().reaction.clone())
    }
}

impl ReactionAmplifierTable {
    pub fn new(constants: ReactionConstants) -> Self {
        ReactionAmplifierTable { constants }
    }

    /// Multiplier at zero EM and no reaction bonus
    pub fn base_multiplier(&self, amplifier: Amplifier) -> f64 {
        match amplifier {
            Amplifier::None => 1.0,
            Amplifier::Forward => self.constants.forward_multiplier,
            Amplifier::Reverse => self.constants.reverse_multiplier,
        }
    }

    /// EM contribution to the reaction bonus. Negative EM counts as zero.
    pub fn em_bonus(&self, elemental_mastery: f64) -> f64 {
        let em = elemental_mastery.max(0.0);
        self.constants.em_scaling * em / (em + self.constants.em_offset)
    }

    pub fn multiplier(&self, amplifier: Amplifier, elemental_mastery: f64, reaction_bonus: f64) -> f64 {
        match amplifier {
            Amplifier::None => 1.0,
            Amplifier::Forward | Amplifier::Reverse => {
                self.base_multiplier(amplifier)
                    * (1.0 + self.em_bonus(elemental_mastery) + reaction_bonus)
            }
        }
    }

    /// Limit of [`ReactionAmplifierTable::multiplier`] as EM grows without bound
    pub fn asymptote(&self, amplifier: Amplifier, reaction_bonus: f64) -> f64 {
        match amplifier {
            Amplifier::None => 1.0,
            _ => self.base_multiplier(amplifier) * (1.0 + self.constants.em_scaling + reaction_bonus),
        }
    }
}
