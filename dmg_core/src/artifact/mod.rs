//! Artifact simulation: roll qualities and the budgeted builder

mod builder;
mod roll_quality;

pub use builder::{ArtifactBuilder, ArtifactPiece};
pub use roll_quality::{RollQuality, RollQualityTable};
