//! Stat identifiers and the additive stat table

mod kind;
mod table;

pub use kind::StatKind;
pub use table::StatTable;
