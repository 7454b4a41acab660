//! Map progression: kill counters, boss gating and unlocks.

pub mod progression;

pub use progression::{MapProgress, MapTracker};
