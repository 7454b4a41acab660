//! The player character, its stats and its level curve.

pub mod player;
pub mod progression;
pub mod stats;

pub use player::*;
pub use progression::*;
pub use stats::*;
