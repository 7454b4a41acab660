//! Monsters, spawning and hit resolution.

pub mod math;
pub mod spawn;
pub mod types;

pub use math::*;
pub use spawn::*;
pub use types::*;
