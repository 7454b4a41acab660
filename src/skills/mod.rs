//! Skill gems: runtime resolution and gem progression.

pub mod gems;
pub mod runtime;

pub use gems::*;
pub use runtime::*;
