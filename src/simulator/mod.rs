//! Headless balance simulator.
//!
//! Drives [`crate::Game`] with a scripted player (farm the deepest unlocked
//! map, fight the boss when ready, wear better drops, level gems) and
//! aggregates many seeded runs into a [`SimReport`].

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, RunStats};
