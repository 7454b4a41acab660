//! Exile - combat and progression core of an incremental action RPG.
//!
//! The engine is a fixed-timestep state machine: the host calls
//! [`Game::tick`] while fighting and dispatches intents such as
//! [`Game::select_map`] or [`Game::equip_item`] in between. Every roll takes
//! an explicit RNG so seeded runs are reproducible.

pub mod catalog;
pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod simulator;
pub mod skills;
pub mod utils;
pub mod zones;

pub use crate::catalog::Catalog;
pub use crate::core::{ActionError, EngineConfig, Game, GameState, TickEvent, TickOutcome};
