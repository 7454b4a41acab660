//! Engine state, the combat tick and the intents that drive it.

pub mod actions;
pub mod combat_log;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod game_state;
pub mod tick;

pub use combat_log::{CombatLog, CombatLogEntry, LogKind};
pub use config::EngineConfig;
pub use error::{ActionError, CatalogError, ConfigError};
pub use game::Game;
pub use game_state::{CombatState, GameState};
pub use tick::{TickEvent, TickOutcome};
