//! Error types for rejected player intents and catalog loading.

use thiserror::Error;

use crate::items::types::{CurrencyType, EquipmentSlot};

/// Reasons an inbound intent was refused. A rejected intent never mutates
/// game state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("unknown definition: {0}")]
    UnknownDefinition(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("Not enough {}! Need {needed}, have {available}.", .currency.name())]
    InsufficientCurrency {
        currency: CurrencyType,
        needed: u32,
        available: u32,
    },

    #[error("Requires character level {required} (you are level {current}).")]
    LevelRequirement { required: u32, current: u32 },

    #[error("You already know {0}.")]
    AlreadyKnown(String),

    #[error("{0} cannot be bought.")]
    NotPurchasable(String),

    #[error("Inventory full!")]
    InventoryFull,

    #[error("{item} cannot be equipped in the {slot_name} slot.", slot_name = .slot.name())]
    IncompatibleSlot { item: String, slot: EquipmentSlot },

    #[error("{support} cannot support {skill}.")]
    IncompatibleSupport { support: String, skill: String },

    #[error("No free support socket on {0}.")]
    NoFreeSocket(String),

    #[error("{0} already has the maximum number of sockets.")]
    SocketLimit(String),

    #[error("{0} is already linked to this skill.")]
    SupportAlreadyLinked(String),

    #[error("Every owned {0} is already linked to a skill.")]
    NoFreeSupportGem(String),

    #[error("{name} needs more experience to reach level {next_level}.")]
    NotEnoughGemExperience { name: String, next_level: u32 },

    #[error("{0} is already at maximum level.")]
    MaxGemLevel(String),

    #[error("No skill in that slot.")]
    EmptySkillSlot,

    #[error("Skill slot {0} does not exist.")]
    InvalidSkillSlot(usize),

    #[error("The skill bar is full.")]
    SkillBarFull,

    #[error("The boss is not ready yet.")]
    BossNotReady,

    #[error("Defeat the boss once before enabling auto-spawn.")]
    AutoBossLocked,

    #[error("{0} is locked.")]
    MapLocked(String),

    #[error("Not in a map.")]
    NotInMap,
}

impl ActionError {
    /// Silent errors are unknown-id lookups. They are returned to the caller
    /// but never narrated in the combat log.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            ActionError::UnknownDefinition(_) | ActionError::NotFound(_)
        )
    }
}

/// Errors raised while loading or validating a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{owner} references unknown {kind} {id}")]
    DanglingReference {
        owner: String,
        kind: &'static str,
        id: String,
    },
}

/// Errors raised while parsing an engine configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
