//! Player-facing narrative of what happened inside ticks and intents.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::constants::COMBAT_LOG_CAPACITY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogKind {
    PlayerHit,
    MonsterHit,
    PlayerCrit,
    MonsterDeath,
    PlayerDeath,
    Loot,
    LevelUp,
    Evade,
    Block,
    SkillUse,
    /// Rejected intents and other system messages.
    Notice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub id: u64,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub kind: LogKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Bounded log, newest entry first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: VecDeque<CombatLogEntry>,
    capacity: usize,
    next_id: u64,
}

impl Default for CombatLog {
    fn default() -> Self {
        Self::new(COMBAT_LOG_CAPACITY)
    }
}

impl CombatLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>, value: Option<f64>) {
        let entry = CombatLogEntry {
            id: self.next_id,
            timestamp: chrono::Utc::now().timestamp_millis(),
            kind,
            message: message.into(),
            value,
        };
        self.next_id += 1;
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    pub fn add(&mut self, kind: LogKind, message: impl Into<String>) {
        self.push(kind, message, None);
    }

    pub fn add_value(&mut self, kind: LogKind, message: impl Into<String>, value: f64) {
        self.push(kind, message, Some(value));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = CombatLog::new(10);
        log.add(LogKind::PlayerHit, "first");
        log.add(LogKind::MonsterHit, "second");
        let messages: Vec<_> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(log.iter().next().map(|e| e.id), Some(1));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = CombatLog::default();
        for i in 0..60 {
            log.add_value(LogKind::Loot, format!("entry {}", i), i as f64);
        }
        assert_eq!(log.len(), 50);
        assert_eq!(log.iter().next().map(|e| e.message.as_str()), Some("entry 59"));
        assert_eq!(log.iter().last().map(|e| e.message.as_str()), Some("entry 10"));
    }

    #[test]
    fn test_clear_keeps_ids_monotonic() {
        let mut log = CombatLog::new(5);
        log.add(LogKind::Notice, "a");
        log.clear();
        assert!(log.is_empty());
        log.add(LogKind::Notice, "b");
        assert_eq!(log.iter().next().map(|e| e.id), Some(1));
    }
}
