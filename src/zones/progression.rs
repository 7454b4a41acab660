//! Per-map kill counters, boss gating and unlocks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Catalog, MapDefinition};
use crate::core::error::ActionError;

/// Farming record for one map, created the first time it is entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapProgress {
    pub map_id: String,
    /// Normal kills since the last boss clear.
    pub kill_count: u32,
    /// Set by a boss kill and cleared at the start of the next tick.
    pub boss_defeated: bool,
    pub times_cleared: u32,
    pub auto_boss_spawn: bool,
}

impl MapProgress {
    pub fn new(map_id: impl Into<String>) -> Self {
        Self {
            map_id: map_id.into(),
            kill_count: 0,
            boss_defeated: false,
            times_cleared: 0,
            auto_boss_spawn: false,
        }
    }

    /// Enough kills to challenge the boss of `map`.
    pub fn boss_condition_met(&self, map: &MapDefinition) -> bool {
        self.kill_count >= map.kills_required && !self.boss_defeated
    }

    /// Auto-spawn only ever triggers after a manual clear.
    pub fn auto_boss_enabled(&self) -> bool {
        self.auto_boss_spawn && self.times_cleared > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTracker {
    progress: BTreeMap<String, MapProgress>,
    /// In unlock order.
    unlocked_map_ids: Vec<String>,
}

impl MapTracker {
    /// Unlocks every map that has no prerequisite.
    pub fn new(catalog: &Catalog) -> Self {
        let mut maps: Vec<&MapDefinition> = catalog
            .maps()
            .iter()
            .filter(|m| m.required_map_id.is_none())
            .collect();
        maps.sort_by_key(|m| m.order);
        Self {
            progress: BTreeMap::new(),
            unlocked_map_ids: maps.into_iter().map(|m| m.id.clone()).collect(),
        }
    }

    pub fn is_unlocked(&self, map_id: &str) -> bool {
        self.unlocked_map_ids.iter().any(|id| id == map_id)
    }

    pub fn unlocked_map_ids(&self) -> &[String] {
        &self.unlocked_map_ids
    }

    /// Returns true if the map was newly unlocked.
    pub fn unlock(&mut self, map_id: &str) -> bool {
        if self.is_unlocked(map_id) {
            return false;
        }
        self.unlocked_map_ids.push(map_id.to_string());
        true
    }

    pub fn progress(&self, map_id: &str) -> Option<&MapProgress> {
        self.progress.get(map_id)
    }

    /// Progress for `map_id`, created on first use.
    pub fn progress_mut(&mut self, map_id: &str) -> &mut MapProgress {
        self.progress
            .entry(map_id.to_string())
            .or_insert_with(|| MapProgress::new(map_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapProgress> {
        self.progress.values()
    }

    pub fn record_kill(&mut self, map_id: &str) -> u32 {
        let progress = self.progress_mut(map_id);
        progress.kill_count += 1;
        progress.kill_count
    }

    /// Clears the map's boss: counts the clear, restarts the kill counter and
    /// unlocks the next map. Returns the newly unlocked map, if any.
    pub fn record_boss_kill(&mut self, catalog: &Catalog, map_id: &str) -> Option<String> {
        let progress = self.progress_mut(map_id);
        progress.boss_defeated = true;
        progress.times_cleared += 1;
        progress.kill_count = 0;

        let next = catalog.next_map(map_id)?;
        let next_id = next.id.clone();
        self.unlock(&next_id).then_some(next_id)
    }

    /// Flips auto boss spawn for a map that has been cleared at least once.
    /// Returns the new setting.
    pub fn toggle_auto_boss_spawn(&mut self, map_id: &str) -> Result<bool, ActionError> {
        let progress = self
            .progress
            .get_mut(map_id)
            .filter(|p| p.times_cleared > 0)
            .ok_or(ActionError::AutoBossLocked)?;
        progress.auto_boss_spawn = !progress.auto_boss_spawn;
        Ok(progress.auto_boss_spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_first_map_starts_unlocked() {
        let catalog = Catalog::builtin();
        let tracker = MapTracker::new(&catalog);
        assert_eq!(tracker.unlocked_map_ids(), ["twilightBeach".to_string()]);
        assert!(!tracker.is_unlocked("tidalCaves"));
        assert!(tracker.progress("twilightBeach").is_none());
    }

    #[test]
    fn test_boss_condition_follows_kills() {
        let catalog = Catalog::builtin();
        let map = catalog.map("twilightBeach").unwrap();
        let mut tracker = MapTracker::new(&catalog);
        for _ in 0..map.kills_required - 1 {
            tracker.record_kill(&map.id);
        }
        assert!(!tracker.progress(&map.id).unwrap().boss_condition_met(map));
        tracker.record_kill(&map.id);
        assert!(tracker.progress(&map.id).unwrap().boss_condition_met(map));
    }

    #[test]
    fn test_boss_kill_unlocks_next_once() {
        let catalog = Catalog::builtin();
        let mut tracker = MapTracker::new(&catalog);
        tracker.record_kill("twilightBeach");
        assert_eq!(
            tracker.record_boss_kill(&catalog, "twilightBeach"),
            Some("tidalCaves".to_string())
        );
        let progress = tracker.progress("twilightBeach").unwrap();
        assert_eq!(progress.times_cleared, 1);
        assert_eq!(progress.kill_count, 0);
        assert!(progress.boss_defeated);
        assert!(tracker.is_unlocked("tidalCaves"));

        assert_eq!(tracker.record_boss_kill(&catalog, "twilightBeach"), None);
        assert_eq!(tracker.unlocked_map_ids().len(), 2);
    }

    #[test]
    fn test_auto_boss_needs_a_clear() {
        let catalog = Catalog::builtin();
        let mut tracker = MapTracker::new(&catalog);
        assert_eq!(
            tracker.toggle_auto_boss_spawn("twilightBeach"),
            Err(ActionError::AutoBossLocked)
        );
        tracker.progress_mut("twilightBeach");
        assert!(tracker.toggle_auto_boss_spawn("twilightBeach").is_err());

        tracker.record_boss_kill(&catalog, "twilightBeach");
        assert_eq!(tracker.toggle_auto_boss_spawn("twilightBeach"), Ok(true));
        assert!(tracker.progress("twilightBeach").unwrap().auto_boss_enabled());
        assert_eq!(tracker.toggle_auto_boss_spawn("twilightBeach"), Ok(false));
    }
}
