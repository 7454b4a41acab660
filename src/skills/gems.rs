//! Gem experience tables and level gating, shared by skill and support gems.

use crate::core::error::ActionError;

/// Cumulative experience a gem needs to *be* each level. Index 0 is level 1.
pub const GEM_TOTAL_EXPERIENCE_BY_LEVEL: [f64; 20] = [
    0.0,
    15249.0,
    56766.0,
    138749.0,
    286717.0,
    537274.0,
    942360.0,
    1390078.0,
    2005396.0,
    2840035.0,
    4410795.0,
    6044782.0,
    8195812.0,
    11008001.0,
    16107361.0,
    25508092.0,
    40781458.0,
    67068040.0,
    129958630.0,
    342004647.0,
];

fn table_or_default(table: &[f64]) -> &[f64] {
    if table.is_empty() {
        &GEM_TOTAL_EXPERIENCE_BY_LEVEL
    } else {
        table
    }
}

/// Threshold for the level after `level`, `None` at the cap.
pub fn gem_next_level_total_experience(level: u32, table: &[f64]) -> Option<f64> {
    table_or_default(table).get(level as usize).copied()
}

pub fn can_gem_level_up(level: u32, experience: f64, table: &[f64]) -> bool {
    gem_next_level_total_experience(level, table).is_some_and(|next| experience >= next)
}

/// Character level needed to hold a gem at `gem_level`.
pub fn gem_required_character_level(
    gem_level: u32,
    base_required_level: u32,
    by_gem_level: &[u32],
) -> u32 {
    if gem_level <= 1 {
        return by_gem_level.first().copied().unwrap_or(base_required_level);
    }
    if by_gem_level.is_empty() {
        return base_required_level;
    }
    let index = (gem_level as usize - 1).min(by_gem_level.len() - 1);
    by_gem_level[index]
}

/// Everything a gem needs to level up, as one gate.
pub struct GemLevelCheck<'a> {
    pub name: &'a str,
    pub level: u32,
    pub experience: f64,
    pub experience_table: &'a [f64],
    pub base_required_level: u32,
    pub required_level_table: &'a [u32],
}

impl GemLevelCheck<'_> {
    /// Returns the next gem level if the upgrade is allowed.
    pub fn next_level(&self, character_level: u32) -> Result<u32, ActionError> {
        if gem_next_level_total_experience(self.level, self.experience_table).is_none() {
            return Err(ActionError::MaxGemLevel(self.name.to_string()));
        }
        let next_level = self.level + 1;
        let required = gem_required_character_level(
            next_level,
            self.base_required_level,
            self.required_level_table,
        );
        if character_level < required {
            return Err(ActionError::LevelRequirement {
                required,
                current: character_level,
            });
        }
        if !can_gem_level_up(self.level, self.experience, self.experience_table) {
            return Err(ActionError::NotEnoughGemExperience {
                name: self.name.to_string(),
                next_level,
            });
        }
        Ok(next_level)
    }
}
