use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::constants::MELEE_RANGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageType {
    Physical,
    Fire,
    Cold,
    Lightning,
}

impl DamageType {
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Physical => "Physical",
            DamageType::Fire => "Fire",
            DamageType::Cold => "Cold",
            DamageType::Lightning => "Lightning",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonsterRarity {
    Normal,
    Magic,
    Rare,
    Boss,
}

/// Scaling applied on top of the level multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RarityMultipliers {
    pub life: f64,
    pub damage: f64,
    pub loot: f64,
    pub experience: f64,
}

impl MonsterRarity {
    pub fn name(&self) -> &'static str {
        match self {
            MonsterRarity::Normal => "Normal",
            MonsterRarity::Magic => "Magic",
            MonsterRarity::Rare => "Rare",
            MonsterRarity::Boss => "Boss",
        }
    }

    /// Target selection order, higher first.
    pub fn priority(&self) -> u8 {
        match self {
            MonsterRarity::Normal => 1,
            MonsterRarity::Magic => 2,
            MonsterRarity::Rare => 3,
            MonsterRarity::Boss => 4,
        }
    }

    pub fn multipliers(&self) -> RarityMultipliers {
        match self {
            MonsterRarity::Normal => RarityMultipliers {
                life: 1.0,
                damage: 1.0,
                loot: 1.0,
                experience: 1.0,
            },
            MonsterRarity::Magic => RarityMultipliers {
                life: 2.0,
                damage: 1.3,
                loot: 2.0,
                experience: 1.5,
            },
            MonsterRarity::Rare => RarityMultipliers {
                life: 4.0,
                damage: 1.6,
                loot: 4.0,
                experience: 2.5,
            },
            MonsterRarity::Boss => RarityMultipliers {
                life: 10.0,
                damage: 2.0,
                loot: 10.0,
                experience: 5.0,
            },
        }
    }

    /// Rarer monsters walk slower.
    pub fn move_speed_multiplier(&self) -> f64 {
        match self {
            MonsterRarity::Normal => 1.0,
            MonsterRarity::Magic => 0.9,
            MonsterRarity::Rare => 0.8,
            MonsterRarity::Boss => 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossSkillState {
    pub skill_id: String,
    /// Seconds until ready, 0 = ready.
    pub current_cooldown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub id: Uuid,
    pub definition_id: String,
    pub name: String,
    pub level: u32,
    pub rarity: MonsterRarity,

    pub max_life: f64,
    pub current_life: f64,
    pub damage: f64,
    /// Attacks per second.
    pub attack_speed: f64,
    pub damage_type: DamageType,

    pub experience_reward: f64,
    pub loot_bonus: f64,

    pub position_index: usize,
    /// 100 at spawn, 0 when touching the player.
    pub distance: f64,
    pub move_speed: f64,
    pub attack_cooldown: f64,

    pub bleed_dps: f64,
    pub bleed_remaining_duration: f64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skill_states: Vec<BossSkillState>,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.current_life > 0.0
    }

    pub fn is_boss(&self) -> bool {
        self.rarity == MonsterRarity::Boss
    }

    pub fn is_in_melee_range(&self) -> bool {
        self.distance <= MELEE_RANGE
    }

    pub fn has_active_bleed(&self) -> bool {
        self.bleed_remaining_duration > 0.0 && self.bleed_dps > 0.0
    }

    /// Applies a bleed, replacing the current one only when the new DPS is
    /// higher. Bleeds never stack.
    pub fn apply_bleed(&mut self, dps: f64, duration: f64) -> bool {
        if self.has_active_bleed() && dps <= self.bleed_dps {
            return false;
        }
        self.bleed_dps = dps;
        self.bleed_remaining_duration = duration;
        true
    }

    /// Burns one tick of bleed. Returns the damage dealt.
    pub fn tick_bleed(&mut self, delta_time: f64) -> f64 {
        if !self.has_active_bleed() {
            return 0.0;
        }
        let damage = self.bleed_dps * delta_time;
        self.current_life -= damage;
        self.bleed_remaining_duration = (self.bleed_remaining_duration - delta_time).max(0.0);
        if self.bleed_remaining_duration <= 0.0 {
            self.bleed_dps = 0.0;
        }
        damage
    }

    pub fn walk(&mut self, delta_time: f64) {
        if self.distance > 0.0 {
            self.distance = (self.distance - self.move_speed * delta_time).max(0.0);
        }
    }

    /// Decays the basic attack cooldown and every boss skill cooldown.
    pub fn decay_cooldowns(&mut self, delta_time: f64) {
        self.attack_cooldown = (self.attack_cooldown - delta_time).max(0.0);
        for state in &mut self.skill_states {
            state.current_cooldown = (state.current_cooldown - delta_time).max(0.0);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// A normal physical monster already standing next to the player.
    pub fn monster_in_range(max_life: f64, experience_reward: f64) -> Monster {
        Monster {
            id: Uuid::nil(),
            definition_id: "drownedZombie".to_string(),
            name: "Drowned Zombie".to_string(),
            level: 1,
            rarity: MonsterRarity::Normal,
            max_life,
            current_life: max_life,
            damage: 1.0,
            attack_speed: 0.6,
            damage_type: DamageType::Physical,
            experience_reward,
            loot_bonus: 1.0,
            position_index: 0,
            distance: 0.0,
            move_speed: 35.0,
            attack_cooldown: 0.0,
            bleed_dps: 0.0,
            bleed_remaining_duration: 0.0,
            skill_states: Vec::new(),
        }
    }
}
