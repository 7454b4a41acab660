//! The persistent character: resources, gear, flasks, gems and wallet.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use super::progression::experience_for_level;
use super::stats::{compute_effective_stats, EffectiveStats, PlayerStats};
use crate::catalog::Catalog;
use crate::core::constants::*;
use crate::core::error::ActionError;
use crate::items::equipment::Equipment;
use crate::items::types::{CurrencyType, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlaskType {
    Life,
    Mana,
    Hybrid,
}

impl FlaskType {
    pub fn restores_life(&self) -> bool {
        matches!(self, FlaskType::Life | FlaskType::Hybrid)
    }

    pub fn restores_mana(&self) -> bool {
        matches!(self, FlaskType::Mana | FlaskType::Hybrid)
    }
}

/// A charge-based potion that restores its amount evenly over `duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flask {
    pub id: String,
    pub name: String,
    pub flask_type: FlaskType,
    pub life_restore: f64,
    pub mana_restore: f64,
    pub duration: f64,
    pub max_charges: u32,
    pub current_charges: u32,
    pub charges_per_use: u32,
    pub charges_on_kill: u32,
    pub is_active: bool,
    pub remaining_duration: f64,
}

impl Flask {
    pub fn small_life() -> Self {
        Self {
            id: "smallLifeFlask".to_string(),
            name: "Small Life Flask".to_string(),
            flask_type: FlaskType::Life,
            life_restore: 60.0,
            mana_restore: 0.0,
            duration: 3.0,
            max_charges: 3,
            current_charges: 3,
            charges_per_use: 1,
            charges_on_kill: 1,
            is_active: false,
            remaining_duration: 0.0,
        }
    }

    pub fn small_mana() -> Self {
        Self {
            id: "smallManaFlask".to_string(),
            name: "Small Mana Flask".to_string(),
            flask_type: FlaskType::Mana,
            life_restore: 0.0,
            mana_restore: 40.0,
            ..Self::small_life()
        }
    }

    pub fn can_use(&self) -> bool {
        !self.is_active && self.current_charges >= self.charges_per_use
    }

    /// Spends charges and starts the restore. Returns false if unusable.
    pub fn activate(&mut self) -> bool {
        if !self.can_use() {
            return false;
        }
        self.current_charges -= self.charges_per_use;
        self.is_active = true;
        self.remaining_duration = self.duration;
        true
    }

    /// Advances an active flask, returning the (life, mana) restored this step.
    pub fn tick(&mut self, delta_time: f64) -> (f64, f64) {
        if !self.is_active {
            return (0.0, 0.0);
        }
        let share = if self.duration > 0.0 {
            delta_time.min(self.remaining_duration) / self.duration
        } else {
            1.0
        };
        self.remaining_duration -= delta_time;
        if self.remaining_duration <= 0.0 {
            self.is_active = false;
            self.remaining_duration = 0.0;
        }
        (self.life_restore * share, self.mana_restore * share)
    }

    pub fn add_charges(&mut self, charges: u32) {
        self.current_charges = (self.current_charges + charges).min(self.max_charges);
    }

    pub fn refill(&mut self) {
        self.current_charges = self.max_charges;
        self.is_active = false;
        self.remaining_duration = 0.0;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSkill {
    pub definition_id: String,
    pub level: u32,
    /// Cumulative, never reset.
    pub experience: f64,
    pub current_cooldown: f64,
    /// Auto-use toggle.
    pub is_active: bool,
    pub max_support_sockets: u32,
    pub socketed_support_ids: Vec<Uuid>,
}

impl PlayerSkill {
    pub fn new(definition_id: impl Into<String>) -> Self {
        Self {
            definition_id: definition_id.into(),
            level: 1,
            experience: 0.0,
            current_cooldown: 0.0,
            is_active: true,
            max_support_sockets: STARTING_SUPPORT_SOCKETS,
            socketed_support_ids: Vec::new(),
        }
    }

    pub fn has_free_socket(&self) -> bool {
        (self.socketed_support_ids.len() as u32) < self.max_support_sockets
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSupportGem {
    pub instance_id: Uuid,
    pub definition_id: String,
    pub level: u32,
    pub experience: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub experience: f64,
    pub experience_to_next_level: f64,
    pub current_life: f64,
    pub current_mana: f64,
    pub stats: PlayerStats,
    pub equipment: Equipment,
    pub flasks: [Option<Flask>; FLASK_SLOTS],
    /// The skill bar.
    pub skills: [Option<PlayerSkill>; SKILL_BAR_SIZE],
    pub inactive_skills: Vec<PlayerSkill>,
    pub support_gems: Vec<PlayerSupportGem>,
    pub inventory: Vec<Item>,
    pub inventory_size: usize,
    pub currency: BTreeMap<CurrencyType, u32>,
}

impl Player {
    /// A level 1 character with Strike, two flasks and a small wallet.
    pub fn new(name: impl Into<String>) -> Self {
        let mut player = Self {
            name: name.into(),
            level: 1,
            experience: 0.0,
            experience_to_next_level: experience_for_level(1),
            current_life: 0.0,
            current_mana: 0.0,
            stats: PlayerStats::default(),
            equipment: Equipment::new(),
            flasks: Default::default(),
            skills: Default::default(),
            inactive_skills: Vec::new(),
            support_gems: Vec::new(),
            inventory: Vec::new(),
            inventory_size: DEFAULT_INVENTORY_SIZE,
            currency: starting_currency(),
        };
        player.flasks[0] = Some(Flask::small_life());
        player.flasks[1] = Some(Flask::small_mana());
        player.skills[0] = Some(PlayerSkill::new(DEFAULT_ATTACK_SKILL_ID));
        player.restore_full(&compute_effective_stats(&player));
        player
    }

    /// A fresh character whose skill bar holds the catalog's starter skills.
    pub fn starter(name: impl Into<String>, catalog: &Catalog) -> Self {
        let mut player = Self::new(name);
        let starters = catalog
            .starter_skill_ids()
            .iter()
            .filter(|id| catalog.skill(id).is_some())
            .take(SKILL_BAR_SIZE);
        let mut bar: [Option<PlayerSkill>; SKILL_BAR_SIZE] = Default::default();
        for (slot, id) in bar.iter_mut().zip(starters) {
            *slot = Some(PlayerSkill::new(id.as_str()));
        }
        if bar.iter().flatten().count() > 0 {
            player.skills = bar;
        }
        player
    }

    pub fn life_percent(&self, effective: &EffectiveStats) -> f64 {
        let max = effective.max_life();
        if max > 0.0 {
            self.current_life / max
        } else {
            0.0
        }
    }

    pub fn mana_percent(&self, effective: &EffectiveStats) -> f64 {
        let max = effective.max_mana();
        if max > 0.0 {
            self.current_mana / max
        } else {
            0.0
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current_life <= 0.0
    }

    pub fn clamp_resources(&mut self, effective: &EffectiveStats) {
        self.current_life = self.current_life.clamp(0.0, effective.max_life().max(0.0));
        self.current_mana = self.current_mana.clamp(0.0, effective.max_mana().max(0.0));
    }

    pub fn restore_full(&mut self, effective: &EffectiveStats) {
        self.current_life = effective.max_life();
        self.current_mana = effective.max_mana();
    }

    pub fn heal(&mut self, amount: f64, effective: &EffectiveStats) {
        self.current_life = (self.current_life + amount).min(effective.max_life());
    }

    pub fn restore_mana(&mut self, amount: f64, effective: &EffectiveStats) {
        self.current_mana = (self.current_mana + amount).min(effective.max_mana());
    }

    // ── Skills and gems ─────────────────────────────────────────

    /// True if the skill sits on the bar or in the inactive pool.
    pub fn knows_skill(&self, definition_id: &str) -> bool {
        self.skills
            .iter()
            .flatten()
            .chain(self.inactive_skills.iter())
            .any(|s| s.definition_id == definition_id)
    }

    pub fn first_empty_skill_slot(&self) -> Option<usize> {
        self.skills.iter().position(Option::is_none)
    }

    /// Support gem instances socketed into any skill, bar or inactive.
    pub fn linked_support_ids(&self) -> HashSet<Uuid> {
        self.skills
            .iter()
            .flatten()
            .chain(self.inactive_skills.iter())
            .flat_map(|s| s.socketed_support_ids.iter().copied())
            .collect()
    }

    pub fn support_gem(&self, instance_id: Uuid) -> Option<&PlayerSupportGem> {
        self.support_gems.iter().find(|g| g.instance_id == instance_id)
    }

    pub fn support_gem_mut(&mut self, instance_id: Uuid) -> Option<&mut PlayerSupportGem> {
        self.support_gems
            .iter_mut()
            .find(|g| g.instance_id == instance_id)
    }

    /// Supports socketed into `skill`, in socket order.
    pub fn supports_for(&self, skill: &PlayerSkill) -> Vec<&PlayerSupportGem> {
        skill
            .socketed_support_ids
            .iter()
            .filter_map(|id| self.support_gem(*id))
            .collect()
    }

    /// Every equipped skill gem and every support linked to one gains `amount`.
    pub fn grant_gem_experience(&mut self, amount: f64) {
        let mut linked = HashSet::new();
        for skill in self.skills.iter_mut().flatten() {
            skill.experience += amount;
            linked.extend(skill.socketed_support_ids.iter().copied());
        }
        for gem in &mut self.support_gems {
            if linked.contains(&gem.instance_id) {
                gem.experience += amount;
            }
        }
    }

    // ── Wallet ──────────────────────────────────────────────────

    pub fn currency_amount(&self, currency: CurrencyType) -> u32 {
        self.currency.get(&currency).copied().unwrap_or(0)
    }

    pub fn add_currency(&mut self, currency: CurrencyType, amount: u32) {
        *self.currency.entry(currency).or_insert(0) += amount;
    }

    pub fn has_currency(&self, currency: CurrencyType, amount: u32) -> Result<(), ActionError> {
        let available = self.currency_amount(currency);
        if available < amount {
            return Err(ActionError::InsufficientCurrency {
                currency,
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    pub fn spend_currency(
        &mut self,
        currency: CurrencyType,
        amount: u32,
    ) -> Result<(), ActionError> {
        self.has_currency(currency, amount)?;
        *self.currency.entry(currency).or_insert(0) -= amount;
        Ok(())
    }

    // ── Inventory ───────────────────────────────────────────────

    pub fn has_inventory_space(&self) -> bool {
        self.inventory.len() < self.inventory_size
    }

    /// Stores an item, handing it back when the inventory is full.
    pub fn store_item(&mut self, item: Item) -> Result<(), Item> {
        if !self.has_inventory_space() {
            return Err(item);
        }
        self.inventory.push(item);
        Ok(())
    }

    pub fn take_inventory_item(&mut self, item_id: Uuid) -> Option<Item> {
        let index = self.inventory.iter().position(|i| i.id == item_id)?;
        Some(self.inventory.remove(index))
    }
}

fn starting_currency() -> BTreeMap<CurrencyType, u32> {
    CurrencyType::ALL
        .iter()
        .map(|&c| {
            let amount = match c {
                CurrencyType::Transmutation => 5,
                CurrencyType::Alteration => 5,
                CurrencyType::Augmentation => 2,
                CurrencyType::Alchemy => 1,
                CurrencyType::Scouring => 1,
                _ => 0,
            };
            (c, amount)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_player_starts_full() {
        let player = Player::new("Exile");
        let eff = compute_effective_stats(&player);
        assert_eq!(player.level, 1);
        assert_eq!(player.experience_to_next_level, 525.0);
        assert_eq!(player.current_life, eff.max_life());
        assert_eq!(player.current_mana, eff.max_mana());
        assert_eq!(player.currency_amount(CurrencyType::Transmutation), 5);
        assert_eq!(player.currency_amount(CurrencyType::SocketOrb), 0);
        assert!(player.knows_skill(DEFAULT_ATTACK_SKILL_ID));
    }

    #[test]
    fn test_starter_skill_bar() {
        let player = Player::starter("Exile", &Catalog::builtin());
        let ids: Vec<_> = player
            .skills
            .iter()
            .flatten()
            .map(|s| s.definition_id.as_str())
            .collect();
        assert_eq!(ids, vec!["defaultAttack", "heavyStrike", "doubleStrike"]);
        assert_eq!(player.first_empty_skill_slot(), Some(3));
        assert!(player.skills.iter().flatten().all(|s| s.is_active));
    }

    #[test]
    fn test_flask_restores_over_duration() {
        let mut flask = Flask::small_life();
        assert!(flask.activate());
        assert_eq!(flask.current_charges, 2);
        assert!(!flask.can_use());

        let mut restored = 0.0;
        for _ in 0..30 {
            restored += flask.tick(0.1).0;
        }
        assert!((restored - 60.0).abs() < 1e-6);
        assert!(!flask.is_active);
        assert_eq!(flask.tick(0.1), (0.0, 0.0));
    }

    #[test]
    fn test_flask_charges_capped() {
        let mut flask = Flask::small_mana();
        flask.current_charges = 0;
        assert!(!flask.activate());
        flask.add_charges(10);
        assert_eq!(flask.current_charges, flask.max_charges);
    }

    #[test]
    fn test_spend_currency_rejects_without_mutation() {
        let mut player = Player::new("Exile");
        let err = player.spend_currency(CurrencyType::Chaos, 1).unwrap_err();
        assert_eq!(
            err,
            ActionError::InsufficientCurrency {
                currency: CurrencyType::Chaos,
                needed: 1,
                available: 0
            }
        );
        player.spend_currency(CurrencyType::Transmutation, 2).unwrap();
        assert_eq!(player.currency_amount(CurrencyType::Transmutation), 3);
    }

    #[test]
    fn test_gem_experience_only_reaches_linked_supports() {
        let mut player = Player::new("Exile");
        let linked = Uuid::from_u128(1);
        let loose = Uuid::from_u128(2);
        for id in [linked, loose] {
            player.support_gems.push(PlayerSupportGem {
                instance_id: id,
                definition_id: "fasterAttacks".to_string(),
                level: 1,
                experience: 0.0,
            });
        }
        if let Some(skill) = player.skills[0].as_mut() {
            skill.socketed_support_ids.push(linked);
        }
        player.inactive_skills.push(PlayerSkill::new("cleave"));

        player.grant_gem_experience(25.0);

        assert_eq!(player.skills[0].as_ref().map(|s| s.experience), Some(25.0));
        assert_eq!(player.inactive_skills[0].experience, 0.0);
        assert_eq!(player.support_gem(linked).map(|g| g.experience), Some(25.0));
        assert_eq!(player.support_gem(loose).map(|g| g.experience), Some(0.0));
    }
}
