//! Static content: monsters, bosses, skills, support gems, item bases,
//! affixes, maps and currencies, all looked up by string id.

mod data;
pub mod types;

pub use types::*;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::core::constants::DEFAULT_ATTACK_SKILL_ID;
use crate::core::error::CatalogError;
use crate::items::types::CurrencyType;

/// The serialized shape of a catalog document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogData {
    pub monsters: Vec<MonsterDefinition>,
    pub bosses: Vec<BossDefinition>,
    pub skills: Vec<SkillDefinition>,
    pub support_gems: Vec<SupportGemDefinition>,
    pub item_bases: Vec<ItemBase>,
    pub affixes: Vec<AffixDefinition>,
    pub maps: Vec<MapDefinition>,
    pub currencies: Vec<CurrencyDefinition>,
    pub starter_skill_ids: Vec<String>,
}

/// Indexed, read-only catalog. Lists keep their document order so weighted
/// and uniform picks stay reproducible under a seeded RNG.
#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
    monster_index: HashMap<String, usize>,
    boss_index: HashMap<String, usize>,
    skill_index: HashMap<String, usize>,
    support_index: HashMap<String, usize>,
    base_index: HashMap<String, usize>,
    affix_index: HashMap<String, usize>,
    map_index: HashMap<String, usize>,
}

fn check_unique<T>(
    items: &[T],
    kind: &'static str,
    id_of: impl Fn(&T) -> &str,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let id = id_of(item);
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn build_index<T>(items: &[T], id_of: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        index.entry(id_of(item).to_string()).or_insert(i);
    }
    index
}

impl Catalog {
    /// Indexes a catalog document, rejecting duplicate ids.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        check_unique(&data.monsters, "monster", |m| &m.id)?;
        check_unique(&data.bosses, "boss", |b| b.id())?;
        check_unique(&data.skills, "skill", |s| &s.id)?;
        check_unique(&data.support_gems, "support gem", |s| &s.id)?;
        check_unique(&data.item_bases, "item base", |b| &b.id)?;
        check_unique(&data.affixes, "affix", |a| &a.id)?;
        check_unique(&data.maps, "map", |m| &m.id)?;
        Ok(Self::index(data))
    }

    fn index(mut data: CatalogData) -> Self {
        data.maps.sort_by_key(|m| m.order);
        Self {
            monster_index: build_index(&data.monsters, |m| &m.id),
            boss_index: build_index(&data.bosses, |b| b.id()),
            skill_index: build_index(&data.skills, |s| &s.id),
            support_index: build_index(&data.support_gems, |s| &s.id),
            base_index: build_index(&data.item_bases, |b| &b.id),
            affix_index: build_index(&data.affixes, |a| &a.id),
            map_index: build_index(&data.maps, |m| &m.id),
            data,
        }
    }

    /// The built-in first act.
    pub fn builtin() -> Self {
        Self::index(data::builtin_data())
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    pub fn monster(&self, id: &str) -> Option<&MonsterDefinition> {
        self.monster_index.get(id).map(|&i| &self.data.monsters[i])
    }

    pub fn boss(&self, id: &str) -> Option<&BossDefinition> {
        self.boss_index.get(id).map(|&i| &self.data.bosses[i])
    }

    pub fn skill(&self, id: &str) -> Option<&SkillDefinition> {
        self.skill_index.get(id).map(|&i| &self.data.skills[i])
    }

    pub fn support_gem(&self, id: &str) -> Option<&SupportGemDefinition> {
        self.support_index.get(id).map(|&i| &self.data.support_gems[i])
    }

    pub fn item_base(&self, id: &str) -> Option<&ItemBase> {
        self.base_index.get(id).map(|&i| &self.data.item_bases[i])
    }

    pub fn affix(&self, id: &str) -> Option<&AffixDefinition> {
        self.affix_index.get(id).map(|&i| &self.data.affixes[i])
    }

    pub fn map(&self, id: &str) -> Option<&MapDefinition> {
        self.map_index.get(id).map(|&i| &self.data.maps[i])
    }

    pub fn item_bases(&self) -> &[ItemBase] {
        &self.data.item_bases
    }

    pub fn affixes(&self) -> &[AffixDefinition] {
        &self.data.affixes
    }

    pub fn skills(&self) -> &[SkillDefinition] {
        &self.data.skills
    }

    pub fn support_gems(&self) -> &[SupportGemDefinition] {
        &self.data.support_gems
    }

    /// Maps in progression order.
    pub fn maps(&self) -> &[MapDefinition] {
        &self.data.maps
    }

    pub fn currencies(&self) -> &[CurrencyDefinition] {
        &self.data.currencies
    }

    pub fn currency(&self, id: CurrencyType) -> Option<&CurrencyDefinition> {
        self.data.currencies.iter().find(|c| c.id == id)
    }

    pub fn total_currency_weight(&self) -> f64 {
        self.data.currencies.iter().map(|c| c.drop_weight).sum()
    }

    pub fn starter_skill_ids(&self) -> &[String] {
        &self.data.starter_skill_ids
    }

    /// The map unlocked by clearing `map_id`'s boss.
    pub fn next_map(&self, map_id: &str) -> Option<&MapDefinition> {
        self.data
            .maps
            .iter()
            .find(|m| m.required_map_id.as_deref() == Some(map_id))
    }

    /// Skills the trainer offers at `level`. Strike is never sold.
    pub fn buyable_skills(&self, level: u32) -> impl Iterator<Item = &SkillDefinition> {
        self.data
            .skills
            .iter()
            .filter(move |s| s.id != DEFAULT_ATTACK_SKILL_ID && s.required_level <= level)
    }

    pub fn skill_price(skill: &SkillDefinition) -> (CurrencyType, u32) {
        (CurrencyType::Transmutation, skill.required_level.max(1))
    }

    /// Reports every reference to an id that does not exist.
    pub fn validate(&self) -> Vec<CatalogError> {
        let mut errors = Vec::new();
        let mut dangling = |owner: &str, kind: &'static str, id: &str| {
            errors.push(CatalogError::DanglingReference {
                owner: owner.to_string(),
                kind,
                id: id.to_string(),
            });
        };

        for map in &self.data.maps {
            for monster_id in &map.monster_pool {
                if self.monster(monster_id).is_none() {
                    dangling(&map.id, "monster", monster_id);
                }
            }
            if self.boss(&map.boss_id).is_none() {
                dangling(&map.id, "boss", &map.boss_id);
            }
            if let Some(required) = &map.required_map_id {
                if self.map(required).is_none() {
                    dangling(&map.id, "map", required);
                }
            }
        }

        for boss in &self.data.bosses {
            for base_id in &boss.guaranteed_drops {
                if self.item_base(base_id).is_none() {
                    dangling(boss.id(), "item base", base_id);
                }
            }
        }

        for skill_id in &self.data.starter_skill_ids {
            if self.skill(skill_id).is_none() {
                dangling("starter skills", "skill", skill_id);
            }
        }

        let currency_ids: HashSet<CurrencyType> =
            self.data.currencies.iter().map(|c| c.id).collect();
        for support in &self.data.support_gems {
            if !currency_ids.contains(&support.cost_currency) {
                dangling(&support.id, "currency", support.cost_currency.name());
            }
        }

        errors
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_consistent() {
        let catalog = Catalog::builtin();
        let errors = catalog.validate();
        assert!(errors.is_empty(), "dangling references: {:?}", errors);
        assert!(!catalog.maps().is_empty());
        assert!(catalog.skill(DEFAULT_ATTACK_SKILL_ID).is_some());
    }

    #[test]
    fn test_builtin_maps_chain() {
        let catalog = Catalog::builtin();
        let first = &catalog.maps()[0];
        assert_eq!(first.id, "twilightBeach");
        assert!(first.required_map_id.is_none());
        let second = catalog.next_map(&first.id).unwrap();
        assert_eq!(second.required_map_id.as_deref(), Some("twilightBeach"));
    }

    #[test]
    fn test_json_round_trip_preserves_lookups() {
        let catalog = Catalog::builtin();
        let json = catalog.to_json_string().unwrap();
        let loaded = Catalog::from_json_str(&json).unwrap();
        assert_eq!(loaded.data(), catalog.data());
        assert!(loaded.boss("drownedCaptain").is_some());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut data = data::builtin_data();
        let dup = data.monsters[0].clone();
        data.monsters.push(dup);
        let err = Catalog::new(data).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: "monster", .. }));
    }

    #[test]
    fn test_dangling_reference_reported() {
        let mut data = data::builtin_data();
        data.maps[0].monster_pool.push("nobody".to_string());
        let catalog = Catalog::new(data).unwrap();
        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("nobody"));
    }

    #[test]
    fn test_buyable_skills_exclude_strike() {
        let catalog = Catalog::builtin();
        assert!(catalog
            .buyable_skills(100)
            .all(|s| s.id != DEFAULT_ATTACK_SKILL_ID));
        assert!(catalog.buyable_skills(1).all(|s| s.required_level <= 1));
    }
}
