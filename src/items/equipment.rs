use super::types::{EquipmentSlot, Item};
use serde::{Deserialize, Serialize};

/// The ten worn equipment slots. Each holds at most one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub offhand: Option<Item>,
    pub helmet: Option<Item>,
    pub body_armor: Option<Item>,
    pub gloves: Option<Item>,
    pub boots: Option<Item>,
    pub belt: Option<Item>,
    pub amulet: Option<Item>,
    pub ring1: Option<Item>,
    pub ring2: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Offhand => &self.offhand,
            EquipmentSlot::Helmet => &self.helmet,
            EquipmentSlot::BodyArmor => &self.body_armor,
            EquipmentSlot::Gloves => &self.gloves,
            EquipmentSlot::Boots => &self.boots,
            EquipmentSlot::Belt => &self.belt,
            EquipmentSlot::Amulet => &self.amulet,
            EquipmentSlot::Ring1 => &self.ring1,
            EquipmentSlot::Ring2 => &self.ring2,
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Offhand => &mut self.offhand,
            EquipmentSlot::Helmet => &mut self.helmet,
            EquipmentSlot::BodyArmor => &mut self.body_armor,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Boots => &mut self.boots,
            EquipmentSlot::Belt => &mut self.belt,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Ring1 => &mut self.ring1,
            EquipmentSlot::Ring2 => &mut self.ring2,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<Item>) {
        *self.slot_mut(slot) = item;
    }

    /// Puts `item` in `slot`, handing back whatever was there.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.slot_mut(slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::ItemRarity;
    use super::*;
    use crate::character::stats::StatMap;
    use uuid::Uuid;

    fn create_test_item(slot: EquipmentSlot) -> Item {
        Item {
            id: Uuid::new_v4(),
            base_id: "test".to_string(),
            name: "Test Item".to_string(),
            slot,
            item_level: 1,
            rarity: ItemRarity::Normal,
            rolled_base_stats: StatMap::new(),
            prefixes: vec![],
            suffixes: vec![],
            stats: StatMap::new(),
        }
    }

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert_eq!(eq.iter_equipped().count(), 0);
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut eq = Equipment::new();
        let first = create_test_item(EquipmentSlot::Weapon);
        let second = create_test_item(EquipmentSlot::Weapon);

        assert!(eq.replace(EquipmentSlot::Weapon, first.clone()).is_none());
        assert_eq!(eq.replace(EquipmentSlot::Weapon, second.clone()), Some(first));
        assert_eq!(eq.get(EquipmentSlot::Weapon), &Some(second));
        assert_eq!(eq.iter_equipped().count(), 1);
    }

    #[test]
    fn test_take_empties_slot() {
        let mut eq = Equipment::new();
        eq.set(EquipmentSlot::Ring2, Some(create_test_item(EquipmentSlot::Ring1)));
        assert!(eq.take(EquipmentSlot::Ring2).is_some());
        assert!(eq.get(EquipmentSlot::Ring2).is_none());
    }
}
