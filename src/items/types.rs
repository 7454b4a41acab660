use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::stats::StatMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentSlot {
    Weapon,
    Offhand,
    Helmet,
    BodyArmor,
    Gloves,
    Boots,
    Belt,
    Amulet,
    Ring1,
    Ring2,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 10] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Offhand,
        EquipmentSlot::Helmet,
        EquipmentSlot::BodyArmor,
        EquipmentSlot::Gloves,
        EquipmentSlot::Boots,
        EquipmentSlot::Belt,
        EquipmentSlot::Amulet,
        EquipmentSlot::Ring1,
        EquipmentSlot::Ring2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Offhand => "Offhand",
            EquipmentSlot::Helmet => "Helmet",
            EquipmentSlot::BodyArmor => "Body Armor",
            EquipmentSlot::Gloves => "Gloves",
            EquipmentSlot::Boots => "Boots",
            EquipmentSlot::Belt => "Belt",
            EquipmentSlot::Amulet => "Amulet",
            EquipmentSlot::Ring1 => "Ring",
            EquipmentSlot::Ring2 => "Ring",
        }
    }

    pub fn is_ring(&self) -> bool {
        matches!(self, EquipmentSlot::Ring1 | EquipmentSlot::Ring2)
    }

    /// Whether an item rolled for `self` may be worn in `target`.
    /// Rings go in either ring slot.
    pub fn fits(&self, target: EquipmentSlot) -> bool {
        *self == target || (self.is_ring() && target.is_ring())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemRarity {
    Normal,
    Magic,
    Rare,
    Unique,
}

impl ItemRarity {
    pub fn name(&self) -> &'static str {
        match self {
            ItemRarity::Normal => "Normal",
            ItemRarity::Magic => "Magic",
            ItemRarity::Rare => "Rare",
            ItemRarity::Unique => "Unique",
        }
    }

    /// Inclusive (min, max) total affix count for freshly rolled items.
    pub fn affix_budget(&self) -> (usize, usize) {
        match self {
            ItemRarity::Magic => (1, 2),
            ItemRarity::Rare => (2, 6),
            ItemRarity::Normal | ItemRarity::Unique => (0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AffixKind {
    Prefix,
    Suffix,
}

impl AffixKind {
    pub fn other(&self) -> AffixKind {
        match self {
            AffixKind::Prefix => AffixKind::Suffix,
            AffixKind::Suffix => AffixKind::Prefix,
        }
    }
}

/// A rolled instance of an affix definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affix {
    pub definition_id: String,
    pub tier: u32,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub base_id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    pub item_level: u32,
    pub rarity: ItemRarity,
    #[serde(default)]
    pub rolled_base_stats: StatMap,
    pub prefixes: Vec<Affix>,
    pub suffixes: Vec<Affix>,
    /// Base plus affix contributions, local defenses already applied.
    pub stats: StatMap,
}

impl Item {
    pub fn affix_count(&self) -> usize {
        self.prefixes.len() + self.suffixes.len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyType {
    #[default]
    Transmutation,
    Alteration,
    Augmentation,
    Alchemy,
    Chaos,
    Exalted,
    Divine,
    Scouring,
    SocketOrb,
}

impl CurrencyType {
    pub const ALL: [CurrencyType; 9] = [
        CurrencyType::Transmutation,
        CurrencyType::Alteration,
        CurrencyType::Augmentation,
        CurrencyType::Alchemy,
        CurrencyType::Chaos,
        CurrencyType::Exalted,
        CurrencyType::Divine,
        CurrencyType::Scouring,
        CurrencyType::SocketOrb,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CurrencyType::Transmutation => "Orb of Transmutation",
            CurrencyType::Alteration => "Orb of Alteration",
            CurrencyType::Augmentation => "Orb of Augmentation",
            CurrencyType::Alchemy => "Orb of Alchemy",
            CurrencyType::Chaos => "Chaos Orb",
            CurrencyType::Exalted => "Exalted Orb",
            CurrencyType::Divine => "Divine Orb",
            CurrencyType::Scouring => "Orb of Scouring",
            CurrencyType::SocketOrb => "Socket Orb",
        }
    }
}
