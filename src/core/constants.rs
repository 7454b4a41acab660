// Tick and timing
pub const TICK_RATE_HZ: u32 = 10;
pub const DEFAULT_SPAWN_INTERVAL_SECONDS: f64 = 3.0;
pub const BOSS_RESPAWN_DELAY_SECONDS: f64 = 0.5;
pub const MAX_MONSTERS: usize = 5;

// Character
pub const MAX_CHARACTER_LEVEL: u32 = 100;
pub const SKILL_BAR_SIZE: usize = 6;
pub const FLASK_SLOTS: usize = 5;
pub const DEFAULT_INVENTORY_SIZE: usize = 30;
pub const COMBAT_LOG_CAPACITY: usize = 50;
pub const STARTING_PLAYER_NAME: &str = "Exile";

// Attribute-derived bonuses
pub const ATTRIBUTE_STEP_STRENGTH: f64 = 10.0;
pub const LIFE_PER_STRENGTH_STEP: f64 = 2.0;
pub const PHYS_PERCENT_PER_STRENGTH_STEP: f64 = 2.0;
pub const ACCURACY_PER_DEXTERITY: f64 = 2.0;
pub const ATTRIBUTE_STEP_DEXTERITY: f64 = 5.0;
pub const EVASION_PERCENT_PER_DEXTERITY_STEP: f64 = 2.0;
pub const ATTRIBUTE_STEP_INTELLIGENCE: f64 = 10.0;
pub const MANA_PER_INTELLIGENCE_STEP: f64 = 2.0;
pub const ELEMENTAL_PERCENT_PER_INTELLIGENCE_STEP: f64 = 2.0;

// Monster positioning
pub const SPAWN_DISTANCE: f64 = 100.0;
pub const MELEE_RANGE: f64 = 5.0;
pub const BASE_MOVE_SPEED: f64 = 35.0;
pub const ARENA_POSITIONS: usize = 10;

// Monster rarity roll (percent on a 0..100 roll, cumulative)
pub const MONSTER_RARE_CHANCE_PERCENT: f64 = 2.0;
pub const MONSTER_MAGIC_CHANCE_PERCENT: f64 = 10.0;
pub const MONSTER_LEVEL_GROWTH: f64 = 1.1;

// Hit resolution
pub const MONSTER_BASE_ACCURACY: f64 = 100.0;
pub const MONSTER_ACCURACY_PER_LEVEL: f64 = 10.0;
pub const MIN_HIT_CHANCE_PERCENT: f64 = 5.0;
pub const MAX_HIT_CHANCE_PERCENT: f64 = 100.0;
pub const EVASION_DIVISOR: f64 = 4.0;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.85;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.15;
pub const ARMOR_PER_MONSTER_LEVEL: f64 = 10.0;
pub const MAX_RESISTANCE_PERCENT: f64 = 75.0;

// Bleed
pub const BLEED_DURATION_SECONDS: f64 = 5.0;
pub const BLEED_DAMAGE_PERCENT: f64 = 70.0;

// Flasks
pub const FLASK_AUTO_USE_THRESHOLD: f64 = 0.5;

// Skills
pub const DEFAULT_ATTACK_SKILL_ID: &str = "defaultAttack";
pub const MAX_SUPPORT_SOCKETS: u32 = 5;
pub const STARTING_SUPPORT_SOCKETS: u32 = 1;

// Item drops (fraction per kill, multiplied by monster loot bonus)
pub const ITEM_DROP_CHANCE_BOSS: f64 = 1.0;
pub const ITEM_DROP_CHANCE_RARE: f64 = 0.5;
pub const ITEM_DROP_CHANCE_MAGIC: f64 = 0.3;
pub const ITEM_DROP_CHANCE_NORMAL: f64 = 0.15;
pub const ITEM_RARE_CHANCE_PERCENT: f64 = 5.0;
pub const ITEM_MAGIC_CHANCE_PERCENT: f64 = 25.0;
pub const GUARANTEED_DROP_RARE_CHANCE: f64 = 0.3;
pub const MAX_AFFIXES_PER_KIND: usize = 3;
pub const AFFIX_FILL_ATTEMPTS: usize = 48;

// Base selection kernel
pub const BASE_WEIGHT_FLOOR: f64 = 0.001;
pub const BASE_SIGMA_MIN: f64 = 3.0;
pub const BASE_SIGMA_PER_LEVEL: f64 = 0.18;

// Currency
pub const CURRENCY_ROLLS_BOSS: u32 = 3;
pub const CURRENCY_ROLLS_DEFAULT: u32 = 1;
pub const CURRENCY_DROP_CHANCE: f64 = 0.10;
pub const SOCKET_ORB_CHANCE_TIER_1: f64 = 0.003;
pub const SOCKET_ORB_CHANCE_TIER_2: f64 = 0.006;
pub const SOCKET_ORB_CHANCE_TIER_3: f64 = 0.01;
