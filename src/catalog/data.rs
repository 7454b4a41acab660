//! Built-in content for the first act of the Corrupted Shores.

use std::collections::BTreeMap;

use super::types::*;
use super::CatalogData;
use crate::character::stats::{StatKey, StatMap};
use crate::combat::types::DamageType;
use crate::items::types::{AffixKind, CurrencyType, EquipmentSlot};

use EquipmentSlot::*;

pub(super) fn builtin_data() -> CatalogData {
    CatalogData {
        monsters: monsters(),
        bosses: bosses(),
        skills: skills(),
        support_gems: support_gems(),
        item_bases: item_bases(),
        affixes: affixes(),
        maps: maps(),
        currencies: currencies(),
        starter_skill_ids: vec![
            "defaultAttack".to_string(),
            "heavyStrike".to_string(),
            "doubleStrike".to_string(),
        ],
    }
}

// ── Monsters ────────────────────────────────────────────────────

fn monster(
    id: &str,
    name: &str,
    base_life: f64,
    base_damage: f64,
    attack_speed: f64,
    damage_type: DamageType,
    experience_reward: f64,
    loot_bonus: f64,
) -> MonsterDefinition {
    MonsterDefinition {
        id: id.to_string(),
        name: name.to_string(),
        base_life,
        base_damage,
        attack_speed,
        damage_type,
        experience_reward,
        loot_bonus,
    }
}

fn monsters() -> Vec<MonsterDefinition> {
    use DamageType::*;
    vec![
        // Twilight Beach: 8-10 second kills at level 1
        monster("drownedZombie", "Drowned Zombie", 22.0, 1.0, 0.6, Physical, 25.0, 1.0),
        monster("seaCrab", "Sea Crab", 28.0, 2.0, 0.5, Physical, 30.0, 1.0),
        monster("beachLurker", "Beach Lurker", 18.0, 2.0, 0.8, Physical, 28.0, 1.1),
        // Tidal Caves
        monster("caveSpider", "Cave Spider", 32.0, 3.0, 0.9, Physical, 45.0, 1.1),
        monster("stalactiteBat", "Stalactite Bat", 24.0, 4.0, 1.1, Physical, 38.0, 1.0),
        monster("deepCrawler", "Deep Crawler", 45.0, 3.0, 0.5, Cold, 52.0, 1.2),
        // Shipwreck Graveyard
        monster("pirateGhost", "Pirate Ghost", 48.0, 5.0, 0.8, Cold, 70.0, 1.2),
        monster("barnacleGolem", "Barnacle Golem", 75.0, 4.0, 0.4, Physical, 85.0, 1.3),
        monster("rottenDeckhand", "Rotten Deckhand", 42.0, 5.0, 0.7, Physical, 62.0, 1.15),
    ]
}

fn boss_skill(
    id: &str,
    name: &str,
    damage_multiplier: f64,
    cooldown: f64,
    skill_type: BossSkillType,
) -> BossSkill {
    BossSkill {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        damage_multiplier,
        cooldown,
        skill_type,
    }
}

fn bosses() -> Vec<BossDefinition> {
    use BossSkillType::*;
    vec![
        BossDefinition {
            monster: monster(
                "drownedCaptain",
                "The Drowned Captain",
                250.0,
                6.0,
                0.8,
                DamageType::Physical,
                250.0,
                3.0,
            ),
            title: "Terror of Twilight Beach".to_string(),
            guaranteed_drops: vec!["rustySword".to_string(), "leatherCap".to_string()],
            skills: vec![
                boss_skill("anchorSlam", "Anchor Slam", 2.5, 5.0, Slam),
                boss_skill("cutlassFlurry", "Cutlass Flurry", 1.5, 3.0, Cleave),
            ],
        },
        BossDefinition {
            monster: monster(
                "caveLurker",
                "The Cave Lurker",
                450.0,
                8.0,
                0.9,
                DamageType::Physical,
                450.0,
                3.5,
            ),
            title: "Dweller in Darkness".to_string(),
            guaranteed_drops: vec!["ironSword".to_string(), "chestplate".to_string()],
            skills: vec![
                boss_skill("rockCrush", "Rock Crush", 3.0, 6.0, Projectile),
                boss_skill("burrowStrike", "Burrow Strike", 2.0, 4.0, Slam),
            ],
        },
        BossDefinition {
            monster: monster(
                "ghostAdmiral",
                "Ghost Admiral",
                700.0,
                10.0,
                0.7,
                DamageType::Cold,
                700.0,
                4.0,
            ),
            title: "Specter of the Graveyard".to_string(),
            guaranteed_drops: vec!["ironHelm".to_string(), "copperPlate".to_string()],
            skills: vec![
                boss_skill("spectralCannon", "Spectral Cannon", 2.5, 4.0, Projectile),
                boss_skill("chillingPresence", "Chilling Presence", 2.0, 5.0, Aoe),
                boss_skill("phantomBlade", "Phantom Blade", 3.5, 8.0, Cleave),
            ],
        },
    ]
}

// ── Maps ────────────────────────────────────────────────────────

fn map(
    id: &str,
    name: &str,
    order: u32,
    monster_level: u32,
    required_map_id: Option<&str>,
    monster_pool: &[&str],
    kills_required: u32,
    boss_id: &str,
    biome: &str,
) -> MapDefinition {
    MapDefinition {
        id: id.to_string(),
        name: name.to_string(),
        world_id: 1,
        order,
        monster_level,
        required_map_id: required_map_id.map(str::to_string),
        monster_pool: monster_pool.iter().map(|s| s.to_string()).collect(),
        kills_required,
        boss_id: boss_id.to_string(),
        description: String::new(),
        biome: biome.to_string(),
    }
}

fn maps() -> Vec<MapDefinition> {
    vec![
        map(
            "twilightBeach",
            "Twilight Beach",
            1,
            1,
            None,
            &["drownedZombie", "seaCrab", "beachLurker"],
            20,
            "drownedCaptain",
            "beach",
        ),
        map(
            "tidalCaves",
            "Tidal Caves",
            2,
            4,
            Some("twilightBeach"),
            &["caveSpider", "stalactiteBat", "deepCrawler"],
            25,
            "caveLurker",
            "cave",
        ),
        map(
            "shipwreckGraveyard",
            "Shipwreck Graveyard",
            3,
            8,
            Some("tidalCaves"),
            &["pirateGhost", "barnacleGolem", "rottenDeckhand"],
            30,
            "ghostAdmiral",
            "shipwreck",
        ),
    ]
}

// ── Skills ──────────────────────────────────────────────────────

fn skill(
    id: &str,
    name: &str,
    skill_type: SkillType,
    targeting: SkillTargeting,
    damage_multiplier: f64,
    damage_type: DamageType,
    mana_cost: f64,
    cooldown: f64,
    required_level: u32,
) -> SkillDefinition {
    SkillDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        skill_type,
        targeting,
        damage_multiplier,
        damage_type,
        added_damage_min: 0.0,
        added_damage_max: 0.0,
        mana_cost,
        cooldown,
        aoe_radius: None,
        number_of_hits: None,
        crit_bonus_chance: None,
        lifesteal_percent: None,
        double_damage_chance: None,
        gem_total_experience_by_level: Vec::new(),
        required_character_level_by_gem_level: Vec::new(),
        mana_cost_by_level: Vec::new(),
        damage_multiplier_by_level: Vec::new(),
        double_damage_chance_by_level: Vec::new(),
        required_level,
    }
}

fn with_added(mut def: SkillDefinition, min: f64, max: f64) -> SkillDefinition {
    def.added_damage_min = min;
    def.added_damage_max = max;
    def
}

fn skills() -> Vec<SkillDefinition> {
    use DamageType::*;
    use SkillTargeting::*;
    use SkillType::*;

    let mut heavy_strike = with_added(
        skill("heavyStrike", "Heavy Strike", Attack, Single, 1.8, Physical, 8.0, 2.0, 1),
        5.0,
        10.0,
    );
    heavy_strike.damage_multiplier_by_level = (0..20).map(|i| 1.8 + 0.05 * i as f64).collect();
    heavy_strike.required_character_level_by_gem_level =
        vec![1, 2, 4, 7, 11, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 60, 64, 67, 70];

    let mut double_strike =
        skill("doubleStrike", "Double Strike", Attack, Single, 0.8, Physical, 6.0, 1.5, 2);
    double_strike.number_of_hits = Some(2);
    double_strike.double_damage_chance_by_level =
        (0..20).map(|i| if i < 4 { 0.0 } else { (i - 3) as f64 }).collect();

    let mut cleave = skill("cleave", "Cleave", Attack, Cone, 0.9, Physical, 10.0, 2.5, 3);
    cleave.aoe_radius = Some(3);

    let mut ground_slam = with_added(
        skill("groundSlam", "Ground Slam", Attack, Aoe, 1.2, Physical, 15.0, 4.0, 5),
        3.0,
        8.0,
    );
    ground_slam.aoe_radius = Some(5);
    ground_slam.mana_cost_by_level = (0..20).map(|i| 15.0 + i as f64).collect();

    let mut vicious_strike =
        skill("viciousStrike", "Vicious Strike", Attack, Single, 1.2, Physical, 8.0, 3.0, 3);
    vicious_strike.crit_bonus_chance = Some(25.0);

    let mut lifetap = skill("lifetap", "Lifetap", Attack, Single, 0.9, Physical, 12.0, 4.0, 5);
    lifetap.lifesteal_percent = Some(30.0);

    vec![
        skill("defaultAttack", "Strike", Attack, Single, 1.0, Physical, 0.0, 0.0, 1),
        heavy_strike,
        double_strike,
        cleave,
        ground_slam,
        with_added(
            skill("moltenStrike", "Molten Strike", Attack, Single, 1.0, Physical, 12.0, 2.0, 4),
            8.0,
            15.0,
        ),
        with_added(
            skill("glacialHammer", "Glacial Hammer", Attack, Single, 1.3, Cold, 10.0, 2.5, 4),
            5.0,
            12.0,
        ),
        with_added(
            skill(
                "lightningStrike",
                "Lightning Strike",
                Attack,
                Single,
                1.1,
                Lightning,
                14.0,
                2.0,
                5,
            ),
            2.0,
            20.0,
        ),
        with_added(
            skill("fireball", "Fireball", Spell, Single, 0.0, Fire, 18.0, 3.0, 6),
            15.0,
            25.0,
        ),
        with_added(
            skill("iceShard", "Ice Shard", Spell, Single, 0.0, Cold, 15.0, 2.5, 6),
            12.0,
            20.0,
        ),
        vicious_strike,
        lifetap,
    ]
}

fn support(
    id: &str,
    name: &str,
    required_level: u32,
    cost_amount: u32,
    compatible: &[SkillType],
) -> SupportGemDefinition {
    SupportGemDefinition {
        id: id.to_string(),
        name: name.to_string(),
        required_level,
        cost_currency: CurrencyType::Transmutation,
        cost_amount,
        compatible_skill_types: compatible.to_vec(),
        ..Default::default()
    }
}

fn support_gems() -> Vec<SupportGemDefinition> {
    use SkillType::*;

    let mut melee_physical =
        support("meleePhysicalDamage", "Melee Physical Damage", 1, 2, &[Attack]);
    melee_physical.more_damage_multiplier = Some(0.25);
    melee_physical.mana_multiplier = Some(1.3);

    let mut faster_attacks = support("fasterAttacks", "Faster Attacks", 2, 2, &[Attack]);
    faster_attacks.attack_speed_more_percent = Some(20.0);
    faster_attacks.attack_speed_more_percent_by_level =
        (0..20).map(|i| 20.0 + i as f64).collect();
    faster_attacks.mana_multiplier = Some(1.15);

    let mut multistrike = support("multistrike", "Multistrike", 4, 4, &[Attack]);
    multistrike.added_hits = Some(1);
    multistrike.second_hit_less_damage_percent = Some(30.0);
    multistrike.second_hit_less_damage_percent_by_level =
        (0..20).map(|i| 30.0 - i as f64).collect();
    multistrike.mana_multiplier = Some(1.4);

    let mut added_fire = support("addedFireDamage", "Added Fire Damage", 3, 3, &[Attack]);
    added_fire.physical_as_extra_fire_percent = Some(25.0);
    added_fire.physical_as_extra_fire_percent_by_level =
        (0..20).map(|i| 25.0 + i as f64 * 0.5).collect();
    added_fire.mana_multiplier = Some(1.2);

    let mut bleed = support("chanceToBleed", "Chance to Bleed", 2, 2, &[Attack]);
    bleed.chance_to_bleed_percent = Some(25.0);
    bleed.chance_to_bleed_percent_by_level = (0..20).map(|i| 25.0 + i as f64).collect();
    bleed.more_bleeding_damage_percent = Some(10.0);

    let mut brutality = support("brutality", "Brutality", 5, 4, &[Attack]);
    brutality.added_damage_min = Some(3.0);
    brutality.added_damage_max = Some(6.0);
    brutality.more_bleeding_damage_percent = Some(30.0);
    brutality.more_bleeding_damage_percent_by_level = (0..20).map(|i| 30.0 + i as f64).collect();

    let mut controlled_destruction =
        support("controlledDestruction", "Controlled Destruction", 6, 4, &[Spell]);
    controlled_destruction.more_damage_multiplier = Some(0.3);
    controlled_destruction.cooldown_multiplier = Some(1.1);

    let mut swift_casting = support("swiftCasting", "Swift Casting", 6, 3, &[Spell]);
    swift_casting.cooldown_multiplier = Some(0.8);
    swift_casting.mana_multiplier = Some(1.25);

    vec![
        melee_physical,
        faster_attacks,
        multistrike,
        added_fire,
        bleed,
        brutality,
        controlled_destruction,
        swift_casting,
    ]
}

// ── Items ───────────────────────────────────────────────────────

fn stats(pairs: &[(StatKey, f64)]) -> StatMap {
    pairs.iter().copied().collect()
}

fn base(
    id: &str,
    name: &str,
    slot: EquipmentSlot,
    drop_level: u32,
    base_stats: &[(StatKey, f64)],
) -> ItemBase {
    ItemBase {
        id: id.to_string(),
        name: name.to_string(),
        slot,
        base_stats: stats(base_stats),
        base_stat_ranges: BTreeMap::new(),
        required_level: drop_level,
        required_strength: 0,
        required_dexterity: 0,
        required_intelligence: 0,
        drop_level,
        base_tags: Vec::new(),
    }
}

fn body_armor(
    id: &str,
    name: &str,
    drop_level: u32,
    tag: BaseTag,
    ranges: &[(StatKey, f64, f64)],
) -> ItemBase {
    let mut item = base(id, name, BodyArmor, drop_level, &[]);
    for &(key, min, max) in ranges {
        item.base_stats.insert(key, min);
        item.base_stat_ranges.insert(key, StatRange { min, max });
    }
    item.base_tags = vec![tag];
    item
}

fn item_bases() -> Vec<ItemBase> {
    use StatKey::*;
    let mut plate_vest = body_armor(
        "plateVest",
        "Plate Vest",
        1,
        BaseTag::BodyArmorStrength,
        &[(Armor, 22.0, 32.0)],
    );
    plate_vest.required_strength = 14;
    let mut chestplate = body_armor(
        "chestplate",
        "Chestplate",
        6,
        BaseTag::BodyArmorStrength,
        &[(Armor, 81.0, 106.0)],
    );
    chestplate.required_strength = 32;

    vec![
        // weapons
        base(
            "rustySword",
            "Rusty Sword",
            Weapon,
            1,
            &[(PhysicalDamageMin, 2.0), (PhysicalDamageMax, 5.0), (CriticalChance, 5.0)],
        ),
        base(
            "ironSword",
            "Iron Sword",
            Weapon,
            5,
            &[(PhysicalDamageMin, 5.0), (PhysicalDamageMax, 12.0), (CriticalChance, 5.0)],
        ),
        base(
            "steelBlade",
            "Steel Blade",
            Weapon,
            12,
            &[(PhysicalDamageMin, 10.0), (PhysicalDamageMax, 22.0), (CriticalChance, 5.0)],
        ),
        base("woodenBuckler", "Wooden Buckler", Offhand, 1, &[(BlockChance, 5.0), (Armor, 4.0)]),
        // helmets
        base("leatherCap", "Leather Cap", Helmet, 1, &[(Armor, 5.0), (MaxLife, 5.0)]),
        base("ironHelm", "Iron Helm", Helmet, 8, &[(Armor, 20.0), (MaxLife, 10.0)]),
        // body armor
        plate_vest,
        chestplate,
        body_armor(
            "shabbyJerkin",
            "Shabby Jerkin",
            2,
            BaseTag::BodyArmorDexterity,
            &[(Evasion, 25.0, 35.0)],
        ),
        body_armor(
            "copperPlate",
            "Copper Plate",
            8,
            BaseTag::BodyArmorStrength,
            &[(Armor, 120.0, 150.0)],
        ),
        body_armor(
            "paddedJacket",
            "Padded Jacket",
            4,
            BaseTag::BodyArmorStrengthDexterity,
            &[(Armor, 18.0, 24.0), (Evasion, 18.0, 24.0)],
        ),
        // the rest
        base("leatherGloves", "Leather Gloves", Gloves, 1, &[(Armor, 3.0)]),
        base("chainGloves", "Chain Gloves", Gloves, 7, &[(Armor, 12.0)]),
        base("leatherBoots", "Leather Boots", Boots, 1, &[(Evasion, 6.0)]),
        base("leatherBelt", "Leather Belt", Belt, 1, &[(MaxLife, 10.0)]),
        base(
            "ironRing",
            "Iron Ring",
            Ring1,
            1,
            &[(PhysicalDamageMin, 1.0), (PhysicalDamageMax, 2.0)],
        ),
        base("coralRing", "Coral Ring", Ring1, 3, &[(MaxLife, 10.0)]),
        base("jadeAmulet", "Jade Amulet", Amulet, 5, &[(Dexterity, 10.0)]),
    ]
}

fn tier(tier: u32, min_value: f64, max_value: f64, required_item_level: u32) -> AffixTier {
    AffixTier {
        tier,
        min_value,
        max_value,
        required_item_level,
        secondary_min_value: None,
        secondary_max_value: None,
        tertiary_min_value: None,
        tertiary_max_value: None,
    }
}

fn with_secondary(mut t: AffixTier, min: f64, max: f64) -> AffixTier {
    t.secondary_min_value = Some(min);
    t.secondary_max_value = Some(max);
    t
}

fn affix(
    id: &str,
    name: &str,
    kind: AffixKind,
    stat_key: StatKey,
    is_percentage: bool,
    applicable_slots: &[EquipmentSlot],
    tiers: Vec<AffixTier>,
) -> AffixDefinition {
    AffixDefinition {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        stat_key,
        secondary_stat_key: None,
        tertiary_stat_key: None,
        use_primary_value_for_secondary: false,
        use_primary_value_for_tertiary: false,
        tiers,
        is_percentage,
        applicable_slots: applicable_slots.to_vec(),
        required_base_tags_any: None,
    }
}

/// Five tiers at item levels 1, 8, 16, 24, 32.
fn standard_tiers(values: [(f64, f64); 5]) -> Vec<AffixTier> {
    const LEVELS: [u32; 5] = [1, 8, 16, 24, 32];
    values
        .iter()
        .zip(LEVELS)
        .enumerate()
        .map(|(i, (&(min, max), level))| tier(i as u32 + 1, min, max, level))
        .collect()
}

fn affixes() -> Vec<AffixDefinition> {
    use AffixKind::*;
    use StatKey::*;

    const ARMOUR: &[EquipmentSlot] = &[Offhand, Helmet, BodyArmor, Gloves, Boots, Belt];
    const JEWELLERY: &[EquipmentSlot] = &[Ring1, Ring2, Amulet];
    const ATTRIBUTES: &[EquipmentSlot] =
        &[Helmet, BodyArmor, Gloves, Boots, Belt, Ring1, Ring2, Amulet];
    const RESIST: &[EquipmentSlot] = &[Helmet, BodyArmor, Gloves, Boots, Belt, Ring1, Ring2];

    let mut flat_phys = affix(
        "flatPhys",
        "Physical Damage",
        Prefix,
        PhysicalDamageMin,
        false,
        &[Weapon],
        vec![
            with_secondary(tier(1, 1.0, 2.0, 1), 3.0, 4.0),
            with_secondary(tier(2, 3.0, 5.0, 5), 6.0, 9.0),
            with_secondary(tier(3, 6.0, 8.0, 10), 10.0, 14.0),
            with_secondary(tier(4, 9.0, 12.0, 15), 15.0, 20.0),
            with_secondary(tier(5, 13.0, 17.0, 20), 21.0, 28.0),
        ],
    );
    flat_phys.secondary_stat_key = Some(PhysicalDamageMax);

    let mut flat_fire = affix(
        "flatFire",
        "Fire Damage",
        Prefix,
        FireDamageMin,
        false,
        &[Weapon, Ring1, Ring2, Amulet],
        vec![
            with_secondary(tier(1, 1.0, 2.0, 1), 3.0, 4.0),
            with_secondary(tier(2, 3.0, 5.0, 8), 6.0, 9.0),
            with_secondary(tier(3, 6.0, 9.0, 16), 10.0, 15.0),
        ],
    );
    flat_fire.secondary_stat_key = Some(FireDamageMax);

    let mut local_armor = affix(
        "localIncArmor",
        "Increased Armor",
        Prefix,
        IncreasedArmor,
        true,
        &[Helmet, BodyArmor, Gloves, Boots],
        standard_tiers([(15.0, 26.0), (27.0, 42.0), (43.0, 55.0), (56.0, 67.0), (68.0, 79.0)]),
    );
    local_armor.required_base_tags_any = Some(vec![
        BaseTag::BodyArmorStrength,
        BaseTag::BodyArmorStrengthDexterity,
        BaseTag::BodyArmorStrengthIntelligence,
        BaseTag::BodyArmorStrengthDexterityIntelligence,
    ]);

    let mut local_hybrid = affix(
        "localIncArmorEvasion",
        "Increased Armor and Evasion",
        Prefix,
        IncreasedArmor,
        true,
        &[BodyArmor],
        standard_tiers([(15.0, 26.0), (27.0, 42.0), (43.0, 55.0), (56.0, 67.0), (68.0, 79.0)]),
    );
    local_hybrid.secondary_stat_key = Some(IncreasedEvasion);
    local_hybrid.use_primary_value_for_secondary = true;
    local_hybrid.required_base_tags_any = Some(vec![
        BaseTag::BodyArmorStrengthDexterity,
        BaseTag::BodyArmorStrengthDexterityIntelligence,
    ]);

    let mut all_attributes = affix(
        "allAttributes",
        "All Attributes",
        Suffix,
        Strength,
        false,
        JEWELLERY,
        standard_tiers([(2.0, 4.0), (5.0, 7.0), (8.0, 10.0), (11.0, 13.0), (14.0, 16.0)]),
    );
    all_attributes.secondary_stat_key = Some(Dexterity);
    all_attributes.tertiary_stat_key = Some(Intelligence);
    all_attributes.use_primary_value_for_secondary = true;
    all_attributes.use_primary_value_for_tertiary = true;

    vec![
        // prefixes
        flat_phys,
        affix(
            "incPhysDmg",
            "Increased Physical Damage",
            Prefix,
            IncreasedPhysicalDamage,
            true,
            &[Weapon],
            standard_tiers([(10.0, 20.0), (21.0, 35.0), (36.0, 55.0), (56.0, 75.0), (76.0, 100.0)]),
        ),
        flat_fire,
        affix(
            "incFireDmg",
            "Increased Fire Damage",
            Prefix,
            IncreasedFireDamage,
            true,
            &[Weapon, Ring1, Ring2],
            standard_tiers([(5.0, 10.0), (11.0, 18.0), (19.0, 28.0), (29.0, 40.0), (41.0, 55.0)]),
        ),
        affix(
            "incColdDmg",
            "Increased Cold Damage",
            Prefix,
            IncreasedColdDamage,
            true,
            &[Weapon, Ring1, Ring2],
            standard_tiers([(5.0, 10.0), (11.0, 18.0), (19.0, 28.0), (29.0, 40.0), (41.0, 55.0)]),
        ),
        affix(
            "flatLife",
            "Maximum Life",
            Prefix,
            MaxLife,
            false,
            &[Helmet, BodyArmor, Gloves, Boots, Belt, Ring1, Ring2],
            vec![
                tier(1, 5.0, 10.0, 1),
                tier(2, 11.0, 20.0, 5),
                tier(3, 21.0, 30.0, 10),
                tier(4, 31.0, 45.0, 15),
                tier(5, 46.0, 60.0, 20),
            ],
        ),
        affix(
            "flatArmor",
            "Armor",
            Prefix,
            Armor,
            false,
            ARMOUR,
            vec![
                tier(1, 10.0, 20.0, 1),
                tier(2, 21.0, 40.0, 5),
                tier(3, 41.0, 70.0, 10),
                tier(4, 71.0, 100.0, 15),
            ],
        ),
        affix(
            "flatEvasion",
            "Evasion",
            Prefix,
            Evasion,
            false,
            ARMOUR,
            standard_tiers([
                (15.0, 30.0),
                (31.0, 60.0),
                (61.0, 100.0),
                (101.0, 150.0),
                (151.0, 210.0),
            ]),
        ),
        local_armor,
        local_hybrid,
        affix(
            "flatMana",
            "Maximum Mana",
            Prefix,
            MaxMana,
            false,
            &[Helmet, BodyArmor, Ring1, Ring2, Amulet],
            standard_tiers([(5.0, 12.0), (13.0, 20.0), (21.0, 30.0), (31.0, 42.0), (43.0, 55.0)]),
        ),
        // suffixes
        affix(
            "flatStr",
            "Strength",
            Suffix,
            Strength,
            false,
            ATTRIBUTES,
            standard_tiers([(5.0, 10.0), (11.0, 18.0), (19.0, 28.0), (29.0, 40.0), (41.0, 55.0)]),
        ),
        affix(
            "flatDex",
            "Dexterity",
            Suffix,
            Dexterity,
            false,
            ATTRIBUTES,
            standard_tiers([(5.0, 10.0), (11.0, 18.0), (19.0, 28.0), (29.0, 40.0), (41.0, 55.0)]),
        ),
        affix(
            "flatInt",
            "Intelligence",
            Suffix,
            Intelligence,
            false,
            ATTRIBUTES,
            standard_tiers([(5.0, 10.0), (11.0, 18.0), (19.0, 28.0), (29.0, 40.0), (41.0, 55.0)]),
        ),
        all_attributes,
        affix(
            "attackSpeed",
            "Attack Speed",
            Suffix,
            IncreasedAttackSpeed,
            true,
            &[Weapon, Gloves, Ring1, Ring2],
            standard_tiers([(3.0, 5.0), (6.0, 8.0), (9.0, 11.0), (12.0, 14.0), (15.0, 17.0)]),
        ),
        affix(
            "critChance",
            "Critical Strike Chance",
            Suffix,
            CriticalChance,
            true,
            &[Weapon, Ring1, Ring2],
            standard_tiers([(0.5, 1.0), (1.1, 1.8), (1.9, 2.6), (2.7, 3.4), (3.5, 4.2)]),
        ),
        affix(
            "critMulti",
            "Critical Strike Multiplier",
            Suffix,
            CriticalMultiplier,
            true,
            &[Weapon, Ring1, Ring2],
            standard_tiers([(10.0, 20.0), (21.0, 30.0), (31.0, 40.0), (41.0, 50.0), (51.0, 60.0)]),
        ),
        affix(
            "lifeRegen",
            "Life Regeneration",
            Suffix,
            LifeRegeneration,
            false,
            &[Helmet, BodyArmor, Belt, Ring1, Ring2],
            standard_tiers([(1.0, 2.0), (2.1, 4.0), (4.1, 6.5), (6.6, 9.0), (9.1, 12.0)]),
        ),
        affix(
            "fireRes",
            "Fire Resistance",
            Suffix,
            FireResistance,
            true,
            RESIST,
            standard_tiers([(6.0, 11.0), (12.0, 17.0), (18.0, 23.0), (24.0, 29.0), (30.0, 35.0)]),
        ),
        affix(
            "coldRes",
            "Cold Resistance",
            Suffix,
            ColdResistance,
            true,
            RESIST,
            standard_tiers([(6.0, 11.0), (12.0, 17.0), (18.0, 23.0), (24.0, 29.0), (30.0, 35.0)]),
        ),
        affix(
            "lightRes",
            "Lightning Resistance",
            Suffix,
            LightningResistance,
            true,
            RESIST,
            standard_tiers([(6.0, 11.0), (12.0, 17.0), (18.0, 23.0), (24.0, 29.0), (30.0, 35.0)]),
        ),
        affix(
            "accuracy",
            "Accuracy",
            Suffix,
            Accuracy,
            false,
            &[Weapon, Helmet, Gloves, Ring1, Ring2, Amulet],
            standard_tiers([
                (20.0, 40.0),
                (41.0, 80.0),
                (81.0, 130.0),
                (131.0, 190.0),
                (191.0, 260.0),
            ]),
        ),
        affix(
            "blockChance",
            "Block Chance",
            Suffix,
            BlockChance,
            true,
            &[Offhand],
            standard_tiers([(2.0, 4.0), (5.0, 6.0), (7.0, 8.0), (9.0, 10.0), (11.0, 12.0)]),
        ),
        affix(
            "manaRegen",
            "Mana Regeneration",
            Suffix,
            ManaRegeneration,
            false,
            JEWELLERY,
            standard_tiers([(1.0, 2.0), (2.1, 3.5), (3.6, 5.0), (5.1, 6.5), (6.6, 8.0)]),
        ),
    ]
}

// ── Currency ────────────────────────────────────────────────────

fn currency(id: CurrencyType, drop_weight: f64, description: &str) -> CurrencyDefinition {
    CurrencyDefinition {
        id,
        name: id.name().to_string(),
        description: description.to_string(),
        drop_weight,
    }
}

/// Socket orbs only come from their own roll, so they carry no weight here.
fn currencies() -> Vec<CurrencyDefinition> {
    use CurrencyType::*;
    vec![
        currency(Transmutation, 100.0, "Upgrades a normal item to a magic item"),
        currency(Alteration, 80.0, "Rerolls the affixes on a magic item"),
        currency(Augmentation, 30.0, "Adds an affix to a magic item"),
        currency(Alchemy, 20.0, "Upgrades a normal item to a rare item"),
        currency(Chaos, 5.0, "Rerolls the affixes on a rare item"),
        currency(Exalted, 0.5, "Adds an affix to a rare item"),
        currency(Divine, 0.2, "Rerolls the values of all affixes on an item"),
        currency(Scouring, 15.0, "Removes all affixes from an item"),
    ]
}
