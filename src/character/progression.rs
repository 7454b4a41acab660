//! Character experience curve and level-up application.

use super::player::Player;
use super::stats::compute_effective_stats;
use crate::core::constants::MAX_CHARACTER_LEVEL;

/// Experience needed to leave level `i`. Index 0 is unused and the cap
/// level needs nothing.
const EXPERIENCE_TABLE: [f64; 101] = [
    0.0,
    525.0, 1235.0, 2021.0, 3403.0, 5002.0, 7138.0, 10053.0, 13804.0, 18512.0, 24297.0,
    31516.0, 39878.0, 50352.0, 62261.0, 76465.0, 92806.0, 112027.0, 133876.0, 158538.0, 187025.0,
    218895.0, 255366.0, 295852.0, 341805.0, 392470.0, 449555.0, 512121.0, 583857.0, 662181.0,
    747411.0, 844146.0, 949053.0, 1064952.0, 1192712.0, 1333241.0, 1487491.0, 1656447.0,
    1841143.0, 2046202.0, 2265837.0, 2508528.0, 2776124.0, 3061734.0, 3379914.0, 3723676.0,
    4099570.0, 4504444.0, 4951099.0, 5430907.0, 5957868.0, 6528910.0, 7153414.0, 7827968.0,
    8555414.0, 9353933.0, 10212541.0, 11142646.0, 12157041.0, 13252160.0, 14441758.0,
    15731508.0, 17127265.0, 18635053.0, 20271765.0, 22044909.0, 23950783.0, 26019833.0,
    28261412.0, 30672515.0, 33287878.0, 36118904.0, 39163425.0, 42460810.0, 46024718.0,
    49853964.0, 54008554.0, 58473753.0, 63314495.0, 68516464.0, 74132190.0, 80182477.0,
    86725730.0, 93748717.0, 101352108.0, 109524907.0, 118335069.0, 127813148.0, 138033822.0,
    149032822.0, 160890604.0, 173648795.0, 187372170.0, 202153736.0, 218041909.0, 235163399.0,
    253547862.0, 273358532.0, 294631836.0, 317515914.0,
    0.0,
];

/// Experience to advance from `level` to the next. Below 1 reads as level 1,
/// the cap and beyond need nothing.
pub fn experience_for_level(level: u32) -> f64 {
    if level >= MAX_CHARACTER_LEVEL {
        return 0.0;
    }
    EXPERIENCE_TABLE[level.max(1) as usize]
}

/// Applies every pending level-up, carrying the overflow. Returns the levels
/// reached, in order. Life and mana refill when at least one level was gained.
pub fn apply_level_ups(player: &mut Player) -> Vec<u32> {
    let mut reached = Vec::new();
    while player.level < MAX_CHARACTER_LEVEL
        && player.experience_to_next_level > 0.0
        && player.experience >= player.experience_to_next_level
    {
        player.experience -= player.experience_to_next_level;
        player.level += 1;
        player.experience_to_next_level = experience_for_level(player.level);
        reached.push(player.level);
    }
    if !reached.is_empty() {
        let effective = compute_effective_stats(player);
        player.restore_full(&effective);
    }
    reached
}
