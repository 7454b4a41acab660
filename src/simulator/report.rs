//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::runner::RunStats;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_timed_out: u32,

    // Progression
    pub avg_final_level: f64,
    pub avg_maps_unlocked: f64,
    pub avg_total_kills: f64,
    pub avg_boss_kills: f64,
    pub avg_total_deaths: f64,
    pub avg_seconds_to_target: f64,
    pub avg_best_skill_damage: f64,

    // Loot
    pub avg_items_found: f64,
    pub avg_items_lost: f64,
    pub avg_items_equipped: f64,
    pub avg_final_currency: f64,

    // Distributions
    pub level_distribution: BTreeMap<u32, u32>,
    pub map_distribution: BTreeMap<String, u32>,
    pub death_distribution: Vec<u64>,
    /// Mean game second at which each character level was first reached.
    pub avg_seconds_to_level: BTreeMap<u32, f64>,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean(runs: &[RunStats], value: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(value).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, max_seconds: f64) -> Self {
        let num_runs = runs.len() as u32;
        let runs_completed = runs.iter().filter(|r| r.reached_target).count() as u32;
        let runs_timed_out = runs
            .iter()
            .filter(|r| !r.reached_target && r.seconds_played >= max_seconds)
            .count() as u32;

        let completed: Vec<&RunStats> = runs.iter().filter(|r| r.reached_target).collect();
        let avg_seconds_to_target = if completed.is_empty() {
            0.0
        } else {
            completed.iter().map(|r| r.seconds_played).sum::<f64>() / completed.len() as f64
        };

        let mut level_distribution = BTreeMap::new();
        let mut map_distribution = BTreeMap::new();
        let mut level_times: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
            *map_distribution.entry(run.final_map_id.clone()).or_insert(0) += 1;
            for &(level, seconds) in &run.level_up_seconds {
                level_times.entry(level).or_default().push(seconds);
            }
        }
        let avg_seconds_to_level = level_times
            .into_iter()
            .map(|(level, times)| (level, times.iter().sum::<f64>() / times.len() as f64))
            .collect();

        Self {
            num_runs,
            runs_completed,
            runs_timed_out,
            avg_final_level: mean(&runs, |r| r.final_level as f64),
            avg_maps_unlocked: mean(&runs, |r| r.maps_unlocked as f64),
            avg_total_kills: mean(&runs, |r| r.total_kills as f64),
            avg_boss_kills: mean(&runs, |r| r.total_boss_kills as f64),
            avg_total_deaths: mean(&runs, |r| r.total_deaths as f64),
            avg_seconds_to_target,
            avg_best_skill_damage: mean(&runs, |r| r.best_skill_damage),
            avg_items_found: mean(&runs, |r| r.items_found as f64),
            avg_items_lost: mean(&runs, |r| r.items_lost as f64),
            avg_items_equipped: mean(&runs, |r| r.items_equipped as f64),
            avg_final_currency: mean(&runs, |r| r.final_currency as f64),
            level_distribution,
            map_distribution,
            death_distribution: runs.iter().map(|r| r.total_deaths).collect(),
            avg_seconds_to_level,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} reached target, {} timed out\n\n",
            self.num_runs, self.runs_completed, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Maps Unlocked:   {:.1}\n", self.avg_maps_unlocked));
        report.push_str(&format!("  Avg Total Kills:     {:.0}\n", self.avg_total_kills));
        report.push_str(&format!("  Avg Boss Kills:      {:.1}\n", self.avg_boss_kills));
        report.push_str(&format!("  Avg Total Deaths:    {:.1}\n", self.avg_total_deaths));
        report.push_str(&format!("  Avg Best Skill Hit:  {:.1}\n", self.avg_best_skill_damage));
        if self.runs_completed > 0 {
            report.push_str(&format!(
                "  Avg Time to Target:  {:.0}s\n",
                self.avg_seconds_to_target
            ));
        }
        report.push('\n');

        report.push_str("── LOOT ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Items Found:     {:.1}\n", self.avg_items_found));
        report.push_str(&format!("  Avg Items Lost:      {:.1}\n", self.avg_items_lost));
        report.push_str(&format!("  Avg Upgrades Worn:   {:.1}\n", self.avg_items_equipped));
        report.push_str(&format!("  Avg Final Currency:  {:.1}\n\n", self.avg_final_currency));

        report.push_str("── FINAL MAP ────────────────────────────────────────────────────\n");
        for (map_id, count) in &self.map_distribution {
            let pct = (*count as f64 / self.num_runs.max(1) as f64) * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<20} {:>5.1}% {}\n", map_id, pct, bar));
        }
        report.push('\n');

        report.push_str("── DEATH ANALYSIS ───────────────────────────────────────────────\n");
        let mut sorted = self.death_distribution.clone();
        sorted.sort_unstable();
        let min_deaths = sorted.first().copied().unwrap_or(0);
        let max_deaths = sorted.last().copied().unwrap_or(0);
        let median_deaths = sorted.get(sorted.len() / 2).copied().unwrap_or(0);
        report.push_str(&format!("  Min Deaths:    {}\n", min_deaths));
        report.push_str(&format!("  Median Deaths: {}\n", median_deaths));
        report.push_str(&format!("  Max Deaths:    {}\n", max_deaths));

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Level-up pacing table.
    pub fn level_curve_text(&self) -> String {
        let mut report = String::new();
        report.push_str("── LEVEL CURVE ──────────────────────────────────────────────────\n");
        report.push_str("  Level    Avg Time\n");
        for (level, seconds) in &self.avg_seconds_to_level {
            report.push_str(&format!("  {:5}    {:>7.0}s\n", level, seconds));
        }
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
