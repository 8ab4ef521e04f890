//! Simulation report generation.

use serde::{Deserialize, Serialize};

/// Statistics for one simulated dungeon run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub victory: bool,
    pub rooms_cleared: u32,
    pub casualties: u32,
    /// Room in which the party was wiped out, if it was
    pub defeated_in_room: Option<u32>,
    pub avg_final_level: f64,
    /// XP each hero received, averaged over the whole party
    pub xp_per_hero: f64,
    /// Combat actions taken by heroes and enemies together
    pub actions: u32,
    pub reward: u32,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub dungeon: String,
    pub rooms: u32,
    pub num_runs: u32,
    pub victories: u32,
    pub victory_rate: f64,

    pub avg_rooms_cleared: f64,
    pub avg_casualties: f64,
    pub avg_final_level: f64,
    pub avg_xp_per_hero: f64,
    pub avg_actions: f64,
    pub avg_reward: f64,

    /// `defeats_per_room[i]` counts runs wiped out in room `i + 1`
    pub defeats_per_room: Vec<u32>,

    // Individual run stats, left out of the JSON report
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn average(runs: &[RunStats], f: impl Fn(&RunStats) -> f64) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    runs.iter().map(f).sum::<f64>() / runs.len() as f64
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(dungeon: &str, rooms: u32, runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let victories = runs.iter().filter(|r| r.victory).count() as u32;

        let mut defeats_per_room = vec![0; rooms as usize];
        for room in runs.iter().filter_map(|r| r.defeated_in_room) {
            if let Some(count) = (room as usize)
                .checked_sub(1)
                .and_then(|i| defeats_per_room.get_mut(i))
            {
                *count += 1;
            }
        }

        Self {
            dungeon: dungeon.to_string(),
            rooms,
            num_runs,
            victories,
            victory_rate: victories as f64 / num_runs.max(1) as f64,
            avg_rooms_cleared: average(&runs, |r| r.rooms_cleared as f64),
            avg_casualties: average(&runs, |r| r.casualties as f64),
            avg_final_level: average(&runs, |r| r.avg_final_level),
            avg_xp_per_hero: average(&runs, |r| r.xp_per_hero),
            avg_actions: average(&runs, |r| r.actions as f64),
            avg_reward: average(&runs, |r| r.reward as f64),
            defeats_per_room,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str(&format!("                    {}\n", self.dungeon));
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} victories ({:.1}%)\n\n",
            self.num_runs,
            self.victories,
            self.victory_rate * 100.0
        ));

        report.push_str("── PARTY ────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Rooms Cleared:   {:.2} / {}\n",
            self.avg_rooms_cleared, self.rooms
        ));
        report.push_str(&format!("  Avg Casualties:      {:.2}\n", self.avg_casualties));
        report.push_str(&format!("  Avg Final Level:     {:.2}\n", self.avg_final_level));
        report.push_str(&format!("  Avg XP per Hero:     {:.1}\n", self.avg_xp_per_hero));
        report.push_str(&format!("  Avg Actions:         {:.0}\n", self.avg_actions));
        report.push_str(&format!("  Avg Gold:            {:.0}\n\n", self.avg_reward));

        report.push_str("── DEFEATS BY ROOM ──────────────────────────────────────────────\n");
        for (i, defeats) in self.defeats_per_room.iter().enumerate() {
            let pct = *defeats as f64 / self.num_runs.max(1) as f64 * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            let boss = if i + 1 == self.rooms as usize { " (Boss)" } else { "" };
            report.push_str(&format!(
                "  Room {:2}{:7}: {:>5.1}% {}\n",
                i + 1,
                boss,
                pct,
                bar
            ));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.victory_rate > 0.95 {
            "TOO EASY - Party rarely loses"
        } else if self.victory_rate > 0.5 {
            "GOOD - Challenging but fair"
        } else if self.victory_rate > 0.2 {
            "HARD - Most runs fail"
        } else {
            "TOO HARD - Party almost never wins"
        };
        report.push_str(&format!("  Rating: {}\n", rating));

        for (i, defeats) in self.defeats_per_room.iter().enumerate() {
            let share = *defeats as f64 / self.num_runs.max(1) as f64;
            if share > 0.25 {
                report.push_str(&format!(
                    "  ⚠️  Room {} ends {:.1}% of runs\n",
                    i + 1,
                    share * 100.0
                ));
            }
        }
        if self.avg_casualties > 2.0 && self.victory_rate > 0.5 {
            report.push_str("  ⚠️  Victories are costly - consider more healing\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
