use std::env;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::{Delta, ProviderCommand, direction_label};
use crate::stats::{PlayerStatRecord, StatField};
use crate::stats_fetch::{self, DEFAULT_STATS_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsSource {
    Api { url: String },
    Demo { players: usize, seed: u64 },
}

impl StatsSource {
    pub fn from_env() -> Self {
        let source = env::var("STATS_SOURCE")
            .unwrap_or_else(|_| "api".to_string())
            .to_lowercase();
        if source == "demo" {
            let players = env::var("STATS_DEMO_PLAYERS")
                .ok()
                .and_then(|val| val.parse::<usize>().ok())
                .unwrap_or(120)
                .clamp(1, 500);
            let seed = env::var("STATS_DEMO_SEED")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(42);
            return StatsSource::Demo { players, seed };
        }
        let url = env::var("STATS_API_URL")
            .ok()
            .filter(|val| !val.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATS_URL.to_string());
        StatsSource::Api { url }
    }

    pub fn describe(&self) -> String {
        match self {
            StatsSource::Api { url } => url.clone(),
            StatsSource::Demo { players, seed } => format!("demo ({players} players, seed {seed})"),
        }
    }

    pub fn load(&self) -> Result<Vec<PlayerStatRecord>> {
        match self {
            StatsSource::Api { url } => stats_fetch::fetch_player_stats(url),
            StatsSource::Demo { players, seed } => Ok(seed_stats(*players, *seed)),
        }
    }
}

/// Services fetch commands on a worker thread, one at a time in arrival order.
/// The thread exits once either channel end is dropped.
pub fn spawn_stats_provider(
    source: StatsSource,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Stats source: {}",
            source.describe()
        )));

        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchStats { sort } => {
                    let _ = tx.send(Delta::Log(format!(
                        "[INFO] Fetching stats (sort {} {})",
                        sort.field.label(),
                        direction_label(sort.direction)
                    )));
                    let delta = match source.load() {
                        Ok(records) => Delta::SetStats {
                            records,
                            updated: chrono::Local::now().format("%H:%M:%S").to_string(),
                        },
                        Err(err) => Delta::FetchFailed(format!("{err:#}")),
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    });
}

const FIRST_NAMES: [&str; 16] = [
    "Jalen", "Josh", "Patrick", "Lamar", "Justin", "Tyreek", "Christian", "Davante", "Travis",
    "Saquon", "Amon-Ra", "CeeDee", "Derrick", "Stefon", "Bijan", "Puka",
];

const LAST_NAMES: [&str; 16] = [
    "Allen", "Jackson", "Mahomes", "Hurts", "Hill", "McCaffrey", "Adams", "Kelce", "Barkley",
    "St. Brown", "Lamb", "Henry", "Diggs", "Robinson", "Nacua", "Jefferson",
];

#[derive(Clone, Copy)]
enum DemoRole {
    Quarterback,
    RunningBack,
    Receiver,
}

/// Deterministic stand-in for the stats API. Names are unique; a few players
/// ship without fantasy totals, like rows the model never scored.
pub fn seed_stats(players: usize, seed: u64) -> Vec<PlayerStatRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(players);
    for idx in 0..players {
        let first = FIRST_NAMES[idx % FIRST_NAMES.len()];
        let last = LAST_NAMES[(idx / FIRST_NAMES.len()) % LAST_NAMES.len()];
        let generation = idx / (FIRST_NAMES.len() * LAST_NAMES.len());
        let name = if generation == 0 {
            format!("{first} {last}")
        } else {
            format!("{first} {last} {}", generation + 1)
        };

        let role = match rng.gen_range(0..3) {
            0 => DemoRole::Quarterback,
            1 => DemoRole::RunningBack,
            _ => DemoRole::Receiver,
        };
        let mut record = PlayerStatRecord::named(name);
        match role {
            DemoRole::Quarterback => {
                record.passing_yards = Some(rng.gen_range(150.0..320.0));
                record.passing_tds = Some(rng.gen_range(0.5..2.8));
                record.interceptions = Some(rng.gen_range(0.1..1.2));
                record.rushing_yards = Some(rng.gen_range(0.0..45.0));
                record.rushing_tds = Some(rng.gen_range(0.0..0.4));
            }
            DemoRole::RunningBack => {
                record.rushing_yards = Some(rng.gen_range(20.0..110.0));
                record.rushing_tds = Some(rng.gen_range(0.0..1.1));
                record.receptions = Some(rng.gen_range(0.5..5.0));
                record.receiving_yards = Some(rng.gen_range(3.0..45.0));
                record.receiving_tds = Some(rng.gen_range(0.0..0.3));
            }
            DemoRole::Receiver => {
                record.receptions = Some(rng.gen_range(1.5..8.5));
                record.receiving_yards = Some(rng.gen_range(20.0..115.0));
                record.receiving_tds = Some(rng.gen_range(0.0..0.9));
            }
        }
        record.fumbles = Some(rng.gen_range(0.0..0.3));

        if !rng.gen_bool(0.08) {
            record.fantasy_ppr = Some(fantasy_points(&record, true));
            record.fantasy_non_ppr = Some(fantasy_points(&record, false));
        }
        out.push(record);
    }
    out
}

/// Standard league scoring; PPR adds one point per reception.
fn fantasy_points(record: &PlayerStatRecord, ppr: bool) -> f64 {
    let v = |field: StatField| record.value_or_zero(field);
    let mut points = v(StatField::PassingYards) * 0.04 + v(StatField::PassingTds) * 4.0
        - v(StatField::Interceptions) * 2.0
        + v(StatField::RushingYards) * 0.1
        + v(StatField::RushingTds) * 6.0
        + v(StatField::ReceivingYards) * 0.1
        + v(StatField::ReceivingTds) * 6.0
        - v(StatField::Fumbles) * 2.0;
    if ppr {
        points += v(StatField::Receptions);
    }
    points
}
