use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use cricsquad_engine::composer::{self, ComposeOptions, RosterConstraints};
use cricsquad_engine::fake_pool;
use cricsquad_engine::pool::{PlayerRecord, ScoringWeights};
use cricsquad_engine::report;
use cricsquad_engine::topsis;

// This binary is intentionally simple: it loads one pool snapshot (or generates a
// seeded synthetic one) and prints the ranked squads. It is meant for quick manual
// weight-tuning iterations, not as the serving surface.
fn main() -> Result<()> {
    env_logger::init();

    let pool = match std::env::args().nth(1) {
        Some(path) => load_pool(Path::new(&path))?,
        None => fake_pool::generate(env_u64("POOL_SEED", 7), env_usize("POOL_CANDIDATES", 3)),
    };
    info!("scoring {} candidates", pool.len());

    let weights = ScoringWeights {
        form: env_f64("FORM_WEIGHT", 0.7),
        consistency: env_f64("CONSISTENCY_WEIGHT", 0.3),
    };
    let constraints = RosterConstraints {
        required_overseas: env_usize("REQUIRED_OVERSEAS", 4),
        min_keepers: env_usize("MIN_KEEPERS", 1),
        ..RosterConstraints::default()
    };
    let options = ComposeOptions {
        top_k: env_usize("TOP_K", 5),
        max_combinations: env_u64("MAX_COMBINATIONS", 5_000_000),
        parallel: env_flag("PARALLEL"),
    };

    let scored = topsis::score(&pool, weights)?;
    let squads = composer::compose(&scored, &constraints, &options)?;
    info!("{} squads pass the roster constraints", squads.len());

    let reports = report::build_reports(&squads);
    let json = serde_json::to_string_pretty(&reports).context("serialize squad reports")?;
    println!("{json}");
    Ok(())
}

fn load_pool(path: &Path) -> Result<Vec<PlayerRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read pool file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse pool file {}", path.display()))
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<f64>().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    match std::env::var(key) {
        Ok(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "on" | "yes"
        ),
        Err(_) => false,
    }
}
