//! circle — pedestrians crossing a circle to the opposite side.
//!
//! Places the configured number of agents evenly on a circle, sends each to
//! its antipode, and runs until everyone arrives or the step limit is hit.
//!
//! ```text
//! cargo run -p circle --release                 # built-in defaults
//! cargo run -p circle --release -- circle.json  # JSON SimConfig
//! RUST_LOG=debug cargo run -p circle            # per-arrival events
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use sfm_core::SimConfig;
use sfm_metrics::MetricsObserver;
use sfm_sim::SimBuilder;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── Constants ─────────────────────────────────────────────────────────────────

const MAX_STEPS:       u64 = 1_000_000;
const SAMPLE_INTERVAL: f64 = 0.25; // seconds between inner-circle samples
const CORRIDOR:        (f64, f64) = (440.0, 640.0);

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // 1. Configuration.
    let path = std::env::args().nth(1);
    let config = load_config(path.as_deref().map(Path::new))?;
    info!(source = path.as_deref().unwrap_or("defaults"), "configuration loaded");

    println!("=== circle — Social Force crossing ===");
    println!(
        "Agents: {}  |  dt: {} s  |  Radius: {}  |  Seed: {}",
        config.agent_count, config.timestep, config.outer_radius, config.seed
    );
    println!();

    // 2. Build sim.
    let mut sim = SimBuilder::new(config).build()?;

    // 3. Run.
    let mut metrics = MetricsObserver::new(SAMPLE_INTERVAL)?;
    let t0 = Instant::now();
    let outcome = sim.run(MAX_STEPS, &mut metrics);
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!(
        "{} after {} steps ({:.3} s simulated) in {:.3} s wall",
        if outcome.is_converged() { "Converged" } else { "Step limit" },
        outcome.steps(),
        sim.clock().elapsed_secs(),
        elapsed.as_secs_f64(),
    );
    println!("  arrived            : {}/{}", sim.arrived_count(), sim.agents().len());
    if let Some(t) = metrics.mean_arrival_secs() {
        println!("  mean arrival time  : {t:.3} s");
    }
    if let Some(v) = metrics.mean_arrival_speed() {
        println!("  mean arrival speed : {v:.3} m/s");
    }
    if let Some(d) = metrics.peak_density_per_m2() {
        println!("  peak inner density : {d:.3} agents/m²");
    }
    let (in_corridor, corridor_speed) = sim.corridor_occupancy_and_speed(CORRIDOR.0, CORRIDOR.1);
    println!("  corridor {CORRIDOR:?} : {in_corridor} agents, {corridor_speed:.3} m/s");
    let density = sim.density();
    let local: Vec<f64> = sim.agents().iter().filter_map(|a| density.agent(a.id())).collect();
    let local_max = local.iter().copied().fold(0.0, f64::max);
    let local_mean = if local.is_empty() { 0.0 } else { local.iter().sum::<f64>() / local.len() as f64 };
    println!("  final inner density: {:.3e} agents/unit²", density.inner_circle());
    println!(
        "  local density (r={}) : mean {local_mean:.3e}, max {local_max:.3e} agents/unit²",
        sim.config().local_density_radius
    );
    println!();

    // 5. Per-agent table.
    println!(
        "{:<6} {:<4} {:>10} {:>10} {:>10} {:>8}",
        "Agent", "Q", "Path", "Arrived", "Time s", "Speed"
    );
    println!("{}", "-".repeat(54));
    for a in sim.agents() {
        let time = a
            .arrival_step()
            .map(|s| format!("{:.3}", sim.clock().secs_at(s)))
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<6} {:<4} {:>10.1} {:>10} {:>10} {:>8.3}",
            a.id().to_string(),
            a.quadrant().to_string(),
            a.total_displacement(),
            if a.target_reached() { "yes" } else { "no" },
            time,
            a.speed(),
        );
    }

    Ok(())
}
