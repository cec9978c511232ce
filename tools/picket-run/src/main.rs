//! picket-run: headless driver for the patrol simulation.
//!
//! Usage:
//!   picket-run --ticks 600 --seed 7
//!   picket-run --config picket.json --shoot-at-tick 90 --verbose
//!
//! Runs the engine for a fixed number of ticks, logging events as they
//! happen, then prints the final snapshot as JSON on stdout.

mod logging;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use picket_core::commands::SimCommand;
use picket_core::events::SimEvent;
use picket_sim::pool::PoolObject;
use picket_sim::{SimConfig, SimulationEngine};

#[derive(Debug, Parser)]
#[command(author, version, about = "Run the enemy patrol simulation headless", long_about = None)]
struct Cli {
    /// JSON config file. Missing fields take their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run.
    #[arg(short, long, default_value_t = 300)]
    ticks: u64,

    /// Override the config's RNG seed.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Fire a player projectile at the nearest active enemy on this tick.
    #[arg(long)]
    shoot_at_tick: Option<u64>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {err}");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let mut engine = SimulationEngine::new(config);
    let mut last = None;

    for tick in 0..cli.ticks {
        if cli.shoot_at_tick == Some(tick) {
            shoot_nearest(&mut engine);
        }

        let snapshot = engine.tick();
        for event in &snapshot.events {
            log_event(event);
        }
        last = Some(snapshot);
    }

    match last {
        Some(snapshot) => print_json(&snapshot),
        None => log::warn!("no ticks run"),
    }
}

/// Fire from the player toward the closest active enemy.
fn shoot_nearest(engine: &mut SimulationEngine) {
    let player = engine.player_position();
    let nearest = engine
        .pool()
        .iter()
        .filter(|enemy| enemy.in_use())
        .min_by(|a, b| {
            a.position()
                .distance_squared(player)
                .total_cmp(&b.position().distance_squared(player))
        })
        .map(|enemy| (enemy.id(), enemy.position()));

    match nearest {
        Some((agent, position)) => {
            log::info!("player fires at {agent}");
            engine.queue_command(SimCommand::PlayerFire {
                direction: position - player,
            });
        }
        None => log::warn!("no active enemy to shoot at"),
    }
}

fn log_event(event: &SimEvent) {
    match event {
        SimEvent::AlertRaised {
            source,
            delivered,
            rejected,
        } => log::info!("{source} raised the alarm: {delivered} alerted, {rejected} rejected"),
        SimEvent::StateChanged { agent, from, to } => log::info!("{agent}: {from:?} -> {to:?}"),
        SimEvent::EnemyFired { agent, .. } => log::info!("Incoming Attack from {agent}"),
        other => log::debug!("{other:?}"),
    }
}

fn print_json(snapshot: &picket_core::state::SimSnapshot) {
    match serde_json::to_string_pretty(snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}
