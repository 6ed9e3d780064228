//! Reward Engine Host Simulator
//!
//! Drives the reaction engine against a generated game host: scripted
//! gift traffic, dialogue windows and day rollovers, with a summary of
//! everything granted.
//!
//! Run with: cargo run -p host-sim
//!
//! Examples:
//!   cargo run -p host-sim -- --days 60 --base-chance 0.2
//!   cargo run -p host-sim -- --config reward.toml --stats-out stats.json

use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::PathBuf;
use std::process;

use reward_core::{EngineConfig, ReactionEngine, ScalingDirection};

mod host;
use host::{gift_schedule, CastConfig, SimHost};

/// Command line arguments for the host simulator
#[derive(Parser, Debug)]
#[command(name = "host-sim")]
#[command(about = "Scripted game host driving the deferred reward engine")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of in-game days to simulate
    #[arg(long, default_value_t = 30)]
    days: u64,

    /// Ticks per day
    #[arg(long, default_value_t = 1200)]
    ticks_per_day: u64,

    /// Tick length in seconds
    #[arg(long, default_value_t = 0.1)]
    tick_seconds: f64,

    /// Gifts handed out per day
    #[arg(long, default_value_t = 6)]
    gifts_per_day: usize,

    /// Number of actors in the cast
    #[arg(long, default_value_t = 12)]
    actors: usize,

    /// Engine configuration file (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured base arm chance (0 to 1)
    #[arg(long)]
    base_chance: Option<f32>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Write final engine stats as JSON
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Log at info level
    #[arg(short, long)]
    verbose: bool,

    /// Log at debug level
    #[arg(long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    if args.dump_config {
        print!("{}", reward_core::default_config_toml());
        return;
    }

    // Set log level based on flags
    let log_level = if args.debug {
        tracing::Level::DEBUG
    } else if args.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    // Initialize logger with proper stderr output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: could not load {}: {}", path.display(), e);
            process::exit(1);
        }),
        None => EngineConfig::default(),
    };
    if let Some(chance) = args.base_chance {
        config.policy.base_chance = chance;
    }

    println!("Reward Engine Host Simulator");
    println!("============================");
    println!("Seed: {}", args.seed);
    println!(
        "Days: {} ({} ticks of {}s each)",
        args.days, args.ticks_per_day, args.tick_seconds
    );
    println!("Gifts per day: {}", args.gifts_per_day);
    println!(
        "Arm policy: base {:.3}, {:.3} per relationship level ({})",
        config.policy.base_chance,
        config.policy.per_level_delta,
        match config.policy.direction {
            ScalingDirection::Bonus => "bonus",
            ScalingDirection::Penalty => "penalty",
        }
    );
    println!();

    // World traffic draws from its own RNG; the engine is seeded separately.
    let mut world_rng = SmallRng::seed_from_u64(args.seed);

    println!("Generating host...");
    let cast_config = CastConfig {
        actor_count: args.actors,
        ..CastConfig::default()
    };
    let sim_host = SimHost::generate(&cast_config, &mut world_rng);
    println!("  Cast of {} actors", sim_host.actors().len());
    println!("  Catalog of {} rows", sim_host.catalog_len());

    let mut engine = ReactionEngine::with_seed(config, sim_host, args.seed);

    println!();
    println!("Starting simulation...");
    println!();

    for _ in 0..args.days {
        engine.on_day_start();

        // Schedule this day's gift ticks up front.
        let gift_ticks = gift_schedule(args.gifts_per_day, args.ticks_per_day, &mut world_rng);

        let mut next_gift = 0;
        for tick in 0..args.ticks_per_day {
            while next_gift < gift_ticks.len() && gift_ticks[next_gift] == tick {
                if let Some(trigger) = engine.host().random_gift(&mut world_rng) {
                    engine.on_trigger(&trigger);
                    // The gift dialogue box stays up for a moment.
                    let dialogue_ticks = world_rng.gen_range(8..30);
                    engine.host_mut().open_dialogue(dialogue_ticks);
                }
                next_gift += 1;
            }
            engine.host_mut().tick_dialogue();
            engine.on_tick(args.tick_seconds);
        }

        let stats = engine.stats();
        println!(
            "[Day {:>3}] {} triggers seen, {} armed, {} granted so far",
            engine.current_day(),
            stats.triggers_seen,
            stats.reactions_armed,
            stats.payouts_granted
        );
    }

    println!();
    let stats = engine.stats();
    println!(
        "Simulation complete. {} day(s), {} trigger(s) seen.",
        args.days, stats.triggers_seen
    );
    println!(
        "  Armed: {} ({} dropped in flight, {} ledger-blocked)",
        stats.reactions_armed, stats.triggers_dropped, stats.ledger_blocked
    );
    println!(
        "  Granted: {} ({} timeouts, {} empty draws, {} failed grants)",
        stats.payouts_granted, stats.timeouts, stats.empty_draws, stats.payouts_failed
    );

    println!();
    println!("Deliveries:");
    if engine.host().grants.is_empty() {
        println!("  (none)");
    } else {
        for (actor_id, item_id) in &engine.host().grants {
            println!("  {} sent back {}", actor_id, item_id);
        }
    }

    if let Some(path) = &args.stats_out {
        match serde_json::to_string_pretty(engine.stats()) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    eprintln!("Warning: could not write {}: {}", path.display(), e);
                } else {
                    println!();
                    println!("Wrote {}", path.display());
                }
            }
            Err(e) => eprintln!("Warning: could not serialize stats: {}", e),
        }
    }
}
