//! Main entry point for the Ready Room matchmaking simulator
//!
//! Generates a seeded player population, replays the arrivals through the
//! matchmaking engine, and reports every committed match plus an end-of-run
//! summary in text or JSON form.

use anyhow::Result;
use clap::Parser;
use ready_room::config::{validate_config, AppConfig};
use ready_room::report::{render, RunReport};
use ready_room::sim::run_simulation;
use std::path::PathBuf;
use tracing::info;

/// Ready Room Matchmaking Simulator - deterministic 5v5 queue matching
#[derive(Parser)]
#[command(
    name = "ready-room",
    version,
    about = "A deterministic 5v5 skill-window matchmaking engine and simulator",
    long_about = "Ready Room matches queued players into balanced ten-player contests based \
                 on skill rating and recent form. The bundled simulator generates a seeded \
                 population, replays the arrivals through the engine in order, and reports \
                 every committed match along with queue and wait time statistics."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to a TOML configuration file"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override the log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Player count override
    #[arg(
        short,
        long,
        value_name = "COUNT",
        help = "Override the number of players to simulate"
    )]
    players: Option<usize>,

    /// Arrival window override
    #[arg(
        long,
        value_name = "SECONDS",
        help = "Override the arrival window in seconds"
    )]
    duration: Option<f64>,

    /// Rating spread override
    #[arg(
        long,
        value_name = "RATING",
        help = "Override the maximum rating spread allowed per match"
    )]
    max_spread: Option<i32>,

    /// RNG seed override
    #[arg(
        short,
        long,
        value_name = "SEED",
        help = "Seed the player generator for a reproducible run"
    )]
    seed: Option<u64>,

    /// Balance policy override
    #[arg(
        long,
        value_name = "POLICY",
        help = "Override the team balance policy (greedy, exhaustive)"
    )]
    balance_policy: Option<String>,

    /// Output format
    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "text",
        help = "Output format (text, json)"
    )]
    format: String,

    /// Suppress per-match output
    #[arg(short, long, help = "Only print the final summary")]
    quiet: bool,

    /// Dry run mode
    #[arg(
        long,
        help = "Validate the configuration and exit without simulating"
    )]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
///
/// Logs go to stderr so the report on stdout stays clean for piping.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup banner with run information
fn display_startup_banner(config: &AppConfig) {
    info!("🚀 Ready Room Matchmaking Simulator");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Players: {}", config.simulation.players);
    info!(
        "   Arrival window: {}s",
        config.simulation.duration_seconds
    );
    info!("   Max spread: {}", config.engine.max_spread);
    info!("   Balance policy: {}", config.engine.balance_policy);
    match config.simulation.seed {
        Some(seed) => info!("   Seed: {}", seed),
        None => info!("   Seed: from entropy"),
    }
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(players) = args.players {
        config.simulation.players = players;
    }

    if let Some(duration) = args.duration {
        config.simulation.duration_seconds = duration;
    }

    if let Some(max_spread) = args.max_spread {
        config.engine.max_spread = max_spread;
    }

    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }

    if let Some(policy) = &args.balance_policy {
        config.engine.balance_policy = policy.parse()?;
    }

    // Overrides can introduce invalid values, so check the merged result
    validate_config(&config)?;

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Resolve file/env configuration and CLI overrides before anything else
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Logging comes up next so every later step can trace
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let text_output = match args.format.as_str() {
        "text" => true,
        "json" => false,
        other => {
            eprintln!("Unknown output format: {} (expected 'text' or 'json')", other);
            std::process::exit(1);
        }
    };

    if args.dry_run {
        info!("Configuration is valid");
        display_startup_banner(&config);
        info!("Dry run complete - exiting without simulating");
        return Ok(());
    }

    display_startup_banner(&config);

    if text_output {
        println!("{}", render::render_banner(&config));
    }

    let quiet = args.quiet;
    let outcome = run_simulation(&config, |matched| {
        if text_output && !quiet {
            println!("{}", render::render_match(matched));
        }
    })?;

    if text_output {
        println!("{}", render::render_summary(&outcome));
    } else {
        let report = RunReport::from_outcome(&config, &outcome);
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
