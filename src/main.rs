//! Command line entry point for the doubles scheduler
//!
//! Loads a JSON snapshot of the club's players, courts and results, then
//! prints the standings or the next round of pairings as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use doubles_scheduler::config::{validate_config, AllocationMode, AppConfig};
use doubles_scheduler::service::{GameRequest, SchedulerService};
use doubles_scheduler::store::Snapshot;
use doubles_scheduler::utils::{parse_court_ids, parse_game_date, today};
use serde_json::json;
use std::path::PathBuf;
use tracing::{error, info};

/// Doubles Scheduler - rankings and balanced court pairings
#[derive(Parser)]
#[command(
    name = "doubles-scheduler",
    version,
    about = "Rankings and balanced doubles pairings for a recreational club",
    long_about = "Doubles Scheduler rebuilds player standings from recorded set results and \
                 pairs the selected players onto courts, strongest with weakest, so every \
                 court gets a balanced match."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Club data snapshot
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON snapshot with players, courts and results"
    )]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current standings
    Rankings,

    /// Generate the next round for the selected players
    Pairings {
        /// Sets per match
        #[arg(long, value_name = "N")]
        sets: Option<u32>,

        /// Game date (YYYY-MM-DD), defaults to today
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// Comma separated court ids to use
        #[arg(long, value_name = "IDS")]
        courts: Option<String>,

        /// Shuffle players instead of seeding by rank
        #[arg(long)]
        random: bool,

        /// Seed for the random mode
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },

    /// Validate configuration and data, then exit
    Check,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Command::Pairings { random, seed, .. } = &args.command {
        if *random {
            config.scheduling.mode = AllocationMode::Random;
        }
        if seed.is_some() {
            config.scheduling.random_seed = *seed;
        }
    }

    validate_config(&config)?;
    Ok(config)
}

fn load_snapshot(args: &Args) -> Result<Snapshot> {
    match &args.data {
        Some(path) => {
            info!("Loading club data from: {}", path.display());
            Snapshot::from_path(path)
        }
        None => {
            info!("No data file given, starting with an empty club");
            Ok(Snapshot::default())
        }
    }
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let snapshot = load_snapshot(args)?;
    let service = SchedulerService::from_snapshot(config, snapshot);

    match &args.command {
        Command::Rankings => {
            let standings = service.rankings()?;
            println!("{}", serde_json::to_string_pretty(standings.rankings())?);
        }
        Command::Pairings {
            sets, date, courts, ..
        } => {
            let game_date = match date {
                Some(raw) => parse_game_date(raw)?,
                None => today(),
            };
            let court_ids = courts.as_deref().map(parse_court_ids).transpose()?;

            let allocation = service.generate_game(&GameRequest {
                sets: *sets,
                game_date,
                court_ids,
            })?;
            println!("{}", serde_json::to_string_pretty(&allocation)?);
        }
        Command::Check => {
            // Records were checked on load; a rebuild applies the unknown-player policy
            let standings = service.rankings()?;
            let summary = json!({
                "service": config.service.name,
                "mode": config.scheduling.mode.to_string(),
                "players": service.players()?.len(),
                "selected": service.selected_players()?.len(),
                "courts": service.courts()?.len(),
                "results": service.results()?.len(),
                "ranked": standings.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
            info!("Configuration and data validated successfully");
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} v{} (mode: {})",
        config.service.name,
        doubles_scheduler::VERSION,
        config.scheduling.mode
    );

    if let Err(e) = run(&args, &config) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
