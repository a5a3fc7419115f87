//! Gamemath CLI
//!
//! Plays single rounds, runs seeded simulations and prints the effective
//! configuration.

use clap::{Parser, Subcommand};
use gamemath::{
    simulate, ConfigLoader, ConfigOverrides, GameOptions, GameProcessor, GameType,
};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

/// Casino game math engine
#[derive(Parser)]
#[command(name = "gamemath")]
#[command(about = "Per-round outcomes and payouts for chance games")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one round and print the result as JSON
    Play {
        /// Game identifier, e.g. dice or coin_flip
        game: String,

        /// Round value in [0, 1)
        #[arg(long)]
        value: f64,

        /// Player options as a JSON object
        #[arg(long)]
        options: Option<String>,

        /// Config overrides as a JSON object
        #[arg(long)]
        overrides: Option<String>,
    },

    /// Simulate many rounds with seeded values
    Simulate {
        #[arg(value_parser = parse_game)]
        game: GameType,

        #[arg(short, long, default_value = "100000")]
        trials: u64,

        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Player options as a JSON object
        #[arg(long)]
        options: Option<String>,

        /// Config overrides as a JSON object
        #[arg(long)]
        overrides: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write the configuration to this path instead of printing it
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "gamemath=debug" } else { "gamemath=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };

    match cli.command {
        Commands::Play {
            game,
            value,
            options,
            overrides,
        } => {
            let processor = GameProcessor::new(Arc::new(loader.load_registry()?));
            let options = parse_options(options.as_deref())?;
            let overrides = parse_overrides(overrides.as_deref())?;

            match processor.run_game_math(&game, value, overrides.as_ref(), &options)? {
                Some(result) => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    info!("Verification fingerprint: {}", result.fingerprint());
                }
                None => {
                    warn!("Unknown game '{}'", game);
                    println!("null");
                }
            }
        }
        Commands::Simulate {
            game,
            trials,
            seed,
            options,
            overrides,
        } => {
            let processor = GameProcessor::new(Arc::new(loader.load_registry()?));
            let options = parse_options(options.as_deref())?;
            let overrides = parse_overrides(overrides.as_deref())?;

            let report = simulate(&processor, game, overrides.as_ref(), &options, trials, seed)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            info!("Observed house edge {:.4}", report.house_edge());
        }
        Commands::Config { write } => {
            let config = loader.load()?;
            match write {
                Some(path) => {
                    loader.save(&config, &path.to_string_lossy())?;
                    info!("Wrote configuration to {}", path.display());
                }
                None => print!("{}", toml::to_string_pretty(&config)?),
            }
        }
    }

    Ok(())
}

fn parse_game(id: &str) -> Result<GameType, String> {
    GameType::from_id(id).ok_or_else(|| {
        let known: Vec<&str> = GameType::ALL.iter().map(|g| g.id()).collect();
        format!("unknown game '{}' (expected one of: {})", id, known.join(", "))
    })
}

fn parse_options(raw: Option<&str>) -> Result<GameOptions, serde_json::Error> {
    raw.map_or_else(|| Ok(GameOptions::default()), serde_json::from_str)
}

fn parse_overrides(raw: Option<&str>) -> Result<Option<ConfigOverrides>, serde_json::Error> {
    raw.map(serde_json::from_str).transpose()
}
