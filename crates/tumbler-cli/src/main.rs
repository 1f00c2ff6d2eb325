use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tumbler_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "tumbler")]
#[command(author, version, about = "An odometer-style scrolling counter for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of ~/.config/tumbler/config.toml
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run {
        /// Initial value
        #[arg(short = 'v', long, allow_negative_numbers = true)]
        value: Option<f64>,
        /// Start the random-walk ticker right away
        #[arg(short = 't', long)]
        ticker: bool,
        /// Seed for the ticker
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the frames of a single digit scroll without a terminal UI
    Trace(commands::trace::TraceArgs),
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short = 'f', long)]
        force: bool,
    },
    /// Print the configuration file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = match AppConfig::load_from(&config_path) {
        Ok(config) => config,
        // A broken file must not block recreating or locating it
        Err(e)
            if matches!(
                cli.command,
                Some(Commands::Config {
                    action: ConfigAction::Init { .. } | ConfigAction::Path
                })
            ) =>
        {
            eprintln!("Ignoring unreadable config: {}", e);
            AppConfig::default()
        }
        Err(e) => return Err(e.into()),
    };

    // Initialize logging; stderr keeps stdout free for trace output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    tracing::debug!("Loaded config from {}", config_path.display());

    match cli.command {
        Some(Commands::Run {
            value,
            ticker,
            seed,
        }) => {
            let mut config = config;
            if seed.is_some() {
                config.ticker.seed = seed;
            }
            commands::run::run(Arc::new(config), value, ticker).await
        }
        None => commands::run::run(Arc::new(config), None, false).await,
        Some(Commands::Trace(args)) => commands::trace::run(&config, &args),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
