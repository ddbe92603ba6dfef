use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stickytabs_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "stickytabs")]
#[command(author, version, about = "Browse a grouped catalog with sticky category tabs")]
struct Cli {
    /// Configuration file (default: ~/.config/stickytabs/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal UI
    Run {
        /// Catalog TOML file (built-in demo menu if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Hide the header row
        #[arg(long)]
        no_header: bool,
    },
    /// Print the flattened rows and their index tables
    Rows {
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        no_header: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compute spacer, nav and press values for a given geometry
    Probe {
        /// Scroll offset
        #[arg(long, allow_negative_numbers = true)]
        offset: f64,
        /// Measured header height
        #[arg(long, default_value_t = 240.0)]
        header: f64,
        /// Measured nav overlay height (fallback if omitted)
        #[arg(long)]
        nav: Option<f64>,
        /// Measured tabs bar height (configured tab height if omitted)
        #[arg(long)]
        tabs: Option<f64>,
        /// Press this tab and print the scroll request
        #[arg(long)]
        press: Option<usize>,
        #[arg(long)]
        catalog: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Log to a file while the terminal UI owns the screen, stderr otherwise
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(
        AppConfig::load_from(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?,
    );

    let command = cli.command.unwrap_or(Commands::Run {
        catalog: None,
        no_header: false,
    });
    init_logging(&config, matches!(command, Commands::Run { .. }))?;

    match command {
        Commands::Run { catalog, no_header } => {
            let catalog = commands::load_catalog(catalog.as_deref())?;
            commands::run::run(config, catalog, !no_header).await
        }
        Commands::Rows {
            catalog,
            no_header,
            json,
        } => {
            let catalog = commands::load_catalog(catalog.as_deref())?;
            commands::rows::run(&config, catalog, !no_header, json)
        }
        Commands::Probe {
            offset,
            header,
            nav,
            tabs,
            press,
            catalog,
            json,
        } => {
            let catalog = commands::load_catalog(catalog.as_deref())?;
            let geometry = commands::probe::ProbeInput {
                offset,
                header,
                nav,
                tabs,
                press,
            };
            commands::probe::run(&config, catalog, geometry, json)
        }
        Commands::InitConfig { force } => {
            commands::init_config::run(cli.config.as_deref(), force).map(|_| ())
        }
    }
}
