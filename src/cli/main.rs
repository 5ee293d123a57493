//! Command-line front end for pincode lookups.
//!
//! Loads the dataset once, runs a single query and prints the result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use indiapins::config::Config;
use indiapins::{DatasetStatus, Pincodes};

#[derive(Parser, Debug)]
#[command(name = "indiapins")]
#[command(about = "Look up Indian postal codes")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset file (line-delimited JSON, optionally .gz or .bz2)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Fail on malformed dataset lines instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every record for a pincode, one JSON object per line
    Lookup { code: String },

    /// Print whether a pincode exists
    Valid { code: String },

    /// Print the districts for a pincode
    District { code: String },

    /// Print office coordinates for a pincode as JSON
    Coordinates { code: String },

    /// Print pincodes near the given one
    Nearby {
        code: String,

        /// Maximum lat+lon difference in degrees
        #[arg(long)]
        max_diff: Option<f64>,
    },

    /// Print dataset load statistics
    Stats,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "indiapins=debug" } else { "warn" })
    });
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if args.strict {
        config.dataset.strict = true;
    }

    let data_path = config.resolve_data_path(args.data.as_deref());
    info!("Using dataset {}", data_path.display());

    let mut pincodes = Pincodes::open(&data_path, config.load_policy());
    if config.dataset.spatial_index && matches!(args.command, Command::Nearby { .. }) {
        pincodes = pincodes.with_spatial_index();
    }

    match args.command {
        Command::Lookup { code } => {
            for record in pincodes.matching(&code)? {
                println!("{}", serde_json::to_string(record)?);
            }
        }
        Command::Valid { code } => {
            println!("{}", pincodes.is_valid(&code)?);
        }
        Command::District { code } => {
            println!("{}", pincodes.district_match(&code)?);
        }
        Command::Coordinates { code } => {
            let coords = pincodes.coordinates(&code)?;
            println!("{}", serde_json::to_string_pretty(&coords)?);
        }
        Command::Nearby { code, max_diff } => {
            let max_diff = max_diff.unwrap_or(config.nearby.max_diff);
            for nearby in pincodes.nearby(&code, max_diff)? {
                println!("{}", nearby);
            }
        }
        Command::Stats => match pincodes.status() {
            DatasetStatus::Ready(report) => {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
            DatasetStatus::Unavailable(reason) => {
                anyhow::bail!("Dataset unavailable: {}", reason);
            }
        },
    }

    Ok(())
}
