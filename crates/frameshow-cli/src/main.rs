mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frameshow_core::Session;

/// Offline host for the Frameshow admin panel core.
#[derive(Parser, Debug)]
#[command(name = "frameshow", version, about)]
struct Cli {
    /// Client configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay recorded event batches (one JSON message per line) and print every file
    Replay {
        /// Album tree snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,
        /// Recorded pushed messages (NDJSON)
        #[arg(long)]
        events: PathBuf,
    },
    /// Print the albums the slideshow can play
    Albums {
        /// Album tree snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,
        /// Include folders without images
        #[arg(long)]
        all: bool,
    },
    /// Print names as the server would store them
    Sanitize {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let root = config.storage.root_prefix.clone();
    match cli.command {
        Command::Replay { snapshot, events } => {
            let tree = commands::load_snapshot(&snapshot, &root)?;
            let data = std::fs::read_to_string(&events)
                .with_context(|| format!("failed to read events {}", events.display()))?;
            let mut session = Session::new(&config, tree);
            let summary = commands::replay(&mut session, &data);
            tracing::info!(
                "Replayed {} batch(es): {} event(s) applied, {} skipped, {} line(s) rejected",
                summary.batches,
                summary.applied,
                summary.skipped,
                summary.rejected
            );
            for path in session.tree().flatten_to_paths() {
                println!("{path}");
            }
        }
        Command::Albums { snapshot, all } => {
            let tree = commands::load_snapshot(&snapshot, &root)?;
            let session = Session::new(&config, tree);
            for album in commands::albums(&session, all) {
                println!("{album}");
            }
        }
        Command::Sanitize { names } => {
            for name in commands::sanitize(&names) {
                println!("{name}");
            }
        }
    }
    Ok(())
}
