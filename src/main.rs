// ABOUTME: Entry point for the berth CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use berth::config::{DesiredContainer, ReconcilerSettings};
use berth::error::Result;
use berth::output::Output;
use berth::runtime::RuntimeConfig;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output);
    if let Err(e) = run(cli, output).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    let runtime_config = RuntimeConfig {
        runtime: cli.runtime,
        socket: cli.socket.clone(),
    };
    let settings = match &cli.settings {
        Some(path) => ReconcilerSettings::load(path)?,
        None => ReconcilerSettings::default(),
    };

    match cli.command {
        Commands::Apply { desired } => {
            let desired = DesiredContainer::load(&desired)?;
            commands::apply(desired, &cli.state, &runtime_config, settings, output).await
        }
        Commands::Refresh => {
            commands::refresh(&cli.state, &runtime_config, settings, output).await
        }
        Commands::Destroy => {
            commands::destroy(&cli.state, &runtime_config, settings, output).await
        }
        Commands::Plan { desired } => {
            let desired = DesiredContainer::load(&desired)?;
            commands::plan(desired, &cli.state, output)
        }
    }
}
