// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use berth::output::OutputMode;
use berth::runtime::RuntimeType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "berth")]
#[command(about = "Declarative container reconciliation for Docker and Podman")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputMode::Normal)]
    pub output: OutputMode,

    /// State file recording the container identity and observations
    #[arg(long, global = true, default_value = "berth.state.json")]
    pub state: PathBuf,

    /// Container runtime (auto-detected if omitted)
    #[arg(long, global = true, value_enum)]
    pub runtime: Option<RuntimeType>,

    /// Runtime socket path (defaults to the runtime's standard socket)
    #[arg(long, global = true)]
    pub socket: Option<String>,

    /// YAML file with readiness polling settings
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create, keep, or replace the container so it matches the desired state
    Apply {
        /// Desired state YAML file
        desired: PathBuf,
    },

    /// Re-read the recorded container and print what was observed
    Refresh,

    /// Remove the recorded container
    Destroy,

    /// Show what apply would do, without touching the runtime
    Plan {
        /// Desired state YAML file
        desired: PathBuf,
    },
}
