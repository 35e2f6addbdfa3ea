//! CLI Module for dp-mock
//!
//! Provides the command-line interface with subcommands for:
//! - Starting the mock server
//! - Driving the control plane of a running instance
//! - Listing the scenario catalog
//! - Checking the route table

mod commands;

pub use commands::*;

use clap::{Parser, Subcommand, ValueEnum};

use crate::sdk::DEFAULT_BASE_URL;
use crate::VERSION;

/// dp-mock: fault-injection mock server for LLM provider APIs
#[derive(Parser, Debug)]
#[command(name = "dp-mock")]
#[command(version = VERSION)]
#[command(about = "Fault-injection mock server for LLM provider APIs")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "DP_MOCK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Enable JSON log output
    #[arg(long, global = true, env = "DP_MOCK_JSON_LOGS")]
    pub json_logs: bool,

    /// Quiet mode - suppress banner and non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the mock server
    #[command(alias = "s")]
    Serve(ServeCommand),

    /// Send a control command to a running instance
    #[command(alias = "ctl")]
    Control(ControlCommand),

    /// List the scenario catalog
    Scenarios(ScenariosCommand),

    /// Probe every route in-process and report mismatches
    Check,

    /// Show version and build information
    Version,
}

/// Start the mock server
#[derive(Parser, Debug)]
pub struct ServeCommand {
    /// Port to listen on [env: DP_MOCK_PORT, default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Host to bind to [env: DP_MOCK_HOST, default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Detach into the background (Unix only)
    #[arg(short, long, env = "DP_MOCK_DAEMON")]
    pub daemon: bool,
}

/// Send a control command to a running instance
#[derive(Parser, Debug)]
pub struct ControlCommand {
    #[command(subcommand)]
    pub action: ControlAction,

    /// Base URL of the mock server
    #[arg(short, long, global = true, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, global = true, default_value = "5")]
    pub timeout: u64,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ControlAction {
    /// Show process status
    Status,

    /// Re-execute the server process
    Restart,

    /// Stop the server process
    Shutdown,
}

/// List the scenario catalog
#[derive(Parser, Debug)]
pub struct ScenariosCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Toml,
}
