//! CLI Command Implementations
//!
//! Implementations for all CLI subcommands.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::config::{MockConfig, RunMode};
use crate::sdk::{ClientConfig, ControlClient, ControlError};
use crate::server::{self_check, AppState};
use crate::telemetry::init_telemetry;
use crate::{catalog, VERSION};

use super::{Cli, Commands, ControlAction, ControlCommand, OutputFormat, ScenariosCommand, ServeCommand};

/// Execute the CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = MockConfig::from_env().context("Invalid environment configuration")?;

    // Apply global settings
    config.telemetry.log_level = cli.log_level.clone();
    config.telemetry.json_logs = cli.json_logs;

    match cli.command {
        Commands::Serve(cmd) => execute_serve(cmd, config, cli.quiet).await,
        Commands::Control(cmd) => execute_control(cmd, config).await,
        Commands::Scenarios(cmd) => execute_scenarios(cmd),
        Commands::Check => execute_check(config, cli.quiet).await,
        Commands::Version => execute_version(),
    }
}

/// Execute the serve command
async fn execute_serve(cmd: ServeCommand, mut config: MockConfig, quiet: bool) -> Result<()> {
    // Apply command overrides
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    if let Some(host) = cmd.host {
        config.server.host = host;
    }
    if cmd.daemon {
        config.mode = RunMode::Daemon;
    }

    config.validate().context("Configuration validation failed")?;
    init_telemetry(&config.telemetry)?;

    // A daemon's stdout is /dev/null
    if !quiet && config.mode == RunMode::Foreground {
        print_banner(&config);
    }

    crate::run_server(config).await
}

/// Execute the control command
async fn execute_control(cmd: ControlCommand, config: MockConfig) -> Result<()> {
    init_telemetry(&config.telemetry)?;

    let client_config = ClientConfig::new(cmd.url.clone()).timeout(Duration::from_secs(cmd.timeout));
    let client = ControlClient::with_config(client_config)?;

    let result = match cmd.action {
        ControlAction::Status => client.status().await.and_then(|s| to_pretty(&s)),
        ControlAction::Restart => client.restart().await.and_then(|a| to_pretty(&a)),
        ControlAction::Shutdown => client.shutdown().await.and_then(|a| to_pretty(&a)),
    };

    match result {
        Ok(body) => {
            println!("{}", body);
            Ok(())
        }
        Err(ControlError::Connection(e)) => {
            bail!("Could not connect to mock server at {}: {}", cmd.url, e)
        }
        Err(ControlError::Timeout) => {
            bail!("Mock server at {} did not respond within {}s", cmd.url, cmd.timeout)
        }
        Err(ControlError::Status { status, body }) => {
            eprintln!("{}", body);
            bail!("Control command failed with status {}", status)
        }
        Err(e) => Err(e).context("Control request failed"),
    }
}

fn to_pretty<T: Serialize>(value: &T) -> Result<String, ControlError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Execute the scenarios command
fn execute_scenarios(cmd: ScenariosCommand) -> Result<()> {
    let scenarios = catalog().summaries();

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&scenarios)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&scenarios)?);
        }
        OutputFormat::Toml => {
            // TOML needs a table at the top level
            #[derive(Serialize)]
            struct Listing<'a> {
                scenarios: &'a [crate::scenario::ScenarioSummary],
            }
            println!("{}", toml::to_string_pretty(&Listing { scenarios: &scenarios })?);
        }
        OutputFormat::Table => {
            println!("{:<7} {:<40} {:<24} {:<7} {:>6}  {}", "METHOD", "PATH", "SCENARIO", "KIND", "STATUS", "SUMMARY");
            println!("{}", "-".repeat(120));
            for s in &scenarios {
                let status = s.status.map_or_else(|| "-".to_string(), |c| c.to_string());
                println!("{:<7} {:<40} {:<24} {:<7} {:>6}  {}",
                    s.method, s.path, s.scenario, s.kind, status, s.summary);
            }
        }
    }

    Ok(())
}

/// Execute the check command
async fn execute_check(config: MockConfig, quiet: bool) -> Result<()> {
    let checks = self_check(AppState::new(&config)).await;
    let failed = checks.iter().filter(|c| !c.passed()).count();

    for check in &checks {
        if quiet && check.passed() {
            continue;
        }
        let mark = if check.passed() { "✓" } else { "✗" };
        println!("{} {:<6} {:<45} expected {} got {}",
            mark, check.method, check.path, check.expected, check.actual);
    }

    if failed > 0 {
        bail!("{} of {} route checks failed", failed, checks.len());
    }

    if !quiet {
        println!();
        println!("All {} route checks passed", checks.len());
    }
    Ok(())
}

/// Execute the version command
fn execute_version() -> Result<()> {
    println!("dp-mock {}", VERSION);
    println!();
    println!("Build Information:");
    println!("  Version:       {}", VERSION);
    println!("  Daemon mode:   {}", if cfg!(unix) { "supported" } else { "unsupported" });
    println!();
    println!("Provider surfaces:");
    println!("  OpenAI    chat completions, models, files");
    println!("  Gemini    generateContent, streamGenerateContent, countTokens, files:upload");
    println!("  Anthropic messages, count_tokens");
    Ok(())
}

// Helper functions

fn print_banner(config: &MockConfig) {
    let base = format!("http://{}:{}", config.server.host, config.server.port);

    println!();
    println!("  dp-mock v{}", VERSION);
    println!("  Fault-injection mock server for LLM provider APIs");
    println!();
    println!("Configuration:");
    println!("  • Server:    {}:{}", config.server.host, config.server.port);
    println!("  • Mode:      {}", config.mode);
    println!("  • Scenarios: {}", catalog().summaries().len());
    println!();
    println!("Endpoints:");
    println!("  • OpenAI:    {}/v1/chat/completions", base);
    println!("  • Anthropic: {}/v1/messages", base);
    println!("  • Google:    {}/v1/models/{{model}}:generateContent", base);
    println!("  • Control:   {}/_control/status", base);
    println!();
}
