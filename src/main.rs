//! dp-mock CLI
//!
//! Fault-injection mock server for LLM provider APIs.

use clap::Parser;

use dp_mock_server::cli::{execute, Cli, Commands};
use dp_mock_server::lifecycle::daemonize;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Forking has to happen before the runtime starts any threads
    if let Commands::Serve(cmd) = &cli.command {
        if cmd.daemon {
            if let Err(e) = daemonize() {
                eprintln!("Failed to daemonize: {}", e);
                std::process::exit(1);
            }
        }
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(cli))
}
