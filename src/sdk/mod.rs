//! Control plane SDK
//!
//! A small client for the `/_control` endpoints of a running mock server.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dp_mock_server::sdk::ControlClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ControlClient::new("http://localhost:8080")?;
//!
//!     let status = client.status().await?;
//!     println!("pid {} is {}", status.pid, status.status);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;

pub use client::*;
pub use config::*;
pub use error::*;

// Re-export the wire types for convenience
pub use crate::server::{ControlAck, ControlStatus};
