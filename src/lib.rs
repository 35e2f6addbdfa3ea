//! # dp-mock-server
//!
//! Fault-injection mock server for LLM provider APIs.
//!
//! The server speaks just enough of the OpenAI, Gemini and Anthropic HTTP
//! surfaces to let a client library be tested against the failures those
//! providers actually produce: auth errors, rate limits, HTML error pages,
//! truncated streams, mid-stream errors and file size limits.
//!
//! A request selects its failure with a scenario key carried in the
//! `Authorization` header, the `x-api-key` header, or the `key` query
//! parameter. Requests with no recognised key get a 400 naming the endpoint.
//!
//! ## Features
//!
//! - **Fixed scenario catalog**: one ordered table per endpoint, built once
//! - **Byte-exact streaming**: frames are written as scripted, including broken ones
//! - **Control plane**: `/_control/status`, `/_control/restart`, `/_control/shutdown`
//! - **Daemon mode**: detach into the background on Unix
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dp_mock_server::{run_server, MockConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MockConfig::default();
//!     run_server(config).await
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod providers;
pub mod scenario;
pub mod sdk;
pub mod server;
pub mod telemetry;

pub use config::{MockConfig, RunMode};
pub use error::{MockError, MockResult};
pub use scenario::{catalog, Catalog, Endpoint};
pub use server::{create_app, create_router, run_server, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default server port
pub const DEFAULT_PORT: u16 = 8080;
