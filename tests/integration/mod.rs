//! Integration test module
//!
//! Contains end-to-end tests for every emulated endpoint and the control plane.

pub mod common;
pub mod scenario_tests;
pub mod streaming_tests;
