//! Scenario selection
//!
//! A request's credential slot carries a scenario key; the key picks one
//! canned behavior from the endpoint's table.

mod behavior;
pub mod catalog;
mod selector;

pub use behavior::*;
pub use catalog::*;
pub use selector::*;
