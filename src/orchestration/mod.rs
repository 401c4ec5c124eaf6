//! Orchestration layer
//!
//! Wires handlers into a chain and drives synthetic patients through it.

pub mod chain;
pub mod driver;

pub use chain::Chain;
pub use driver::{Driver, RunSummary};
