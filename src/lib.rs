//! This crate routes patients through a chain of care handlers.
//!
//! It defines the chain itself, the handlers it is built from, the reporters
//! that render routing events, and the diagnostics sampler used by the driver.

pub mod config;
pub mod core;
pub mod diagnostics;
pub mod handler;
pub mod logging;
pub mod orchestration;
pub mod report;
