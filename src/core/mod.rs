//! Core abstractions and interfaces for carechain
//!
//! This module provides the request, event, and error types plus the traits
//! the rest of the crate is built around.

pub mod error;
pub mod event;
pub mod patient;
pub mod traits;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use error::{ChainError, ChainResult, ErrorContext};
pub use event::{EventKind, Outcome, RoutingEvent, Verdict};
pub use patient::{Condition, Patient};
pub use traits::*;
