//! Core traits for carechain components
//!
//! These interfaces decouple the chain from the concrete handlers it runs and
//! from whatever renders its events.

use super::{
    error::ChainResult,
    event::{RoutingEvent, Verdict},
    patient::Patient,
};

/// A node of the care chain.
pub trait Handler: Send + Sync {
    /// Return the name of this handler
    ///
    /// Names identify handlers in events and must be unique within a chain.
    fn name(&self) -> &str;

    /// Decide what to do with the patient.
    ///
    /// Handlers must not keep state between calls: the same patient always
    /// gets the same verdict.
    fn evaluate(&self, patient: &Patient) -> Verdict;

    /// Whether this handler can only ever pass patients on.
    ///
    /// A chain that ends with such a handler is rejected when it is built.
    fn requires_successor(&self) -> bool {
        false
    }
}

/// Consumer of routing events
pub trait EventSink {
    fn emit(&mut self, event: &RoutingEvent<'_>);
}

/// Periodic snapshot of process memory and load, appended to a log.
pub trait DiagnosticsSampler {
    fn sample_and_append(&mut self, iteration: u64) -> ChainResult<()>;
}
