//! The care chain
//!
//! A fixed, ordered list of handlers. Patients enter at the first handler and
//! only ever move forward; the first handler that resolves wins.

use std::{collections::HashSet, fmt, sync::Arc};

use log::debug;

use crate::{
    config::HandlerEntry,
    config_error,
    core::{ChainResult, EventKind, EventSink, Handler, Outcome, Patient, RoutingEvent, Verdict},
    handler::{
        ambulance::Ambulance, build_handler, dispatch_center::DispatchCenter,
        pci_hospital::PciHospital, primary_hospital::PrimaryHospital,
    },
};

/// Immutable, validated sequence of handlers.
pub struct Chain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl Chain {
    /// Build a chain from handlers in routing order.
    ///
    /// # Errors
    /// Returns `ChainError::Configuration` when the list is empty, when two
    /// handlers share a name, or when the last handler can only pass patients
    /// on.
    pub fn new(handlers: Vec<Arc<dyn Handler>>) -> ChainResult<Self> {
        let Some(last) = handlers.last() else {
            return Err(config_error!("A chain needs at least one handler"));
        };

        if last.requires_successor() {
            return Err(config_error!(
                "Handler '{}' must forward every patient but has no successor",
                last.name()
            ));
        }

        let mut seen = HashSet::with_capacity(handlers.len());
        for handler in &handlers {
            if !seen.insert(handler.name()) {
                return Err(config_error!(
                    "Duplicate handler name '{}' in chain",
                    handler.name()
                ));
            }
        }

        debug!(
            "Chain wired: {}",
            handlers
                .iter()
                .map(|h| h.name())
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        Ok(Self { handlers })
    }

    /// Primary hospital, dispatch center, ambulance, PCI hospital.
    pub fn standard() -> Self {
        Self {
            handlers: vec![
                Arc::new(PrimaryHospital::default()),
                Arc::new(DispatchCenter::default()),
                Arc::new(Ambulance::default()),
                Arc::new(PciHospital::default()),
            ],
        }
    }

    /// Build a chain from configured entries, in order.
    pub fn from_config(entries: &[HandlerEntry]) -> ChainResult<Self> {
        let handlers = entries
            .iter()
            .map(|entry| build_handler(&entry.handler, entry.config.clone()))
            .collect::<ChainResult<Vec<_>>>()?;
        Self::new(handlers)
    }

    /// The designated entry handler.
    pub fn entry(&self) -> &dyn Handler {
        // Chain::new rejects empty lists
        self.handlers[0].as_ref()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Always false: `Chain::new` rejects empty handler lists.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn handler_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.iter().map(|h| h.name())
    }

    /// Evaluate the handler at `position` and report what it did.
    ///
    /// Returns `Forwarded` with the successor's name when the handler passes
    /// the patient on and a successor exists. A position past the end of the
    /// chain yields `Dropped` without emitting anything.
    pub fn step<'c>(
        &'c self,
        position: usize,
        patient: &Patient,
        sink: &mut dyn EventSink,
    ) -> Outcome<'c> {
        let Some(handler) = self.handlers.get(position) else {
            return Outcome::Dropped;
        };

        let verdict = handler.evaluate(patient);
        sink.emit(&RoutingEvent::new(
            verdict.event_kind(),
            handler.name(),
            &patient.name,
        ));

        if verdict == Verdict::Resolve {
            return Outcome::Resolved {
                handler: handler.name(),
            };
        }

        match self.handlers.get(position + 1) {
            Some(next) => Outcome::Forwarded { to: next.name() },
            None => {
                sink.emit(&RoutingEvent::new(
                    EventKind::Dropped,
                    handler.name(),
                    &patient.name,
                ));
                Outcome::Dropped
            }
        }
    }

    /// Route a patient from the entry handler to a terminal outcome.
    pub fn handle<'c>(&'c self, patient: &Patient, sink: &mut dyn EventSink) -> Outcome<'c> {
        let mut position = 0;
        loop {
            let outcome = self.step(position, patient, sink);
            if outcome.is_terminal() {
                return outcome;
            }
            position += 1;
        }
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.handler_names()).finish()
    }
}
