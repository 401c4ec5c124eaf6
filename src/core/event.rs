//! Routing events and outcomes
//!
//! The chain never prints. It describes what happened as [`RoutingEvent`]s and
//! leaves rendering to an [`EventSink`](super::EventSink).

use std::fmt;

use serde::Serialize;

/// What a handler decided about a patient.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The handler treats the patient; propagation stops.
    Resolve,
    /// The handler cannot treat the patient and passes it on.
    Decline,
    /// The handler coordinates a transfer to the next node.
    Transfer,
    /// The handler carries the patient to the next node.
    Transport,
}

impl Verdict {
    pub fn event_kind(self) -> EventKind {
        match self {
            Verdict::Resolve => EventKind::Resolved,
            Verdict::Decline => EventKind::Declined,
            Verdict::Transfer => EventKind::Transferred,
            Verdict::Transport => EventKind::Transported,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Resolved,
    Declined,
    Transferred,
    Transported,
    /// The patient left the end of the chain unresolved.
    Dropped,
}

/// A single observable step of routing.
///
/// For [`EventKind::Dropped`] the `handler` is the last node the patient visited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoutingEvent<'a> {
    pub kind: EventKind,
    pub handler: &'a str,
    pub patient: &'a str,
}

impl<'a> RoutingEvent<'a> {
    pub fn new(kind: EventKind, handler: &'a str, patient: &'a str) -> Self {
        Self {
            kind,
            handler,
            patient,
        }
    }
}

impl fmt::Display for RoutingEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RoutingEvent {
            kind,
            handler,
            patient,
        } = self;
        match kind {
            EventKind::Resolved => write!(f, "{handler} treats patient {patient}"),
            EventKind::Declined => {
                write!(f, "{handler} cannot treat patient {patient}, passing it on")
            }
            EventKind::Transferred => write!(
                f,
                "{handler} dispatches an ambulance to transfer patient {patient}"
            ),
            EventKind::Transported => write!(f, "{handler} transports patient {patient}"),
            EventKind::Dropped => {
                write!(f, "patient {patient} left the chain unresolved after {handler}")
            }
        }
    }
}

/// Result of evaluating a chain node, or of routing a patient end to end.
///
/// [`Outcome::Forwarded`] is only ever returned by a single
/// [`Chain::step`](crate::orchestration::Chain::step); full routing always ends
/// resolved or dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome<'c> {
    Resolved { handler: &'c str },
    Forwarded { to: &'c str },
    Dropped,
}

impl<'c> Outcome<'c> {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Forwarded { .. })
    }

    pub fn resolved_by(&self) -> Option<&'c str> {
        match *self {
            Outcome::Resolved { handler } => Some(handler),
            _ => None,
        }
    }
}
