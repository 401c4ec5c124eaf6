//! Event reporters
//!
//! Sinks that render or collect [`RoutingEvent`]s produced by the chain.

use std::io::{self, Write};

use log::{error, info};
use serde::Serialize;

use crate::{
    config::ReportMode,
    core::{EventKind, EventSink, RoutingEvent},
};

/// Writes one human-readable line per event.
pub struct ConsoleReporter<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }
}

impl ConsoleReporter<io::BufWriter<io::Stdout>> {
    pub fn stdout() -> Self {
        Self::new(io::BufWriter::new(io::stdout()))
    }
}

impl<W: Write> EventSink for ConsoleReporter<W> {
    fn emit(&mut self, event: &RoutingEvent<'_>) {
        if let Err(e) = writeln!(self.out, "{event}") {
            report_write_failure(&mut self.failed, e);
        }
    }
}

impl<W: Write> Drop for ConsoleReporter<W> {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}

/// Writes one JSON object per event.
pub struct JsonReporter<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }
}

impl JsonReporter<io::BufWriter<io::Stdout>> {
    pub fn stdout() -> Self {
        Self::new(io::BufWriter::new(io::stdout()))
    }
}

impl<W: Write> EventSink for JsonReporter<W> {
    fn emit(&mut self, event: &RoutingEvent<'_>) {
        let written = serde_json::to_writer(&mut self.out, event)
            .map_err(io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(e) = written {
            report_write_failure(&mut self.failed, e);
        }
    }
}

impl<W: Write> Drop for JsonReporter<W> {
    fn drop(&mut self) {
        let _ = self.out.flush();
    }
}

// Only the first failure is logged; a closed stdout would otherwise log once per event.
fn report_write_failure(failed: &mut bool, e: io::Error) {
    if !*failed {
        error!("Failed to write routing event: {e}");
        *failed = true;
    }
}

/// Sends every event through the `log` facade.
#[derive(Default)]
pub struct LogReporter;

impl EventSink for LogReporter {
    fn emit(&mut self, event: &RoutingEvent<'_>) {
        info!("{event}");
    }
}

#[derive(Default)]
pub struct SilentReporter;

impl EventSink for SilentReporter {
    fn emit(&mut self, _event: &RoutingEvent<'_>) {}
}

/// Owned copy of a [`RoutingEvent`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordedEvent {
    pub kind: EventKind,
    pub handler: String,
    pub patient: String,
}

impl From<&RoutingEvent<'_>> for RecordedEvent {
    fn from(event: &RoutingEvent<'_>) -> Self {
        Self {
            kind: event.kind,
            handler: event.handler.to_string(),
            patient: event.patient.to_string(),
        }
    }
}

/// Keeps every event it receives.
#[derive(Default, Debug)]
pub struct Recorder {
    events: Vec<RecordedEvent>,
}

impl Recorder {
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// `(kind, handler)` pairs in emission order.
    pub fn trail(&self) -> Vec<(EventKind, &str)> {
        self.events
            .iter()
            .map(|e| (e.kind, e.handler.as_str()))
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for Recorder {
    fn emit(&mut self, event: &RoutingEvent<'_>) {
        self.events.push(RecordedEvent::from(event));
    }
}

/// Build the sink selected by configuration.
pub fn reporter_for(mode: ReportMode) -> Box<dyn EventSink> {
    match mode {
        ReportMode::Console => Box::new(ConsoleReporter::stdout()),
        ReportMode::Json => Box::new(JsonReporter::stdout()),
        ReportMode::Log => Box::new(LogReporter),
        ReportMode::Silent => Box::new(SilentReporter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_lines() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.emit(&RoutingEvent::new(
            EventKind::Resolved,
            "Primary Hospital",
            "A",
        ));
        reporter.emit(&RoutingEvent::new(EventKind::Dropped, "PCI Hospital", "C"));
        let out = String::from_utf8(std::mem::take(&mut reporter.out)).unwrap();
        assert_eq!(
            out,
            "Primary Hospital treats patient A\n\
             patient C left the chain unresolved after PCI Hospital\n"
        );
    }

    #[test]
    fn test_json_lines() {
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.emit(&RoutingEvent::new(
            EventKind::Transferred,
            "Dispatch Center",
            "B",
        ));
        let out = String::from_utf8(std::mem::take(&mut reporter.out)).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["kind"], "transferred");
        assert_eq!(value["handler"], "Dispatch Center");
        assert_eq!(value["patient"], "B");
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut reporter = ConsoleReporter::new(BrokenPipe);
        reporter.emit(&RoutingEvent::new(EventKind::Declined, "X", "A"));
        reporter.emit(&RoutingEvent::new(EventKind::Declined, "X", "B"));
        assert!(reporter.failed);
    }

    #[test]
    fn test_log_reporter() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut reporter = LogReporter;
        reporter.emit(&RoutingEvent::new(EventKind::Transported, "Ambulance", "B"));
    }

    #[test]
    fn test_reporter_for_every_mode() {
        let _ = env_logger::builder().is_test(true).try_init();
        for mode in [
            ReportMode::Console,
            ReportMode::Json,
            ReportMode::Log,
            ReportMode::Silent,
        ] {
            let mut reporter = reporter_for(mode);
            reporter.emit(&RoutingEvent::new(EventKind::Resolved, "PCI Hospital", "B"));
        }
    }

    #[test]
    fn test_recorder_trail() {
        let mut recorder = Recorder::default();
        recorder.emit(&RoutingEvent::new(EventKind::Declined, "One", "A"));
        recorder.emit(&RoutingEvent::new(EventKind::Resolved, "Two", "A"));
        assert_eq!(
            recorder.trail(),
            vec![(EventKind::Declined, "One"), (EventKind::Resolved, "Two")]
        );
        recorder.clear();
        assert!(recorder.is_empty());
    }
}
