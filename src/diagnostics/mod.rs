//! Diagnostics sampler
//!
//! Appends one line of memory and load statistics per sample to a plain text
//! log. The file is opened and closed for every sample.

use std::{
    fmt,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, trace};
use sysinfo::{ProcessesToUpdate, System};

use crate::core::{ChainError, ChainResult, DiagnosticsSampler};

const MB: u64 = 1024 * 1024;

/// Memory and load figures taken at one iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub iteration: u64,
    pub total_mb: u64,
    pub free_mb: u64,
    pub used_mb: u64,
    /// One minute load average
    pub load: f64,
}

impl Snapshot {
    pub fn from_bytes(iteration: u64, total: u64, free: u64, load: f64) -> Self {
        Self {
            iteration,
            total_mb: total / MB,
            free_mb: free / MB,
            used_mb: total.saturating_sub(free) / MB,
            load,
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Iteration: {} Total Memory: {} MB Free Memory: {} MB Used Memory: {} MB CPU Load: {:.2}",
            self.iteration, self.total_mb, self.free_mb, self.used_mb, self.load
        )
    }
}

/// Append `snapshot` as a single line, creating the file and its parent
/// directories when missing.
pub fn append_snapshot(path: &Path, snapshot: &Snapshot) -> ChainResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            create_dir_all(parent).map_err(ChainError::Diagnostics)?;
        }
    }

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(ChainError::Diagnostics)?;

    writeln!(file, "{snapshot}").map_err(ChainError::Diagnostics)?;
    trace!("Appended diagnostics to {}: {snapshot}", path.display());
    Ok(())
}

/// Samples system memory and load through `sysinfo`.
pub struct MemorySampler {
    path: PathBuf,
    system: System,
}

impl MemorySampler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            system: System::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&mut self, iteration: u64) -> Snapshot {
        self.system.refresh_memory();

        if let Ok(pid) = sysinfo::get_current_pid() {
            self.system
                .refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            if let Some(process) = self.system.process(pid) {
                debug!(
                    "Iteration {iteration}: process resident memory {} MB",
                    process.memory() / MB
                );
            }
        }

        Snapshot::from_bytes(
            iteration,
            self.system.total_memory(),
            self.system.available_memory(),
            System::load_average().one,
        )
    }
}

impl DiagnosticsSampler for MemorySampler {
    fn sample_and_append(&mut self, iteration: u64) -> ChainResult<()> {
        let snapshot = self.snapshot(iteration);
        append_snapshot(&self.path, &snapshot)
    }
}
