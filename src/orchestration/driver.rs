//! Synthetic workload driver
//!
//! Generates patients one at a time, routes each to a terminal outcome, and
//! samples diagnostics every Nth iteration.

use std::{collections::BTreeMap, fmt};

use log::{info, warn};

use crate::{
    config::Workload,
    config_error,
    core::{ChainResult, Condition, DiagnosticsSampler, EventSink, Outcome, Patient},
};

use super::chain::Chain;

struct Sampling<S> {
    sampler: S,
    interval: u64,
}

pub struct Driver<S> {
    chain: Chain,
    workload: Workload,
    sampling: Option<Sampling<S>>,
}

impl<S: DiagnosticsSampler> Driver<S> {
    /// # Errors
    /// Returns `ChainError::Configuration` if the workload has no conditions
    /// to assign.
    pub fn new(chain: Chain, workload: Workload) -> ChainResult<Self> {
        if workload.conditions.is_empty() {
            return Err(config_error!("Workload needs at least one condition"));
        }
        Ok(Self {
            chain,
            workload,
            sampling: None,
        })
    }

    /// Sample diagnostics before every iteration divisible by `interval`.
    pub fn with_sampler(mut self, sampler: S, interval: u64) -> Self {
        self.sampling = Some(Sampling {
            sampler,
            interval: interval.max(1),
        });
        self
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn sampler(&self) -> Option<&S> {
        self.sampling.as_ref().map(|s| &s.sampler)
    }

    /// Condition assigned to the patient generated at `iteration`; cycles
    /// through the configured list.
    pub fn condition_for(&self, iteration: u64) -> &Condition {
        let conditions = &self.workload.conditions;
        &conditions[(iteration % conditions.len() as u64) as usize]
    }

    pub fn patient_for(&self, iteration: u64) -> Patient {
        Patient::new(
            format!("{}{}", self.workload.name_prefix, iteration),
            self.condition_for(iteration).clone(),
        )
    }

    /// Run the whole workload.
    ///
    /// Diagnostics failures are logged and counted; they never stop routing.
    pub fn run(&mut self, sink: &mut dyn EventSink) -> RunSummary {
        info!(
            "Routing {} patients through {:?}",
            self.workload.iterations, self.chain
        );

        let mut summary = RunSummary::default();
        for iteration in 0..self.workload.iterations {
            if let Some(sampling) = self.sampling.as_mut() {
                if iteration % sampling.interval == 0 {
                    match sampling.sampler.sample_and_append(iteration) {
                        Ok(()) => summary.samples_taken += 1,
                        Err(e) => {
                            warn!("Diagnostics sample at iteration {iteration} failed: {e}");
                            summary.samples_failed += 1;
                        }
                    }
                }
            }

            let patient = self.patient_for(iteration);
            let outcome = self.chain.handle(&patient, sink);
            summary.record(&outcome);
        }

        info!("{summary}");
        summary
    }
}

/// Totals for a driver run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub routed: u64,
    pub dropped: u64,
    pub resolved: BTreeMap<String, u64>,
    pub samples_taken: u64,
    pub samples_failed: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &Outcome<'_>) {
        self.routed += 1;
        match outcome {
            Outcome::Resolved { handler } => match self.resolved.get_mut(*handler) {
                Some(count) => *count += 1,
                None => {
                    self.resolved.insert(handler.to_string(), 1);
                }
            },
            Outcome::Dropped => self.dropped += 1,
            // Chain::handle never stops on a forward
            Outcome::Forwarded { .. } => {}
        }
    }

    pub fn resolved_by(&self, handler: &str) -> u64 {
        self.resolved.get(handler).copied().unwrap_or(0)
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Routed {} patients", self.routed)?;
        for (handler, count) in &self.resolved {
            write!(f, ", {handler}: {count}")?;
        }
        write!(
            f,
            ", dropped: {}, diagnostics samples: {} ok / {} failed",
            self.dropped, self.samples_taken, self.samples_failed
        )
    }
}
