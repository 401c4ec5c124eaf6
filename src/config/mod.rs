use std::{fs, path::PathBuf};

use clap::{Parser, ValueEnum};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use validator::{Validate, ValidationError};

use crate::{
    core::{ChainError, ChainResult, Condition},
    handler::{
        ambulance, dispatch_center, is_known_kind, pci_hospital, primary_hospital,
    },
};

static HANDLER_KIND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid handler kind regex"));

/// Command line options. Flags override values read from the config file.
#[derive(Debug, Default, Parser)]
#[command(name = "carechain")]
#[command(about = "Route synthetic patients through a chain of care handlers", long_about = None)]
pub struct Opt {
    /// YAML configuration file
    #[arg(short, long)]
    pub conf: Option<PathBuf>,

    /// Number of patients to generate
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// Sample diagnostics every N patients
    #[arg(long)]
    pub interval: Option<u64>,

    /// Diagnostics log file
    #[arg(long)]
    pub diagnostics_path: Option<PathBuf>,

    /// Disable diagnostics sampling
    #[arg(long)]
    pub no_diagnostics: bool,

    /// Condition assigned to generated patients, repeat to cycle through several
    #[arg(long = "condition")]
    pub conditions: Vec<String>,

    /// How routing events are reported
    #[arg(long, value_enum)]
    pub report: Option<ReportMode>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Config {
    #[serde(default)]
    pub log: Option<Log>,

    #[validate(length(min = 1))]
    #[validate(nested)]
    #[serde(default = "Config::default_chain")]
    pub chain: Vec<HandlerEntry>,

    #[validate(nested)]
    #[serde(default)]
    pub driver: Workload,

    #[validate(nested)]
    #[serde(default)]
    pub diagnostics: Diagnostics,

    #[serde(default)]
    pub report: ReportMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: None,
            chain: Self::default_chain(),
            driver: Workload::default(),
            diagnostics: Diagnostics::default(),
            report: ReportMode::default(),
        }
    }
}

// Config file load and validation
impl Config {
    pub fn load_from_yaml<P>(path: P) -> ChainResult<Self>
    where
        P: AsRef<std::path::Path>,
    {
        let path = path.as_ref();
        let conf_str = fs::read_to_string(path).map_err(|e| {
            ChainError::Parse(format!(
                "Unable to read conf file from {}: {e}",
                path.display()
            ))
        })?;
        debug!("Conf file read from {}", path.display());
        Self::from_yaml(&conf_str)
    }

    // config entry point: file when given, defaults otherwise, then flags
    pub fn load_with_opt_override(opt: &Opt) -> ChainResult<Self> {
        let mut conf = match &opt.conf {
            Some(path) => Self::load_from_yaml(path)?,
            None => Self::default(),
        };
        conf.merge_with_opt(opt);
        conf.validate()?;
        Ok(conf)
    }

    pub fn from_yaml(conf_str: &str) -> ChainResult<Self> {
        trace!("Read conf file: {conf_str}");
        let conf: Config = serde_yaml::from_str(conf_str)
            .map_err(|e| ChainError::Parse(format!("Unable to parse yaml conf: {e}")))?;

        trace!("Loaded conf: {conf:?}");

        // use validator to validate conf file
        conf.validate()?;

        Ok(conf)
    }

    pub fn to_yaml(&self) -> ChainResult<String> {
        serde_yaml::to_string(self).map_err(|e| ChainError::Parse(e.to_string()))
    }

    pub fn merge_with_opt(&mut self, opt: &Opt) {
        if let Some(iterations) = opt.iterations {
            self.driver.iterations = iterations;
        }
        if let Some(interval) = opt.interval {
            self.diagnostics.interval = interval;
        }
        if let Some(path) = &opt.diagnostics_path {
            self.diagnostics.path = path.clone();
        }
        if opt.no_diagnostics {
            self.diagnostics.enabled = false;
        }
        if !opt.conditions.is_empty() {
            self.driver.conditions = opt
                .conditions
                .iter()
                .map(|c| Condition::from(c.as_str()))
                .collect();
        }
        if let Some(report) = opt.report {
            self.report = report;
        }
    }

    fn default_chain() -> Vec<HandlerEntry> {
        [
            primary_hospital::HANDLER_KIND,
            dispatch_center::HANDLER_KIND,
            ambulance::HANDLER_KIND,
            pci_hospital::HANDLER_KIND,
        ]
        .into_iter()
        .map(HandlerEntry::new)
        .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Log {
    pub path: PathBuf,
}

/// One node of the configured chain.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct HandlerEntry {
    #[validate(custom(function = "HandlerEntry::validate_kind"))]
    pub handler: String,
    #[serde(default)]
    pub config: YamlValue,
}

impl HandlerEntry {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            handler: kind.into(),
            config: YamlValue::Null,
        }
    }

    fn validate_kind(kind: &str) -> Result<(), ValidationError> {
        if !HANDLER_KIND_RE.is_match(kind) {
            let mut err = ValidationError::new("invalid_handler_kind");
            err.add_param("kind".into(), &kind.to_string());
            return Err(err);
        }
        if !is_known_kind(kind) {
            let mut err = ValidationError::new("unknown_handler_kind");
            err.add_param("kind".into(), &kind.to_string());
            return Err(err);
        }
        Ok(())
    }
}

/// Synthetic patient generation.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct Workload {
    #[serde(default = "Workload::default_iterations")]
    pub iterations: u64,
    #[serde(default = "Workload::default_name_prefix")]
    pub name_prefix: String,
    /// Assigned round-robin by iteration index
    #[validate(length(min = 1))]
    #[serde(default = "Workload::default_conditions")]
    pub conditions: Vec<Condition>,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            iterations: Self::default_iterations(),
            name_prefix: Self::default_name_prefix(),
            conditions: Self::default_conditions(),
        }
    }
}

impl Workload {
    fn default_iterations() -> u64 {
        10_000_000
    }

    fn default_name_prefix() -> String {
        "patient-".to_string()
    }

    fn default_conditions() -> Vec<Condition> {
        vec![Condition::Cardiovascular]
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
pub struct Diagnostics {
    #[serde(default = "Diagnostics::default_enabled")]
    pub enabled: bool,
    #[serde(default = "Diagnostics::default_path")]
    pub path: PathBuf,
    #[validate(range(min = 1))]
    #[serde(default = "Diagnostics::default_interval")]
    pub interval: u64,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            path: Self::default_path(),
            interval: Self::default_interval(),
        }
    }
}

impl Diagnostics {
    fn default_enabled() -> bool {
        true
    }

    fn default_path() -> PathBuf {
        PathBuf::from("src/redblacktree/11.txt")
    }

    fn default_interval() -> u64 {
        50
    }
}

#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    #[default]
    Console,
    Log,
    Json,
    Silent,
}
