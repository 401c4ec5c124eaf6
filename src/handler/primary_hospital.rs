use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::core::{ChainResult, Condition, Handler, Patient, Verdict};

use super::parse_config;

pub const HANDLER_KIND: &str = "primary-hospital";

pub fn create_primary_hospital_handler(cfg: YamlValue) -> ChainResult<Arc<dyn Handler>> {
    let config: HandlerConfig = parse_config(cfg, HANDLER_KIND)?;
    Ok(Arc::new(PrimaryHospital::new(config.name, config.conditions)))
}

/// Configuration for the primary hospital handler.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HandlerConfig {
    name: String,
    /// Conditions treated locally.
    conditions: Vec<Condition>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            name: "Primary Hospital".to_string(),
            conditions: vec![Condition::Simple],
        }
    }
}

/// First point of care. Treats the conditions it knows, declines the rest.
pub struct PrimaryHospital {
    name: String,
    conditions: Vec<Condition>,
}

impl PrimaryHospital {
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            name: name.into(),
            conditions,
        }
    }
}

impl Default for PrimaryHospital {
    fn default() -> Self {
        let config = HandlerConfig::default();
        Self::new(config.name, config.conditions)
    }
}

impl Handler for PrimaryHospital {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, patient: &Patient) -> Verdict {
        if self.conditions.contains(&patient.condition) {
            Verdict::Resolve
        } else {
            Verdict::Decline
        }
    }
}
