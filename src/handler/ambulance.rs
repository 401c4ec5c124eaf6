use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::core::{ChainResult, Handler, Patient, Verdict};

use super::parse_config;

pub const HANDLER_KIND: &str = "ambulance";

pub fn create_ambulance_handler(cfg: YamlValue) -> ChainResult<Arc<dyn Handler>> {
    let config: HandlerConfig = parse_config(cfg, HANDLER_KIND)?;
    Ok(Arc::new(Ambulance::new(config.name)))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HandlerConfig {
    name: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            name: "Ambulance".to_string(),
        }
    }
}

/// Carries the patient to whichever node follows it.
pub struct Ambulance {
    name: String,
}

impl Ambulance {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for Ambulance {
    fn default() -> Self {
        Self::new(HandlerConfig::default().name)
    }
}

impl Handler for Ambulance {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, _patient: &Patient) -> Verdict {
        Verdict::Transport
    }

    fn requires_successor(&self) -> bool {
        true
    }
}
