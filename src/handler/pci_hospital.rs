use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::core::{ChainResult, Condition, Handler, Patient, Verdict};

use super::parse_config;

pub const HANDLER_KIND: &str = "pci-hospital";

pub fn create_pci_hospital_handler(cfg: YamlValue) -> ChainResult<Arc<dyn Handler>> {
    let config: HandlerConfig = parse_config(cfg, HANDLER_KIND)?;
    Ok(Arc::new(PciHospital::new(config.name, config.conditions)))
}

/// Configuration for the PCI hospital handler.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HandlerConfig {
    name: String,
    conditions: Vec<Condition>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            name: "PCI Hospital".to_string(),
            conditions: vec![Condition::Cardiovascular],
        }
    }
}

/// Cardiovascular specialist centre (percutaneous coronary intervention).
pub struct PciHospital {
    name: String,
    conditions: Vec<Condition>,
}

impl PciHospital {
    pub fn new(name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            name: name.into(),
            conditions,
        }
    }
}

impl Default for PciHospital {
    fn default() -> Self {
        let config = HandlerConfig::default();
        Self::new(config.name, config.conditions)
    }
}

impl Handler for PciHospital {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treats_cardiovascular_only() {
        let hospital = PciHospital::default();
        assert_eq!(
            hospital.evaluate(&Patient::new("a", Condition::Cardiovascular)),
            Verdict::Resolve
        );
        assert_eq!(
            hospital.evaluate(&Patient::new("b", Condition::Simple)),
            Verdict::Decline
        );
        assert_eq!(
            hospital.evaluate(&Patient::new("c", "unknown")),
            Verdict::Decline
        );
    }
}
