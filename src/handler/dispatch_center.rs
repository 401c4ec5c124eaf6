use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::core::{ChainResult, Handler, Patient, Verdict};

use super::parse_config;

pub const HANDLER_KIND: &str = "dispatch-center";

pub fn create_dispatch_center_handler(cfg: YamlValue) -> ChainResult<Arc<dyn Handler>> {
    let config: HandlerConfig = parse_config(cfg, HANDLER_KIND)?;
    Ok(Arc::new(DispatchCenter::new(config.name)))
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct HandlerConfig {
    name: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            name: "Dispatch Center".to_string(),
        }
    }
}

/// Coordinator. Never treats anyone; every patient is transferred onwards.
pub struct DispatchCenter {
    name: String,
}

impl DispatchCenter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for DispatchCenter {
    fn default() -> Self {
        Self::new(HandlerConfig::default().name)
    }
}

impl Handler for DispatchCenter {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, _patient: &Patient) -> Verdict {
        Verdict::Transfer
    }

    fn requires_successor(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::core::Condition;

    use super::*;

    #[test]
    fn test_always_transfers() {
        let dispatch = DispatchCenter::default();
        for condition in [
            Condition::Simple,
            Condition::Complex,
            Condition::Cardiovascular,
            Condition::Other("unknown".into()),
        ] {
            assert_eq!(
                dispatch.evaluate(&Patient::new("p", condition)),
                Verdict::Transfer
            );
        }
        assert!(dispatch.requires_successor());
    }
}
