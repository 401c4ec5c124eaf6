pub mod ambulance;
pub mod dispatch_center;
pub mod pci_hospital;
pub mod primary_hospital;

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value as YamlValue};

use crate::{
    config_error,
    core::{ChainResult, ErrorContext, Handler},
};

/// Factory building a handler from its YAML configuration
pub type HandlerCreateFn = fn(YamlValue) -> ChainResult<Arc<dyn Handler>>;

/// Global registry mapping handler kinds to their factory functions.
static HANDLER_BUILDER_REGISTRY: Lazy<HashMap<&'static str, HandlerCreateFn>> =
    Lazy::new(|| {
        let arr: Vec<(&str, HandlerCreateFn)> = vec![
            (
                primary_hospital::HANDLER_KIND,
                primary_hospital::create_primary_hospital_handler,
            ),
            (
                dispatch_center::HANDLER_KIND,
                dispatch_center::create_dispatch_center_handler,
            ),
            (ambulance::HANDLER_KIND, ambulance::create_ambulance_handler),
            (
                pci_hospital::HANDLER_KIND,
                pci_hospital::create_pci_hospital_handler,
            ),
        ];
        arr.into_iter().collect()
    });

/// Creates a handler instance from configuration.
///
/// Looks up the factory for `kind` in the global registry and invokes it with
/// `cfg`. A null config is treated as an empty mapping so every field falls
/// back to its default.
///
/// # Errors
/// Returns `ChainError::Configuration` for unknown kinds or invalid configs.
pub fn build_handler(kind: &str, cfg: YamlValue) -> ChainResult<Arc<dyn Handler>> {
    let builder = HANDLER_BUILDER_REGISTRY
        .get(kind)
        .ok_or_else(|| config_error!("Unknown handler kind: {}", kind))?;
    let cfg = if cfg.is_null() {
        YamlValue::Mapping(Mapping::new())
    } else {
        cfg
    };
    builder(cfg)
}

/// Returns true if a factory is registered for `kind`.
pub fn is_known_kind(kind: &str) -> bool {
    HANDLER_BUILDER_REGISTRY.contains_key(kind)
}

pub(crate) fn parse_config<T: DeserializeOwned>(cfg: YamlValue, kind: &str) -> ChainResult<T> {
    serde_yaml::from_value(cfg).with_context(&format!("Invalid {kind} handler config"))
}
