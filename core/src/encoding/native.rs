#![deny(missing_docs)]

//! # Native YAML Encoder
//!
//! Thin wrapper over `serde_yaml`. Mapping order is kept because `DocValue`
//! serializes mappings in insertion order.

use crate::encoding::traits::DocumentEncoder;
use crate::error::AppResult;
use crate::value::DocValue;

/// `serde_yaml` backed encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeYamlEncoder;

impl DocumentEncoder for NativeYamlEncoder {
    fn name(&self) -> &'static str {
        "yaml-native"
    }

    fn encode(&self, doc: &DocValue) -> AppResult<String> {
        Ok(serde_yaml::to_string(doc)?)
    }
}
