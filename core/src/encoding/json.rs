#![deny(missing_docs)]

//! # JSON Encoder
//!
//! Pretty JSON with a two-space indent and non-ASCII text left unescaped.
//! The same scalar encoding backs the fallback YAML emitter.

use crate::encoding::traits::DocumentEncoder;
use crate::error::AppResult;
use crate::value::DocValue;

/// Encoder for the flat contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl DocumentEncoder for JsonEncoder {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, doc: &DocValue) -> AppResult<String> {
        let mut text = serde_json::to_string_pretty(doc)?;
        text.push('\n');
        Ok(text)
    }
}

/// Encodes a single scalar as a JSON token: quoted string, bare number,
/// `true`/`false`/`null`.
pub fn encode_scalar(value: &DocValue) -> AppResult<String> {
    Ok(serde_json::to_string(value)?)
}
