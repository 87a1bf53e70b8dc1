#![deny(missing_docs)]

//! # Document Encoder Trait
//!
//! The single serialization interface. Callers pick an implementation once and
//! hand it a `DocValue`; nothing downstream checks which encoder is in use.

use crate::error::AppResult;
use crate::value::DocValue;

/// Renders a document tree as text.
pub trait DocumentEncoder {
    /// Short identifier used in logs, e.g. `yaml-fallback`.
    fn name(&self) -> &'static str;

    /// Encodes `doc`. Output ends with a newline.
    fn encode(&self, doc: &DocValue) -> AppResult<String>;
}
