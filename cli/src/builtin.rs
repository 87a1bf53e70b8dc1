#![deny(missing_docs)]

//! # Bundled Input Table
//!
//! The tok-friends endpoint table and schema registry, compiled into the
//! binary so `generate` works without a `--source` file.

use contract_core::{AppResult, ContractSource};
use std::path::Path;

/// JSON text of the bundled table.
pub const BUILTIN_SOURCE: &str = include_str!("../contract/source.json");

/// Loads `path` when given, the bundled table otherwise.
pub fn load_source(path: Option<&Path>) -> AppResult<ContractSource> {
    match path {
        Some(path) => ContractSource::from_path(path),
        None => ContractSource::from_json_str(BUILTIN_SOURCE),
    }
}
