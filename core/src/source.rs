#![deny(missing_docs)]

//! # Source Loading
//!
//! Reads an input table (`ContractSource`) from JSON or YAML text.

use crate::error::{AppError, AppResult};
use crate::model::ContractSource;
use std::fs;
use std::path::Path;

impl ContractSource {
    /// Parses a JSON input table.
    pub fn from_json_str(text: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parses a YAML input table.
    #[cfg(feature = "native-yaml")]
    pub fn from_yaml_str(text: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads an input table, choosing the format from the file extension.
    ///
    /// `.yaml` / `.yml` need the `native-yaml` feature; anything else is read as JSON.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::General(format!(
                "Source file not found: {:?}",
                path
            )));
        }
        let text = fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        tracing::debug!(path = %path.display(), format = ext, "loading contract source");
        match ext {
            "yaml" | "yml" => Self::parse_yaml(&text),
            _ => Self::from_json_str(&text),
        }
    }

    #[cfg(feature = "native-yaml")]
    fn parse_yaml(text: &str) -> AppResult<Self> {
        Self::from_yaml_str(text)
    }

    #[cfg(not(feature = "native-yaml"))]
    fn parse_yaml(_text: &str) -> AppResult<Self> {
        Err(AppError::General(
            "YAML sources need the `native-yaml` feature".into(),
        ))
    }
}
