//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Compilation itself never fails; these variants cover loading input tables,
/// encoding documents and writing them out.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// Wrapper for JSON encoding/decoding errors.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// YAML encoding/decoding errors (kept as text so the variant exists without `serde_yaml`).
    #[from(ignore)]
    #[display("YAML Error: {_0}")]
    Yaml(String),

    /// Invalid timestamp input.
    #[from(ignore)]
    #[display("Time Error: {_0}")]
    Time(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(feature = "native-yaml")]
impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Yaml(err.to_string())
    }
}
