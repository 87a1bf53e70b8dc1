#![deny(missing_docs)]

//! # Document Encoders
//!
//! - **traits**: the `DocumentEncoder` interface.
//! - **json**: pretty JSON for the flat contract.
//! - **native**: `serde_yaml` output (feature `native-yaml`).
//! - **fallback**: hand-rolled YAML emitter used when the native one is not compiled in.
//!
//! The YAML strategy is chosen once, through [`yaml_encoder`].

pub mod fallback;
pub mod json;
#[cfg(feature = "native-yaml")]
pub mod native;
pub mod traits;

pub use fallback::FallbackYamlEncoder;
pub use json::{encode_scalar, JsonEncoder};
#[cfg(feature = "native-yaml")]
pub use native::NativeYamlEncoder;
pub use traits::DocumentEncoder;

use crate::error::AppResult;

/// Which YAML encoder to use for the OpenAPI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YamlEncoderChoice {
    /// Native when compiled in, fallback otherwise.
    #[default]
    Auto,
    /// Require the native encoder.
    Native,
    /// Always use the fallback emitter.
    Fallback,
}

/// Whether the native YAML encoder is part of this build.
pub fn native_yaml_available() -> bool {
    cfg!(feature = "native-yaml")
}

/// Resolves `choice` to an encoder.
///
/// Fails only for `Native` in builds without the `native-yaml` feature.
pub fn yaml_encoder(choice: YamlEncoderChoice) -> AppResult<Box<dyn DocumentEncoder>> {
    let encoder: Box<dyn DocumentEncoder> = match choice {
        YamlEncoderChoice::Auto => native_encoder()
            .unwrap_or_else(|_| Box::new(FallbackYamlEncoder) as Box<dyn DocumentEncoder>),
        YamlEncoderChoice::Native => native_encoder()?,
        YamlEncoderChoice::Fallback => Box::new(FallbackYamlEncoder),
    };
    tracing::debug!(encoder = encoder.name(), "selected YAML encoder");
    Ok(encoder)
}

#[cfg(feature = "native-yaml")]
fn native_encoder() -> AppResult<Box<dyn DocumentEncoder>> {
    Ok(Box::new(NativeYamlEncoder))
}

#[cfg(not(feature = "native-yaml"))]
fn native_encoder() -> AppResult<Box<dyn DocumentEncoder>> {
    Err(crate::error::AppError::General(
        "Native YAML encoder not available: build with the `native-yaml` feature".into(),
    ))
}
