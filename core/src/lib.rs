#![deny(missing_docs)]

//! # Contract Core
//!
//! Compiles a declarative endpoint table and schema registry into two documents:
//! a flat JSON contract (one entry per record) and an OpenAPI document (YAML).
//!
//! Everything here is pure apart from the injected [`clock::Clock`]; writing
//! files is left to the caller.

/// Shared error types.
pub mod error;

/// Format-neutral document tree.
pub mod value;

/// Input tables.
pub mod model;

/// Generation timestamp source.
pub mod clock;

/// Flat contract output.
pub mod contract;

/// OpenAPI document output.
pub mod openapi;

/// The compile step.
pub mod compiler;

/// JSON and YAML encoders.
pub mod encoding;

/// Post-generation `$ref` check.
pub mod refs;

/// Input table loading.
pub mod source;

pub use clock::{Clock, FixedClock, SystemClock};
pub use compiler::{compile, compile_source, compile_with_info, CompiledContract};
pub use contract::{ContractMetadata, FlatContract, FlatEndpoint};
pub use encoding::{
    yaml_encoder, DocumentEncoder, FallbackYamlEncoder, JsonEncoder, YamlEncoderChoice,
};
pub use error::{AppError, AppResult};
pub use model::{
    ContractSource, DocumentInfo, EndpointRecord, RequestBodySpec, SchemaRegistry, ServerInfo,
};
pub use openapi::{OpenApiDocument, Operation};
pub use refs::{find_dangling_refs, DanglingRef};
pub use value::{DocValue, Mapping, Number};
