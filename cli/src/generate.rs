#![deny(missing_docs)]

//! # Generate Command
//!
//! Compiles the input table and writes the flat JSON contract and the
//! OpenAPI YAML document side by side.

use crate::builtin::load_source;
use crate::check::ensure_refs_resolve;
use contract_core::encoding::{yaml_encoder, DocumentEncoder, JsonEncoder, YamlEncoderChoice};
use contract_core::{compile_source, AppError, AppResult, Clock, FixedClock, SystemClock};
use std::fs;
use std::path::PathBuf;

/// YAML encoder selection on the command line.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderArg {
    /// Native encoder when built with it, fallback otherwise.
    Auto,
    /// serde_yaml.
    Native,
    /// Built-in minimal emitter.
    Fallback,
}

impl From<EncoderArg> for YamlEncoderChoice {
    fn from(arg: EncoderArg) -> Self {
        match arg {
            EncoderArg::Auto => YamlEncoderChoice::Auto,
            EncoderArg::Native => YamlEncoderChoice::Native,
            EncoderArg::Fallback => YamlEncoderChoice::Fallback,
        }
    }
}

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Input table (.json, or .yaml/.yml). Defaults to the bundled table.
    #[clap(long, env = "CONTRACT_SOURCE")]
    pub source: Option<PathBuf>,

    /// Directory receiving both documents. Created if missing.
    #[clap(long, env = "CONTRACT_OUT_DIR", default_value = "_contract")]
    pub out_dir: PathBuf,

    /// File name of the flat JSON contract.
    #[clap(long, default_value = "api-contract.json")]
    pub contract_file: String,

    /// File name of the OpenAPI document.
    #[clap(long, default_value = "openapi.yaml")]
    pub openapi_file: String,

    /// YAML encoder for the OpenAPI document.
    #[clap(long, value_enum, default_value_t = EncoderArg::Auto)]
    pub yaml_encoder: EncoderArg,

    /// Fixed RFC 3339 generation time, for reproducible output.
    #[clap(long)]
    pub timestamp: Option<String>,

    /// Write documents even when a `$ref` target is missing.
    #[clap(long)]
    pub skip_ref_check: bool,
}

/// Executes generation.
pub fn execute(args: &GenerateArgs) -> AppResult<()> {
    let source = load_source(args.source.as_deref())?;
    let clock: Box<dyn Clock> = match &args.timestamp {
        Some(ts) => Box::new(FixedClock::parse(ts)?),
        None => Box::new(SystemClock),
    };

    let compiled = compile_source(&source, clock.as_ref());
    let contract_doc = compiled.flat.to_document();
    let openapi_doc = compiled.openapi.to_document();

    if args.skip_ref_check {
        tracing::warn!("skipping schema reference check");
    } else {
        ensure_refs_resolve(&openapi_doc)?;
    }

    let yaml = yaml_encoder(args.yaml_encoder.into())?;
    let contract_text = JsonEncoder.encode(&contract_doc)?;
    let openapi_text = yaml.encode(&openapi_doc)?;

    if !args.out_dir.exists() {
        fs::create_dir_all(&args.out_dir).map_err(|e| {
            AppError::General(format!("Failed to create output directory: {}", e))
        })?;
    }

    let contract_path = args.out_dir.join(&args.contract_file);
    fs::write(&contract_path, contract_text)
        .map_err(|e| AppError::General(format!("Failed to write {:?}: {}", contract_path, e)))?;

    let openapi_path = args.out_dir.join(&args.openapi_file);
    fs::write(&openapi_path, openapi_text)
        .map_err(|e| AppError::General(format!("Failed to write {:?}: {}", openapi_path, e)))?;

    tracing::info!(
        contract = %contract_path.display(),
        openapi = %openapi_path.display(),
        encoder = yaml.name(),
        "documents written"
    );
    println!(
        "Generated contract for {} endpoints",
        compiled.flat.metadata.endpoint_count
    );
    Ok(())
}
