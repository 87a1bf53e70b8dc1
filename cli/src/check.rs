#![deny(missing_docs)]

//! # Reference Check Command
//!
//! Compiles the input table and reports `$ref` targets missing from
//! `components.schemas`.

use crate::builtin::load_source;
use contract_core::{compile_source, find_dangling_refs, AppError, AppResult, DocValue, SystemClock};
use std::path::PathBuf;

/// Arguments for the check-refs command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckRefsArgs {
    /// Input table (.json, or .yaml/.yml). Defaults to the bundled table.
    #[clap(long, env = "CONTRACT_SOURCE")]
    pub source: Option<PathBuf>,
}

/// Executes the reference check.
pub fn execute(args: &CheckRefsArgs) -> AppResult<()> {
    let source = load_source(args.source.as_deref())?;
    let compiled = compile_source(&source, &SystemClock);
    ensure_refs_resolve(&compiled.openapi.to_document())?;
    println!(
        "All schema references resolve ({} schemas, {} endpoints)",
        source.schemas.len(),
        source.endpoints.len()
    );
    Ok(())
}

/// Fails when `doc` references an undefined component schema.
pub fn ensure_refs_resolve(doc: &DocValue) -> AppResult<()> {
    let dangling = find_dangling_refs(doc);
    if dangling.is_empty() {
        return Ok(());
    }
    for r in &dangling {
        tracing::error!(pointer = %r.pointer, target = %r.target, "dangling schema reference");
    }
    let listed = dangling
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(AppError::General(format!(
        "{} dangling schema reference(s): {}",
        dangling.len(),
        listed
    )))
}
