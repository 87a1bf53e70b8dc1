#![deny(missing_docs)]

//! # Reference Check
//!
//! Post-generation pass that reports `#/components/schemas/<name>` references
//! whose target is not defined in the same document. The compiler never calls
//! this; schema nodes stay opaque during compilation.

use crate::value::DocValue;
use std::collections::HashSet;
use std::fmt::Display;

/// Prefix of local component schema references.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// A `$ref` whose target schema is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRef {
    /// JSON pointer to the object holding the `$ref`.
    pub pointer: String,
    /// The unresolved reference string.
    pub target: String,
}

impl Display for DanglingRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.pointer, self.target)
    }
}

/// Walks `doc` and returns every schema reference not defined under
/// `components.schemas`, in document order.
///
/// References with other prefixes (remote documents, parameters) are ignored.
pub fn find_dangling_refs(doc: &DocValue) -> Vec<DanglingRef> {
    let defined: HashSet<&str> = doc
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(DocValue::as_mapping)
        .map(|schemas| schemas.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let mut found = Vec::new();
    walk(doc, &mut String::new(), &defined, &mut found);
    found
}

fn walk(
    node: &DocValue,
    pointer: &mut String,
    defined: &HashSet<&str>,
    found: &mut Vec<DanglingRef>,
) {
    match node {
        DocValue::Mapping(map) => {
            if let Some(target) = map.get("$ref").and_then(DocValue::as_str) {
                if let Some(name) = target.strip_prefix(SCHEMA_REF_PREFIX) {
                    if !defined.contains(decode_segment(name).as_str()) {
                        found.push(DanglingRef {
                            pointer: if pointer.is_empty() {
                                "/".to_string()
                            } else {
                                pointer.clone()
                            },
                            target: target.to_string(),
                        });
                    }
                }
            }
            for (key, child) in map {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&encode_segment(key));
                walk(child, pointer, defined, found);
                pointer.truncate(len);
            }
        }
        DocValue::Sequence(items) => {
            for (idx, child) in items.iter().enumerate() {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&idx.to_string());
                walk(child, pointer, defined, found);
                pointer.truncate(len);
            }
        }
        _ => {}
    }
}

/// RFC 6901 escaping of a pointer segment.
fn encode_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn decode_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
