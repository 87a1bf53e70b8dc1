#![deny(missing_docs)]

//! # Fallback YAML Encoder
//!
//! A minimal block-style emitter for builds without a YAML library.
//!
//! Layout rules:
//! - mappings emit `key: <scalar>` or `key:` followed by the child one level deeper;
//! - sequences emit `- <scalar>` or a bare `-` followed by the child one level deeper;
//! - scalars are JSON tokens, which are valid YAML flow scalars;
//! - empty containers are written inline as `{}` / `[]`;
//! - indentation is two spaces per level, starting at column zero.
//!
//! Input must be a finite tree; `DocValue` cannot express cycles.

use crate::encoding::json::encode_scalar;
use crate::encoding::traits::DocumentEncoder;
use crate::error::AppResult;
use crate::value::DocValue;

const INDENT: &str = "  ";

/// Scalars a YAML 1.1 parser would resolve to booleans or null.
const RESERVED_WORDS: &[&str] = &["true", "false", "null", "yes", "no", "on", "off", "y", "n"];

/// Hand-rolled structural emitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackYamlEncoder;

impl DocumentEncoder for FallbackYamlEncoder {
    fn name(&self) -> &'static str {
        "yaml-fallback"
    }

    fn encode(&self, doc: &DocValue) -> AppResult<String> {
        let mut lines = Vec::new();
        emit(doc, 0, &mut lines)?;
        let mut text = lines.join("\n");
        text.push('\n');
        Ok(text)
    }
}

fn emit(node: &DocValue, depth: usize, lines: &mut Vec<String>) -> AppResult<()> {
    let pad = INDENT.repeat(depth);
    match node {
        DocValue::Mapping(map) if !map.is_empty() => {
            for (key, value) in map {
                let key = encode_key(key)?;
                if has_block_children(value) {
                    lines.push(format!("{}{}:", pad, key));
                    emit(value, depth + 1, lines)?;
                } else {
                    lines.push(format!("{}{}: {}", pad, key, encode_inline(value)?));
                }
            }
        }
        DocValue::Sequence(items) if !items.is_empty() => {
            for item in items {
                if has_block_children(item) {
                    lines.push(format!("{}-", pad));
                    emit(item, depth + 1, lines)?;
                } else {
                    lines.push(format!("{}- {}", pad, encode_inline(item)?));
                }
            }
        }
        other => lines.push(format!("{}{}", pad, encode_inline(other)?)),
    }
    Ok(())
}

fn has_block_children(value: &DocValue) -> bool {
    value.is_container() && !value.is_empty_container()
}

/// Scalars and empty containers, as they appear after `key: ` or `- `.
fn encode_inline(value: &DocValue) -> AppResult<String> {
    match value {
        DocValue::Mapping(_) => Ok("{}".to_string()),
        DocValue::Sequence(_) => Ok("[]".to_string()),
        scalar => Ok(escape_yaml_breaks(encode_scalar(scalar)?)),
    }
}

/// Keys stay bare only when no parser could read them as anything but a string.
fn encode_key(key: &str) -> AppResult<String> {
    if is_plain_key(key) {
        Ok(key.to_string())
    } else {
        Ok(escape_yaml_breaks(encode_scalar(&DocValue::from(key))?))
    }
}

fn is_plain_key(key: &str) -> bool {
    let mut chars = key.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    starts_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-'))
        && !RESERVED_WORDS.contains(&key.to_ascii_lowercase().as_str())
}

/// JSON leaves some characters raw that YAML treats as line breaks or
/// non-printable inside double quotes.
fn escape_yaml_breaks(token: String) -> String {
    if !token.chars().any(needs_yaml_escape) {
        return token;
    }
    token
        .chars()
        .map(|c| {
            if needs_yaml_escape(c) {
                format!("\\u{:04x}", c as u32)
            } else {
                c.to_string()
            }
        })
        .collect()
}

fn needs_yaml_escape(c: char) -> bool {
    matches!(c, '\u{7f}'..='\u{9f}' | '\u{2028}' | '\u{2029}' | '\u{feff}')
}
