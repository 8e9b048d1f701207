//! Comment-tolerant JSON ("jsonc") handling.
//!
//! `//` starts a line comment running to end of line, `/* ... */` a block
//! comment that may span lines and ends at the next `*/`. Line comments are
//! removed first, then block comments; what remains must be strict JSON.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ForgeError;

fn line_comment() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"//.*").expect("line comment pattern compiles"))
}

fn block_comment() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern compiles"))
}

/// Remove line and block comments from `text`.
#[must_use]
pub fn strip_comments(text: &str) -> String {
    let without_lines = line_comment().replace_all(text, "");
    block_comment().replace_all(&without_lines, "").into_owned()
}

/// Strip comments from `text` and parse the remainder as JSON.
///
/// # Errors
///
/// Returns [`ForgeError::ConfigParse`] with the line and column reported by
/// the parser when the stripped text is not valid JSON.
pub fn parse_jsonc(document: &str, text: &str) -> Result<Value, ForgeError> {
    let stripped = strip_comments(text);
    serde_json::from_str(&stripped).map_err(|err| ForgeError::config_parse(document, &err))
}
