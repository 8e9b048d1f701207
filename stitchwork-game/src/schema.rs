//! Structural checks for the catalog documents.
//!
//! The check walks the parsed tree rather than matching raw text, so key
//! order and whitespace do not matter. It is advisory: callers get `false`
//! (or a list of violations) instead of an error.

use std::fmt;

use serde_json::{Map, Value};

use crate::config::ResourceSource;
use crate::constants::{PARTS_DOCUMENT, TITLES_DOCUMENT};
use crate::effect::Scaling;
use crate::jsonc::parse_jsonc;
use crate::numbers::{json_to_non_negative, json_to_u32};

const PART_KEYS: [&str; 3] = ["baseStats", "sockets", "slots"];
const STAT_KEYS: [&str; 3] = ["health", "defense", "attack"];
const SOCKET_KEYS: [&str; 2] = ["female", "male"];
const TITLE_KEYS: [&str; 1] = ["effects"];
const EFFECT_KEYS: [&str; 4] = ["scaling", "health", "defense", "attack"];

/// One structural problem found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Slash-separated location of the offending value, `/` for the root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<SchemaViolation>,
}

impl Checker {
    fn report(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(SchemaViolation {
            path: if path.is_empty() {
                "/".to_string()
            } else {
                path.to_string()
            },
            message: message.into(),
        });
    }

    fn object<'v>(&mut self, path: &str, value: &'v Value) -> Option<&'v Map<String, Value>> {
        let map = value.as_object();
        if map.is_none() {
            self.report(path, "expected an object");
        }
        map
    }

    fn exact_keys(&mut self, path: &str, map: &Map<String, Value>, required: &[&str]) {
        self.allowed_keys(path, map, required);
        for key in required {
            if !map.contains_key(*key) {
                self.report(path, format!("missing `{key}`"));
            }
        }
    }

    fn allowed_keys(&mut self, path: &str, map: &Map<String, Value>, allowed: &[&str]) {
        for key in map.keys() {
            if !allowed.contains(&key.as_str()) {
                self.report(path, format!("unexpected key `{key}`"));
            }
        }
    }

    fn non_negative(&mut self, path: &str, value: &Value) {
        if json_to_non_negative(value).is_none() {
            self.report(path, "expected a non-negative number");
        }
    }

    fn count(&mut self, path: &str, value: &Value) {
        if json_to_u32(value).is_none() {
            self.report(path, "expected a non-negative integer");
        }
    }

    fn number(&mut self, path: &str, value: &Value) {
        if !value.as_f64().is_some_and(f64::is_finite) {
            self.report(path, "expected a number");
        }
    }

    fn part_entry(&mut self, path: &str, value: &Value) {
        let Some(entry) = self.object(path, value) else {
            return;
        };
        self.exact_keys(path, entry, &PART_KEYS);

        if let Some(stats) = entry.get("baseStats") {
            let stats_path = format!("{path}/baseStats");
            if let Some(stats) = self.object(&stats_path, stats) {
                self.exact_keys(&stats_path, stats, &STAT_KEYS);
                for key in STAT_KEYS {
                    if let Some(stat) = stats.get(key) {
                        self.non_negative(&format!("{stats_path}/{key}"), stat);
                    }
                }
            }
        }

        if let Some(sockets) = entry.get("sockets") {
            let sockets_path = format!("{path}/sockets");
            if let Some(sockets) = self.object(&sockets_path, sockets) {
                self.exact_keys(&sockets_path, sockets, &SOCKET_KEYS);
                for key in SOCKET_KEYS {
                    if let Some(count) = sockets.get(key) {
                        self.count(&format!("{sockets_path}/{key}"), count);
                    }
                }
            }
        }

        if let Some(slots) = entry.get("slots") {
            self.count(&format!("{path}/slots"), slots);
        }
    }

    fn title_entry(&mut self, path: &str, value: &Value) {
        let Some(entry) = self.object(path, value) else {
            return;
        };
        self.exact_keys(path, entry, &TITLE_KEYS);
        let Some(effects) = entry.get("effects") else {
            return;
        };
        let effects_path = format!("{path}/effects");
        let Some(effects) = effects.as_array() else {
            self.report(&effects_path, "expected an array");
            return;
        };
        for (index, effect) in effects.iter().enumerate() {
            let effect_path = format!("{effects_path}/{index}");
            let Some(effect) = self.object(&effect_path, effect) else {
                continue;
            };
            self.allowed_keys(&effect_path, effect, &EFFECT_KEYS);
            match effect.get("scaling").map(Value::as_str) {
                None => self.report(&effect_path, "missing `scaling`"),
                Some(None) => self.report(&format!("{effect_path}/scaling"), "expected a string"),
                Some(Some(keyword)) => {
                    if Scaling::parse(path, keyword).is_err() {
                        self.report(
                            &format!("{effect_path}/scaling"),
                            format!("invalid scaling metric `{keyword}`"),
                        );
                    }
                }
            }
            for key in STAT_KEYS {
                if let Some(stat) = effect.get(key) {
                    self.number(&format!("{effect_path}/{key}"), stat);
                }
            }
        }
    }

    fn document(&mut self, document: &str, text: &str, entry: fn(&mut Self, &str, &Value)) {
        let value = match parse_jsonc(document, text) {
            Ok(value) => value,
            Err(err) => {
                self.report("", err.to_string());
                return;
            }
        };
        let Some(root) = self.object("", &value) else {
            return;
        };
        for (name, value) in root {
            entry(self, &format!("/{name}"), value);
        }
    }
}

/// List every structural problem in a parts catalog.
#[must_use]
pub fn check_parts(text: &str) -> Vec<SchemaViolation> {
    let mut checker = Checker::default();
    checker.document(PARTS_DOCUMENT, text, Checker::part_entry);
    checker.violations
}

/// List every structural problem in a titles catalog.
#[must_use]
pub fn check_titles(text: &str) -> Vec<SchemaViolation> {
    let mut checker = Checker::default();
    checker.document(TITLES_DOCUMENT, text, Checker::title_entry);
    checker.violations
}

#[must_use]
pub fn validate_parts(text: &str) -> bool {
    check_parts(text).is_empty()
}

#[must_use]
pub fn validate_titles(text: &str) -> bool {
    check_titles(text).is_empty()
}

/// Check `document` as read from `source`.
///
/// Unknown documents and documents that cannot be read come back as a
/// single root-level violation.
#[must_use]
pub fn check_document<S: ResourceSource + ?Sized>(
    source: &S,
    document: &str,
) -> Vec<SchemaViolation> {
    let text = match source.read_document(document) {
        Ok(text) => text,
        Err(err) => {
            let mut checker = Checker::default();
            checker.report("", err.to_string());
            return checker.violations;
        }
    };
    match document {
        PARTS_DOCUMENT => check_parts(&text),
        TITLES_DOCUMENT => check_titles(&text),
        other => {
            let mut checker = Checker::default();
            checker.report("", format!("no schema for document `{other}`"));
            checker.violations
        }
    }
}

/// Pass/fail form of [`check_document`].
#[must_use]
pub fn validate_document<S: ResourceSource + ?Sized>(source: &S, document: &str) -> bool {
    check_document(source, document).is_empty()
}
