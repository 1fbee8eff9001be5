//! Per-project rule options.
//!
//! A string-keyed option store in the spirit of editorconfig settings.
//! Values are kept as raw strings; rules read them through the typed
//! getters and fall back to the supplied default when a key is absent or
//! unparseable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Rule options shared by all documents in a project.
///
/// Backed by a `BTreeMap` so iteration order, and with it everything
/// derived from the options, is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RuleOptions {
    values: BTreeMap<String, String>,
}

impl RuleOptions {
    /// Create an empty option store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, builder-style.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Raw value of an option, when present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Read an option as a non-negative integer.
    pub fn get_uint(&self, name: &str, default: u32) -> u32 {
        self.get(name)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(default)
    }

    /// Read an option as a boolean (`true`/`false`, case-insensitive).
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.get(name)
            .and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            })
            .unwrap_or(default)
    }
}
