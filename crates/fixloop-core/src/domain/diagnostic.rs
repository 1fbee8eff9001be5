//! Diagnostic values reported by analysis rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::{CoreError, Result};

/// Severity level for a diagnostic.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Hidden,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Hidden => "hidden",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{name}")
    }
}

/// A position inside a named document.
///
/// `line` and `column` are 1-based; `-1` means "unknown". Values below `-1`
/// are rejected at construction, never clamped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: String,
    pub line: i32,
    pub column: i32,
}

impl Location {
    /// Create a location, validating the `>= -1` invariant on line and column.
    pub fn new(path: impl Into<String>, line: i32, column: i32) -> Result<Self> {
        if line < -1 {
            return Err(CoreError::LocationOutOfRange {
                field: "line",
                value: line,
            });
        }
        if column < -1 {
            return Err(CoreError::LocationOutOfRange {
                field: "column",
                value: column,
            });
        }
        Ok(Self {
            path: path.into(),
            line,
            column,
        })
    }

    /// A location that names a document but no position within it.
    pub fn unknown(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: -1,
            column: -1,
        }
    }
}

/// A single issue reported by an analysis rule.
///
/// Equality is structural: two diagnostics are equal only when the rule id,
/// severity, message, and the full ordered location list all match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    /// Id of the rule that produced this diagnostic.
    pub rule_id: String,

    /// Severity level.
    pub severity: Severity,

    /// Human-readable message.
    pub message: String,

    /// Ordered locations; the first entry is the primary location.
    pub locations: Vec<Location>,
}

impl Diagnostic {
    /// Create a diagnostic with no locations.
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            locations: Vec::new(),
        }
    }

    /// Append a location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// The primary (first) location, when any location is attached.
    pub fn primary_location(&self) -> Option<&Location> {
        self.locations.first()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primary_location() {
            Some(loc) => write!(
                f,
                "{}({},{}): {} {}: {}",
                loc.path, loc.line, loc.column, self.severity, self.rule_id, self.message
            ),
            None => write!(f, "{} {}: {}", self.severity, self.rule_id, self.message),
        }
    }
}
