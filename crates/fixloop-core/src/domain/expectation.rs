//! Expected-diagnostic values used by test expectations.

use serde::{Deserialize, Serialize};

use crate::domain::diagnostic::{Diagnostic, Location, Severity};

/// A diagnostic a test expects the collector to report.
///
/// Comparison against an actual [`Diagnostic`] requires an exact match on
/// every field, including the full location list in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpectedDiagnostic {
    /// Expected rule id.
    pub rule_id: String,

    /// Expected severity.
    pub severity: Severity,

    /// Expected message, verbatim.
    pub message: String,

    /// Expected locations in order; first entry is the primary location.
    pub locations: Vec<Location>,
}

impl ExpectedDiagnostic {
    /// Create an expectation with no locations.
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

    /// Append an expected location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Primary path, or `""` when no location is expected.
    pub fn path(&self) -> &str {
        self.locations.first().map_or("", |l| l.path.as_str())
    }

    /// Primary line, or `-1` when no location is expected.
    pub fn line(&self) -> i32 {
        self.locations.first().map_or(-1, |l| l.line)
    }

    /// Primary column, or `-1` when no location is expected.
    pub fn column(&self) -> i32 {
        self.locations.first().map_or(-1, |l| l.column)
    }

    /// Whether `actual` matches this expectation on every field.
    pub fn matches(&self, actual: &Diagnostic) -> bool {
        self.rule_id == actual.rule_id
            && self.severity == actual.severity
            && self.message == actual.message
            && self.locations == actual.locations
    }
}
