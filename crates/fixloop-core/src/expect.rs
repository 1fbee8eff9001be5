//! Expected-vs-actual diagnostic verification.
//!
//! Compares collected diagnostics against declared expectations and
//! produces a verdict listing every mismatch, with both sides rendered so
//! the test author can see what actually happened.

use crate::collector::DiagnosticCollector;
use crate::domain::error::Result;
use crate::domain::{Diagnostic, ExpectedDiagnostic, Project};

/// The outcome of comparing collected diagnostics against expectations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectationVerdict {
    /// Mismatch descriptions (empty when everything matched).
    pub failures: Vec<String>,
}

impl ExpectationVerdict {
    fn pass() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Whether every expectation matched.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compare `actual` against `expected`, position by position.
///
/// A count mismatch short-circuits with a single failure carrying the full
/// actual sequence; otherwise each position reports its first differing
/// field.
pub fn verify_diagnostics(
    actual: &[Diagnostic],
    expected: &[ExpectedDiagnostic],
) -> ExpectationVerdict {
    if actual.len() != expected.len() {
        return ExpectationVerdict {
            failures: vec![format!(
                "mismatch between number of diagnostics returned, expected \"{}\" actual \"{}\"\n\nactual diagnostics:\n{}",
                expected.len(),
                actual.len(),
                render(actual),
            )],
        };
    }

    let mut failures = Vec::new();
    for (index, (act, exp)) in actual.iter().zip(expected).enumerate() {
        if let Some(difference) = first_difference(exp, act) {
            failures.push(format!("diagnostic #{index}: {difference}\n  actual: {act}"));
        }
    }

    if failures.is_empty() {
        ExpectationVerdict::pass()
    } else {
        ExpectationVerdict { failures }
    }
}

fn render(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "    NONE.".to_string();
    }
    diagnostics
        .iter()
        .map(|d| format!("    {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_difference(expected: &ExpectedDiagnostic, actual: &Diagnostic) -> Option<String> {
    if expected.rule_id != actual.rule_id {
        return Some(format!(
            "expected rule id \"{}\", got \"{}\"",
            expected.rule_id, actual.rule_id
        ));
    }
    if expected.severity != actual.severity {
        return Some(format!(
            "expected severity {:?}, got {:?}",
            expected.severity, actual.severity
        ));
    }
    if expected.message != actual.message {
        return Some(format!(
            "expected message \"{}\", got \"{}\"",
            expected.message, actual.message
        ));
    }
    if expected.locations.len() != actual.locations.len() {
        return Some(format!(
            "expected {} locations, got {}",
            expected.locations.len(),
            actual.locations.len()
        ));
    }
    for (slot, (exp, act)) in expected.locations.iter().zip(&actual.locations).enumerate() {
        if exp != act {
            return Some(format!(
                "location #{slot}: expected {}({},{}), got {}({},{})",
                exp.path, exp.line, exp.column, act.path, act.line, act.column
            ));
        }
    }
    None
}

/// Binds a collector to the rule under test for expectation-style checks.
pub struct DiagnosticHarness {
    collector: DiagnosticCollector,
    rule_id: String,
}

impl DiagnosticHarness {
    /// Create a harness for the rule under test.
    pub fn new(collector: DiagnosticCollector, rule_id: impl Into<String>) -> Self {
        Self {
            collector,
            rule_id: rule_id.into(),
        }
    }

    /// Collect the rule's diagnostics for `project` and compare against
    /// `expected`.
    pub fn expect(
        &self,
        project: &Project,
        expected: &[ExpectedDiagnostic],
    ) -> Result<ExpectationVerdict> {
        let actual = self.collector.collect_rule(project, &self.rule_id)?;
        Ok(verify_diagnostics(&actual, expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, Severity};

    fn actual() -> Diagnostic {
        Diagnostic::new("Rule", Severity::Warning, "msg")
            .with_location(Location::new("Test0.cs", 3, 7).expect("valid"))
    }

    fn expected() -> ExpectedDiagnostic {
        ExpectedDiagnostic::new("Rule", Severity::Warning, "msg")
            .with_location(Location::new("Test0.cs", 3, 7).expect("valid"))
    }

    #[test]
    fn test_matching_sequences_pass() {
        let verdict = verify_diagnostics(&[actual()], &[expected()]);
        assert!(verdict.passed());
    }

    #[test]
    fn test_count_mismatch_renders_actual_sequence() {
        let verdict = verify_diagnostics(&[actual()], &[]);
        assert!(!verdict.passed());
        assert_eq!(verdict.failures.len(), 1);
        assert!(verdict.failures[0].contains("number of diagnostics"));
        assert!(verdict.failures[0].contains("Test0.cs(3,7)"));
    }

    #[test]
    fn test_empty_actual_renders_none() {
        let verdict = verify_diagnostics(&[], &[expected()]);
        assert!(verdict.failures[0].contains("NONE."));
    }

    #[test]
    fn test_field_mismatch_names_the_field() {
        let mut exp = expected();
        exp.message = "other".to_string();
        let verdict = verify_diagnostics(&[actual()], &[exp]);
        assert!(!verdict.passed());
        assert!(verdict.failures[0].contains("expected message"));
    }

    #[test]
    fn test_location_mismatch_reports_slot() {
        let exp = ExpectedDiagnostic::new("Rule", Severity::Warning, "msg")
            .with_location(Location::new("Test0.cs", 4, 7).expect("valid"));
        let verdict = verify_diagnostics(&[actual()], &[exp]);
        assert!(!verdict.passed());
        assert!(verdict.failures[0].contains("location #0"));
    }
}
