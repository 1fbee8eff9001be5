//! Line-length analysis rule.
//!
//! Flags every source line longer than the configured limit. The limit
//! comes from the `line_length_limit` project option; `0` (or an absent
//! option) disables the rule entirely.

use regex::Regex;
use tracing::trace;

use fixloop_core::{
    AnalysisRule, Diagnostic, Document, Location, RuleDescriptor, RuleOptions, Severity,
};

/// The id that uniquely identifies the line-length rule.
pub const RULE_ID: &str = "LineLengthAnalyzer";

/// Project option holding the limit; `0` or absent means disabled.
pub const LINE_LENGTH_LIMIT_OPTION: &str = "line_length_limit";

/// The stock limit callers get from [`LineLengthRule::with_default_limit`].
pub const DEFAULT_LINE_LENGTH_LIMIT: u32 = 100;

/// Flags lines exceeding a maximum length.
///
/// Only `.cs` documents are scanned, and generated suppression files
/// (`GlobalSuppressions.cs`) are skipped.
pub struct LineLengthRule {
    descriptor: RuleDescriptor,
    fixed_limit: Option<u32>,
    include: Regex,
    exclude: Regex,
}

impl LineLengthRule {
    /// Create a rule that reads its limit from the project options.
    pub fn new() -> Self {
        Self {
            descriptor: RuleDescriptor::new(
                RULE_ID,
                Severity::Warning,
                "Lines should not exceed the configured maximum length",
            ),
            fixed_limit: None,
            include: Regex::new(r"\.cs$").expect("include pattern is valid"),
            exclude: Regex::new(r"GlobalSuppressions\.cs$").expect("exclude pattern is valid"),
        }
    }

    /// Create a rule with a fixed limit, ignoring project options.
    pub fn with_limit(limit: u32) -> Self {
        Self {
            fixed_limit: Some(limit),
            ..Self::new()
        }
    }

    /// Create a rule fixed at [`DEFAULT_LINE_LENGTH_LIMIT`].
    pub fn with_default_limit() -> Self {
        Self::with_limit(DEFAULT_LINE_LENGTH_LIMIT)
    }

    fn limit_for(&self, options: &RuleOptions) -> u32 {
        match self.fixed_limit {
            Some(limit) => limit,
            None => options.get_uint(LINE_LENGTH_LIMIT_OPTION, 0),
        }
    }
}

impl Default for LineLengthRule {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisRule for LineLengthRule {
    fn descriptor(&self) -> &RuleDescriptor {
        &self.descriptor
    }

    fn analyze(&self, document: &Document, options: &RuleOptions) -> Vec<Diagnostic> {
        let limit = self.limit_for(options);
        if limit == 0 {
            return Vec::new();
        }
        if !self.include.is_match(&document.name) || self.exclude.is_match(&document.name) {
            trace!(document = %document.name, "skipping non-source document");
            return Vec::new();
        }

        let mut diagnostics = Vec::new();
        for (index, line) in document.lines().enumerate() {
            let length = line.chars().count() as u32;
            if length <= limit {
                continue;
            }

            let line_number = (index + 1) as i32;
            diagnostics.push(
                Diagnostic::new(
                    RULE_ID,
                    Severity::Warning,
                    format!(
                        "Line '{}' exceeded the configured maximum length by '{}' characters",
                        line_number,
                        length - limit
                    ),
                )
                .with_location(Location {
                    path: document.name.clone(),
                    line: line_number,
                    // First character past the limit.
                    column: (limit + 1) as i32,
                }),
            );
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(rule: &LineLengthRule, name: &str, text: &str) -> Vec<Diagnostic> {
        rule.analyze(&Document::new(name, text), &RuleOptions::new())
    }

    #[test]
    fn test_line_over_limit_is_flagged_with_excess() {
        // Stock limit is 100, so a 122-character line is over by 22.
        let rule = LineLengthRule::with_default_limit();
        let source = format!("short line\n{}", "x".repeat(122));
        let diagnostics = analyze(&rule, "Test0.cs", &source);

        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.rule_id, RULE_ID);
        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(
            diagnostic.message,
            "Line '2' exceeded the configured maximum length by '22' characters"
        );
        let location = diagnostic.primary_location().expect("located");
        assert_eq!(location.path, "Test0.cs");
        assert_eq!(location.line, 2);
        assert_eq!(location.column, 101);
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let rule = LineLengthRule::with_limit(100);
        assert!(analyze(&rule, "Test0.cs", "").is_empty());
    }

    #[test]
    fn test_lines_at_or_under_limit_yield_nothing() {
        let rule = LineLengthRule::with_limit(10);
        let source = "exactly10c\nshorter";
        assert!(analyze(&rule, "Test0.cs", source).is_empty());
    }

    #[test]
    fn test_zero_limit_disables_the_rule() {
        let rule = LineLengthRule::with_limit(0);
        let source = "x".repeat(500);
        assert!(analyze(&rule, "Test0.cs", &source).is_empty());
    }

    #[test]
    fn test_limit_read_from_options_with_absent_meaning_disabled() {
        let rule = LineLengthRule::new();
        let long = "x".repeat(50);

        // Absent option: disabled.
        assert!(rule
            .analyze(&Document::new("Test0.cs", &long), &RuleOptions::new())
            .is_empty());

        let options = RuleOptions::new().set(LINE_LENGTH_LIMIT_OPTION, "40");
        let diagnostics = rule.analyze(&Document::new("Test0.cs", &long), &options);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'10'"));
    }

    #[test]
    fn test_non_cs_documents_are_skipped() {
        let rule = LineLengthRule::with_limit(10);
        let long = "x".repeat(50);
        assert!(analyze(&rule, "notes.txt", &long).is_empty());
        assert!(analyze(&rule, "Test0.cs.bak", &long).is_empty());
    }

    #[test]
    fn test_global_suppressions_are_skipped() {
        let rule = LineLengthRule::with_limit(10);
        let long = "x".repeat(50);
        assert!(analyze(&rule, "GlobalSuppressions.cs", &long).is_empty());
        assert!(analyze(&rule, "src/GlobalSuppressions.cs", &long).is_empty());
    }

    #[test]
    fn test_every_long_line_is_flagged() {
        let rule = LineLengthRule::with_limit(5);
        let source = "123456\nok\n1234567";
        let diagnostics = analyze(&rule, "Test0.cs", source);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics[0].message.starts_with("Line '1'"));
        assert!(diagnostics[1].message.starts_with("Line '3'"));
    }

    #[test]
    fn test_length_is_measured_in_chars_not_bytes() {
        let rule = LineLengthRule::with_limit(4);
        // Five multibyte characters: over a limit of 4 by exactly one.
        let diagnostics = analyze(&rule, "Test0.cs", "ööööö");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("'1' characters"));
    }
}
