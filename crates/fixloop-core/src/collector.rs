//! Diagnostic collection with deterministic ordering.
//!
//! Runs every registered rule over every document of a project and returns
//! a deduplicated, totally ordered diagnostic sequence. Two calls on the
//! same project snapshot return identical sequences.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::error::Result;
use crate::domain::{Diagnostic, Project, RuleDescriptor};
use crate::rule::AnalysisRule;

/// Runs a set of analysis rules against project snapshots.
///
/// Each collector instance owns its rule registry; there is no global
/// registration.
#[derive(Default)]
pub struct DiagnosticCollector {
    rules: Vec<Arc<dyn AnalysisRule>>,
}

impl DiagnosticCollector {
    /// Create a collector with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule, builder-style.
    pub fn with_rule(mut self, rule: Arc<dyn AnalysisRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Descriptors of every registered rule, in registration order.
    pub fn descriptors(&self) -> Vec<&RuleDescriptor> {
        self.rules.iter().map(|r| r.descriptor()).collect()
    }

    /// Collect diagnostics from every rule over every document.
    pub fn collect(&self, project: &Project) -> Result<Vec<Diagnostic>> {
        self.collect_filtered(project, |_| true)
    }

    /// Collect only diagnostics produced by `rule_id`: the "analyzer" set
    /// for a rule under test.
    pub fn collect_rule(&self, project: &Project, rule_id: &str) -> Result<Vec<Diagnostic>> {
        self.collect_filtered(project, |d| d.rule_id == rule_id)
    }

    /// Collect only diagnostics NOT produced by `rule_id`: the baseline
    /// set used for regression comparison. Filtering happens before
    /// sorting.
    pub fn collect_excluding(&self, project: &Project, rule_id: &str) -> Result<Vec<Diagnostic>> {
        self.collect_filtered(project, |d| d.rule_id != rule_id)
    }

    fn collect_filtered(
        &self,
        project: &Project,
        keep: impl Fn(&Diagnostic) -> bool,
    ) -> Result<Vec<Diagnostic>> {
        project.validate()?;

        let mut diagnostics = Vec::new();
        for document in &project.documents {
            for rule in &self.rules {
                diagnostics.extend(
                    rule.analyze(document, &project.options)
                        .into_iter()
                        .filter(&keep),
                );
            }
        }

        // Drop exact structural duplicates, first occurrence wins.
        let mut seen = HashSet::new();
        diagnostics.retain(|d| seen.insert(d.clone()));

        sort_diagnostics(&mut diagnostics);

        debug!(
            project = %project.name,
            count = diagnostics.len(),
            "collected diagnostics"
        );
        Ok(diagnostics)
    }
}

/// Total order: ascending by `(path, line, column)` of the primary
/// location; diagnostics without a location sort after all located ones
/// and keep their relative order among themselves.
fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| match (a.primary_location(), b.primary_location()) {
        (Some(la), Some(lb)) => (la.path.as_str(), la.line, la.column)
            .cmp(&(lb.path.as_str(), lb.line, lb.column)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
