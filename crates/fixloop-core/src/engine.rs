//! Fix-convergence verification engine.
//!
//! Drives the detect → fix → re-detect → compare loop over immutable
//! project snapshots: collect diagnostics for the rule under test, ask the
//! fix provider for candidate repairs, apply one, re-collect, and diff the
//! rule-unrelated diagnostics against the baseline captured before any fix
//! was applied. Terminates when no diagnostics remain, when no fix is
//! offered, or when the iteration budget (the diagnostic count observed on
//! the initial snapshot) runs out.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cancel::CancelToken;
use crate::collector::DiagnosticCollector;
use crate::domain::error::{CoreError, Result};
use crate::domain::{Diagnostic, Project};
use crate::rule::FixProvider;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Policy governing a single verification run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyPolicy {
    /// Apply the offered action at this index once, then stop iterating.
    /// `None` applies the first offered action and keeps iterating.
    pub fix_index: Option<usize>,

    /// Tolerate rule-unrelated diagnostics introduced by a fix instead of
    /// failing with a regression verdict.
    pub allow_new_diagnostics: bool,
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

/// How the iteration loop ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceState {
    /// No analyzer diagnostics remain.
    Resolved,

    /// The iteration budget ran out before the analyzer set emptied.
    ExhaustedBudget,

    /// The provider offered no action for the current diagnostic.
    NoFixOffered,

    /// A caller-selected action was applied exactly once.
    SingleFixApplied,
}

/// Outcome of a verification run.
///
/// Faults (`ProjectInvalid`, `Aborted`) travel the error channel; every
/// variant here is a fully evaluated verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FixVerdict {
    /// The final text matched the expectation.
    Converged {
        iterations: u32,
        state: ConvergenceState,
    },

    /// A fix introduced diagnostics outside the initial baseline.
    Regression {
        new_diagnostics: Vec<Diagnostic>,
        source: String,
    },

    /// The final text differed from the expectation.
    Mismatch { expected: String, actual: String },
}

impl FixVerdict {
    /// Whether the run passed.
    pub fn passed(&self) -> bool {
        matches!(self, FixVerdict::Converged { .. })
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Verifies that a fix provider converges on a rule's diagnostics.
pub struct FixConvergenceEngine {
    collector: DiagnosticCollector,
    rule_id: String,
    normalizer: Option<Box<dyn Fn(&str) -> String + Send + Sync>>,
}

impl FixConvergenceEngine {
    /// Create an engine for the rule under test.
    pub fn new(collector: DiagnosticCollector, rule_id: impl Into<String>) -> Self {
        Self {
            collector,
            rule_id: rule_id.into(),
            normalizer: None,
        }
    }

    /// Install a formatting normalization pass.
    ///
    /// Applied to the document texts only before the final regression
    /// report is built, so whitespace-only differences do not show up as
    /// spurious regressions.
    pub fn with_normalizer(
        mut self,
        normalizer: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    /// Id of the rule under test.
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    /// Run the convergence loop and compare the final text against
    /// `expected_final_source`.
    ///
    /// The iteration budget equals the number of analyzer diagnostics on
    /// the initial snapshot. The baseline, the diagnostics NOT produced by
    /// the rule under test, is captured once up front and held fixed as the
    /// regression reference.
    pub async fn verify_fix(
        &self,
        project: Project,
        provider: &dyn FixProvider,
        expected_final_source: &str,
        policy: &VerifyPolicy,
        cancel: &CancelToken,
    ) -> Result<FixVerdict> {
        let run_id = Uuid::new_v4();
        let started = Instant::now();

        let mut current = project;
        let mut analyzer_diags = self.collector.collect_rule(&current, &self.rule_id)?;
        let baseline = self.collector.collect_excluding(&current, &self.rule_id)?;
        let attempts = analyzer_diags.len();

        info!(
            event = "verify.started",
            run_id = %run_id,
            rule_id = %self.rule_id,
            diagnostics = attempts,
            baseline = baseline.len(),
        );

        let mut iterations = 0u32;
        let mut state = if analyzer_diags.is_empty() {
            ConvergenceState::Resolved
        } else {
            ConvergenceState::ExhaustedBudget
        };

        for _ in 0..attempts {
            cancel.check()?;

            let diagnostic = match analyzer_diags.first() {
                Some(d) => d,
                None => break,
            };

            let actions = provider.offer_fixes(&current, diagnostic, cancel).await;
            if actions.is_empty() {
                state = ConvergenceState::NoFixOffered;
                break;
            }

            if let Some(index) = policy.fix_index {
                let action =
                    actions
                        .get(index)
                        .ok_or_else(|| CoreError::FixIndexOutOfRange {
                            index,
                            offered: actions.len(),
                        })?;
                current = action.apply(&current, cancel)?;
                iterations += 1;
                state = ConvergenceState::SingleFixApplied;
                debug!(
                    event = "verify.fix_applied",
                    run_id = %run_id,
                    iteration = iterations,
                    action = action.title(),
                );
                break;
            }

            current = actions[0].apply(&current, cancel)?;
            iterations += 1;
            debug!(
                event = "verify.fix_applied",
                run_id = %run_id,
                iteration = iterations,
                action = actions[0].title(),
            );

            analyzer_diags = self.collector.collect_rule(&current, &self.rule_id)?;
            let current_baseline = self.collector.collect_excluding(&current, &self.rule_id)?;
            let regressions = new_diagnostics(&baseline, &current_baseline);

            if !policy.allow_new_diagnostics && !regressions.is_empty() {
                // Re-check against the normalized text so whitespace-only
                // differences do not fail the run, and so the reported
                // locations line up with the reported text. The normalized
                // snapshot is used for this comparison only.
                let (report_project, confirmed) = match &self.normalizer {
                    Some(normalize) => {
                        let normalized = normalize_project(&current, normalize.as_ref());
                        let diags = self
                            .collector
                            .collect_excluding(&normalized, &self.rule_id)?;
                        (normalized, new_diagnostics(&baseline, &diags))
                    }
                    None => (current.clone(), regressions),
                };

                if !confirmed.is_empty() {
                    warn!(
                        event = "verify.regression",
                        run_id = %run_id,
                        iteration = iterations,
                        count = confirmed.len(),
                    );
                    return Ok(FixVerdict::Regression {
                        new_diagnostics: confirmed,
                        source: primary_text(&report_project)?,
                    });
                }
            }

            if analyzer_diags.is_empty() {
                state = ConvergenceState::Resolved;
                break;
            }
        }

        let actual = primary_text(&current)?;
        let verdict = if actual == expected_final_source {
            FixVerdict::Converged { iterations, state }
        } else {
            FixVerdict::Mismatch {
                expected: expected_final_source.to_string(),
                actual,
            }
        };

        info!(
            event = "verify.finished",
            run_id = %run_id,
            duration_ms = started.elapsed().as_millis() as u64,
            iterations,
            passed = verdict.passed(),
        );
        Ok(verdict)
    }
}

/// Diagnostics present in `current` but absent from `baseline`, by
/// structural identity. Counts matter: a second copy of a baseline
/// diagnostic is new.
fn new_diagnostics(baseline: &[Diagnostic], current: &[Diagnostic]) -> Vec<Diagnostic> {
    let mut remaining: Vec<&Diagnostic> = baseline.iter().collect();
    let mut fresh = Vec::new();
    for diagnostic in current {
        match remaining.iter().position(|b| *b == diagnostic) {
            Some(pos) => {
                remaining.swap_remove(pos);
            }
            None => fresh.push(diagnostic.clone()),
        }
    }
    fresh
}

fn normalize_project(project: &Project, normalize: &(dyn Fn(&str) -> String + Send + Sync)) -> Project {
    let mut normalized = project.clone();
    for document in &mut normalized.documents {
        document.text = normalize(&document.text);
    }
    normalized
}

fn primary_text(project: &Project) -> Result<String> {
    project
        .primary_document()
        .map(|d| d.text.clone())
        .ok_or_else(|| CoreError::ProjectInvalid("project has no documents".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, Severity};

    fn diag(rule_id: &str, line: i32, message: &str) -> Diagnostic {
        Diagnostic::new(rule_id, Severity::Warning, message).with_location(Location {
            path: "Test0.cs".to_string(),
            line,
            column: 1,
        })
    }

    #[test]
    fn test_new_diagnostics_is_baseline_relative() {
        let baseline = vec![diag("R", 1, "pre-existing")];
        let current = vec![diag("R", 1, "pre-existing"), diag("R", 2, "fresh")];
        let fresh = new_diagnostics(&baseline, &current);
        assert_eq!(fresh, vec![diag("R", 2, "fresh")]);
    }

    #[test]
    fn test_new_diagnostics_counts_duplicates() {
        let baseline = vec![diag("R", 1, "m")];
        let current = vec![diag("R", 1, "m"), diag("R", 1, "m")];
        let fresh = new_diagnostics(&baseline, &current);
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn test_new_diagnostics_empty_when_unchanged() {
        let baseline = vec![diag("R", 1, "m"), diag("R", 2, "n")];
        assert!(new_diagnostics(&baseline, &baseline).is_empty());
    }
}
