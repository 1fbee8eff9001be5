//! Rule and fix-provider seams.
//!
//! External collaborators plug in here: an [`AnalysisRule`] reports
//! diagnostics for one document at a time, a [`FixProvider`] offers
//! candidate [`FixAction`]s for a reported diagnostic.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::cancel::CancelToken;
use crate::domain::error::Result;
use crate::domain::{Diagnostic, Document, Project, RuleDescriptor};
use crate::options::RuleOptions;

/// An analysis rule that scans one document at a time.
///
/// `analyze` must be referentially transparent for a given document
/// snapshot and option set; the collector may call it repeatedly.
pub trait AnalysisRule: Send + Sync {
    /// The capability descriptor this rule registers with a collector.
    fn descriptor(&self) -> &RuleDescriptor;

    /// Report diagnostics for a single document.
    fn analyze(&self, document: &Document, options: &RuleOptions) -> Vec<Diagnostic>;
}

/// Offers candidate repairs for a diagnostic.
///
/// The engine awaits `offer_fixes` to full completion before reading the
/// result; providers may suspend internally but are treated as a blocking
/// call-and-wait.
#[async_trait]
pub trait FixProvider: Send + Sync {
    /// Offer zero or more fix actions for `diagnostic` in `project`.
    async fn offer_fixes(
        &self,
        project: &Project,
        diagnostic: &Diagnostic,
        cancel: &CancelToken,
    ) -> Vec<FixAction>;
}

/// A named transformation that produces a new project snapshot.
///
/// Applying never mutates the input project; it either returns a fresh
/// snapshot or an error, with nothing half-committed.
#[derive(Clone)]
pub struct FixAction {
    title: String,
    apply: Arc<dyn Fn(&Project, &CancelToken) -> Result<Project> + Send + Sync>,
}

impl FixAction {
    /// Create a fix action from a title and a transformation.
    pub fn new(
        title: impl Into<String>,
        apply: impl Fn(&Project, &CancelToken) -> Result<Project> + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            apply: Arc::new(apply),
        }
    }

    /// Title shown in traces and failure reports.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Apply the transformation, yielding a new project snapshot.
    pub fn apply(&self, project: &Project, cancel: &CancelToken) -> Result<Project> {
        (self.apply)(project, cancel)
    }
}

impl fmt::Debug for FixAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixAction")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// Fix provider that never offers an action.
///
/// Useful for verifying that a rule's diagnostics survive untouched when no
/// repair is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFixProvider;

#[async_trait]
impl FixProvider for NoopFixProvider {
    async fn offer_fixes(
        &self,
        _project: &Project,
        _diagnostic: &Diagnostic,
        _cancel: &CancelToken,
    ) -> Vec<FixAction> {
        Vec::new()
    }
}
