//! fixloop core library
//!
//! Diagnostic collection and fix-convergence verification over in-memory
//! project snapshots. Analysis rules and fix providers plug in through the
//! seams in [`rule`]; the [`engine`] drives the bounded
//! detect → fix → re-detect → compare loop and reports a structured
//! verdict.

pub mod cancel;
pub mod collector;
pub mod domain;
pub mod engine;
pub mod expect;
pub mod options;
pub mod rule;
pub mod telemetry;

pub use cancel::CancelToken;
pub use collector::DiagnosticCollector;
pub use domain::{
    CoreError, Diagnostic, Document, ExpectedDiagnostic, Location, Project, Result,
    RuleDescriptor, Severity,
};
pub use engine::{ConvergenceState, FixConvergenceEngine, FixVerdict, VerifyPolicy};
pub use expect::{verify_diagnostics, DiagnosticHarness, ExpectationVerdict};
pub use options::RuleOptions;
pub use rule::{AnalysisRule, FixAction, FixProvider, NoopFixProvider};
pub use telemetry::init_tracing;

/// fixloop version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
