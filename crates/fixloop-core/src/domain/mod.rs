//! Domain model for fixloop.
//!
//! Core entities of the verification harness:
//! - `Diagnostic` / `Location` / `Severity`: issues reported by rules
//! - `Document` / `Project`: immutable source snapshots
//! - `RuleDescriptor`: the capability a rule registers with a collector
//! - `ExpectedDiagnostic`: test-side expectation values

pub mod descriptor;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod expectation;

pub use descriptor::RuleDescriptor;
pub use diagnostic::{Diagnostic, Location, Severity};
pub use document::{Document, Project};
pub use error::{CoreError, Result};
pub use expectation::ExpectedDiagnostic;
