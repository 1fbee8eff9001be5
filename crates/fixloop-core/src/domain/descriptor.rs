//! Rule capability descriptors.

use serde::{Deserialize, Serialize};

use crate::domain::diagnostic::Severity;

/// Static description of the diagnostic a rule can produce.
///
/// Each rule carries one descriptor and registers it with the collector it
/// is installed into; there is no process-wide rule registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Id that uniquely identifies the rule.
    pub id: String,

    /// Severity the rule reports with unless configured otherwise.
    pub default_severity: Severity,

    /// Human-readable description.
    pub description: String,
}

impl RuleDescriptor {
    /// Create a descriptor.
    pub fn new(
        id: impl Into<String>,
        default_severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            default_severity,
            description: description.into(),
        }
    }
}
