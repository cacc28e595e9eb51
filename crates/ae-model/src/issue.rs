use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a validation finding. Errors block submission, warnings
/// recommend review, info entries are purely descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    /// Stable rule identifier (e.g., "AE-DUPKEY").
    pub rule_id: String,
    /// Variable the finding concerns, when one applies.
    pub variable: Option<String>,
    /// Human-readable description of the finding.
    pub message: String,
    /// Locator for the affected records (e.g., "USUBJID=008-101, AESEQ=2").
    pub context: Option<String>,
}

impl Issue {
    pub fn new(
        severity: Severity,
        rule_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Issue {
            severity,
            rule_id: rule_id.into(),
            variable: None,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}
