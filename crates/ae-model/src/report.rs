use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::issue::Issue;

/// Overall pass/fail status. `Pass` requires zero errors; warnings alone
/// do not fail a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pass,
    Fail,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pass => "Pass",
            ReportStatus::Fail => "Fail",
        }
    }
}

/// Descriptive statistics over the validated table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub record_count: usize,
    pub subject_count: usize,
    /// Minimum non-empty start date, lexicographic over partial ISO strings.
    pub earliest_start: Option<String>,
    /// Maximum non-empty start date.
    pub latest_start: Option<String>,
    pub severity_counts: BTreeMap<String, usize>,
    pub outcome_counts: BTreeMap<String, usize>,
}

/// Issue totals and the overall status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_info: usize,
    pub status: ReportStatus,
}

/// Compliance report for one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Date the validation ran, `YYYY-MM-DD`.
    pub validation_date: String,
    /// Name of the table that was validated.
    pub file_validated: String,
    /// Weighted score in 0..=100.
    pub compliance_score: u8,
    pub statistics: Statistics,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub info: Vec<Issue>,
    pub summary: ReportSummary,
}

impl ComplianceReport {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn info_count(&self) -> usize {
        self.info.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Stricter than `Pass`: requires a score of at least 95 and zero errors.
    pub fn submission_ready(&self) -> bool {
        self.compliance_score >= 95 && !self.has_errors()
    }
}
