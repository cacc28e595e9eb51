//! Aggregates validation findings into a single compliance report.

use std::collections::BTreeSet;

use ae_model::{
    AeRecord, ComplianceReport, Issue, ReportStatus, ReportSummary, Severity, Statistics,
};
use chrono::Utc;
use tracing::debug;

/// Score penalties per finding. Substitutable when a sponsor weighs
/// findings differently.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub error_penalty: u32,
    pub warning_penalty: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            error_penalty: 5,
            warning_penalty: 2,
        }
    }
}

impl ScoreWeights {
    /// Weighted score: start at 100, subtract per finding, floor at 0.
    pub fn score(&self, error_count: usize, warning_count: usize) -> u8 {
        let penalty = self.error_penalty as u64 * error_count as u64
            + self.warning_penalty as u64 * warning_count as u64;
        100u64.saturating_sub(penalty) as u8
    }
}

/// Builds the report from the table and the accumulated findings.
/// Never fails; an empty table yields score 100 and zeroed statistics.
#[derive(Debug, Clone, Default)]
pub struct ComplianceReportBuilder {
    weights: ScoreWeights,
}

impl ComplianceReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn build(
        &self,
        records: &[AeRecord],
        issues: Vec<Issue>,
        file_validated: &str,
    ) -> ComplianceReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut info = Vec::new();
        for issue in issues {
            match issue.severity {
                Severity::Error => errors.push(issue),
                Severity::Warning => warnings.push(issue),
                Severity::Info => info.push(issue),
            }
        }

        let compliance_score = self.weights.score(errors.len(), warnings.len());
        let status = if errors.is_empty() {
            ReportStatus::Pass
        } else {
            ReportStatus::Fail
        };
        debug!(
            score = compliance_score,
            errors = errors.len(),
            warnings = warnings.len(),
            "assembled compliance report"
        );

        ComplianceReport {
            validation_date: Utc::now().format("%Y-%m-%d").to_string(),
            file_validated: file_validated.to_string(),
            compliance_score,
            statistics: statistics(records),
            summary: ReportSummary {
                total_errors: errors.len(),
                total_warnings: warnings.len(),
                total_info: info.len(),
                status,
            },
            errors,
            warnings,
            info,
        }
    }
}

fn statistics(records: &[AeRecord]) -> Statistics {
    let mut stats = Statistics {
        record_count: records.len(),
        ..Statistics::default()
    };
    let subjects: BTreeSet<&str> = records
        .iter()
        .map(|record| record.usubjid.as_str())
        .collect();
    stats.subject_count = subjects.len();

    // Lexicographic min/max is calendar order for canonical partial dates.
    let starts: Vec<&str> = records
        .iter()
        .map(|record| record.aestdtc.as_str())
        .filter(|date| !date.is_empty())
        .collect();
    stats.earliest_start = starts.iter().min().map(|date| (*date).to_string());
    stats.latest_start = starts.iter().max().map(|date| (*date).to_string());

    for record in records {
        if !record.aesev.is_empty() {
            *stats.severity_counts.entry(record.aesev.clone()).or_default() += 1;
        }
        if !record.aeout.is_empty() {
            *stats.outcome_counts.entry(record.aeout.clone()).or_default() += 1;
        }
    }
    stats
}
