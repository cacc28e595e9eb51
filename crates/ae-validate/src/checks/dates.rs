//! Date well-formedness and start/end ordering rules.

use ae_model::{AeRecord, Issue, Severity};
use ae_transform::datetime::{date_precision, is_partial_iso_date};

use super::record_context;

pub const RULE_DATE_FORMAT: &str = "AE-DATEFMT";
pub const RULE_DATE_ORDER: &str = "AE-DATEORD";
pub const RULE_DATE_PRECISION: &str = "AE-DATEPREC";

/// Non-empty dates must match the same partial-ISO patterns the
/// canonicalizer targets. Start/end pairs of equal precision must be
/// ordered; pairs of unequal precision are not compared, and the skipped
/// comparison is itself surfaced for review.
pub fn check(records: &[AeRecord]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for record in records {
        for (variable, value) in [("AESTDTC", &record.aestdtc), ("AEENDTC", &record.aeendtc)] {
            if !value.is_empty() && !is_partial_iso_date(value) {
                issues.push(
                    Issue::new(
                        Severity::Error,
                        RULE_DATE_FORMAT,
                        format!("{variable} value '{value}' is not a partial ISO 8601 date"),
                    )
                    .with_variable(variable)
                    .with_context(record_context(record)),
                );
            }
        }
        issues.extend(check_pair(record));
    }
    issues
}

fn check_pair(record: &AeRecord) -> Option<Issue> {
    if record.aestdtc.is_empty() || record.aeendtc.is_empty() {
        return None;
    }
    let start = date_precision(&record.aestdtc)?;
    let end = date_precision(&record.aeendtc)?;
    if start != end {
        return Some(
            Issue::new(
                Severity::Warning,
                RULE_DATE_PRECISION,
                format!(
                    "start/end dates '{}' and '{}' differ in precision, ordering not checked",
                    record.aestdtc, record.aeendtc
                ),
            )
            .with_variable("AEENDTC")
            .with_context(record_context(record)),
        );
    }
    // Equal precision makes the lexicographic order the calendar order.
    if record.aeendtc < record.aestdtc {
        return Some(
            Issue::new(
                Severity::Warning,
                RULE_DATE_ORDER,
                format!(
                    "AEENDTC '{}' precedes AESTDTC '{}'",
                    record.aeendtc, record.aestdtc
                ),
            )
            .with_variable("AEENDTC")
            .with_context(record_context(record)),
        );
    }
    None
}
