pub mod issue;
pub mod record;
pub mod report;
pub mod source;
pub mod terminology;

pub use issue::{Issue, Severity};
pub use record::{AeRecord, COLUMN_ORDER, DOMAIN_CODE, REQUIRED_VARIABLES};
pub use report::{ComplianceReport, ReportStatus, ReportSummary, Statistics};
pub use source::SourceRow;
pub use terminology::Vocabulary;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_order_covers_all_fields() {
        let record = AeRecord::default();
        let row = record.to_row();
        assert_eq!(row.len(), COLUMN_ORDER.len());
    }

    #[test]
    fn issue_serializes() {
        let issue = Issue::new(Severity::Error, "AE-DUPKEY", "duplicate key")
            .with_variable("AESEQ")
            .with_context("USUBJID=008-101");
        let json = serde_json::to_string(&issue).expect("serialize issue");
        let round: Issue = serde_json::from_str(&json).expect("deserialize issue");
        assert_eq!(round.rule_id, "AE-DUPKEY");
        assert_eq!(round.severity, Severity::Error);
    }
}
