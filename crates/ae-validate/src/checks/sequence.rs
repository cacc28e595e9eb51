//! Per-subject sequence-numbering hygiene.
//!
//! Overlaps with the table-scope key-uniqueness rule on purpose: the
//! per-subject view gives clearer diagnostics when one subject's numbering
//! drifted.

use std::collections::BTreeMap;

use ae_model::{AeRecord, Issue, Severity};

pub const RULE_SEQUENCE_START: &str = "AE-SEQSTART";
pub const RULE_SEQUENCE_DUPLICATE: &str = "AE-SEQDUP";

/// Within each subject, sequence numbers should start at 1 and contain no
/// duplicates.
pub fn check(records: &[AeRecord]) -> Vec<Issue> {
    let mut by_subject: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for record in records {
        by_subject
            .entry(record.usubjid.as_str())
            .or_default()
            .push(record.aeseq);
    }

    let mut issues = Vec::new();
    for (usubjid, mut sequences) in by_subject {
        sequences.sort_unstable();
        if let Some(minimum) = sequences.first() {
            if *minimum != 1 {
                issues.push(
                    Issue::new(
                        Severity::Warning,
                        RULE_SEQUENCE_START,
                        format!("sequence numbering starts at {minimum} instead of 1"),
                    )
                    .with_variable("AESEQ")
                    .with_context(format!("USUBJID={usubjid}")),
                );
            }
        }
        let duplicates: Vec<i64> = sequences
            .windows(2)
            .filter(|pair| pair[0] == pair[1])
            .map(|pair| pair[0])
            .collect();
        if !duplicates.is_empty() {
            let mut listed = duplicates;
            listed.dedup();
            let rendered: Vec<String> = listed.iter().map(ToString::to_string).collect();
            issues.push(
                Issue::new(
                    Severity::Error,
                    RULE_SEQUENCE_DUPLICATE,
                    format!("duplicate sequence number(s) {}", rendered.join(", ")),
                )
                .with_variable("AESEQ")
                .with_context(format!("USUBJID={usubjid}")),
            );
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(usubjid: &str, aeseq: i64) -> AeRecord {
        AeRecord {
            usubjid: usubjid.to_string(),
            aeseq,
            ..AeRecord::default()
        }
    }

    #[test]
    fn clean_numbering_passes() {
        let records = vec![record("101", 1), record("101", 2), record("102", 1)];
        assert!(check(&records).is_empty());
    }

    #[test]
    fn numbering_not_starting_at_one_warns() {
        let issues = check(&[record("101", 2), record("101", 3)]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, RULE_SEQUENCE_START);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].context.as_deref(), Some("USUBJID=101"));
    }

    #[test]
    fn duplicate_sequences_within_a_subject_error() {
        let issues = check(&[record("101", 1), record("101", 1), record("101", 2)]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, RULE_SEQUENCE_DUPLICATE);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(issues[0].message.contains('1'));
    }

    #[test]
    fn subjects_are_checked_independently() {
        let issues = check(&[record("101", 1), record("102", 5)]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].context.as_deref(), Some("USUBJID=102"));
    }
}
