//! Cross-field safety-logic rules.

use ae_model::{AeRecord, Issue, Severity};

use super::record_context;

pub const RULE_SERIOUS_CRITERIA: &str = "AE-SERCRIT";
pub const RULE_FATAL_OUTCOME: &str = "AE-FATAL";

fn any_criteria_flag(record: &AeRecord) -> bool {
    [
        &record.aesdth,
        &record.aeshosp,
        &record.aeslife,
        &record.aesdisab,
        &record.aescong,
        &record.aesmie,
    ]
    .into_iter()
    .any(|flag| flag == "Y")
}

/// A serious event should name a criterion and a fatal outcome should set
/// the death flag. Both are warnings: source category text is often too
/// coarse to pin down a criterion, so the implication is recommended, not
/// forbidden.
pub fn check(records: &[AeRecord]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for record in records {
        if record.aeser == "Y" && !any_criteria_flag(record) {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    RULE_SERIOUS_CRITERIA,
                    format!(
                        "AESER is 'Y' but no criteria flags are set for AESEQ {}",
                        record.aeseq
                    ),
                )
                .with_variable("AESER")
                .with_context(record_context(record)),
            );
        }
        if record.aeout == "FATAL" && record.aesdth != "Y" {
            issues.push(
                Issue::new(
                    Severity::Warning,
                    RULE_FATAL_OUTCOME,
                    "outcome is FATAL but AESDTH is not 'Y'",
                )
                .with_variable("AESDTH")
                .with_context(record_context(record)),
            );
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AeRecord {
        AeRecord {
            usubjid: "101".to_string(),
            aeseq: 3,
            ..AeRecord::default()
        }
    }

    #[test]
    fn serious_with_criteria_passes() {
        let mut serious = record();
        serious.aeser = "Y".to_string();
        serious.aeshosp = "Y".to_string();
        assert!(check(&[serious]).is_empty());
    }

    #[test]
    fn serious_without_criteria_warns_once() {
        let mut serious = record();
        serious.aeser = "Y".to_string();
        let issues = check(&[serious]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, RULE_SERIOUS_CRITERIA);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(issues[0].message.contains("no criteria flags"));
        assert!(issues[0].message.contains("AESEQ 3"));
    }

    #[test]
    fn fatal_outcome_without_death_flag_warns_once() {
        let mut fatal = record();
        fatal.aeout = "FATAL".to_string();
        let issues = check(&[fatal]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, RULE_FATAL_OUTCOME);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn fatal_outcome_with_death_flag_passes() {
        let mut fatal = record();
        fatal.aeout = "FATAL".to_string();
        fatal.aesdth = "Y".to_string();
        assert!(check(&[fatal]).is_empty());
    }

    #[test]
    fn non_serious_record_is_silent() {
        let mut plain = record();
        plain.aeser = "N".to_string();
        assert!(check(&[plain]).is_empty());
    }
}
