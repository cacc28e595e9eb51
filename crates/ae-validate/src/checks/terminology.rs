//! Controlled-vocabulary conformance rules.

use std::collections::BTreeMap;

use ae_model::{AeRecord, Issue, Severity, Vocabulary};

pub const RULE_VOCABULARY: &str = "AE-VOCAB";

/// Variables checked against their permissible sets. Severity and the
/// overall-serious flag block submission on drift; outcome keeps free text
/// from source, so drift there only recommends review.
const CHECKED: [(&str, Severity); 3] = [
    ("AESEV", Severity::Error),
    ("AESER", Severity::Error),
    ("AEOUT", Severity::Warning),
];

/// One issue per variable and offending value, with the occurrence count.
pub fn check(records: &[AeRecord], vocabulary: &Vocabulary) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (variable, severity) in CHECKED {
        let mut offending: BTreeMap<String, usize> = BTreeMap::new();
        for record in records {
            let value = match variable {
                "AESEV" => record.aesev.as_str(),
                "AESER" => record.aeser.as_str(),
                _ => record.aeout.as_str(),
            };
            if value.is_empty() || vocabulary.is_permissible(variable, value) {
                continue;
            }
            *offending.entry(value.to_string()).or_default() += 1;
        }
        for (value, count) in offending {
            issues.push(
                Issue::new(
                    severity,
                    RULE_VOCABULARY,
                    format!("{variable} value '{value}' is outside controlled terminology ({count} occurrence(s))"),
                )
                .with_variable(variable),
            );
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(aesev: &str, aeser: &str, aeout: &str) -> AeRecord {
        AeRecord {
            usubjid: "101".to_string(),
            aeseq: 1,
            aesev: aesev.to_string(),
            aeser: aeser.to_string(),
            aeout: aeout.to_string(),
            ..AeRecord::default()
        }
    }

    fn vocabulary() -> Vocabulary {
        Vocabulary::standard()
    }

    #[test]
    fn conformant_values_pass() {
        let records = vec![record("SEVERE", "Y", "RECOVERED/RESOLVED"), record("", "", "")];
        assert!(check(&records, &vocabulary()).is_empty());
    }

    #[test]
    fn severity_drift_is_an_error() {
        let issues = check(&[record("VERY BAD", "N", "")], &vocabulary());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].variable.as_deref(), Some("AESEV"));
        assert!(issues[0].message.contains("VERY BAD"));
    }

    #[test]
    fn outcome_drift_is_a_warning() {
        let issues = check(&[record("MILD", "N", "WORSENED")], &vocabulary());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].variable.as_deref(), Some("AEOUT"));
    }

    #[test]
    fn repeated_drift_is_counted_once_per_value() {
        let records = vec![
            record("", "MAYBE", ""),
            record("", "MAYBE", ""),
            record("", "PERHAPS", ""),
        ];
        let issues = check(&records, &vocabulary());
        assert_eq!(issues.len(), 2);
        assert!(issues
            .iter()
            .any(|issue| issue.message.contains("'MAYBE'")
                && issue.message.contains("2 occurrence(s)")));
    }
}
