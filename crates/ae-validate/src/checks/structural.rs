//! Required-field, domain-constant, and key-uniqueness rules.

use std::collections::BTreeMap;

use ae_model::{AeRecord, Issue, Severity, DOMAIN_CODE};

pub const RULE_REQUIRED: &str = "AE-REQ";
pub const RULE_DOMAIN: &str = "AE-DOMAIN";
pub const RULE_DUPLICATE_KEY: &str = "AE-DUPKEY";
pub const RULE_COMPLETE: &str = "AE-COMPLETE";

/// One issue per required variable with missing values, one per domain
/// mismatch group, one per duplicate `(USUBJID, AESEQ)` group, and an Info
/// entry when every required variable is fully populated.
pub fn check(records: &[AeRecord], required_variables: &[String]) -> Vec<Issue> {
    let mut issues = Vec::new();
    issues.extend(check_required(records, required_variables));
    issues.extend(check_domain(records));
    issues.extend(check_unique_keys(records));
    issues
}

fn is_populated(record: &AeRecord, variable: &str) -> bool {
    // The sequence number is numeric; zero marks an unassigned value.
    if variable.eq_ignore_ascii_case("AESEQ") {
        return record.aeseq >= 1;
    }
    record
        .value(variable)
        .is_some_and(|value| !value.trim().is_empty())
}

fn check_required(records: &[AeRecord], required_variables: &[String]) -> Vec<Issue> {
    let mut issues = Vec::new();
    for variable in required_variables {
        let missing = records
            .iter()
            .filter(|record| !is_populated(record, variable))
            .count();
        if missing > 0 {
            issues.push(
                Issue::new(
                    Severity::Error,
                    RULE_REQUIRED,
                    format!("required variable {variable} is missing in {missing} record(s)"),
                )
                .with_variable(variable.clone()),
            );
        }
    }
    if issues.is_empty() && !records.is_empty() {
        issues.push(
            Issue::new(
                Severity::Info,
                RULE_COMPLETE,
                "all required variables are fully populated",
            ),
        );
    }
    issues
}

fn check_domain(records: &[AeRecord]) -> Vec<Issue> {
    let mismatched = records
        .iter()
        .filter(|record| record.domain != DOMAIN_CODE)
        .count();
    if mismatched == 0 {
        return Vec::new();
    }
    vec![
        Issue::new(
            Severity::Error,
            RULE_DOMAIN,
            format!("DOMAIN must equal '{DOMAIN_CODE}' in {mismatched} record(s)"),
        )
        .with_variable("DOMAIN"),
    ]
}

fn check_unique_keys(records: &[AeRecord]) -> Vec<Issue> {
    let mut groups: BTreeMap<(String, i64), usize> = BTreeMap::new();
    for record in records {
        *groups
            .entry((record.usubjid.clone(), record.aeseq))
            .or_default() += 1;
    }
    groups
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((usubjid, aeseq), count)| {
            Issue::new(
                Severity::Error,
                RULE_DUPLICATE_KEY,
                format!("duplicate (USUBJID, AESEQ) key covers {count} records"),
            )
            .with_variable("AESEQ")
            .with_context(format!("USUBJID={usubjid}, AESEQ={aeseq}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(usubjid: &str, aeseq: i64) -> AeRecord {
        AeRecord {
            studyid: "STUDY01".to_string(),
            domain: DOMAIN_CODE.to_string(),
            usubjid: usubjid.to_string(),
            aeseq,
            aeterm: "Headache".to_string(),
            aestdtc: "2023-01-15".to_string(),
            ..AeRecord::default()
        }
    }

    fn required() -> Vec<String> {
        ae_model::REQUIRED_VARIABLES
            .iter()
            .map(|variable| (*variable).to_string())
            .collect()
    }

    #[test]
    fn complete_table_yields_info_only() {
        let records = vec![record("101", 1), record("101", 2)];
        let issues = check(&records, &required());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule_id, RULE_COMPLETE);
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn missing_required_field_is_an_error() {
        let mut bad = record("101", 1);
        bad.aestdtc = String::new();
        let issues = check(&[bad], &required());
        let issue = issues
            .iter()
            .find(|issue| issue.rule_id == RULE_REQUIRED)
            .expect("required-field issue");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.variable.as_deref(), Some("AESTDTC"));
        assert!(!issues.iter().any(|issue| issue.rule_id == RULE_COMPLETE));
    }

    #[test]
    fn unassigned_sequence_counts_as_missing() {
        let issues = check(&[record("101", 0)], &required());
        assert!(issues
            .iter()
            .any(|issue| issue.rule_id == RULE_REQUIRED
                && issue.variable.as_deref() == Some("AESEQ")));
    }

    #[test]
    fn domain_mismatch_is_an_error() {
        let mut bad = record("101", 1);
        bad.domain = "CM".to_string();
        let issues = check(&[bad], &required());
        assert!(issues.iter().any(|issue| issue.rule_id == RULE_DOMAIN));
    }

    #[test]
    fn duplicate_key_emits_one_error_per_group() {
        let records = vec![record("008-101", 1), record("008-101", 1)];
        let issues = check(&records, &required());
        let duplicates: Vec<&Issue> = issues
            .iter()
            .filter(|issue| issue.rule_id == RULE_DUPLICATE_KEY)
            .collect();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].severity, Severity::Error);
        assert!(duplicates[0].message.contains("2 records"));
        assert_eq!(
            duplicates[0].context.as_deref(),
            Some("USUBJID=008-101, AESEQ=1")
        );
    }

    #[test]
    fn empty_table_is_silent() {
        assert!(check(&[], &required()).is_empty());
    }
}
