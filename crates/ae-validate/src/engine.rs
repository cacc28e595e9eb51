//! Rule engine over standardized AE tables.

use ae_model::{AeRecord, Issue, Vocabulary, REQUIRED_VARIABLES};
use tracing::debug;

use crate::checks;

/// Runs every rule group over a standardized table.
///
/// The engine re-checks what the transformer establishes so that it also
/// stands alone over externally produced tables. Configuration is immutable
/// after construction; `validate` takes `&self` and may be called
/// concurrently.
#[derive(Debug, Clone)]
pub struct ValidationRuleEngine {
    vocabulary: Vocabulary,
    required_variables: Vec<String>,
}

impl Default for ValidationRuleEngine {
    fn default() -> Self {
        ValidationRuleEngine {
            vocabulary: Vocabulary::standard(),
            required_variables: REQUIRED_VARIABLES
                .iter()
                .map(|variable| (*variable).to_string())
                .collect(),
        }
    }
}

impl ValidationRuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_required_variables(mut self, variables: Vec<String>) -> Self {
        self.required_variables = variables;
        self
    }

    /// Run all rule groups and return their findings, sorted by rule id
    /// then context so reports are deterministic regardless of group order.
    pub fn validate(&self, records: &[AeRecord]) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(checks::structural::check(records, &self.required_variables));
        issues.extend(checks::dates::check(records));
        issues.extend(checks::terminology::check(records, &self.vocabulary));
        issues.extend(checks::consistency::check(records));
        issues.extend(checks::sequence::check(records));

        issues.sort_by(|left, right| {
            left.rule_id
                .cmp(&right.rule_id)
                .then_with(|| left.context.cmp(&right.context))
                .then_with(|| left.variable.cmp(&right.variable))
                .then_with(|| left.message.cmp(&right.message))
        });

        debug!(records = records.len(), issues = issues.len(), "validated table");
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ae_model::{Severity, DOMAIN_CODE};

    fn record(usubjid: &str, aeseq: i64) -> AeRecord {
        AeRecord {
            studyid: "STUDY01".to_string(),
            domain: DOMAIN_CODE.to_string(),
            usubjid: usubjid.to_string(),
            aeseq,
            aeterm: "Nausea".to_string(),
            aestdtc: "2023-01-15".to_string(),
            aesev: "MILD".to_string(),
            aeser: "N".to_string(),
            ..AeRecord::default()
        }
    }

    #[test]
    fn clean_table_yields_only_the_completeness_info() {
        let engine = ValidationRuleEngine::new();
        let issues = engine.validate(&[record("101", 1), record("102", 1)]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
        assert_eq!(issues[0].rule_id, checks::structural::RULE_COMPLETE);
    }

    #[test]
    fn empty_table_yields_no_issues() {
        let engine = ValidationRuleEngine::new();
        assert!(engine.validate(&[]).is_empty());
    }

    #[test]
    fn duplicate_key_surfaces_in_both_scopes() {
        let engine = ValidationRuleEngine::new();
        let issues = engine.validate(&[record("008-101", 1), record("008-101", 1)]);
        let rule_ids: Vec<&str> = issues.iter().map(|issue| issue.rule_id.as_str()).collect();
        assert!(rule_ids.contains(&checks::structural::RULE_DUPLICATE_KEY));
        assert!(rule_ids.contains(&checks::sequence::RULE_SEQUENCE_DUPLICATE));
    }

    #[test]
    fn output_is_sorted_by_rule_id_then_context() {
        let engine = ValidationRuleEngine::new();
        let mut bad_dates = record("201", 1);
        bad_dates.aestdtc = "junk".to_string();
        let mut serious = record("101", 1);
        serious.aeser = "Y".to_string();
        let issues = engine.validate(&[serious, bad_dates]);
        let mut sorted = issues.clone();
        sorted.sort_by(|left, right| {
            left.rule_id
                .cmp(&right.rule_id)
                .then_with(|| left.context.cmp(&right.context))
                .then_with(|| left.variable.cmp(&right.variable))
                .then_with(|| left.message.cmp(&right.message))
        });
        assert_eq!(issues, sorted);
    }

    #[test]
    fn substituted_vocabulary_changes_conformance() {
        let vocabulary = Vocabulary::standard().with_permissible("AESEV", &["GRADE 1", "GRADE 2"]);
        let engine = ValidationRuleEngine::new().with_vocabulary(vocabulary);
        let mut graded = record("101", 1);
        graded.aesev = "GRADE 1".to_string();
        let issues = engine.validate(&[graded]);
        assert!(!issues
            .iter()
            .any(|issue| issue.rule_id == checks::terminology::RULE_VOCABULARY));

        let default_engine = ValidationRuleEngine::new();
        let mut graded = record("101", 1);
        graded.aesev = "GRADE 1".to_string();
        let issues = default_engine.validate(&[graded]);
        assert!(issues
            .iter()
            .any(|issue| issue.rule_id == checks::terminology::RULE_VOCABULARY));
    }
}
