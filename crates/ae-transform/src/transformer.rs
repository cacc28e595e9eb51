//! One source row in, one standardized AE record out.

use ae_model::{AeRecord, SourceRow, Vocabulary, DOMAIN_CODE};
use tracing::debug;

use crate::datetime::canonicalize_date;
use crate::safety::{derive_safety_flags, SafetyFlags};
use crate::vocabulary::VocabularyMapper;

/// How the overall AESER flag is combined from its inputs. Source studies
/// disagree on the precedence, so the rule is configuration rather than
/// code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriousnessPolicy {
    /// Serious when any criterion flag is set, the category text reads as
    /// serious, or the explicit indicator is truthy. False negatives are
    /// worse than false positives.
    #[default]
    PermissiveOr,
    /// Trust only the explicit source indicator.
    ExplicitOnly,
    /// Trust only the derived criterion flags.
    CriteriaOnly,
}

/// Per-study policies for the transformation steps that the source data
/// does not pin down.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Delimiter inside the structured site/subject identifier.
    pub subject_delimiter: char,
    /// Zero-based segment holding the subject part after splitting.
    pub subject_segment: usize,
    pub seriousness: SeriousnessPolicy,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions {
            subject_delimiter: '-',
            subject_segment: 1,
            seriousness: SeriousnessPolicy::default(),
        }
    }
}

/// Breadcrumb for a degraded transformation step. Anomalies never abort a
/// run; they are noted here and surfaced again by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformNotice {
    /// Zero-based source row index.
    pub row_index: usize,
    /// Standardized variable the notice concerns.
    pub field: &'static str,
    pub message: String,
}

/// Standardized table plus the notices accumulated while building it.
#[derive(Debug, Clone, Default)]
pub struct TransformOutput {
    pub records: Vec<AeRecord>,
    pub notices: Vec<TransformNotice>,
}

/// Maps raw source rows onto standardized AE records.
///
/// Each `transform` call is pure given the row and its index, so rows may
/// be processed concurrently and joined afterwards.
#[derive(Debug, Clone)]
pub struct RecordTransformer {
    study_id: String,
    options: TransformOptions,
    mapper: VocabularyMapper,
}

impl RecordTransformer {
    pub fn new(study_id: impl Into<String>) -> Self {
        RecordTransformer {
            study_id: study_id.into(),
            options: TransformOptions::default(),
            mapper: VocabularyMapper::default(),
        }
    }

    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.mapper = VocabularyMapper::new(vocabulary);
        self
    }

    /// Transform one source row. `row_index` is the zero-based position of
    /// the row in its table; it seeds the subject-id and sequence-number
    /// fallbacks and ties notices back to the originating row.
    pub fn transform(&self, row: &SourceRow, row_index: usize) -> (AeRecord, Vec<TransformNotice>) {
        let mut notices = Vec::new();

        let usubjid = self.derive_subject_id(row, row_index, &mut notices);
        let aeseq = self.derive_sequence(row, row_index, &mut notices);

        let aeterm = row.get("AETERM").trim().to_string();
        let mut aedecod = first_value(row, &["AEDECOD", "AEPT"]).trim().to_string();
        if aedecod.is_empty() && !aeterm.is_empty() {
            // Never leave the coded term empty when a verbatim term exists.
            aedecod = aeterm.clone();
        }

        let raw_severity = row.get("AESEV");
        let raw_outcome = row.get("AEOUT");
        let raw_category = first_value(row, &["AESERL", "AESERCAT"]);

        let flags = derive_safety_flags(raw_category, raw_outcome, raw_severity);
        let aeser = self.overall_seriousness(&flags, raw_category, row.get("AESER"));

        let record = AeRecord {
            studyid: if self.study_id.is_empty() {
                row.get("STUDYID").trim().to_string()
            } else {
                self.study_id.clone()
            },
            domain: DOMAIN_CODE.to_string(),
            usubjid,
            aeseq,
            aeterm,
            aedecod,
            aellt: row.get("AELLT").trim().to_string(),
            aelltcd: row.get("AELLTCD").trim().to_string(),
            aeptcd: row.get("AEPTCD").trim().to_string(),
            aehlt: row.get("AEHLT").trim().to_string(),
            aehltcd: row.get("AEHLTCD").trim().to_string(),
            aehlgt: row.get("AEHLGT").trim().to_string(),
            aehlgtcd: row.get("AEHLGTCD").trim().to_string(),
            aebodsys: first_value(row, &["AEBODSYS", "AESOC"]).trim().to_string(),
            aebdsycd: first_value(row, &["AEBDSYCD", "AESOCCD"]).trim().to_string(),
            aestdtc: canonicalize_date(first_value(row, &["AESTDTC", "AESTDT"])),
            aeendtc: canonicalize_date(first_value(row, &["AEENDTC", "AEENDT"])),
            aesev: self.mapper.map("AESEV", raw_severity),
            aeser,
            aerel: self.mapper.map("AEREL", first_value(row, &["AEREL", "AECAUS"])),
            aeacn: self.mapper.map("AEACN", row.get("AEACN")),
            aeout: self.mapper.map("AEOUT", raw_outcome),
            aesdth: flags.aesdth,
            aeshosp: flags.aeshosp,
            aeslife: flags.aeslife,
            aesdisab: flags.aesdisab,
            aescong: flags.aescong,
            aesmie: flags.aesmie,
            aecontrt: normalize_yn(row.get("AECONTRT")),
        };

        (record, notices)
    }

    /// Transform a whole table, joining records and notices in row order.
    pub fn transform_table(&self, rows: &[SourceRow]) -> TransformOutput {
        let mut output = TransformOutput::default();
        for (row_index, row) in rows.iter().enumerate() {
            let (record, notices) = self.transform(row, row_index);
            output.records.push(record);
            output.notices.extend(notices);
        }
        debug!(
            records = output.records.len(),
            notices = output.notices.len(),
            "transformed source table"
        );
        output
    }

    fn derive_subject_id(
        &self,
        row: &SourceRow,
        row_index: usize,
        notices: &mut Vec<TransformNotice>,
    ) -> String {
        let raw = first_value(row, &["SUBJID", "USUBJID"]).trim();
        let delimiter = self.options.subject_delimiter;
        if raw.contains(delimiter) {
            let segments: Vec<&str> = raw.split(delimiter).collect();
            if let Some(segment) = segments.get(self.options.subject_segment) {
                if !segment.is_empty() {
                    return (*segment).to_string();
                }
            }
        }
        let fallback = (row_index + 1).to_string();
        let message = if raw.is_empty() {
            format!("subject identifier missing, using row number {fallback}")
        } else {
            format!("subject identifier '{raw}' has no '{delimiter}' segment, using row number {fallback}")
        };
        debug!(row_index, %message, "subject id fallback");
        notices.push(TransformNotice {
            row_index,
            field: "USUBJID",
            message,
        });
        fallback
    }

    fn derive_sequence(
        &self,
        row: &SourceRow,
        row_index: usize,
        notices: &mut Vec<TransformNotice>,
    ) -> i64 {
        let raw = row.get("AESEQ").trim();
        if raw.is_empty() {
            return row_index as i64 + 1;
        }
        match raw.parse::<i64>() {
            Ok(sequence) => sequence,
            Err(_) => {
                let fallback = row_index as i64 + 1;
                notices.push(TransformNotice {
                    row_index,
                    field: "AESEQ",
                    message: format!("sequence value '{raw}' is not numeric, using {fallback}"),
                });
                fallback
            }
        }
    }

    fn overall_seriousness(&self, flags: &SafetyFlags, category: &str, explicit: &str) -> String {
        let category = category.to_uppercase();
        let category_serious = ["HOSPITALIZATION", "PROLONGATION", "SERIOUS"]
            .iter()
            .any(|token| category.contains(token));
        let explicit_serious = is_truthy(explicit);
        let serious = match self.options.seriousness {
            SeriousnessPolicy::PermissiveOr => flags.any() || category_serious || explicit_serious,
            SeriousnessPolicy::ExplicitOnly => explicit_serious,
            SeriousnessPolicy::CriteriaOnly => flags.any(),
        };
        if serious { "Y" } else { "N" }.to_string()
    }
}

fn first_value<'a>(row: &'a SourceRow, names: &[&str]) -> &'a str {
    for name in names {
        let value = row.get(name);
        if !value.trim().is_empty() {
            return value;
        }
    }
    ""
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_uppercase().as_str(),
        "Y" | "YES" | "TRUE" | "1"
    )
}

fn normalize_yn(value: &str) -> String {
    let token = value.trim().to_uppercase();
    if token.is_empty() {
        return token;
    }
    if is_truthy(&token) {
        return "Y".to_string();
    }
    match token.as_str() {
        "N" | "NO" | "FALSE" | "0" => "N".to_string(),
        _ => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[(&str, &str)]) -> SourceRow {
        SourceRow::new(
            fields
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        )
    }

    #[test]
    fn hospitalization_row_is_standardized() {
        let transformer = RecordTransformer::new("STUDY01");
        let source = row(&[
            ("SUBJID", "008-101"),
            ("AETERM", "Pneumonia"),
            ("AESTDT", "20230115"),
            ("AEENDT", ""),
            ("AESEV", "Severe"),
            ("AESERL", "Hospitalization"),
        ]);
        let (record, notices) = transformer.transform(&source, 0);
        assert_eq!(record.studyid, "STUDY01");
        assert_eq!(record.domain, "AE");
        assert_eq!(record.usubjid, "101");
        assert_eq!(record.aestdtc, "2023-01-15");
        assert_eq!(record.aeendtc, "");
        assert_eq!(record.aesev, "SEVERE");
        assert_eq!(record.aeshosp, "Y");
        assert_eq!(record.aeser, "Y");
        assert!(notices.is_empty());
    }

    #[test]
    fn month_precision_dates_survive() {
        let transformer = RecordTransformer::new("STUDY01");
        let (record, _) = transformer.transform(&row(&[("AESTDT", "202301")]), 0);
        assert_eq!(record.aestdtc, "2023-01");
    }

    #[test]
    fn preferred_term_backfills_from_verbatim() {
        let transformer = RecordTransformer::new("STUDY01");
        let (record, _) = transformer.transform(&row(&[("AETERM", "Headache")]), 0);
        assert_eq!(record.aedecod, "Headache");
    }

    #[test]
    fn subject_without_delimiter_falls_back_to_row_number() {
        let transformer = RecordTransformer::new("STUDY01");
        let (record, notices) = transformer.transform(&row(&[("SUBJID", "101")]), 4);
        assert_eq!(record.usubjid, "5");
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].field, "USUBJID");
        assert_eq!(notices[0].row_index, 4);
    }

    #[test]
    fn sequence_comes_from_source_when_numeric() {
        let transformer = RecordTransformer::new("STUDY01");
        let (record, _) = transformer.transform(&row(&[("AESEQ", "7")]), 0);
        assert_eq!(record.aeseq, 7);

        let (record, notices) = transformer.transform(&row(&[("AESEQ", "seven")]), 2);
        assert_eq!(record.aeseq, 3);
        assert_eq!(notices[0].field, "AESEQ");
    }

    #[test]
    fn distinct_source_keys_stay_distinct() {
        let transformer = RecordTransformer::new("STUDY01");
        let rows: Vec<SourceRow> = (1..=5)
            .map(|sequence| {
                row(&[
                    ("SUBJID", "008-101"),
                    ("AESEQ", &sequence.to_string()),
                    ("AETERM", "Nausea"),
                ])
            })
            .collect();
        let output = transformer.transform_table(&rows);
        let mut keys: Vec<(String, i64)> = output
            .records
            .iter()
            .map(|record| (record.usubjid.clone(), record.aeseq))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn explicit_only_policy_ignores_category_text() {
        let options = TransformOptions {
            seriousness: SeriousnessPolicy::ExplicitOnly,
            ..TransformOptions::default()
        };
        let transformer = RecordTransformer::new("STUDY01").with_options(options);
        let (record, _) = transformer.transform(&row(&[("AESERL", "Hospitalization")]), 0);
        assert_eq!(record.aeshosp, "Y");
        assert_eq!(record.aeser, "N");

        let (record, _) = transformer.transform(&row(&[("AESER", "Yes")]), 0);
        assert_eq!(record.aeser, "Y");
    }

    #[test]
    fn fatal_outcome_sets_death_flag_and_seriousness() {
        let transformer = RecordTransformer::new("STUDY01");
        let (record, _) = transformer.transform(&row(&[("AEOUT", "Patient Died")]), 0);
        assert_eq!(record.aeout, "FATAL");
        assert_eq!(record.aesdth, "Y");
        assert_eq!(record.aeser, "Y");
    }

    #[test]
    fn concomitant_flag_normalizes_to_yn() {
        let transformer = RecordTransformer::new("STUDY01");
        let (record, _) = transformer.transform(&row(&[("AECONTRT", "yes")]), 0);
        assert_eq!(record.aecontrt, "Y");
        let (record, _) = transformer.transform(&row(&[("AECONTRT", "0")]), 0);
        assert_eq!(record.aecontrt, "N");
        let (record, _) = transformer.transform(&row(&[]), 0);
        assert_eq!(record.aecontrt, "");
    }
}
