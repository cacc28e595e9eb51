//! AE processing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read the source CSV into schema-less rows
//! 2. **Transform**: Map rows onto standardized AE records
//! 3. **Validate**: Run the rule engine over the table
//! 4. **Report**: Assemble the compliance report
//! 5. **Output**: Write the standardized CSV and the JSON report
//!
//! Each stage takes the output of the previous stage and returns typed
//! results.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use ae_ingest::{read_csv_table, write_standard_csv};
use ae_model::{AeRecord, ComplianceReport};
use ae_report::ComplianceReportBuilder;
use ae_transform::{RecordTransformer, TransformNotice, TransformOptions, TransformOutput};
use ae_validate::ValidationRuleEngine;

/// Inputs for a full processing run.
#[derive(Debug, Clone, Default)]
pub struct ProcessConfig {
    pub input: PathBuf,
    /// Study identifier stamped into every record. Derived from the input
    /// file name when absent.
    pub study_id: Option<String>,
    /// Defaults to `<input dir>/output`.
    pub output_dir: Option<PathBuf>,
    /// Defaults to `ae_report.json` inside the output directory.
    pub report_path: Option<PathBuf>,
    pub options: TransformOptions,
    /// Validate and report without writing output files.
    pub dry_run: bool,
}

/// Result of a processing or validation run.
#[derive(Debug)]
pub struct PipelineResult {
    pub study_id: String,
    pub input: PathBuf,
    pub notices: Vec<TransformNotice>,
    pub report: ComplianceReport,
    pub standard_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
}

/// Run the full pipeline: ingest, transform, validate, report, output.
pub fn process_table(config: &ProcessConfig) -> Result<PipelineResult> {
    let study_id = config
        .study_id
        .clone()
        .unwrap_or_else(|| derive_study_id(&config.input));
    let span = info_span!("process", study_id = %study_id);
    let _guard = span.enter();

    let start = Instant::now();
    let table = read_csv_table(&config.input)
        .with_context(|| format!("load source table {}", config.input.display()))?;
    let rows = table.source_rows();
    info!(
        rows = rows.len(),
        columns = table.headers.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );

    let transformer =
        RecordTransformer::new(study_id.clone()).with_options(config.options.clone());
    let TransformOutput { records, notices } = transformer.transform_table(&rows);
    for notice in &notices {
        warn!(
            row_index = notice.row_index,
            field = notice.field,
            "{}",
            notice.message
        );
    }
    info!(
        records = records.len(),
        notices = notices.len(),
        "transform complete"
    );

    let report = validate_and_report(&records, &config.input);

    let mut standard_path = None;
    let mut report_path = None;
    if !config.dry_run {
        let output_dir = resolve_output_dir(config);
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
        let csv_path = output_dir.join("ae_standard.csv");
        write_standard_csv(&csv_path, &records).context("write standardized table")?;
        let json_path = config
            .report_path
            .clone()
            .unwrap_or_else(|| output_dir.join("ae_report.json"));
        write_report_json(&json_path, &report)?;
        standard_path = Some(csv_path);
        report_path = Some(json_path);
    }

    Ok(PipelineResult {
        study_id,
        input: config.input.clone(),
        notices,
        report,
        standard_path,
        report_path,
    })
}

/// Re-validate an already-standardized table without transforming it.
pub fn validate_table(input: &Path, report_path: Option<&Path>) -> Result<PipelineResult> {
    let span = info_span!("validate", input = %input.display());
    let _guard = span.enter();

    let table = read_csv_table(input)
        .with_context(|| format!("load standardized table {}", input.display()))?;
    let records: Vec<AeRecord> = table.source_rows().iter().map(AeRecord::from_source).collect();
    info!(records = records.len(), "loaded standardized table");

    let report = validate_and_report(&records, input);
    let study_id = records
        .first()
        .map(|record| record.studyid.clone())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| derive_study_id(input));

    let report_path = match report_path {
        Some(path) => {
            write_report_json(path, &report)?;
            Some(path.to_path_buf())
        }
        None => None,
    };

    Ok(PipelineResult {
        study_id,
        input: input.to_path_buf(),
        notices: Vec::new(),
        report,
        standard_path: None,
        report_path,
    })
}

fn validate_and_report(records: &[AeRecord], input: &Path) -> ComplianceReport {
    let start = Instant::now();
    let issues = ValidationRuleEngine::new().validate(records);
    info!(
        issues = issues.len(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );
    let file_validated = input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("ae.csv");
    ComplianceReportBuilder::new().build(records, issues, file_validated)
}

/// Serialize the compliance report to the documented JSON shape.
pub fn write_report_json(path: &Path, report: &ComplianceReport) -> Result<()> {
    let json = serde_json::to_vec_pretty(report).context("serialize compliance report")?;
    fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    info!(path = %path.display(), "wrote compliance report");
    Ok(())
}

fn resolve_output_dir(config: &ProcessConfig) -> PathBuf {
    match &config.output_dir {
        Some(dir) => dir.clone(),
        None => config
            .input
            .parent()
            .map(|parent| parent.join("output"))
            .unwrap_or_else(|| PathBuf::from("output")),
    }
}

/// Study identifier from the input file name: the stem uppercased, with a
/// trailing AE marker removed.
pub fn derive_study_id(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|value| value.to_str())
        .unwrap_or("STUDY");
    let upper = stem.to_uppercase();
    let trimmed = upper
        .strip_suffix("_AE")
        .or_else(|| upper.strip_suffix("-AE"))
        .unwrap_or(&upper);
    if trimmed.is_empty() {
        "STUDY".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_id_comes_from_the_file_stem() {
        assert_eq!(derive_study_id(Path::new("/data/study01_ae.csv")), "STUDY01");
        assert_eq!(derive_study_id(Path::new("abc-001-ae.csv")), "ABC-001");
        assert_eq!(derive_study_id(Path::new("raw.csv")), "RAW");
    }

    #[test]
    fn output_dir_defaults_next_to_the_input() {
        let config = ProcessConfig {
            input: PathBuf::from("/data/study01_ae.csv"),
            ..ProcessConfig::default()
        };
        assert_eq!(resolve_output_dir(&config), PathBuf::from("/data/output"));

        let explicit = ProcessConfig {
            input: PathBuf::from("/data/study01_ae.csv"),
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..ProcessConfig::default()
        };
        assert_eq!(resolve_output_dir(&explicit), PathBuf::from("/tmp/out"));
    }
}
