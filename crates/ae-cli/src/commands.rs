use anyhow::Result;

use ae_cli::pipeline::{process_table, validate_table, PipelineResult, ProcessConfig};
use ae_transform::TransformOptions;

use crate::cli::{ProcessArgs, ValidateArgs};

pub fn run_process(args: &ProcessArgs) -> Result<PipelineResult> {
    let config = ProcessConfig {
        input: args.input.clone(),
        study_id: args.study_id.clone(),
        output_dir: args.output_dir.clone(),
        report_path: args.report.clone(),
        options: TransformOptions::default(),
        dry_run: args.dry_run,
    };
    process_table(&config)
}

pub fn run_validate(args: &ValidateArgs) -> Result<PipelineResult> {
    validate_table(&args.input, args.report.as_deref())
}
