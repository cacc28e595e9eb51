use std::cmp::Ordering;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use ae_cli::pipeline::PipelineResult;
use ae_model::{Issue, ReportStatus, Severity};

pub fn print_summary(result: &PipelineResult) {
    println!("Study: {}", result.study_id);
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.standard_path {
        println!("Standardized table: {}", path.display());
    }
    if let Some(path) = &result.report_path {
        println!("Compliance report: {}", path.display());
    }

    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Subjects"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
        header_cell("Score"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    table.add_row(vec![
        Cell::new(report.statistics.record_count),
        Cell::new(report.statistics.subject_count),
        count_cell(report.error_count(), Color::Red),
        count_cell(report.warning_count(), Color::Yellow),
        count_cell(report.info_count(), Color::Blue),
        score_cell(report.compliance_score),
        status_cell(report.summary.status),
    ]);
    println!("{table}");

    if !result.notices.is_empty() {
        println!();
        println!("Transform notices:");
        for notice in &result.notices {
            println!(
                "- row {}: {}: {}",
                notice.row_index + 1,
                notice.field,
                notice.message
            );
        }
    }

    print_issue_table(report.errors.iter().chain(&report.warnings).chain(&report.info));
}

fn print_issue_table<'a>(issues: impl Iterator<Item = &'a Issue>) {
    let mut issues: Vec<&Issue> = issues.collect();
    if issues.is_empty() {
        return;
    }
    issues.sort_by(|a, b| {
        let severity = severity_rank(b.severity).cmp(&severity_rank(a.severity));
        if severity != Ordering::Equal {
            return severity;
        }
        a.rule_id.cmp(&b.rule_id)
    });
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Rule"),
        header_cell("Variable"),
        header_cell("Message"),
        header_cell("Context"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    for issue in issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(issue.rule_id.clone()),
            text_cell(issue.variable.as_deref()),
            Cell::new(issue.message.clone()),
            text_cell(issue.context.as_deref()),
        ]);
    }
    println!();
    println!("Findings:");
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn score_cell(score: u8) -> Cell {
    let color = if score >= 95 {
        Color::Green
    } else if score >= 80 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(score).fg(color).add_attribute(Attribute::Bold)
}

fn status_cell(status: ReportStatus) -> Cell {
    match status {
        ReportStatus::Pass => Cell::new("PASS")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        ReportStatus::Fail => Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR").fg(Color::Red),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Blue),
    }
}

fn severity_rank(severity: Severity) -> u8 {
    match severity {
        Severity::Error => 2,
        Severity::Warning => 1,
        Severity::Info => 0,
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
