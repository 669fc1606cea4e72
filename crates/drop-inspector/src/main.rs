//! CLI entry point for the data drop inspector.

use anyhow::Result;
use clap::Parser;
use drop_inspector::{
    ColumnProfile, Inspection, InspectionConfig, Inspector, Report, Severity, Table, Value,
    filter_columns, load_path, sort_by_missingness,
};
use std::path::PathBuf;
use tracing::{info, warn};

/// Rows shown in the dry-run preview.
const PREVIEW_ROWS: usize = 25;

/// Width of one preview cell.
const PREVIEW_CELL_WIDTH: usize = 14;

#[derive(Parser, Debug)]
#[command(
    author = "Data Drop Inspector Team",
    version,
    about = "Data-quality inspection for CSV and XLSX drops",
    long_about = "Loads a CSV or XLSX file, profiles every column, runs a battery of \
                  heuristic quality checks and writes a JSON report plus a safely \
                  cleaned CSV.\n\n\
                  EXAMPLES:\n  \
                  # Inspect a file and write outputs to ./output\n  \
                  drop-inspector -i sales.csv\n\n  \
                  # Preview the findings without writing anything\n  \
                  drop-inspector -i sales.xlsx --dry-run\n\n  \
                  # Pipe the report into jq\n  \
                  drop-inspector -i sales.csv --json | jq .dataset"
)]
struct Args {
    /// Path to the CSV or XLSX file to inspect
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the report and the cleaned dataset
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Keep exact duplicate rows in the cleaned dataset
    #[arg(long)]
    keep_duplicates: bool,

    /// Print the report JSON to stdout and write nothing
    ///
    /// Disables all logs so stdout only carries the report.
    #[arg(long)]
    json: bool,

    /// Only show columns whose name contains this text (case-insensitive)
    #[arg(long)]
    filter: Option<String>,

    /// Maximum number of non-null values sampled per column by the detectors
    #[arg(long, default_value_t = drop_inspector::config::DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,

    /// Seed for the per-column sampler
    #[arg(long, default_value_t = drop_inspector::config::DEFAULT_SAMPLE_SEED)]
    seed: u64,

    /// Preview the inspection without writing any files
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and the final result)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is not initialized at all.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    info!("Loading dataset from: {}", args.input.display());
    let table = load_path(&args.input)?;
    info!("Dataset loaded successfully: {:?}", table.shape());

    if table.is_empty() {
        warn!("The file loaded successfully, but the dataset is empty");
    }

    let config = InspectionConfig::builder()
        .sample_size(args.sample_size)
        .sample_seed(args.seed)
        .drop_exact_duplicates(!args.keep_duplicates)
        .output_dir(&args.output)
        .build()?;

    let inspector = Inspector::new(config);
    let inspection = inspector.inspect(&table)?;

    if args.json {
        println!("{}", inspection.report.to_json_pretty()?);
        return Ok(());
    }

    if args.dry_run {
        print_dry_run(&args, &table, &inspection);
        return Ok(());
    }

    let paths = inspector.export(&inspection)?;
    print_human_readable_summary(&args, &inspection);

    println!("Report:  {}", paths.report.display());
    println!("Cleaned: {}", paths.cleaned.display());
    println!();

    Ok(())
}

/// Preview the inspection without writing anything.
///
/// Uses `println!` on purpose: this is the primary output of `--dry-run`
/// and must stay visible regardless of the log level.
fn print_dry_run(args: &Args, table: &Table, inspection: &Inspection) {
    let report = &inspection.report;

    println!("\n{}", "=".repeat(80));
    println!("DRY RUN - Preview of the inspection");
    println!("{}\n", "=".repeat(80));

    print_overview(args, report);
    print_column_health(&report.profile, args.filter.as_deref());
    print_issues(report);

    println!("PREVIEW (first {} rows)", PREVIEW_ROWS);
    println!("{}", "-".repeat(40));
    for line in preview_lines(table, PREVIEW_ROWS) {
        println!("  {}", line);
    }
    println!();

    println!("CLEANING PREVIEW");
    println!("{}", "-".repeat(40));
    if inspection.cleaning_actions.is_empty() {
        println!("  Nothing to clean");
    } else {
        for action in &inspection.cleaning_actions {
            println!("  - {}", action);
        }
    }
    println!();

    println!("{}", "=".repeat(80));
    println!("To write the report and the cleaned CSV, run without --dry-run");
    println!("{}", "=".repeat(80));
}

fn print_human_readable_summary(args: &Args, inspection: &Inspection) {
    let report = &inspection.report;

    println!();
    println!("{}", "=".repeat(80));
    println!("INSPECTION COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    print_overview(args, report);
    print_column_health(&report.profile, args.filter.as_deref());
    print_issues(report);

    println!("Cleaning:");
    println!(
        "  Rows: {} -> {}",
        report.dataset.rows,
        inspection.cleaned.height()
    );
    for action in &inspection.cleaning_actions {
        println!("  - {}", action);
    }
    println!();
}

fn print_overview(args: &Args, report: &Report) {
    let dataset = &report.dataset;

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  File: {}", args.input.display());
    println!("  Rows: {}", dataset.rows);
    println!("  Columns: {}", dataset.columns);
    println!("  Missing cells: {}", dataset.missing_cells_total);
    println!("  Exact duplicates: {}", dataset.duplicate_rows_total);
    println!();
}

/// Column health table, sorted by missingness and optionally filtered by name.
fn print_column_health(profile: &[ColumnProfile], filter: Option<&str>) {
    println!("COLUMN HEALTH");
    println!("{}", "-".repeat(40));

    let sorted = sort_by_missingness(profile);
    let rows = filter_columns(&sorted, filter.unwrap_or(""));

    if rows.is_empty() {
        println!("  No columns to show");
        println!();
        return;
    }

    println!(
        "{:<20} {:<10} {:>8} {:>8} {:>8} {:<15} {:<15}",
        "Column", "Type", "Null %", "Unique", "Card.", "Min", "Max"
    );
    println!("{}", "-".repeat(90));

    for col in &rows {
        println!(
            "{:<20} {:<10} {:>8.2} {:>8} {:>8.3} {:<15} {:<15}",
            truncate_str(&col.name, 19),
            col.dtype.as_str(),
            col.null_pct,
            col.unique_count,
            col.cardinality,
            truncate_str(&render_bound(col.min.as_ref()), 15),
            truncate_str(&render_bound(col.max.as_ref()), 15),
        );
    }
    println!();
}

fn print_issues(report: &Report) {
    let counts = report.severity_counts();

    println!("ISSUES");
    println!("{}", "-".repeat(40));
    println!(
        "  Critical: {}  Warnings: {}  Info: {}",
        counts.critical, counts.warning, counts.info
    );

    for severity in Severity::ALL {
        let issues = report.issues_with(severity);
        println!();
        println!("  [{}]", severity.as_str().to_uppercase());
        if issues.is_empty() {
            let empty = match severity {
                Severity::Critical => "No critical issues found.",
                Severity::Warning => "No warnings found.",
                Severity::Info => "No informational notes.",
            };
            println!("    {}", empty);
            continue;
        }
        for issue in issues {
            println!("    - {}", issue.title);
            println!("      {}", issue.details);
            println!("      Suggestion: {}", issue.suggestion);
        }
    }
    println!();
}

/// Header plus the first `rows` rows, one fixed-width line each.
fn preview_lines(table: &Table, rows: usize) -> Vec<String> {
    let head = table.head(rows);
    let format_line = |cells: Vec<String>| {
        cells
            .iter()
            .map(|cell| {
                format!(
                    "{:<width$}",
                    truncate_str(cell, PREVIEW_CELL_WIDTH),
                    width = PREVIEW_CELL_WIDTH
                )
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(head.height() + 1);
    lines.push(format_line(
        head.column_names().iter().map(|name| name.to_string()).collect(),
    ));
    for idx in 0..head.height() {
        lines.push(format_line(
            head.row(idx).iter().map(|value| value.to_string()).collect(),
        ));
    }
    lines
}

fn render_bound(value: Option<&Value>) -> String {
    value.and_then(Value::render).unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drop_inspector::Column;

    #[test]
    fn test_preview_lines_limit_rows() {
        let table = Table::new(vec![
            Column::from_values("id", (1..=30i64).collect::<Vec<_>>()),
            Column::from_values("name", (1..=30).map(|i| format!("n{}", i)).collect::<Vec<_>>()),
        ])
        .unwrap();

        let lines = preview_lines(&table, PREVIEW_ROWS);
        assert_eq!(lines.len(), 26);
        assert_eq!(lines[0], format!("{:<14} name", "id"));
        assert_eq!(lines[1], format!("{:<14} n1", "1"));
        assert_eq!(lines[25], format!("{:<14} n25", "25"));
    }

    #[test]
    fn test_preview_lines_truncate_and_show_nulls() {
        let table = Table::new(vec![
            Column::from_values("a_very_long_column_name", vec![Some("x"), None]),
        ])
        .unwrap();

        let lines = preview_lines(&table, PREVIEW_ROWS);
        assert_eq!(lines, vec!["a_very_long...", "x", "null"]);
    }

    #[test]
    fn test_preview_lines_header_only() {
        let table = Table::new(vec![Column::from_values("a", Vec::<i64>::new())]).unwrap();
        assert_eq!(preview_lines(&table, PREVIEW_ROWS), vec!["a"]);
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("abcdefghij", 8), "abcde...");
    }
}
