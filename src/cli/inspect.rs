use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{register_keys, OutputFormat};
use crate::core::summary::DatasetSummary;
use crate::core::unit::TimeUnit;
use crate::parsing::table::{TableOptions, TabularData};

#[derive(Args)]
pub struct InspectArgs {
    /// Table to summarize (CSV or TSV, optionally .gz)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Unit of the retention times
    #[arg(long, default_value = "min")]
    pub unit: TimeUnit,

    /// Read retention indices from "<LABEL>=<value>" in the comment column
    #[arg(long)]
    pub ri_comment_label: Option<String>,

    /// JSON file with additional column names to recognize
    #[arg(long)]
    pub keys: Option<PathBuf>,
}

/// Execute inspect subcommand
///
/// # Errors
///
/// Returns an error if the table cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: InspectArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    register_keys(args.keys.as_deref())?;

    let mut options = TableOptions::default().with_unit(args.unit);
    if let Some(label) = &args.ri_comment_label {
        options = options.with_ri_comment_label(label.clone());
    }

    let data = TabularData::load(&args.input, &options)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let summary = DatasetSummary::from_data(&data);

    match format {
        OutputFormat::Text => print_text_summary(&data, &summary),
        OutputFormat::Json => print_json_summary(&data, &summary)?,
        OutputFormat::Tsv => print_tsv_summary(&summary),
    }

    Ok(())
}

fn print_text_summary(data: &TabularData, summary: &DatasetSummary) {
    println!("Table: {}", summary.filename);
    println!("{}", "=".repeat(60));

    println!("\nColumns:");
    println!("  Retention time: {} ({})", data.rt_column_name(), summary.unit);
    println!("  Retention index: {}", data.ri_column_name());
    println!(
        "  Comment: {}",
        data.comment_column_name().unwrap_or("(none)")
    );

    println!("\nRows: {}", summary.rows);
    println!("  Valid retention times: {}", summary.valid_retention_times);
    println!(
        "  Retention indices: {} ({:.0}%)",
        summary.retention_indices,
        summary.ri_coverage() * 100.0
    );
    println!("  Comments: {}", summary.comments);

    if let Some((lo, hi)) = summary.rt_range {
        println!(
            "  Retention time range: {:.4} - {:.4} {}",
            summary.unit.from_seconds(lo),
            summary.unit.from_seconds(hi),
            summary.unit
        );
    }
}

fn print_json_summary(data: &TabularData, summary: &DatasetSummary) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "summary": summary,
        "columns": {
            "retention_time": data.rt_column_name(),
            "retention_index": data.ri_column_name(),
            "comment": data.comment_column_name(),
        },
        "ri_coverage": summary.ri_coverage(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_summary(summary: &DatasetSummary) {
    println!("filename\trows\tvalid_retention_times\tretention_indices\tcomments\tri_coverage");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{:.4}",
        summary.filename,
        summary.rows,
        summary.valid_retention_times,
        summary.retention_indices,
        summary.comments,
        summary.ri_coverage(),
    );
}
