use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::cli::{register_keys, OutputFormat};
use crate::compute::{ComputationMethod, InterpolationScale, Kovats};
use crate::core::data::Data;
use crate::core::summary::DatasetSummary;
use crate::core::unit::TimeUnit;
use crate::parsing::table::{TableOptions, TabularData};

/// Interpolation scale for the Kovats method
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ScaleArg {
    /// Linear in retention time (temperature-programmed runs)
    #[default]
    Linear,
    /// Logarithmic in retention time (isothermal runs)
    Log,
}

impl From<ScaleArg> for InterpolationScale {
    fn from(scale: ScaleArg) -> Self {
        match scale {
            ScaleArg::Linear => InterpolationScale::Linear,
            ScaleArg::Log => InterpolationScale::Logarithmic,
        }
    }
}

#[derive(Args)]
pub struct AssignArgs {
    /// Query table (CSV or TSV, optionally .gz)
    #[arg(required = true)]
    pub query: PathBuf,

    /// Reference ladder table with known retention indices
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Output table (CSV or TSV, optionally .gz)
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Unit of the query retention times
    #[arg(long, default_value = "min")]
    pub query_unit: TimeUnit,

    /// Unit of the reference retention times
    #[arg(long, default_value = "min")]
    pub reference_unit: TimeUnit,

    /// Interpolation scale
    #[arg(long, value_enum, default_value = "linear")]
    pub scale: ScaleArg,

    /// Read reference retention indices from "<LABEL>=<value>" in the comment
    /// column when the reference has no retention index column
    #[arg(long)]
    pub ri_comment_label: Option<String>,

    /// JSON file with additional column names to recognize
    #[arg(long)]
    pub keys: Option<PathBuf>,
}

/// Outcome of an assignment run
#[derive(Debug, serde::Serialize)]
struct AssignReport {
    method: &'static str,
    output: String,
    query: DatasetSummary,
    reference: DatasetSummary,
    assigned: usize,
    unassigned: usize,
}

/// Execute assign subcommand
///
/// # Errors
///
/// Returns an error if a table cannot be loaded or the output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: AssignArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    register_keys(args.keys.as_deref())?;

    let mut reference_options = TableOptions::default().with_unit(args.reference_unit);
    if let Some(label) = &args.ri_comment_label {
        reference_options = reference_options.with_ri_comment_label(label.clone());
    }
    let reference = TabularData::load(&args.reference, &reference_options)
        .with_context(|| format!("Failed to load reference {}", args.reference.display()))?;

    let query_options = TableOptions::default().with_unit(args.query_unit);
    let mut query = TabularData::load(&args.query, &query_options)
        .with_context(|| format!("Failed to load query {}", args.query.display()))?;

    info!(
        reference_rows = reference.len(),
        ladder_points = reference.retention_indices().iter().flatten().count(),
        query_rows = query.len(),
        "Assigning retention indices"
    );

    let method = Kovats::new(args.scale.into());
    let indices = method.compute(&query, &reference);
    query.set_retention_indices(indices)?;

    query
        .write(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let query_summary = DatasetSummary::from_data(&query);
    let report = AssignReport {
        method: method.name(),
        output: args.output.display().to_string(),
        assigned: query_summary.retention_indices,
        unassigned: query_summary.rows - query_summary.retention_indices,
        query: query_summary,
        reference: DatasetSummary::from_data(&reference),
    };

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &AssignReport) {
    println!("Retention Index Assignment");
    println!("{}", "=".repeat(60));

    println!("\nMethod: {}", report.method);
    println!("Reference: {}", report.reference.filename);
    println!("  Rows: {}", report.reference.rows);
    println!("  Ladder points: {}", report.reference.retention_indices);

    println!("\nQuery: {}", report.query.filename);
    println!("  Rows: {}", report.query.rows);
    println!("  Valid retention times: {}", report.query.valid_retention_times);

    println!("\nAssigned: {}", report.assigned);
    println!("Unassigned: {}", report.unassigned);
    println!("Output: {}", report.output);
}

fn print_tsv_report(report: &AssignReport) {
    println!("method\tquery\treference\toutput\trows\tassigned\tunassigned");
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        report.method,
        report.query.filename,
        report.reference.filename,
        report.output,
        report.query.rows,
        report.assigned,
        report.unassigned,
    );
}
