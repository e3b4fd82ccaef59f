//! Command-line interface for ri-assigner.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **assign**: Compute retention indices for a query table against a reference ladder
//! - **inspect**: Summarize a retention data table
//! - **keys**: List the column names recognized as retention time, index and comment
//!
//! ## Usage
//!
//! ```text
//! # Assign retention indices using an alkane ladder (retention times in minutes)
//! ri-assigner assign peaks.csv alkanes.csv -o peaks_ri.csv
//!
//! # Temperature-programmed run, reference times in seconds
//! ri-assigner assign peaks.tsv alkanes.csv -o out.tsv --scale linear --reference-unit s
//!
//! # Reference indices stored as "RI=<value>" in the comment column
//! ri-assigner assign peaks.csv library.csv -o out.csv --ri-comment-label RI
//!
//! # JSON summary for scripting
//! ri-assigner --format json inspect peaks.csv
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::info;

use crate::core::keys::{extend_possible_keys, ColumnKeys};

pub mod assign;
pub mod inspect;
pub mod keys;

#[derive(Parser)]
#[command(name = "ri-assigner")]
#[command(author = "RIAssigner Contributors")]
#[command(version)]
#[command(about = "Assign chromatographic retention indices from retention times")]
#[command(
    long_about = "ri-assigner computes retention indices for the peaks of a query table by interpolating their retention times against a reference ladder of compounds with known retention indices (e.g. n-alkanes).\n\nTables are CSV or TSV files, optionally gzip-compressed. Retention time, retention index and comment columns are located by header name."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assign retention indices to a query table
    Assign(assign::AssignArgs),

    /// Summarize a retention data table
    Inspect(inspect::InspectArgs),

    /// List recognized column names
    Keys(keys::KeysArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Merge a user vocabulary file into the process-wide key registry.
/// Must run before any table is loaded.
pub(crate) fn register_keys(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let keys = ColumnKeys::load_from_file(path)
        .with_context(|| format!("Failed to load column keys from {}", path.display()))?;
    info!(
        file = %path.display(),
        retention_time = keys.retention_time.len(),
        retention_index = keys.retention_index.len(),
        comment = keys.comment.len(),
        "Registered additional column keys"
    );
    extend_possible_keys(&keys);
    Ok(())
}
