use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;

use crate::cli::{register_keys, OutputFormat};
use crate::core::keys::ColumnKeys;

#[derive(Args)]
pub struct KeysArgs {
    /// JSON file with additional column names to include
    #[arg(long)]
    pub keys: Option<PathBuf>,
}

/// Execute keys subcommand
///
/// # Errors
///
/// Returns an error if the additional key file cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: KeysArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    register_keys(args.keys.as_deref())?;
    let keys = ColumnKeys::global();

    match format {
        OutputFormat::Text => {
            print_group("Retention time", &keys.retention_time);
            print_group("Retention index", &keys.retention_index);
            print_group("Comment", &keys.comment);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&keys)?),
        OutputFormat::Tsv => {
            println!("role\tkey");
            for (role, group) in [
                ("retention_time", &keys.retention_time),
                ("retention_index", &keys.retention_index),
                ("comment", &keys.comment),
            ] {
                for key in group {
                    println!("{role}\t{key}");
                }
            }
        }
    }

    Ok(())
}

fn print_group(title: &str, keys: &BTreeSet<String>) {
    println!("{title}:");
    for key in keys {
        println!("  {key}");
    }
}
