use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod compute;
mod core;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("ri_assigner=debug,info")
    } else {
        EnvFilter::new("ri_assigner=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Assign(args) => {
            cli::assign::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Inspect(args) => {
            cli::inspect::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Keys(args) => {
            cli::keys::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
