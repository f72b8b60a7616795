use clap::Parser;
use tracing_subscriber::EnvFilter;

use genome_strips::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("genome_strips=debug,info")
    } else {
        EnvFilter::new("genome_strips=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Genomes(args) => {
            cli::genomes::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::View(args) => {
            cli::view::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
