use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::catalog::store::Dataset;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct GenomesArgs {
    /// Dataset file (JSON)
    #[arg(required = true)]
    pub dataset: PathBuf,

    /// Also write the dataset to this path with every index file read into
    /// inline chromosome lists
    #[arg(long, value_name = "PATH")]
    pub write_inline: Option<PathBuf>,
}

/// Execute the genomes subcommand
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded or output fails.
pub fn run(args: GenomesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let dataset = Dataset::load_from_file(&args.dataset)?;
    if verbose {
        eprintln!(
            "Loaded dataset with {} genomes, {} features, {} synteny blocks",
            dataset.catalog.len(),
            dataset.features.len(),
            dataset.synteny.len()
        );
    }

    if let Some(path) = &args.write_inline {
        std::fs::write(path, dataset.to_json()?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "dataset written with inline chromosomes");
    }

    match format {
        OutputFormat::Text => {
            println!("Genomes ({})\n", dataset.catalog.len());
            println!(
                "{:<24} {:>10} {:>12} {:>15}",
                "Name", "Taxon", "Chromosomes", "Total length"
            );
            println!("{}", "-".repeat(64));
            for genome in &dataset.catalog.genomes {
                let total: i64 = genome.chromosomes.iter().map(|c| c.length).sum();
                println!(
                    "{:<24} {:>10} {:>12} {:>15}",
                    genome.name,
                    genome
                        .taxon_id
                        .map_or_else(|| "-".to_string(), |t| t.to_string()),
                    genome.chromosomes.len(),
                    total
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&dataset.catalog.genomes)?);
        }
        OutputFormat::Tsv => {
            println!("name\ttaxon_id\tchromosomes\ttotal_length");
            for genome in &dataset.catalog.genomes {
                let total: i64 = genome.chromosomes.iter().map(|c| c.length).sum();
                println!(
                    "{}\t{}\t{}\t{}",
                    genome.name,
                    genome.taxon_id.map(|t| t.to_string()).unwrap_or_default(),
                    genome.chromosomes.len(),
                    total
                );
            }
        }
    }

    Ok(())
}
