//! Command-line interface for genome-strips.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **genomes**: List the genomes of a dataset
//! - **view**: Open strips over a dataset, run navigation commands, print the result
//!
//! ## Usage
//!
//! ```text
//! # What is in the dataset?
//! genome-strips genomes mouse_strains.json
//!
//! # Freeze index files into a self-contained dataset
//! genome-strips genomes mouse_strains.json --write-inline mouse_strains.inline.json
//!
//! # Open two strains and align them on Pax6
//! genome-strips view mouse_strains.json --genomes C57BL/6J,A/J -e "landmark Pax6 50000"
//!
//! # Replay a saved session and export it as BED
//! genome-strips view mouse_strains.json --script session.txt --format tsv
//! ```

use clap::{Parser, Subcommand};

pub mod genomes;
pub mod script;
pub mod view;

#[derive(Parser)]
#[command(name = "genome-strips")]
#[command(version)]
#[command(about = "Navigate aligned windows across multiple genomes")]
#[command(
    long_about = "genome-strips displays one strip per genome, each holding one or more genomic windows.\n\nWindows can be zoomed and scrolled on their own or together, mapped from a reference region through synteny blocks, or aligned on a landmark feature and its counterparts in every genome."
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
    /// List the genomes of a dataset
    Genomes(genomes::GenomesArgs),

    /// Open strips and run navigation commands
    View(view::ViewArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
