//! Genome catalog and the external services the navigation core consumes.
//!
//! The core never fetches features or computes homology itself. It talks to:
//!
//! - [`FeatureStore`](features::FeatureStore): feature loading, genolog lookup and
//!   ordered feature listings per chromosome
//! - [`SyntenyTranslator`](synteny::SyntenyTranslator): maps a coordinate span of one
//!   genome onto another as a list of indexed synteny blocks
//!
//! In-memory implementations of both are provided and are what the CLI uses.
//! A [`Dataset`](store::Dataset) bundles genomes, features and synteny blocks
//! loaded from a JSON file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use genome_strips::catalog::store::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_file(Path::new("mouse_strains.json")).unwrap();
//! for genome in &dataset.catalog.genomes {
//!     println!("{} ({} chromosomes)", genome.name, genome.chromosomes.len());
//! }
//! ```

use thiserror::Error;

pub mod features;
pub mod store;
pub mod synteny;

/// Failures reported by collaborator services.
///
/// These are never handled by the core; they propagate to the caller.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Unknown genome: {0}")]
    UnknownGenome(String),

    #[error("Feature data unavailable for {genome}: {reason}")]
    FeaturesUnavailable { genome: String, reason: String },

    #[error("Synteny translation failed: {0}")]
    Translation(String),
}
