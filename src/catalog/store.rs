use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::features::InMemoryFeatureStore;
use crate::catalog::synteny::{BlockPair, BlockTableTranslator};
use crate::core::feature::Feature;
use crate::core::genome::Genome;
use crate::parsing::{parse_index_file, ParseError};
use crate::utils::validation::MAX_CHROMOSOMES;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read dataset: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Failed to read chromosome index: {0}")]
    Index(#[from] ParseError),

    #[error("Duplicate genome in dataset: {0}")]
    DuplicateGenome(String),
}

/// Dataset version for compatibility checking
pub const DATASET_VERSION: &str = "1.0.0";

/// A genome entry as written in a dataset file.
///
/// Chromosomes are either listed inline or read from `index`, a `.fai` or
/// `.dict` path resolved against the dataset's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenomeEntry {
    #[serde(flatten)]
    pub genome: Genome,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<PathBuf>,
}

/// Serializable dataset format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetData {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub genomes: Vec<GenomeEntry>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub synteny: Vec<BlockPair>,
}

/// The genomes available for display, indexed by name
#[derive(Debug, Default)]
pub struct GenomeCatalog {
    /// All genomes, in dataset order
    pub genomes: Vec<Genome>,

    /// Index: genome name -> index in genomes vec
    name_to_index: HashMap<String, usize>,
}

impl GenomeCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a genome to the catalog
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateGenome` if a genome with the same name exists.
    pub fn add_genome(&mut self, genome: Genome) -> Result<(), CatalogError> {
        if self.name_to_index.contains_key(&genome.name) {
            return Err(CatalogError::DuplicateGenome(genome.name));
        }
        self.name_to_index
            .insert(genome.name.clone(), self.genomes.len());
        self.genomes.push(genome);
        Ok(())
    }

    /// Get a genome by name
    pub fn get(&self, name: &str) -> Option<&Genome> {
        self.name_to_index.get(name).map(|&idx| &self.genomes[idx])
    }

    /// Genome names in dataset order
    pub fn names(&self) -> Vec<String> {
        self.genomes.iter().map(|g| g.name.clone()).collect()
    }

    /// Number of genomes in catalog
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }
}

impl FromIterator<Genome> for GenomeCatalog {
    /// Later duplicates are ignored.
    fn from_iter<I: IntoIterator<Item = Genome>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for genome in iter {
            let _ = catalog.add_genome(genome);
        }
        catalog
    }
}

/// Genomes, features and synteny blocks loaded together
#[derive(Debug, Default)]
pub struct Dataset {
    pub catalog: GenomeCatalog,
    pub features: Vec<Feature>,
    pub synteny: Vec<BlockPair>,
}

impl Dataset {
    /// Load a dataset from a JSON file; index paths resolve against its directory
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file or any referenced index cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json(&content, base_dir)
    }

    /// Parse a dataset from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on malformed JSON, unreadable index files,
    /// oversized chromosome lists or duplicate genome names.
    pub fn from_json(json: &str, base_dir: &Path) -> Result<Self, CatalogError> {
        let data: DatasetData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != DATASET_VERSION {
            warn!(
                expected = DATASET_VERSION,
                found = %data.version,
                "dataset version mismatch"
            );
        }

        let mut catalog = GenomeCatalog::new();
        for entry in data.genomes {
            let mut genome = entry.genome;
            if let Some(index) = entry.index {
                let path = base_dir.join(index);
                genome.chromosomes = parse_index_file(&path)?;
                debug!(
                    genome = %genome.name,
                    chromosomes = genome.chromosomes.len(),
                    "chromosomes read from {}",
                    path.display()
                );
            } else if genome.chromosomes.len() > MAX_CHROMOSOMES {
                return Err(ParseError::TooManyChromosomes(MAX_CHROMOSOMES).into());
            }
            catalog.add_genome(genome)?;
        }

        Ok(Self {
            catalog,
            features: data.features,
            synteny: data.synteny,
        })
    }

    /// Export the dataset to JSON, with chromosomes inlined
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = DatasetData {
            version: DATASET_VERSION.to_string(),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            genomes: self
                .catalog
                .genomes
                .iter()
                .map(|g| GenomeEntry {
                    genome: g.clone(),
                    index: None,
                })
                .collect(),
            features: self.features.clone(),
            synteny: self.synteny.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Feature store over this dataset's features
    pub fn feature_store(&self) -> InMemoryFeatureStore {
        InMemoryFeatureStore::new(self.features.clone())
    }

    /// Synteny translator over this dataset's block pairs
    pub fn translator(&self) -> BlockTableTranslator {
        BlockTableTranslator::new(self.synteny.clone())
    }
}
