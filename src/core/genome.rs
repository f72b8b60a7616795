use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single chromosome of a genome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    /// Chromosome name as used in coordinates (e.g. "11", "chrX")
    pub name: String,

    /// Length in base pairs
    pub length: i64,
}

impl Chromosome {
    pub fn new(name: impl Into<String>, length: i64) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }
}

/// A genome that can be displayed as a strip.
///
/// Genomes are identified by name; the core never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    /// Unique genome name (e.g. "C57BL/6J")
    pub name: String,

    /// NCBI taxonomy id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxon_id: Option<u32>,

    /// Chromosomes in display order
    #[serde(default)]
    pub chromosomes: Vec<Chromosome>,

    /// Free-form metadata (assembly, strain, source...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Genome {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            taxon_id: None,
            chromosomes: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_chromosomes(mut self, chromosomes: Vec<Chromosome>) -> Self {
        self.chromosomes = chromosomes;
        self
    }

    #[must_use]
    pub fn with_taxon(mut self, taxon_id: u32) -> Self {
        self.taxon_id = Some(taxon_id);
        self
    }

    /// Look up a chromosome by exact name
    pub fn chromosome(&self, name: &str) -> Option<&Chromosome> {
        self.chromosomes.iter().find(|c| c.name == name)
    }

    /// First chromosome in display order, used for default windows
    pub fn first_chromosome(&self) -> Option<&Chromosome> {
        self.chromosomes.first()
    }
}

impl std::fmt::Display for Genome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
