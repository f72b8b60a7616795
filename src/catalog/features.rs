use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::catalog::ServiceError;
use crate::core::feature::Feature;

/// Feature data and homology lookups for the genomes being viewed.
///
/// Lookups are synchronous and only see genomes whose data has been made
/// available with [`ensure_features`](FeatureStore::ensure_features).
#[allow(async_fn_in_trait)]
pub trait FeatureStore {
    /// Make the features of `genome` available to the synchronous lookups.
    async fn ensure_features(&self, genome: &str) -> Result<(), ServiceError>;

    /// All counterparts of `feature` in `genome` (a genome may carry several copies)
    fn genologs(&self, feature: &Feature, genome: &str) -> Vec<Feature>;

    /// First counterpart of `feature` in `genome`
    fn genolog(&self, feature: &Feature, genome: &str) -> Option<Feature> {
        self.genologs(feature, genome).into_iter().next()
    }

    /// Counterparts of `feature`, positionally parallel to `genomes`
    fn genologs_in(&self, feature: &Feature, genomes: &[String]) -> Vec<Option<Feature>> {
        genomes.iter().map(|g| self.genolog(feature, g)).collect()
    }

    /// Features on one chromosome, in genomic order
    fn all_features_now(&self, genome: &str, chr: &str) -> Vec<Feature>;

    /// Release cached data for `genome`
    fn flush_genome(&self, genome: &str);
}

/// Feature store over a fixed, in-memory feature list.
///
/// Genologs are features sharing a `homology_group`. A feature without a group
/// is only its own counterpart.
#[derive(Debug, Default)]
pub struct InMemoryFeatureStore {
    /// Genome name -> features sorted by (chr, start, end)
    by_genome: HashMap<String, Vec<Feature>>,

    /// Genomes whose features are currently "cached"
    loaded: RefCell<HashSet<String>>,
}

impl InMemoryFeatureStore {
    pub fn new(features: Vec<Feature>) -> Self {
        let mut by_genome: HashMap<String, Vec<Feature>> = HashMap::new();
        for feature in features {
            by_genome.entry(feature.genome.clone()).or_default().push(feature);
        }
        for list in by_genome.values_mut() {
            list.sort_by(|a, b| {
                a.chr
                    .cmp(&b.chr)
                    .then(a.start.cmp(&b.start))
                    .then(a.end.cmp(&b.end))
            });
        }
        Self {
            by_genome,
            loaded: RefCell::new(HashSet::new()),
        }
    }

    pub fn is_loaded(&self, genome: &str) -> bool {
        self.loaded.borrow().contains(genome)
    }

    /// Look up a feature by id or symbol in one genome, ignoring the cache
    pub fn find(&self, genome: &str, key: &str) -> Option<&Feature> {
        self.by_genome
            .get(genome)?
            .iter()
            .find(|f| f.id == key || f.symbol.as_deref() == Some(key))
    }

    /// Look up a feature by id or symbol in any genome
    pub fn find_any(&self, key: &str) -> Option<&Feature> {
        let mut genomes: Vec<&String> = self.by_genome.keys().collect();
        genomes.sort();
        genomes.into_iter().find_map(|g| self.find(g, key))
    }

    fn loaded_features(&self, genome: &str) -> &[Feature] {
        if !self.is_loaded(genome) {
            return &[];
        }
        self.by_genome
            .get(genome)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl FeatureStore for InMemoryFeatureStore {
    async fn ensure_features(&self, genome: &str) -> Result<(), ServiceError> {
        if genome.is_empty() {
            return Err(ServiceError::UnknownGenome(genome.to_string()));
        }
        if self.loaded.borrow_mut().insert(genome.to_string()) {
            debug!(genome, "features loaded");
        }
        Ok(())
    }

    fn genologs(&self, feature: &Feature, genome: &str) -> Vec<Feature> {
        let features = self.loaded_features(genome);
        match &feature.homology_group {
            Some(group) => features
                .iter()
                .filter(|f| f.homology_group.as_ref() == Some(group))
                .cloned()
                .collect(),
            None => features
                .iter()
                .filter(|f| f.is_same(feature))
                .cloned()
                .collect(),
        }
    }

    fn all_features_now(&self, genome: &str, chr: &str) -> Vec<Feature> {
        self.loaded_features(genome)
            .iter()
            .filter(|f| f.chr == chr)
            .cloned()
            .collect()
    }

    fn flush_genome(&self, genome: &str) {
        if self.loaded.borrow_mut().remove(genome) {
            debug!(genome, "features flushed");
        }
    }
}
