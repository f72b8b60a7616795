use serde::{Deserialize, Serialize};

use crate::core::types::Strand;

/// A genome feature (gene, transcript...) as seen by the navigation core.
///
/// Only identity and location matter here; annotation semantics belong to the
/// feature store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature identifier, unique within its genome
    pub id: String,

    /// Owning genome name
    pub genome: String,

    /// Chromosome name
    pub chr: String,

    /// 1-based inclusive start
    pub start: i64,

    /// 1-based inclusive end
    pub end: i64,

    #[serde(default)]
    pub strand: Strand,

    /// Display symbol (e.g. "Pax6")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    /// Homology group shared by all genologs of this feature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homology_group: Option<String>,
}

impl Feature {
    pub fn new(
        id: impl Into<String>,
        genome: impl Into<String>,
        chr: impl Into<String>,
        start: i64,
        end: i64,
        strand: Strand,
    ) -> Self {
        Self {
            id: id.into(),
            genome: genome.into(),
            chr: chr.into(),
            start,
            end,
            strand,
            symbol: None,
            homology_group: None,
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.homology_group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }

    /// True if both features share at least one base on the same chromosome
    pub fn overlaps(&self, other: &Feature) -> bool {
        self.chr == other.chr && self.start <= other.end && other.start <= self.end
    }

    /// Same feature in the same genome
    pub fn is_same(&self, other: &Feature) -> bool {
        self.genome == other.genome && self.id == other.id
    }

    /// Name used in logs and listings
    pub fn label(&self) -> &str {
        self.symbol.as_deref().unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps() {
        let a = Feature::new("a", "G", "1", 100, 200, Strand::Plus);
        let b = Feature::new("b", "G", "1", 200, 300, Strand::Minus);
        let c = Feature::new("c", "G", "1", 201, 300, Strand::Plus);
        let d = Feature::new("d", "G", "2", 100, 200, Strand::Plus);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_label_prefers_symbol() {
        let f = Feature::new("MGI:97490", "G", "2", 1, 10, Strand::Plus);
        assert_eq!(f.label(), "MGI:97490");
        assert_eq!(f.with_symbol("Pax6").label(), "Pax6");
    }
}
