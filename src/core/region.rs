use serde::{Deserialize, Serialize};

use crate::core::types::{Coords, RegionId};

/// Weight given to regions created without an explicit width
pub const DEFAULT_REGION_WEIGHT: f64 = 1.0;

/// One genomic window with its display geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Stable handle; never changes after creation
    pub id: RegionId,

    /// Owning genome name
    pub genome: String,

    /// Chromosome name
    pub chr: String,

    /// 1-based inclusive start
    pub start: i64,

    /// 1-based inclusive end, never below `start`
    pub end: i64,

    /// Display orientation only; `start`/`end` keep their order
    #[serde(default)]
    pub reversed: bool,

    /// Logical weight before layout, pixels after layout
    pub width: f64,

    /// Pixel offset within the strip, written by layout
    #[serde(default)]
    pub delta_x: f64,

    /// `end - start + 1`, written by layout
    #[serde(default)]
    pub length: i64,
}

impl Region {
    /// Base pairs covered by the current coordinates
    #[must_use]
    pub fn bp_length(&self) -> i64 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    pub fn coords(&self) -> Coords {
        Coords::new(self.chr.clone(), self.start, self.end)
    }

    /// Overwrite location and width from a freshly computed region, keeping
    /// identity and every other attached attribute. A spec without a width
    /// resets the region to the default weight.
    pub fn merge_from(&mut self, spec: &RegionSpec) {
        self.genome.clone_from(&spec.genome);
        self.chr.clone_from(&spec.chr);
        self.start = spec.start;
        self.end = spec.end;
        self.width = spec.width.unwrap_or(DEFAULT_REGION_WEIGHT);
    }

    /// Spec describing this region's current location
    pub fn to_spec(&self) -> RegionSpec {
        RegionSpec {
            genome: self.genome.clone(),
            chr: self.chr.clone(),
            start: self.start,
            end: self.end,
            width: Some(self.width),
            reversed: Some(self.reversed),
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}::{}:{}..{}{}",
            self.genome,
            self.chr,
            self.start,
            self.end,
            if self.reversed { " (rev)" } else { "" }
        )
    }
}

/// A partially specified region, as produced by mappers or supplied by callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub genome: String,
    pub chr: String,
    pub start: i64,
    pub end: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversed: Option<bool>,
}

impl RegionSpec {
    pub fn new(genome: impl Into<String>, chr: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            genome: genome.into(),
            chr: chr.into(),
            start,
            end,
            width: None,
            reversed: None,
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }
}

/// The ordered regions displayed for one genome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strip {
    pub genome: String,
    pub regions: Vec<Region>,
    /// Rank among strips, used for serialization order
    pub order: usize,
}

impl Strip {
    pub fn new(genome: impl Into<String>, regions: Vec<Region>, order: usize) -> Self {
        Self {
            genome: genome.into(),
            regions,
            order,
        }
    }

    pub fn position_of(&self, id: RegionId) -> Option<usize> {
        self.regions.iter().position(|r| r.id == id)
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.position_of(id).is_some()
    }
}

/// Sole creator of regions; assigns fresh, monotonically increasing ids
#[derive(Debug, Default)]
pub struct RegionFactory {
    next_id: u64,
}

impl RegionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a region from a partial spec, filling in defaults.
    /// Location fields are taken from `spec` unchanged.
    pub fn make_region(&mut self, spec: RegionSpec) -> Region {
        self.next_id += 1;
        let length = spec.end - spec.start + 1;
        Region {
            id: RegionId(self.next_id),
            genome: spec.genome,
            chr: spec.chr,
            start: spec.start,
            end: spec.end,
            reversed: spec.reversed.unwrap_or(false),
            width: spec.width.unwrap_or(DEFAULT_REGION_WEIGHT),
            delta_x: 0.0,
            length,
        }
    }
}
