use serde::{Deserialize, Serialize};

/// Stable handle for a region owned by a controller.
///
/// Handles are assigned monotonically by [`RegionFactory`](crate::core::region::RegionFactory)
/// and are never reused, so a handle held by a caller either still names the same
/// region or names nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

impl RegionId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Strand of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Strand {
    #[default]
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    /// Parse a strand from its usual one-character form.
    /// Anything other than `-` is treated as the plus strand.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "-" => Strand::Minus,
            _ => Strand::Plus,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
        }
    }
}

/// A validated coordinate triple on one chromosome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coords {
    pub chr: String,
    pub start: i64,
    pub end: i64,
}

impl Coords {
    pub fn new(chr: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            chr: chr.into(),
            start,
            end,
        }
    }

    #[must_use]
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }
}

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}..{}", self.chr, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strand_parse() {
        assert_eq!(Strand::parse("-"), Strand::Minus);
        assert_eq!(Strand::parse("+"), Strand::Plus);
        assert_eq!(Strand::parse(""), Strand::Plus);
    }

    #[test]
    fn test_coords_display_and_length() {
        let c = Coords::new("11", 100, 199);
        assert_eq!(c.length(), 100);
        assert_eq!(c.to_string(), "11:100..199");
    }
}
