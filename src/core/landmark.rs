use serde::{Deserialize, Serialize};

use crate::core::feature::Feature;

/// Named anchor policy used when no explicit fraction is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AnchorPolicy {
    /// Start of the feature on its own strand
    #[default]
    #[serde(rename = "5-prime")]
    FivePrime,
    /// End of the feature on its own strand
    #[serde(rename = "3-prime")]
    ThreePrime,
    /// Lowest coordinate of the feature
    Proximal,
    /// Highest coordinate of the feature
    Distal,
    /// Floored midpoint of the feature
    Midpoint,
}

impl AnchorPolicy {
    /// Parse a policy name; unknown names yield `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "5-prime" | "5'" | "fiveprime" => Some(Self::FivePrime),
            "3-prime" | "3'" | "threeprime" => Some(Self::ThreePrime),
            "proximal" => Some(Self::Proximal),
            "distal" => Some(Self::Distal),
            "midpoint" | "mid" => Some(Self::Midpoint),
            _ => None,
        }
    }
}

/// Where inside the landmark the alignment point sits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Relative offset within the feature span, 0.0 ..= 1.0
    Fraction(f64),
    Policy(AnchorPolicy),
}

impl Default for Anchor {
    fn default() -> Self {
        Self::Policy(AnchorPolicy::default())
    }
}

/// Everything needed to align all strips on one landmark feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSpec {
    /// The landmark; its `genome` is the genome it was selected in
    pub landmark: Feature,

    #[serde(default)]
    pub anchor: Anchor,

    /// Shift applied to every window, in bp
    #[serde(default)]
    pub delta: i64,

    /// Window length, in bp
    pub length: i64,
}

impl LandmarkSpec {
    pub fn new(landmark: Feature, length: i64) -> Self {
        Self {
            landmark,
            anchor: Anchor::default(),
            delta: 0,
            length,
        }
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_delta(mut self, delta: i64) -> Self {
        self.delta = delta;
        self
    }

    /// Genome the landmark was selected in
    pub fn genome(&self) -> &str {
        &self.landmark.genome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Strand;

    #[test]
    fn test_anchor_policy_parse() {
        assert_eq!(AnchorPolicy::parse("5-prime"), Some(AnchorPolicy::FivePrime));
        assert_eq!(AnchorPolicy::parse("3-PRIME"), Some(AnchorPolicy::ThreePrime));
        assert_eq!(AnchorPolicy::parse("midpoint"), Some(AnchorPolicy::Midpoint));
        assert_eq!(AnchorPolicy::parse("sideways"), None);
    }

    #[test]
    fn test_landmark_spec_json() {
        let feature = Feature::new("f1", "A/J", "2", 1000, 1999, Strand::Minus);
        let spec = LandmarkSpec::new(feature, 3000).with_anchor(Anchor::Fraction(0.25));
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"fraction\":0.25"));

        let back: LandmarkSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
        assert_eq!(back.genome(), "A/J");
    }

    #[test]
    fn test_default_anchor_is_five_prime() {
        assert_eq!(Anchor::default(), Anchor::Policy(AnchorPolicy::FivePrime));
    }
}
