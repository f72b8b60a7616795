use serde::{Deserialize, Serialize};

use crate::core::landmark::LandmarkSpec;
use crate::core::types::RegionId;

/// How navigation in one strip propagates to the others.
///
/// The variants are mutually exclusive; entering one leaves any other.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum NavigationMode {
    /// Each region moves on its own
    #[default]
    Free,
    /// Every region zooms and scrolls together
    Locked,
    /// Other genomes follow the reference region through synteny
    Reference(RegionId),
    /// Every genome shows a window anchored on a landmark feature
    Landmark(LandmarkSpec),
}

impl NavigationMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Locked => "locked",
            Self::Reference(_) => "reference",
            Self::Landmark(_) => "landmark",
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }

    pub fn reference(&self) -> Option<RegionId> {
        match self {
            Self::Reference(id) => Some(*id),
            _ => None,
        }
    }

    pub fn landmark(&self) -> Option<&LandmarkSpec> {
        match self {
            Self::Landmark(spec) => Some(spec),
            _ => None,
        }
    }

    pub fn landmark_mut(&mut self) -> Option<&mut LandmarkSpec> {
        match self {
            Self::Landmark(spec) => Some(spec),
            _ => None,
        }
    }

    /// True when zooming one region should move every region
    pub fn zooms_all(&self) -> bool {
        matches!(self, Self::Locked | Self::Landmark(_))
    }
}

impl std::fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference(id) => write!(f, "reference({id})"),
            Self::Landmark(spec) => write!(f, "landmark({})", spec.landmark.label()),
            _ => f.write_str(self.name()),
        }
    }
}
