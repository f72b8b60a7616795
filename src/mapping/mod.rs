//! Computing region windows in other genomes.
//!
//! Two strategies place windows in a target genome:
//!
//! - [`synteny`]: **Reference mode**. A reference region is translated through
//!   synteny blocks and the resulting fragments are coalesced into contiguous
//!   regions.
//! - [`landmark`]: **Landmark mode**. Every genome gets a window of a fixed
//!   length anchored on the counterpart(s) of a landmark feature. When a genome
//!   has no counterpart, the position is guessed from the nearest flanking
//!   features that do.
//!
//! Both compute per-genome results concurrently and only return once every
//! genome is done, so callers can apply all updates in one step.
//!
//! ## Coalescing synteny blocks
//!
//! | Blocks (index, chr)        | Result                         |
//! |----------------------------|--------------------------------|
//! | (0, 1) (1, 1) (3, 1)       | `0..=1` merged, `3` on its own |
//! | (2, 1) (2, 1)              | duplicate dropped              |
//! | (4, 1) (5, X)              | two regions, chromosome change |

pub mod landmark;
pub mod synteny;

pub use landmark::{
    anchor_position, compute_landmark_region, compute_landmark_regions, guess_landmark_region,
    landmark_spec_for_feature,
};
pub use synteny::{combine_regions, map_region_to_genome, map_regions};
