//! Core data types for the region/strip model.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Genome`](genome::Genome), [`Chromosome`](genome::Chromosome): immutable genome descriptions
//! - [`Region`](region::Region): one genomic window with its display geometry
//! - [`Strip`](region::Strip): the ordered regions shown for one genome
//! - [`RegionFactory`](region::RegionFactory): the only place regions are created
//! - [`Feature`](feature::Feature): a located feature, used as alignment landmark
//! - [`LandmarkSpec`](landmark::LandmarkSpec): landmark, anchor, shift and window length
//! - [`RegionId`](types::RegionId): stable handle used for all region lookups
//!
//! ## Coordinates
//!
//! All coordinates are 1-based and inclusive. A region's `reversed` flag only
//! changes how it is drawn; `start` is always the lower coordinate.
//!
//! | Field    | Before layout      | After layout          |
//! |----------|--------------------|-----------------------|
//! | width    | relative weight    | pixels                |
//! | delta_x  | 0                  | pixel offset in strip |
//! | length   | as created         | `end - start + 1`     |

pub mod error;
pub mod feature;
pub mod genome;
pub mod landmark;
pub mod region;
pub mod types;
