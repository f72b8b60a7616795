//! Coordinate math for zooming, scrolling, splitting and reversing regions.
//!
//! All functions here operate on plain regions and strips; deciding *which*
//! regions move (one region, every region in locked mode, the reference region
//! in reference mode) is the controller's job.
//!
//! ## Zoom/scroll
//!
//! For a region of length `L`, zoom factor `z` and scroll factor `s`:
//!
//! ```text
//! L2    = z * L
//! delta = s * max(L, L2)        (negated for reversed regions)
//! start = floor(mid - L2/2 + delta + 1)
//! end   = floor(start + L2 - 1)
//! ```

pub mod transform;

pub use transform::{
    reverse_region, split_region, validate_factors, zoom_scroll_all, zoom_scroll_region,
};
