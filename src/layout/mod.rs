//! Pixel layout of regions within strips.
//!
//! - [`LayoutEngine`](engine::LayoutEngine): turns logical region weights into
//!   pixel widths and offsets inside a fixed strip width
//! - [`BorderResizer`](border::BorderResizer): drags the border between two
//!   regions, shoving neighbors when one side hits its minimum width
//!
//! ## Strip geometry
//!
//! ```text
//! |<-lead->|<-- r0 -->|gap|<---- r1 ---->|gap|<- r2 ->|
//! |<------------------ strip_width ------------------>|
//! ```
//!
//! Layout always fills the strip exactly: widths plus the leading offset plus
//! `gap * (n - 1)` equal the strip width.

pub mod border;
pub mod engine;
