//! # genome-strips
//!
//! The navigation core of a comparative multi-genome browser.
//!
//! Every displayed genome gets a horizontal *strip* holding one or more
//! genomic *regions*. The core keeps those regions consistent while the user
//! zooms, scrolls, splits, reorders and resizes them, and it can line all
//! genomes up in two ways:
//!
//! - **Reference mode**: one region is the reference; the other genomes show
//!   its synteny-mapped counterparts.
//! - **Landmark mode**: every genome shows a window of the same length
//!   anchored on a landmark feature's counterpart (or, failing that, on a
//!   position guessed from flanking features).
//!
//! Pixel widths are derived from region weights by a layout pass, and the
//! whole view round-trips through a compact `regions=` string.
//!
//! ## Example
//!
//! ```rust,no_run
//! use genome_strips::catalog::store::Dataset;
//! use genome_strips::context::{ContextConfig, StripController};
//! use std::path::Path;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let dataset = Dataset::load_from_file(Path::new("mouse_strains.json"))?;
//! let features = dataset.feature_store();
//! let translator = dataset.translator();
//! let genomes = dataset.catalog.names();
//!
//! let mut controller =
//!     StripController::new(dataset.catalog, features, translator, ContextConfig::default());
//! controller.set_strips(&genomes).await?;
//! controller.set_scroll_lock(true);
//!
//! let first = controller.strips()[0].regions[0].id;
//! controller.zoom_scroll(first, 0.5, 0.1).await?;
//! println!("{}", controller.serialize());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Regions, strips, genomes, features and landmark specs
//! - [`layout`]: Pixel layout and border dragging
//! - [`navigation`]: Zoom, scroll, split and reverse on single regions
//! - [`mapping`]: Synteny and landmark window computation
//! - [`context`]: The strip controller, navigation modes and serialization
//! - [`catalog`]: Datasets and the feature/synteny collaborators
//! - [`parsing`]: Chromosome lists from `.fai` and `.dict` files
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod context;
pub mod core;
pub mod layout;
pub mod mapping;
pub mod navigation;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::{Dataset, GenomeCatalog};
pub use context::{ContextConfig, NavigationMode, StripController};
pub use core::error::ContextError;
pub use core::region::{Region, RegionSpec, Strip};
pub use core::types::*;
