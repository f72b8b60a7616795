//! The strip controller and the state it carries between commands.
//!
//! A [`StripController`] owns the displayed strips, the navigation mode and
//! the region factory. Every user command goes through it:
//!
//! - strip set changes (`set_strips`, `add_strip`, `delete_strip`, `move_strip`)
//! - region edits (`split_region`, `reverse_region`, `remove_region`, borders)
//! - navigation (`zoom_scroll`, scroll lock, reference and landmark alignment)
//! - serialization (`serialize`, `restore_regions`, `export`)
//!
//! ## Navigation modes
//!
//! | Mode        | Zooming one region ...                          |
//! |-------------|-------------------------------------------------|
//! | `Free`      | moves that region only                          |
//! | `Locked`    | moves every region                              |
//! | `Reference` | remaps the other genomes when it is the reference |
//! | `Landmark`  | moves every region and rescales the landmark    |
//!
//! Listeners registered with [`StripController::add_listener`] receive one
//! [`ContextChange`] per completed command.

pub mod config;
pub mod controller;
pub mod mode;
pub mod notify;
pub mod serialize;

pub use config::{ContextConfig, StripOrder};
pub use controller::StripController;
pub use mode::NavigationMode;
pub use notify::{ChangeReason, ContextChange, ContextListener, FnListener};
pub use serialize::{ContextSnapshot, ExportKind};
