//! Shared helpers: coordinate validation and input limits.

pub mod validation;
