use thiserror::Error;

use crate::catalog::ServiceError;
use crate::parsing::ParseError;

/// Errors surfaced by navigation and strip operations.
///
/// Operations naming a region or strip that no longer exists are not errors;
/// they are silent no-ops.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Unknown genome: {0}")]
    UnknownGenome(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to parse regions: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to serialize context: {0}")]
    Json(#[from] serde_json::Error),
}
