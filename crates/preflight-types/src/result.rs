//! Result type alias for preflight operations

use crate::Error;

/// Result type alias for preflight operations
pub type Result<T> = std::result::Result<T, Error>;
