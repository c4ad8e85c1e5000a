//! Core type system and error handling for oss-preflight
//!
//! This crate provides the foundational types shared across the preflight
//! workspace:
//!
//! - **Error handling**: structured error taxonomy separating fatal run
//!   aborts from per-item non-fatal failures
//! - **Core types**: file candidates, digests, remote outcomes, and
//!   reconciliation records with their artifact serialization
//! - **Traits**: the fingerprint and remote metadata provider seams
//! - **Configuration**: validated tunables carried in explicit option values
//!
//! # Examples
//!
//! ```rust
//! use preflight_types::{BatchSize, ReconcileOptions};
//!
//! let options = ReconcileOptions::new()
//!     .with_max_batch_size(BatchSize::or_default(0))
//!     .remove_same(true);
//! assert_eq!(options.max_batch_size.get(), 100);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{BatchSize, ReconcileOptions, WorkerCount};
pub use error::{Error, ErrorKind};
pub use result::Result;
pub use traits::{Fingerprinter, ObjectMetaProvider};
pub use types::{
    FileCandidate, LocalDigest, ReconcileRecord, ReconcileStats, RecordStatus, RemoteOutcome,
    RequestId,
};
