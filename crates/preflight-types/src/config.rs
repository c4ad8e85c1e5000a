//! Configuration types for oss-preflight
//!
//! This module provides type-safe tunables with validation. All knobs travel
//! in explicit option values threaded through calls; there is no process-global
//! configuration state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hashing worker-pool size with validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCount(usize);

impl WorkerCount {
    /// Minimum worker count
    pub const MIN: usize = 1;
    /// Maximum worker count
    pub const MAX: usize = 256;
    /// Default worker count
    pub const DEFAULT: usize = 8;

    /// Create a new worker count with validation
    pub fn new(count: usize) -> Result<Self, String> {
        if count < Self::MIN {
            Err(format!(
                "Worker count {} is below minimum {}",
                count,
                Self::MIN
            ))
        } else if count > Self::MAX {
            Err(format!(
                "Worker count {} exceeds maximum {}",
                count,
                Self::MAX
            ))
        } else {
            Ok(Self(count))
        }
    }

    /// Get the worker count value
    pub fn get(self) -> usize {
        self.0
    }

    /// Effective pool size for `items` work items
    ///
    /// The pool never exceeds the number of items and never drops below one.
    pub fn bounded_by(self, items: usize) -> usize {
        self.0.min(items).max(1)
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Remote metadata batch size with validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSize(usize);

impl BatchSize {
    /// Minimum batch size
    pub const MIN: usize = 1;
    /// Maximum batch size
    pub const MAX: usize = 10_000;
    /// Default batch size
    pub const DEFAULT: usize = 100;

    /// Create a new batch size with validation
    pub fn new(size: usize) -> Result<Self, String> {
        if size < Self::MIN {
            Err(format!("Batch size {} is below minimum {}", size, Self::MIN))
        } else if size > Self::MAX {
            Err(format!("Batch size {} exceeds maximum {}", size, Self::MAX))
        } else {
            Ok(Self(size))
        }
    }

    /// Create a batch size, coercing out-of-range requests at the edge
    ///
    /// Callers parsing raw integers use this: a non-positive request falls
    /// back to [`Self::DEFAULT`], an oversized one clamps to [`Self::MAX`].
    /// Asking for a larger batch never yields a smaller one.
    pub fn or_default(size: usize) -> Self {
        if size == 0 {
            Self::default()
        } else {
            Self(size.min(Self::MAX))
        }
    }

    /// Get the batch size value
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Options for one reconciliation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileOptions {
    /// Size of the local hashing worker pool
    pub concurrency: WorkerCount,
    /// Maximum number of keys per remote metadata batch
    pub max_batch_size: BatchSize,
    /// Persist the record list as a JSON artifact at this path
    pub write_result_to: Option<PathBuf>,
    /// Delete local files whose remote copy is byte-identical
    pub remove_same: bool,
    /// Emit per-key diagnostics for failed remote lookups
    pub verbose: bool,
}

impl ReconcileOptions {
    /// Create options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hashing worker-pool size
    pub fn with_concurrency(mut self, concurrency: WorkerCount) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the remote metadata batch size
    pub fn with_max_batch_size(mut self, max_batch_size: BatchSize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Persist the record list to the given path after reconciliation
    pub fn write_result_to<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.write_result_to = Some(path.into());
        self
    }

    /// Enable deletion of local files that are byte-identical remotely
    pub fn remove_same(mut self, remove: bool) -> Self {
        self.remove_same = remove;
        self
    }

    /// Enable per-key diagnostics for failed remote lookups
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
