//! Core traits for preflight operations
//!
//! This module defines the seams between the reconciliation engine and its
//! pluggable parts: the content fingerprint algorithm and the remote metadata
//! provider.

use crate::RemoteOutcome;
use async_trait::async_trait;

/// Content fingerprinting for upload comparison
///
/// Implementations must be pure and deterministic: the same bytes always
/// produce the same string, with no I/O and no shared mutable state. The
/// rendered string must be comparable by exact equality with the fingerprint
/// the remote store advertises for an identical object.
pub trait Fingerprinter: Send + Sync {
    /// Compute the fingerprint of a complete byte buffer
    fn fingerprint(&self, data: &[u8]) -> String;
}

/// Access to per-object metadata in a remote object store
#[async_trait]
pub trait ObjectMetaProvider: Send + Sync {
    /// Fetch metadata for one batch of keys
    ///
    /// Returns exactly one outcome per input key, in input order. Lookup
    /// failures are reported per key as [`RemoteOutcome::Error`]; the call
    /// itself never fails, and one key's failure never affects its siblings.
    /// Retry, authentication, and transport pooling are the provider's
    /// business.
    async fn batch_get_meta(&self, bucket: &str, keys: &[String]) -> Vec<RemoteOutcome>;
}
