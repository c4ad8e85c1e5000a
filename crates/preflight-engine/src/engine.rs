//! Reconciliation orchestration
//!
//! Ties the pipeline together: collect candidates, fingerprint locally and
//! fetch remote metadata concurrently, join the two sides, then run the
//! optional persistence and remove-same passes.

use crate::batch::fetch_remote_meta;
use crate::collector::collect;
use crate::fingerprint::Crc64Fingerprinter;
use crate::hasher::hash_candidates;
use crate::reconcile::reconcile;
use crate::report::{remove_same_files, write_report};
use preflight_types::{
    Error, Fingerprinter, ObjectMetaProvider, ReconcileOptions, ReconcileRecord, ReconcileStats,
    RequestId, Result,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Parameters of one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    /// Remote bucket holding the would-be upload targets
    pub bucket: String,
    /// Local root directory
    pub local_dir: PathBuf,
    /// Raw remote key prefix; empty targets the bucket root
    pub remote_dir: String,
    /// Tunables for this run
    pub options: ReconcileOptions,
    /// Correlates log events of this run
    pub request_id: RequestId,
}

impl ReconcileRequest {
    /// Create a new request with default options
    pub fn new<B: Into<String>, P: Into<PathBuf>>(bucket: B, local_dir: P) -> Self {
        Self {
            bucket: bucket.into(),
            local_dir: local_dir.into(),
            remote_dir: String::new(),
            options: ReconcileOptions::default(),
            request_id: RequestId::new_v4(),
        }
    }

    /// Set the remote key prefix
    pub fn with_remote_dir<S: Into<String>>(mut self, remote_dir: S) -> Self {
        self.remote_dir = remote_dir.into();
        self
    }

    /// Set the run options
    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of one reconciliation run
#[derive(Debug, Clone)]
pub struct ReconcileResult {
    /// Identifier of the run that produced this result
    pub request_id: RequestId,
    /// Ordered per-file verdicts, ascending by remote key
    pub records: Vec<ReconcileRecord>,
    /// Run statistics
    pub stats: ReconcileStats,
    /// Set when the result artifact could not be written
    pub persistence_error: Option<String>,
}

/// Pre-upload reconciliation engine
///
/// Generic over the remote metadata provider so tests can substitute a fake
/// store and production code can plug in any object store that advertises
/// content fingerprints.
pub struct ReconcileEngine<P> {
    provider: P,
    fingerprinter: Arc<dyn Fingerprinter>,
}

impl<P: ObjectMetaProvider> ReconcileEngine<P> {
    /// Create an engine with the default CRC-64 fingerprinter
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            fingerprinter: Arc::new(Crc64Fingerprinter),
        }
    }

    /// Replace the fingerprint algorithm
    ///
    /// The algorithm must match whatever the remote store advertises, or
    /// every record will classify as different.
    pub fn with_fingerprinter(mut self, fingerprinter: Arc<dyn Fingerprinter>) -> Self {
        self.fingerprinter = fingerprinter;
        self
    }

    /// Reconcile the local tree against same-named remote objects
    ///
    /// Returns the ordered record list plus run statistics. Fatal errors
    /// (missing root, unreadable candidate) abort the run; lookup,
    /// persistence, and deletion failures are carried in the result.
    pub async fn before_upload(&self, request: ReconcileRequest) -> Result<ReconcileResult> {
        let start = Instant::now();
        let options = &request.options;
        info!(
            "Reconcile {} started: bucket '{}', local '{}', prefix '{}'",
            request.request_id,
            request.bucket,
            request.local_dir.display(),
            request.remote_dir
        );

        let candidates = collect(&request.local_dir, &request.remote_dir)?;
        let keys: Vec<String> = candidates
            .iter()
            .map(|candidate| candidate.remote_key.clone())
            .collect();

        // Hashing and metadata fetching overlap; a fatal read error aborts
        // the run without draining the remaining batches.
        let hash_task = hash_candidates(
            &candidates,
            Arc::clone(&self.fingerprinter),
            options.concurrency,
        );
        let fetch_task = fetch_remote_meta(
            &self.provider,
            &request.bucket,
            &keys,
            options.max_batch_size,
        );
        let (digests, outcomes) =
            tokio::try_join!(hash_task, async { Ok::<_, Error>(fetch_task.await) })?;

        let records = reconcile(digests, &outcomes);
        if options.verbose {
            for record in &records {
                if let Some(detail) = &record.lookup_error {
                    warn!(
                        "{}",
                        Error::remote_lookup(record.remote_key.clone(), detail.clone())
                    );
                }
            }
        }

        let mut stats = ReconcileStats::from_records(&records);
        let mut persistence_error = None;

        if let Some(path) = &options.write_result_to {
            if let Err(e) = write_report(path, &records).await {
                warn!("{}", e);
                persistence_error = Some(e.to_string());
            }
        }

        if options.remove_same {
            let deletion = remove_same_files(&records, &candidates).await;
            stats.files_deleted = deletion.deleted;
            stats.delete_failures = deletion.failures.len() as u64;
        }

        stats.duration = start.elapsed();
        info!(
            "Reconcile {} finished in {:?}: {} same, {} different, {} missing of {} files",
            request.request_id,
            stats.duration,
            stats.same,
            stats.different,
            stats.missing,
            stats.files_scanned
        );

        Ok(ReconcileResult {
            request_id: request.request_id,
            records,
            stats,
            persistence_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = ReconcileRequest::new("my-bucket", "/data/site");
        assert_eq!(request.bucket, "my-bucket");
        assert_eq!(request.remote_dir, "");
        assert_eq!(request.options.concurrency.get(), 8);
        assert!(!request.options.remove_same);
    }

    #[test]
    fn test_request_builder() {
        let request = ReconcileRequest::new("b", "/d")
            .with_remote_dir("assets")
            .with_options(ReconcileOptions::new().remove_same(true));
        assert_eq!(request.remote_dir, "assets");
        assert!(request.options.remove_same);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let a = ReconcileRequest::new("b", "/d");
        let b = ReconcileRequest::new("b", "/d");
        assert_ne!(a.request_id, b.request_id);
    }
}
