//! Sequential batched remote metadata fetching
//!
//! Keys are split into consecutive chunks and dispatched one batch at a time;
//! the next batch is not sent until the previous one resolved. Per-key
//! failures are data, not control flow: one key's lookup error never discards
//! its siblings.

use preflight_types::{BatchSize, ObjectMetaProvider, RemoteOutcome};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fetch remote metadata for every key, batch by batch
///
/// Returns a map from key to its settled outcome. The provider contract
/// promises one outcome per key in input order; a misbehaving provider that
/// returns the wrong arity has the missing positions padded with lookup
/// errors rather than dropping keys.
pub async fn fetch_remote_meta(
    provider: &dyn ObjectMetaProvider,
    bucket: &str,
    keys: &[String],
    batch_size: BatchSize,
) -> HashMap<String, RemoteOutcome> {
    let mut outcomes = HashMap::with_capacity(keys.len());
    if keys.is_empty() {
        return outcomes;
    }

    let size = batch_size.get();
    let batches = keys.len().div_ceil(size);
    debug!(
        "Fetching remote metadata for {} keys in {} batches of at most {}",
        keys.len(),
        batches,
        size
    );

    for (index, chunk) in keys.chunks(size).enumerate() {
        debug!(
            "Dispatching batch {}/{} ({} keys)",
            index + 1,
            batches,
            chunk.len()
        );
        let results = provider.batch_get_meta(bucket, chunk).await;

        if results.len() != chunk.len() {
            warn!(
                "Provider returned {} outcomes for {} keys; padding missing positions as lookup errors",
                results.len(),
                chunk.len()
            );
        }

        let mut results = results.into_iter();
        for key in chunk {
            let outcome = results.next().unwrap_or_else(|| RemoteOutcome::Error {
                detail: "provider returned no outcome for this key".to_string(),
            });
            outcomes.insert(key.clone(), outcome);
        }
    }

    outcomes
}
