//! Bounded-concurrency local fingerprinting
//!
//! A fixed-size worker pool reads each candidate fully into memory and
//! fingerprints the complete contents. The first read failure aborts the
//! whole operation; a digest list is only ever returned complete.

use futures::stream::{self, StreamExt, TryStreamExt};
use preflight_types::{Error, FileCandidate, Fingerprinter, LocalDigest, Result, WorkerCount};
use std::sync::Arc;
use tracing::{debug, trace};

/// Fingerprint every candidate with a bounded worker pool
///
/// The pool size is `workers` capped by the candidate count. Workers pull
/// from a shared queue, so completion order is nondeterministic; the result
/// is re-sorted ascending by remote key before being returned.
pub async fn hash_candidates(
    candidates: &[FileCandidate],
    fingerprinter: Arc<dyn Fingerprinter>,
    workers: WorkerCount,
) -> Result<Vec<LocalDigest>> {
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let pool = workers.bounded_by(candidates.len());
    debug!("Hashing {} files with {} workers", candidates.len(), pool);

    let mut digests: Vec<LocalDigest> = stream::iter(candidates.iter().cloned())
        .map(|candidate| {
            let fingerprinter = Arc::clone(&fingerprinter);
            async move {
                let data = tokio::fs::read(&candidate.local_path)
                    .await
                    .map_err(|e| Error::file_read(&candidate.local_path, e.to_string()))?;
                let fingerprint = fingerprinter.fingerprint(&data);
                trace!("Hashed '{}' as {}", candidate.remote_key, fingerprint);
                Ok::<_, Error>(LocalDigest {
                    remote_key: candidate.remote_key,
                    fingerprint,
                })
            }
        })
        .buffer_unordered(pool)
        .try_collect()
        .await?;

    digests.sort_by(|a, b| a.remote_key.cmp(&b.remote_key));
    Ok(digests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::Crc64Fingerprinter;
    use std::fs;
    use tempfile::TempDir;

    fn candidate(temp: &TempDir, name: &str, content: &str) -> FileCandidate {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        FileCandidate::new(path, name)
    }

    fn fingerprinter() -> Arc<dyn Fingerprinter> {
        Arc::new(Crc64Fingerprinter)
    }

    #[tokio::test]
    async fn test_hashes_every_candidate_sorted_by_key() {
        let temp = TempDir::new().unwrap();
        let candidates = vec![
            candidate(&temp, "zeta.txt", "zzz"),
            candidate(&temp, "alpha.txt", "aaa"),
            candidate(&temp, "mid.txt", "mmm"),
        ];

        let digests = hash_candidates(&candidates, fingerprinter(), WorkerCount::default())
            .await
            .unwrap();

        let keys: Vec<&str> = digests.iter().map(|d| d.remote_key.as_str()).collect();
        assert_eq!(keys, vec!["alpha.txt", "mid.txt", "zeta.txt"]);
        assert_eq!(
            digests[0].fingerprint,
            Crc64Fingerprinter.fingerprint(b"aaa")
        );
    }

    #[tokio::test]
    async fn test_read_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let mut candidates = vec![
            candidate(&temp, "ok.txt", "fine"),
            candidate(&temp, "also-ok.txt", "fine"),
        ];
        candidates.push(FileCandidate::new(
            temp.path().join("vanished.txt"),
            "vanished.txt",
        ));

        let err = hash_candidates(&candidates, fingerprinter(), WorkerCount::default())
            .await
            .unwrap_err();
        match err {
            Error::FileRead { path, .. } => {
                assert!(path.ends_with("vanished.txt"));
            }
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pool_smaller_than_candidates() {
        let temp = TempDir::new().unwrap();
        let candidates: Vec<FileCandidate> = (0..9)
            .map(|i| candidate(&temp, &format!("f{i}.txt"), &format!("content-{i}")))
            .collect();

        let digests =
            hash_candidates(&candidates, fingerprinter(), WorkerCount::new(2).unwrap())
                .await
                .unwrap();
        assert_eq!(digests.len(), 9);
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits() {
        let digests = hash_candidates(&[], fingerprinter(), WorkerCount::default())
            .await
            .unwrap();
        assert!(digests.is_empty());
    }
}
