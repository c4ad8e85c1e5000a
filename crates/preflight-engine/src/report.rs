//! Result persistence and remove-same post-processing
//!
//! Both operations run after reconciliation and are strictly best-effort:
//! a failed artifact write or a failed deletion is reported but never
//! invalidates the in-memory records.

use preflight_types::{Error, FileCandidate, ReconcileRecord, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persist the ordered record list as a JSON artifact
///
/// Creates missing parent directories. Failures map to
/// [`Error::Persistence`]; the caller decides that they are non-fatal.
pub async fn write_report(path: &Path, records: &[ReconcileRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::persistence(
                    path,
                    format!("failed to create '{}': {}", parent.display(), e),
                )
            })?;
        }
    }

    let json =
        serde_json::to_vec_pretty(records).map_err(|e| Error::persistence(path, e.to_string()))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| Error::persistence(path, e.to_string()))?;

    debug!("Wrote {} records to '{}'", records.len(), path.display());
    Ok(())
}

/// Outcome of the remove-same pass
#[derive(Debug, Default)]
pub struct DeletionReport {
    /// Number of local files removed
    pub deleted: u64,
    /// Per-file failures; deletion never aborts the run
    pub failures: Vec<Error>,
}

/// Delete local files whose remote copy is byte-identical
///
/// Only records with `same == true` are touched. Paths are resolved through
/// the candidate list the records were derived from. Each failure is
/// collected and the remaining deletions proceed.
pub async fn remove_same_files(
    records: &[ReconcileRecord],
    candidates: &[FileCandidate],
) -> DeletionReport {
    let paths: HashMap<&str, &PathBuf> = candidates
        .iter()
        .map(|candidate| (candidate.remote_key.as_str(), &candidate.local_path))
        .collect();

    let mut report = DeletionReport::default();
    for record in records.iter().filter(|record| record.same) {
        let path = match paths.get(record.remote_key.as_str()) {
            Some(path) => *path,
            None => {
                warn!(
                    "No local path recorded for '{}'; skipping deletion",
                    record.remote_key
                );
                report.failures.push(Error::deletion(
                    PathBuf::from(&record.remote_key),
                    "no local path recorded for this key",
                ));
                continue;
            }
        };

        match tokio::fs::remove_file(path).await {
            Ok(()) => {
                debug!("Removed '{}' (identical remotely)", path.display());
                report.deleted += 1;
            }
            Err(e) => {
                warn!("Failed to delete '{}': {}", path.display(), e);
                report.failures.push(Error::deletion(path, e.to_string()));
            }
        }
    }

    report
}
