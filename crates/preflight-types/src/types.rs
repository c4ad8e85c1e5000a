//! Core data types for oss-preflight
//!
//! This module provides the data model of a reconciliation run: candidate
//! files discovered locally, their content fingerprints, per-key remote
//! outcomes, and the reconciliation records joining the two sides.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Unique identifier for reconciliation runs
pub type RequestId = uuid::Uuid;

/// A regular file discovered under the local root, addressed by remote key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    /// Absolute path of the file on the local filesystem
    pub local_path: PathBuf,
    /// Key the file would occupy in the remote store (POSIX separators)
    pub remote_key: String,
}

impl FileCandidate {
    /// Create a new candidate
    pub fn new<P: Into<PathBuf>, K: Into<String>>(local_path: P, remote_key: K) -> Self {
        Self {
            local_path: local_path.into(),
            remote_key: remote_key.into(),
        }
    }
}

/// Content fingerprint of one local candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDigest {
    /// Remote key of the fingerprinted candidate
    pub remote_key: String,
    /// Fingerprint of the complete file contents
    pub fingerprint: String,
}

/// Outcome of a remote metadata lookup for a single key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// Object exists and advertises a content fingerprint
    Found {
        /// Fingerprint advertised by the remote store
        fingerprint: String,
    },
    /// The store definitively reports no such object
    NotFound,
    /// The lookup itself failed; existence is unknown
    Error {
        /// Description of the lookup failure
        detail: String,
    },
}

/// Terminal classification of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// Local and remote fingerprints match exactly
    Same,
    /// Remote object exists with a differing fingerprint
    Different,
    /// No comparable remote fingerprint (absent object or failed lookup)
    New,
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Same => write!(f, "SAME"),
            Self::Different => write!(f, "DIFF"),
            Self::New => write!(f, "NEW"),
        }
    }
}

/// Per-file reconciliation verdict
///
/// Serializes with the artifact field names: `path` (remote key), `hash`
/// (local fingerprint), `ossHash` (remote fingerprint, omitted when absent)
/// and `same`. A failed lookup is retained on [`lookup_error`] for callers
/// and diagnostics but never serialized.
///
/// [`lookup_error`]: ReconcileRecord::lookup_error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileRecord {
    /// Remote object key
    #[serde(rename = "path")]
    pub remote_key: String,
    /// Fingerprint of the local file contents
    #[serde(rename = "hash")]
    pub local_fingerprint: String,
    /// Fingerprint advertised by the remote store, if any
    #[serde(rename = "ossHash", skip_serializing_if = "Option::is_none", default)]
    pub remote_fingerprint: Option<String>,
    /// Whether local and remote contents are byte-identical
    pub same: bool,
    /// Detail of a failed remote lookup, kept distinct from "not found"
    #[serde(skip)]
    pub lookup_error: Option<String>,
}

impl ReconcileRecord {
    /// Classify this record for display and summary counting
    pub fn status(&self) -> RecordStatus {
        if self.same {
            RecordStatus::Same
        } else if self.remote_fingerprint.is_some() {
            RecordStatus::Different
        } else {
            RecordStatus::New
        }
    }
}

/// Statistics for one reconciliation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileStats {
    /// Number of candidate files collected and reconciled
    pub files_scanned: u64,
    /// Records whose local and remote fingerprints match
    pub same: u64,
    /// Records with a differing remote fingerprint
    pub different: u64,
    /// Records with no comparable remote fingerprint
    pub missing: u64,
    /// Subset of `missing` caused by failed lookups rather than absence
    pub lookup_errors: u64,
    /// Local files deleted by the remove-same pass
    pub files_deleted: u64,
    /// Deletions that failed
    pub delete_failures: u64,
    /// Total duration of the run
    pub duration: Duration,
}

impl ReconcileStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive classification counters from a record list
    pub fn from_records(records: &[ReconcileRecord]) -> Self {
        let mut stats = Self {
            files_scanned: records.len() as u64,
            ..Self::default()
        };
        for record in records {
            match record.status() {
                RecordStatus::Same => stats.same += 1,
                RecordStatus::Different => stats.different += 1,
                RecordStatus::New => stats.missing += 1,
            }
            if record.lookup_error.is_some() {
                stats.lookup_errors += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, local: &str, remote: Option<&str>, same: bool) -> ReconcileRecord {
        ReconcileRecord {
            remote_key: key.to_string(),
            local_fingerprint: local.to_string(),
            remote_fingerprint: remote.map(String::from),
            same,
            lookup_error: None,
        }
    }

    #[test]
    fn test_record_status_classification() {
        assert_eq!(record("k", "1", Some("1"), true).status(), RecordStatus::Same);
        assert_eq!(
            record("k", "1", Some("2"), false).status(),
            RecordStatus::Different
        );
        assert_eq!(record("k", "1", None, false).status(), RecordStatus::New);
    }

    #[test]
    fn test_record_serializes_with_artifact_field_names() {
        let json = serde_json::to_value(record("assets/a.txt", "123", Some("123"), true))
            .expect("serializable record");
        assert_eq!(json["path"], "assets/a.txt");
        assert_eq!(json["hash"], "123");
        assert_eq!(json["ossHash"], "123");
        assert_eq!(json["same"], true);
    }

    #[test]
    fn test_absent_remote_hash_is_omitted() {
        let mut rec = record("assets/b.txt", "42", None, false);
        rec.lookup_error = Some("status 500".to_string());
        let json = serde_json::to_value(&rec).expect("serializable record");

        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("ossHash"));
        // Lookup detail is caller-facing only, never part of the artifact.
        assert!(!obj.contains_key("lookup_error"));
        assert_eq!(obj.len(), 3);
    }

    #[test]
    fn test_record_round_trip() {
        let rec = record("assets/a.txt", "123", Some("456"), false);
        let json = serde_json::to_string(&rec).expect("serialize");
        let back: ReconcileRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, rec);
    }

    #[test]
    fn test_status_display_tokens() {
        assert_eq!(RecordStatus::Same.to_string(), "SAME");
        assert_eq!(RecordStatus::Different.to_string(), "DIFF");
        assert_eq!(RecordStatus::New.to_string(), "NEW");
    }

    #[test]
    fn test_stats_from_records() {
        let mut errored = record("c", "3", None, false);
        errored.lookup_error = Some("timeout".to_string());
        let records = vec![
            record("a", "1", Some("1"), true),
            record("b", "2", Some("9"), false),
            errored,
            record("d", "4", None, false),
        ];

        let stats = ReconcileStats::from_records(&records);
        assert_eq!(stats.files_scanned, 4);
        assert_eq!(stats.same, 1);
        assert_eq!(stats.different, 1);
        assert_eq!(stats.missing, 2);
        assert_eq!(stats.lookup_errors, 1);
    }
}
