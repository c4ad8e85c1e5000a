//! Joining local digests with remote outcomes
//!
//! The local digest list is authoritative: every digest yields exactly one
//! record, and remote outcomes for keys never collected locally are ignored.
//! `same` is exact string equality of the two fingerprints; no trimming,
//! case folding, or numeric normalization is applied.

use preflight_types::{LocalDigest, ReconcileRecord, RemoteOutcome};
use std::collections::HashMap;

/// Join digests with outcomes into the ordered record list
///
/// The result ascends by remote key, so identical inputs produce
/// byte-identical output across runs and platforms.
pub fn reconcile(
    local_digests: Vec<LocalDigest>,
    remote_outcomes: &HashMap<String, RemoteOutcome>,
) -> Vec<ReconcileRecord> {
    let mut records: Vec<ReconcileRecord> = local_digests
        .into_iter()
        .map(|digest| {
            let outcome = remote_outcomes.get(&digest.remote_key);
            record_for(digest, outcome)
        })
        .collect();

    records.sort_by(|a, b| a.remote_key.cmp(&b.remote_key));
    records
}

fn record_for(digest: LocalDigest, outcome: Option<&RemoteOutcome>) -> ReconcileRecord {
    let LocalDigest {
        remote_key,
        fingerprint,
    } = digest;

    match outcome {
        Some(RemoteOutcome::Found {
            fingerprint: remote,
        }) => {
            let same = *remote == fingerprint;
            ReconcileRecord {
                remote_key,
                local_fingerprint: fingerprint,
                remote_fingerprint: Some(remote.clone()),
                same,
                lookup_error: None,
            }
        }
        Some(RemoteOutcome::NotFound) => ReconcileRecord {
            remote_key,
            local_fingerprint: fingerprint,
            remote_fingerprint: None,
            same: false,
            lookup_error: None,
        },
        Some(RemoteOutcome::Error { detail }) => ReconcileRecord {
            remote_key,
            local_fingerprint: fingerprint,
            remote_fingerprint: None,
            same: false,
            lookup_error: Some(detail.clone()),
        },
        // A digest with no recorded outcome means the batcher was bypassed;
        // treat it as a failed lookup rather than inventing an absence.
        None => ReconcileRecord {
            remote_key,
            local_fingerprint: fingerprint,
            remote_fingerprint: None,
            same: false,
            lookup_error: Some("no remote outcome recorded for this key".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_types::RecordStatus;

    fn digest(key: &str, fingerprint: &str) -> LocalDigest {
        LocalDigest {
            remote_key: key.to_string(),
            fingerprint: fingerprint.to_string(),
        }
    }

    #[test]
    fn test_classification() {
        let mut outcomes = HashMap::new();
        outcomes.insert(
            "same.txt".to_string(),
            RemoteOutcome::Found {
                fingerprint: "100".to_string(),
            },
        );
        outcomes.insert(
            "diff.txt".to_string(),
            RemoteOutcome::Found {
                fingerprint: "999".to_string(),
            },
        );
        outcomes.insert("new.txt".to_string(), RemoteOutcome::NotFound);
        outcomes.insert(
            "err.txt".to_string(),
            RemoteOutcome::Error {
                detail: "status 500".to_string(),
            },
        );

        let records = reconcile(
            vec![
                digest("same.txt", "100"),
                digest("diff.txt", "100"),
                digest("new.txt", "100"),
                digest("err.txt", "100"),
            ],
            &outcomes,
        );

        let by_key: HashMap<&str, &ReconcileRecord> =
            records.iter().map(|r| (r.remote_key.as_str(), r)).collect();

        let same = by_key["same.txt"];
        assert!(same.same);
        assert_eq!(same.remote_fingerprint.as_deref(), Some("100"));
        assert_eq!(same.status(), RecordStatus::Same);

        let diff = by_key["diff.txt"];
        assert!(!diff.same);
        assert_eq!(diff.remote_fingerprint.as_deref(), Some("999"));
        assert_eq!(diff.status(), RecordStatus::Different);

        let new = by_key["new.txt"];
        assert!(!new.same);
        assert!(new.remote_fingerprint.is_none());
        assert!(new.lookup_error.is_none());
        assert_eq!(new.status(), RecordStatus::New);

        // Failed lookup classifies like an absence but keeps the detail.
        let err = by_key["err.txt"];
        assert!(!err.same);
        assert!(err.remote_fingerprint.is_none());
        assert_eq!(err.lookup_error.as_deref(), Some("status 500"));
        assert_eq!(err.status(), RecordStatus::New);
    }

    #[test]
    fn test_equality_is_exact_string_comparison() {
        let mut outcomes = HashMap::new();
        outcomes.insert(
            "padded.txt".to_string(),
            RemoteOutcome::Found {
                fingerprint: "0123".to_string(),
            },
        );

        let records = reconcile(vec![digest("padded.txt", "123")], &outcomes);
        assert!(!records[0].same);
    }

    #[test]
    fn test_output_sorted_regardless_of_input_order() {
        let outcomes = HashMap::new();
        let records = reconcile(
            vec![digest("z", "1"), digest("a", "2"), digest("m", "3")],
            &outcomes,
        );

        let keys: Vec<&str> = records.iter().map(|r| r.remote_key.as_str()).collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_local_digests_are_authoritative() {
        let mut outcomes = HashMap::new();
        outcomes.insert(
            "only-remote.txt".to_string(),
            RemoteOutcome::Found {
                fingerprint: "7".to_string(),
            },
        );
        outcomes.insert(
            "both.txt".to_string(),
            RemoteOutcome::Found {
                fingerprint: "8".to_string(),
            },
        );

        let records = reconcile(vec![digest("both.txt", "8")], &outcomes);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].remote_key, "both.txt");
        assert!(records[0].same);
    }

    #[test]
    fn test_missing_outcome_becomes_lookup_error() {
        let records = reconcile(vec![digest("orphan.txt", "5")], &HashMap::new());
        assert_eq!(records.len(), 1);
        assert!(!records[0].same);
        assert!(records[0].remote_fingerprint.is_none());
        assert!(records[0].lookup_error.is_some());
    }
}
