//! Error types and handling for oss-preflight
//!
//! This module provides the error taxonomy for reconciliation runs. Errors are
//! split into fatal conditions that abort a run (missing root directory, local
//! read failures, bad configuration) and non-fatal conditions that are reported
//! and carried in results (per-key remote lookups, artifact persistence, local
//! deletions).

use std::path::PathBuf;

/// Main error type for preflight operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Local root directory does not exist or is not a directory
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// Path that was expected to be a directory
        path: PathBuf,
    },

    /// A local candidate file could not be read
    #[error("Failed to read '{path}': {message}")]
    FileRead {
        /// Path to the file that could not be read
        path: PathBuf,
        /// Error message from the read operation
        message: String,
    },

    /// Remote metadata lookup failed for a single key
    #[error("Remote lookup failed for '{key}': {detail}")]
    RemoteLookup {
        /// Remote object key whose lookup failed
        key: String,
        /// Description of the lookup failure
        detail: String,
    },

    /// The result artifact could not be written
    #[error("Failed to write result file '{path}': {message}")]
    Persistence {
        /// Path of the artifact that could not be written
        path: PathBuf,
        /// Error message from the write operation
        message: String,
    },

    /// A local file scheduled for removal could not be deleted
    #[error("Failed to delete '{path}': {message}")]
    Deletion {
        /// Path to the file that could not be deleted
        path: PathBuf,
        /// Error message from the delete operation
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// Generic error with custom message
    #[error("{message}")]
    Other {
        /// Custom error message
        message: String,
    },
}

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local filesystem errors
    Io,
    /// Configuration errors
    Config,
    /// Transport-level network errors
    Network,
    /// Per-key remote lookup failures
    Lookup,
    /// Result artifact persistence failures
    Persistence,
    /// Local deletion failures
    Deletion,
    /// Other errors
    Other,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectoryNotFound { .. } | Self::FileRead { .. } | Self::Io { .. } => {
                ErrorKind::Io
            }
            Self::Config { .. } => ErrorKind::Config,
            Self::Network { .. } => ErrorKind::Network,
            Self::RemoteLookup { .. } => ErrorKind::Lookup,
            Self::Persistence { .. } => ErrorKind::Persistence,
            Self::Deletion { .. } => ErrorKind::Deletion,
            Self::Other { .. } => ErrorKind::Other,
        }
    }

    /// Check whether this error aborts a reconciliation run
    ///
    /// Local read failures and bad configuration are fatal. Remote lookup,
    /// persistence, and deletion failures are reported per item and never
    /// abort the run.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::DirectoryNotFound { .. }
            | Self::FileRead { .. }
            | Self::Config { .. }
            | Self::Network { .. }
            | Self::Io { .. }
            | Self::Other { .. } => true,
            Self::RemoteLookup { .. } | Self::Persistence { .. } | Self::Deletion { .. } => false,
        }
    }

    /// Create a new directory-not-found error
    pub fn directory_not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Create a new file-read error
    pub fn file_read<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::FileRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new remote-lookup error
    pub fn remote_lookup<K: Into<String>, S: Into<String>>(key: K, detail: S) -> Self {
        Self::RemoteLookup {
            key: key.into(),
            detail: detail.into(),
        }
    }

    /// Create a new persistence error
    pub fn persistence<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Persistence {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new deletion error
    pub fn deletion<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Deletion {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fatality_policy() {
        assert!(Error::directory_not_found("/missing").is_fatal());
        assert!(Error::file_read("/gone.txt", "vanished").is_fatal());
        assert!(Error::config("bad batch size").is_fatal());

        assert!(!Error::remote_lookup("assets/a.txt", "timeout").is_fatal());
        assert!(!Error::persistence("/out.json", "read-only").is_fatal());
        assert!(!Error::deletion("/a.txt", "busy").is_fatal());
    }

    #[test]
    fn test_error_display() {
        let err = Error::directory_not_found("/data/site");
        assert_eq!(err.to_string(), "Directory not found: /data/site");

        let err = Error::remote_lookup("assets/a.txt", "status 500");
        assert_eq!(
            err.to_string(),
            "Remote lookup failed for 'assets/a.txt': status 500"
        );

        let err = Error::file_read("/data/a.txt", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to read '/data/a.txt': permission denied"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.is_fatal());
    }

    proptest! {
        #[test]
        fn test_kind_matches_constructor(message in ".*", key in "[a-z/.]{1,40}") {
            let cases = vec![
                (Error::file_read("/p", message.clone()), ErrorKind::Io),
                (Error::remote_lookup(key, message.clone()), ErrorKind::Lookup),
                (Error::persistence("/p", message.clone()), ErrorKind::Persistence),
                (Error::deletion("/p", message.clone()), ErrorKind::Deletion),
                (Error::config(message.clone()), ErrorKind::Config),
                (Error::network(message.clone()), ErrorKind::Network),
                (Error::other(message.clone()), ErrorKind::Other),
            ];

            for (error, kind) in cases {
                prop_assert_eq!(error.kind(), kind);
                // Non-fatal kinds are exactly the per-item ones.
                let non_fatal = matches!(
                    kind,
                    ErrorKind::Lookup | ErrorKind::Persistence | ErrorKind::Deletion
                );
                prop_assert_eq!(!error.is_fatal(), non_fatal);
            }
        }
    }
}
