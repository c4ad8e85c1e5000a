//! Pre-upload reconciliation engine for oss-preflight
//!
//! Compares a local file tree against same-named objects in a remote store
//! so that a subsequent upload can skip byte-identical files:
//!
//! - **Collection**: walk the local root, derive remote keys, skip symlinks
//! - **Fingerprinting**: bounded worker pool hashing whole files with CRC-64
//! - **Batched lookups**: sequential metadata batches with settled per-key
//!   outcomes
//! - **Reconciliation**: deterministic, ordered per-file verdicts
//! - **Post-processing**: optional JSON artifact and remove-same pass
//!
//! # Examples
//!
//! ```rust
//! use preflight_engine::{ReconcileEngine, ReconcileRequest};
//! use preflight_types::{BatchSize, ReconcileOptions, RemoteOutcome};
//!
//! # struct NullProvider;
//! # #[async_trait::async_trait]
//! # impl preflight_types::ObjectMetaProvider for NullProvider {
//! #     async fn batch_get_meta(&self, _: &str, keys: &[String]) -> Vec<RemoteOutcome> {
//! #         keys.iter().map(|_| RemoteOutcome::NotFound).collect()
//! #     }
//! # }
//! # async fn example() -> preflight_types::Result<()> {
//! let engine = ReconcileEngine::new(NullProvider);
//! let request = ReconcileRequest::new("my-bucket", "/data/site")
//!     .with_remote_dir("assets")
//!     .with_options(ReconcileOptions::new().with_max_batch_size(BatchSize::or_default(0)));
//! let result = engine.before_upload(request).await?;
//! for record in &result.records {
//!     println!("{}\t{}", record.status(), record.remote_key);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod collector;
pub mod engine;
pub mod fingerprint;
pub mod hasher;
pub mod reconcile;
pub mod report;

pub use batch::fetch_remote_meta;
pub use collector::{collect, normalize_prefix};
pub use engine::{ReconcileEngine, ReconcileRequest, ReconcileResult};
pub use fingerprint::Crc64Fingerprinter;
pub use hasher::hash_candidates;
pub use reconcile::reconcile;
pub use report::{remove_same_files, write_report, DeletionReport};
