//! Aliyun OSS metadata provider for the preflight engine
//!
//! This crate knows the endpoint table, resolves credentials from flags or
//! the environment, and implements the engine's metadata provider with
//! signed `HeadObject` requests:
//!
//! - [`Endpoint`]: validated endpoint host with region awareness
//! - [`Credentials`]: access key pair with flag-over-environment resolution
//! - [`OssClient`]: minimal HTTP client settling lookups into per-key outcomes
//!
//! # Examples
//!
//! ```rust,no_run
//! use preflight_oss::{Credentials, Endpoint, OssClient};
//!
//! # async fn example() -> preflight_types::Result<()> {
//! let endpoint: Endpoint = "oss-cn-hangzhou.aliyuncs.com".parse()?;
//! let credentials = Credentials::resolve(None, None)?;
//! let client = OssClient::new(endpoint, credentials)?;
//!
//! let meta = client.head_object("my-bucket", "assets/logo.png").await?;
//! if let Some(meta) = meta {
//!     println!("remote crc64: {:?}", meta.crc64_ecma);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod credentials;
pub mod endpoint;

pub use client::{ObjectMeta, OssClient, CRC64_HEADER};
pub use credentials::{Credentials, ENV_ACCESS_KEY_ID, ENV_ACCESS_KEY_SECRET};
pub use endpoint::Endpoint;
