//! OSS metadata client
//!
//! A minimal client for the one call this tool needs: `HeadObject` with V1
//! header signing. The batch provider fans a chunk of keys out as concurrent
//! head requests and settles every key independently.

use crate::credentials::Credentials;
use crate::endpoint::Endpoint;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use futures::future::join_all;
use hmac::{Hmac, Mac};
use preflight_types::{Error, ObjectMetaProvider, RemoteOutcome, Result};
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use sha1::Sha1;
use std::time::Duration;
use tracing::{debug, warn};

type HmacSha1 = Hmac<Sha1>;

/// Response header carrying the CRC-64 fingerprint of an object
pub const CRC64_HEADER: &str = "x-oss-hash-crc64ecma";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Metadata of one remote object, parsed from response headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMeta {
    /// CRC-64 fingerprint as the store renders it (decimal string)
    pub crc64_ecma: Option<String>,
    /// Entity tag, quotes stripped
    pub etag: Option<String>,
    /// Object size in bytes
    pub content_length: Option<u64>,
    /// Last modification date as reported by the store
    pub last_modified: Option<String>,
}

/// Minimal OSS client for object metadata lookups
pub struct OssClient {
    http: reqwest::Client,
    endpoint: Endpoint,
    credentials: Credentials,
}

impl OssClient {
    /// Create a client for the given endpoint and credentials
    pub fn new(endpoint: Endpoint, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("oss-preflight/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    /// The endpoint this client talks to
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Fetch the metadata of a single object
    ///
    /// `Ok(None)` means the store definitively reported no such object.
    /// Any other non-success status and all transport failures are errors.
    pub async fn head_object(&self, bucket: &str, key: &str) -> Result<Option<ObjectMeta>> {
        let url = self.object_url(bucket, key);
        let date = http_date_now();
        let authorization = self.authorization("HEAD", bucket, key, &date)?;

        let response = self
            .http
            .head(&url)
            .header("Date", date.as_str())
            .header("Authorization", authorization)
            .send()
            .await
            .map_err(|e| Error::network(format!("HEAD {url}: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("HEAD '{}': not found", key);
                Ok(None)
            }
            status if status.is_success() => {
                let meta = parse_meta(response.headers());
                debug!("HEAD '{}': crc64={:?}", key, meta.crc64_ecma);
                Ok(Some(meta))
            }
            status => Err(Error::network(format!("HEAD {url}: unexpected status {status}"))),
        }
    }

    /// Virtual-host URL with each key segment percent-encoded
    fn object_url(&self, bucket: &str, key: &str) -> String {
        let encoded: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "https://{}.{}/{}",
            bucket,
            self.endpoint.host(),
            encoded.join("/")
        )
    }

    fn authorization(&self, verb: &str, bucket: &str, key: &str, date: &str) -> Result<String> {
        let signature = self.sign(verb, bucket, key, date)?;
        Ok(format!(
            "OSS {}:{}",
            self.credentials.access_key_id(),
            signature
        ))
    }

    /// V1 signature: Base64(HMAC-SHA1(secret, string-to-sign))
    fn sign(&self, verb: &str, bucket: &str, key: &str, date: &str) -> Result<String> {
        let payload = string_to_sign(verb, bucket, key, date);
        let mut mac = HmacSha1::new_from_slice(self.credentials.access_key_secret().as_bytes())
            .map_err(|e| Error::config(format!("invalid signing key: {e}")))?;
        mac.update(payload.as_bytes());
        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }
}

/// Canonical V1 string to sign for a body-less request
///
/// `VERB\n<md5>\n<content-type>\n<date>\n<resource>` with empty MD5 and
/// content-type; the canonicalized resource uses the un-encoded key.
fn string_to_sign(verb: &str, bucket: &str, key: &str, date: &str) -> String {
    format!("{verb}\n\n\n{date}\n/{bucket}/{key}")
}

/// Current time in the RFC 1123 GMT form the Date header requires
fn http_date_now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn parse_meta(headers: &HeaderMap) -> ObjectMeta {
    let text = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    ObjectMeta {
        crc64_ecma: text(CRC64_HEADER),
        etag: text("etag").map(|etag| etag.trim_matches('"').to_string()),
        content_length: text("content-length").and_then(|value| value.parse().ok()),
        last_modified: text("last-modified"),
    }
}

/// Settle one head-object result into a per-key outcome
fn settle(key: &str, result: Result<Option<ObjectMeta>>) -> RemoteOutcome {
    match result {
        Ok(Some(meta)) => match meta.crc64_ecma {
            Some(fingerprint) => RemoteOutcome::Found { fingerprint },
            // The object exists but offers nothing comparable.
            None => RemoteOutcome::Error {
                detail: format!("object '{key}' advertises no {CRC64_HEADER} header"),
            },
        },
        Ok(None) => RemoteOutcome::NotFound,
        Err(e) => {
            warn!("Lookup failed for '{}': {}", key, e);
            RemoteOutcome::Error {
                detail: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl ObjectMetaProvider for OssClient {
    async fn batch_get_meta(&self, bucket: &str, keys: &[String]) -> Vec<RemoteOutcome> {
        let lookups = keys.iter().map(|key| async move {
            let result = self.head_object(bucket, key).await;
            settle(key, result)
        });
        join_all(lookups).await
    }
}
