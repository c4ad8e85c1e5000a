//! Access credentials and environment resolution
//!
//! Explicit values always win over the environment, matching the CLI
//! contract: `--ak`/`--sk` beat `OSS_ACCESS_KEY_ID`/`OSS_ACCESS_KEY_SECRET`.

use preflight_types::{Error, Result};

/// Environment variable holding the access key id
pub const ENV_ACCESS_KEY_ID: &str = "OSS_ACCESS_KEY_ID";
/// Environment variable holding the access key secret
pub const ENV_ACCESS_KEY_SECRET: &str = "OSS_ACCESS_KEY_SECRET";

/// A validated access key pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    access_key_secret: String,
}

impl Credentials {
    /// Create credentials from explicit values
    pub fn new<I: Into<String>, S: Into<String>>(
        access_key_id: I,
        access_key_secret: S,
    ) -> Result<Self> {
        let access_key_id = access_key_id.into();
        let access_key_secret = access_key_secret.into();
        if access_key_id.is_empty() {
            return Err(Error::config("access key id must not be empty"));
        }
        if access_key_secret.is_empty() {
            return Err(Error::config("access key secret must not be empty"));
        }
        Ok(Self {
            access_key_id,
            access_key_secret,
        })
    }

    /// Read both keys from the environment
    pub fn from_env() -> Result<Self> {
        Self::resolve(None, None)
    }

    /// Resolve credentials from explicit values with environment fallback
    ///
    /// An explicit non-empty value wins; otherwise the corresponding
    /// environment variable is consulted. Missing either half is a
    /// configuration error naming both sources.
    pub fn resolve(access_key_id: Option<String>, access_key_secret: Option<String>) -> Result<Self> {
        let id = access_key_id
            .filter(|value| !value.is_empty())
            .or_else(|| std::env::var(ENV_ACCESS_KEY_ID).ok())
            .unwrap_or_default();
        let secret = access_key_secret
            .filter(|value| !value.is_empty())
            .or_else(|| std::env::var(ENV_ACCESS_KEY_SECRET).ok())
            .unwrap_or_default();

        if id.is_empty() || secret.is_empty() {
            return Err(Error::config(format!(
                "AccessKeyId / AccessKeySecret not provided (pass --ak/--sk or set {ENV_ACCESS_KEY_ID}/{ENV_ACCESS_KEY_SECRET})"
            )));
        }
        Self::new(id, secret)
    }

    /// The access key id
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// The access key secret, for request signing
    pub(crate) fn access_key_secret(&self) -> &str {
        &self.access_key_secret
    }
}

// The secret never appears in logs or debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_values_validate() {
        let creds = Credentials::new("AKID", "SECRET").unwrap();
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(creds.access_key_secret(), "SECRET");

        assert!(Credentials::new("", "SECRET").is_err());
        assert!(Credentials::new("AKID", "").is_err());
    }

    #[test]
    fn test_explicit_arguments_bypass_environment() {
        // Explicit values short-circuit; the environment is never consulted.
        let creds =
            Credentials::resolve(Some("flag-id".to_string()), Some("flag-secret".to_string()))
                .unwrap();
        assert_eq!(creds.access_key_id(), "flag-id");
        assert_eq!(creds.access_key_secret(), "flag-secret");
    }

    #[test]
    fn test_environment_resolution_order() {
        // Sequential scenarios in one test so no other test races the env.
        std::env::set_var(ENV_ACCESS_KEY_ID, "env-id");
        std::env::set_var(ENV_ACCESS_KEY_SECRET, "env-secret");

        let creds = Credentials::resolve(None, None).unwrap();
        assert_eq!(creds.access_key_id(), "env-id");
        assert_eq!(creds.access_key_secret(), "env-secret");

        // A flag beats the populated environment.
        let creds = Credentials::resolve(Some("flag-id".to_string()), None).unwrap();
        assert_eq!(creds.access_key_id(), "flag-id");
        assert_eq!(creds.access_key_secret(), "env-secret");

        // An empty flag value falls through to the environment.
        let creds = Credentials::resolve(Some(String::new()), None).unwrap();
        assert_eq!(creds.access_key_id(), "env-id");

        std::env::remove_var(ENV_ACCESS_KEY_ID);
        std::env::remove_var(ENV_ACCESS_KEY_SECRET);

        let err = Credentials::resolve(None, None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains(ENV_ACCESS_KEY_ID));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("AKID", "SUPER-SECRET").unwrap();
        let debugged = format!("{creds:?}");
        assert!(debugged.contains("AKID"));
        assert!(!debugged.contains("SUPER-SECRET"));
    }
}
