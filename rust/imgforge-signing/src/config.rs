//! Signer configuration from the environment or a serialized document.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, KeyPolicy, UrlSigner, ValidationErrors};

/// Hex-encoded signing key.
pub const KEY_VAR: &str = "IMGFORGE_KEY";
/// Hex-encoded salt.
pub const SALT_VAR: &str = "IMGFORGE_SALT";
/// Minimum decoded key length in bytes.
pub const MIN_KEY_LENGTH_VAR: &str = "IMGFORGE_MIN_KEY_LENGTH";
/// Minimum decoded salt length in bytes.
pub const MIN_SALT_LENGTH_VAR: &str = "IMGFORGE_MIN_SALT_LENGTH";
/// `true` to reject all-zero keys.
pub const REJECT_ZERO_KEY_VAR: &str = "IMGFORGE_REJECT_ZERO_KEY";

/// Key, salt and policy a proxy or CLI is provisioned with.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Hex-encoded key.
    pub key: String,
    /// Hex-encoded salt.
    pub salt: String,
    /// Optional strength requirements.
    #[serde(default)]
    pub policy: KeyPolicy,
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("key", &"[REDACTED]")
            .field("salt", &"[REDACTED]")
            .field("policy", &self.policy)
            .finish()
    }
}

impl SigningConfig {
    /// Create a configuration with the default (permissive) policy.
    pub fn new(key: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            salt: salt.into(),
            policy: KeyPolicy::default(),
        }
    }

    /// Replace the policy.
    pub fn with_policy(mut self, policy: KeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let key = lookup(KEY_VAR).ok_or(ConfigError::Missing(KEY_VAR))?;
        let salt = lookup(SALT_VAR).ok_or(ConfigError::Missing(SALT_VAR))?;

        let mut policy = KeyPolicy::default();
        if let Some(value) = lookup(MIN_KEY_LENGTH_VAR) {
            policy.min_key_len = parse_var(MIN_KEY_LENGTH_VAR, &value)?;
        }
        if let Some(value) = lookup(MIN_SALT_LENGTH_VAR) {
            policy.min_salt_len = parse_var(MIN_SALT_LENGTH_VAR, &value)?;
        }
        if let Some(value) = lookup(REJECT_ZERO_KEY_VAR) {
            policy.reject_zero_key = parse_var(REJECT_ZERO_KEY_VAR, &value)?;
        }

        tracing::debug!(?policy, "loaded signing configuration");

        Ok(Self { key, salt, policy })
    }

    /// Decode the secrets and build a [`UrlSigner`].
    pub fn signer(&self) -> Result<UrlSigner, ValidationErrors> {
        UrlSigner::with_policy(&self.key, &self.salt, &self.policy)
    }
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|error: T::Err| ConfigError::Invalid {
        name,
        reason: error.to_string(),
    })
}
