//! Optional strength requirements for keys and salts.
//!
//! The protocol itself accepts any non-empty key and salt. Deployments that
//! want a floor opt in through [`KeyPolicy`]; the default imposes nothing.

use serde::{Deserialize, Serialize};

use crate::InputError;

/// Minimum-strength rules applied to decoded key and salt bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyPolicy {
    /// Minimum decoded key length in bytes.
    pub min_key_len: usize,
    /// Minimum decoded salt length in bytes.
    pub min_salt_len: usize,
    /// Reject keys made only of zero bytes.
    pub reject_zero_key: bool,
}

impl KeyPolicy {
    /// No requirements beyond non-empty input.
    pub const PERMISSIVE: Self = Self {
        min_key_len: 0,
        min_salt_len: 0,
        reject_zero_key: false,
    };

    /// Require keys of at least `len` bytes.
    pub fn with_min_key_len(mut self, len: usize) -> Self {
        self.min_key_len = len;
        self
    }

    /// Require salts of at least `len` bytes.
    pub fn with_min_salt_len(mut self, len: usize) -> Self {
        self.min_salt_len = len;
        self
    }

    /// Set whether all-zero keys are rejected.
    pub fn with_reject_zero_key(mut self, reject: bool) -> Self {
        self.reject_zero_key = reject;
        self
    }

    /// Check decoded key bytes against this policy.
    pub fn check_key(&self, key: &[u8]) -> Result<(), InputError> {
        check_len(key, self.min_key_len)?;
        if self.reject_zero_key && key.iter().all(|byte| *byte == 0) {
            return Err(InputError::AllZero);
        }
        Ok(())
    }

    /// Check decoded salt bytes against this policy.
    pub fn check_salt(&self, salt: &[u8]) -> Result<(), InputError> {
        check_len(salt, self.min_salt_len)
    }
}

fn check_len(bytes: &[u8], minimum: usize) -> Result<(), InputError> {
    if bytes.len() < minimum {
        return Err(InputError::TooShort {
            minimum,
            actual: bytes.len(),
        });
    }
    Ok(())
}
