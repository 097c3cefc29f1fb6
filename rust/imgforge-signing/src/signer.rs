//! Signing and verification of request paths with a key and salt.

use zeroize::Zeroizing;

use crate::hex::decode_hex;
use crate::mac::{self, Signature};
use crate::path::{RequestPath, SignedPath};
use crate::payload::assemble;
use crate::{Field, FieldError, InputError, KeyPolicy, ValidationErrors, VerificationError};

/// Decoded secret bytes, wiped from memory on drop.
#[derive(Clone)]
pub struct Secret(Zeroizing<Vec<u8>>);

impl Secret {
    /// Wrap raw secret bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a zero-length secret.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret([REDACTED; {}])", self.0.len())
    }
}

/// Signs and verifies request paths with a fixed key and salt.
///
/// Construct one per configuration and share it; it holds no mutable state.
///
/// ```
/// use imgforge_signing::UrlSigner;
///
/// let signer = UrlSigner::new("6b6579", "73616c74").unwrap();
/// let signed = signer.sign("/resize:fill:800:600/plain/https://x/y.jpg@webp").unwrap();
///
/// let path = signer.verify(&signed.to_string()).unwrap();
/// assert_eq!(path.as_str(), "/resize:fill:800:600/plain/https://x/y.jpg@webp");
/// ```
#[derive(Debug, Clone)]
pub struct UrlSigner {
    key: Secret,
    salt: Secret,
}

impl UrlSigner {
    /// Create a signer from hex-encoded key and salt with no strength policy.
    pub fn new(key_hex: &str, salt_hex: &str) -> Result<Self, ValidationErrors> {
        Self::with_policy(key_hex, salt_hex, &KeyPolicy::default())
    }

    /// Create a signer, additionally enforcing `policy` on the decoded bytes.
    ///
    /// Key and salt are validated independently and every failure is
    /// reported. Surrounding whitespace is ignored.
    pub fn with_policy(
        key_hex: &str,
        salt_hex: &str,
        policy: &KeyPolicy,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match Self::decode(key_hex, salt_hex, policy, &mut errors) {
            Some(signer) => Ok(signer),
            None => Err(errors),
        }
    }

    /// Create a signer from already decoded secrets.
    pub fn from_secrets(key: Secret, salt: Secret) -> Self {
        Self { key, salt }
    }

    fn decode(
        key_hex: &str,
        salt_hex: &str,
        policy: &KeyPolicy,
        errors: &mut ValidationErrors,
    ) -> Option<Self> {
        let key = decode_secret(key_hex, |bytes| policy.check_key(bytes))
            .map_err(|error| errors.push(Field::Key, error))
            .ok();
        let salt = decode_secret(salt_hex, |bytes| policy.check_salt(bytes))
            .map_err(|error| errors.push(Field::Salt, error))
            .ok();

        Some(Self::from_secrets(key?, salt?))
    }

    /// Compute the signature for `path`.
    pub fn signature(&self, path: &RequestPath) -> Signature {
        let payload = Zeroizing::new(assemble(self.salt.as_bytes(), path.as_str()));
        mac::sign(self.key.as_bytes(), &payload)
    }

    /// Sign an already validated path.
    pub fn sign_path(&self, path: RequestPath) -> SignedPath {
        let signature = self.signature(&path);
        tracing::debug!(path_len = path.as_str().len(), "signed request path");
        SignedPath::new(signature, path)
    }

    /// Validate and sign `path`.
    pub fn sign(&self, path: &str) -> Result<SignedPath, FieldError> {
        let path = RequestPath::new(path).map_err(|error| FieldError::new(Field::Path, error))?;
        Ok(self.sign_path(path))
    }

    /// Check a signed path and return the path it authorizes.
    ///
    /// The input is split at the fixed token length; anything that cannot be
    /// split is [`VerificationError::Malformed`]. The recomputed signature is
    /// compared in constant time.
    pub fn verify(&self, signed_path: &str) -> Result<RequestPath, VerificationError> {
        let Some(candidate) = SignedPath::parse(signed_path) else {
            tracing::warn!(input_len = signed_path.len(), "rejected malformed signed path");
            return Err(VerificationError::Malformed);
        };

        let payload = Zeroizing::new(assemble(self.salt.as_bytes(), candidate.path().as_str()));
        if !mac::verify(
            self.key.as_bytes(),
            &payload,
            candidate.signature().as_bytes(),
        ) {
            tracing::warn!(
                path_len = candidate.path().as_str().len(),
                "rejected signed path with mismatched signature"
            );
            return Err(VerificationError::SignatureMismatch);
        }

        tracing::debug!(
            path_len = candidate.path().as_str().len(),
            "verified signed path"
        );
        Ok(candidate.into_path())
    }
}

fn decode_secret(
    hex: &str,
    check: impl FnOnce(&[u8]) -> Result<(), InputError>,
) -> Result<Secret, InputError> {
    let secret = Secret::new(decode_hex(hex.trim())?);
    check(secret.as_bytes())?;
    Ok(secret)
}

/// Sign `path` with hex-encoded `key_hex` and `salt_hex`.
///
/// The key and salt are trimmed before decoding. The path is signed
/// exactly as given, so any whitespace in it is part of the signature.
/// All three inputs are validated independently; every failure is reported
/// in one [`ValidationErrors`], in the order path, key, salt. On success the
/// result renders as `<signature><path>`.
///
/// ```
/// use imgforge_signing::generate_signed_path;
///
/// let signed = generate_signed_path(
///     "6b6579",
///     "73616c74",
///     "/resize:fill:800:600/plain/https://x/y.jpg@webp",
/// )
/// .unwrap();
///
/// assert_eq!(
///     signed.to_string(),
///     "zgh0DPDUcrCl1_Uk5Ur7lb4wM9qjG2qtTFUCqnrEmF0/resize:fill:800:600/plain/https://x/y.jpg@webp"
/// );
/// ```
pub fn generate_signed_path(
    key_hex: &str,
    salt_hex: &str,
    path: &str,
) -> Result<SignedPath, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let path = RequestPath::new(path)
        .map_err(|error| errors.push(Field::Path, error))
        .ok();
    let signer = UrlSigner::decode(key_hex, salt_hex, &KeyPolicy::default(), &mut errors);

    match (path, signer) {
        (Some(path), Some(signer)) => Ok(signer.sign_path(path)),
        _ => Err(errors),
    }
}

/// Verify `signed_path` against hex-encoded `key_hex` and `salt_hex`.
///
/// Returns the authorized request path, unchanged.
pub fn verify_signed_path(
    key_hex: &str,
    salt_hex: &str,
    signed_path: &str,
) -> Result<RequestPath, VerificationError> {
    UrlSigner::new(key_hex, salt_hex)?.verify(signed_path)
}
