//! HMAC-SHA256 signing and constant-time verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};

use crate::encoding;

/// Length of an HMAC-SHA256 tag in bytes.
pub const SIGNATURE_LEN: usize = 32;

type HmacSha256 = Hmac<Sha256>;

/// An HMAC-SHA256 tag over a signed-path payload.
///
/// Equality is constant time. `Display` renders the unpadded URL-safe
/// base64 token that prefixes a signed path.
#[derive(Clone, Copy)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Wrap raw tag bytes.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }

    /// The URL-safe token for this signature.
    pub fn to_token(&self) -> String {
        encoding::encode(&self.0)
    }
}

impl ConstantTimeEq for Signature {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Signature {}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Signature").field(&self.to_token()).finish()
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = std::array::TryFromSliceError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(Self(bytes.try_into()?))
    }
}

/// Compute the HMAC-SHA256 of `payload` under `key`.
///
/// Any key length is accepted; keys longer than the SHA-256 block size are
/// hashed first as the HMAC construction requires.
pub fn sign(key: &[u8], payload: &[u8]) -> Signature {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(payload);
    Signature(mac.finalize().into_bytes().into())
}

/// Check `candidate` against the HMAC of `payload` in constant time.
///
/// A candidate of the wrong length never matches.
pub fn verify(key: &[u8], payload: &[u8], candidate: &[u8]) -> bool {
    let expected = sign(key, payload);
    expected.as_bytes()[..].ct_eq(candidate).into()
}
