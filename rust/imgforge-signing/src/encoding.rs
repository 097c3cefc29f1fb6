//! Unpadded URL-safe base64 for signature tokens.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::InputError;

/// URL-safe alphabet, no padding on encode, padding optional on decode.
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Number of characters [`encode`] produces for `len` input bytes.
pub const fn encoded_len(len: usize) -> usize {
    (len * 4).div_ceil(3)
}

/// Encode bytes with the URL-safe alphabet (`-`, `_`) and no `=` padding.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

/// Decode URL-safe base64, with or without trailing padding.
///
/// Characters outside the URL-safe alphabet, or a length that cannot
/// correspond to a whole number of bytes, are [`InputError::InvalidEncoding`].
pub fn decode(input: &str) -> Result<Vec<u8>, InputError> {
    URL_SAFE
        .decode(input)
        .map_err(|_| InputError::InvalidEncoding)
}
