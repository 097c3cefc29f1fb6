//! Hexadecimal decoding of key and salt material.

use crate::InputError;

/// Decode case-insensitive hex text into bytes.
///
/// Checks run in a fixed order so callers get the most useful error:
/// empty input is [`InputError::MissingField`], any non-hex character is
/// [`InputError::InvalidEncoding`], and only then is an odd character count
/// reported as [`InputError::OddLength`].
///
/// ```
/// use imgforge_signing::{InputError, hex::decode_hex};
///
/// assert_eq!(decode_hex("0aFF").unwrap(), vec![0x0a, 0xff]);
/// assert_eq!(decode_hex("a"), Err(InputError::OddLength));
/// ```
pub fn decode_hex(input: &str) -> Result<Vec<u8>, InputError> {
    if input.is_empty() {
        return Err(InputError::MissingField);
    }
    if !input.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(InputError::InvalidEncoding);
    }
    if input.len() % 2 != 0 {
        return Err(InputError::OddLength);
    }

    ::hex::decode(input).map_err(|_| InputError::InvalidEncoding)
}

/// Lowercase hex encoding, the inverse of [`decode_hex`].
pub fn encode_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_decodes_mixed_case() {
        assert_eq!(
            decode_hex("DeadBEEF").unwrap(),
            vec![0xde, 0xad, 0xbe, 0xef]
        );
    }

    #[test]
    fn it_rejects_empty_input() {
        assert_eq!(decode_hex(""), Err(InputError::MissingField));
    }

    #[test]
    fn it_rejects_odd_length() {
        assert_eq!(decode_hex("a"), Err(InputError::OddLength));
        assert_eq!(decode_hex("abc"), Err(InputError::OddLength));
    }

    #[test]
    fn it_rejects_non_hex_characters() {
        assert_eq!(decode_hex("zz"), Err(InputError::InvalidEncoding));
        assert_eq!(decode_hex("0x00"), Err(InputError::InvalidEncoding));
        assert_eq!(decode_hex("ab cd"), Err(InputError::InvalidEncoding));
    }

    #[test]
    fn it_prefers_encoding_errors_over_length_errors() {
        assert_eq!(decode_hex("zzz"), Err(InputError::InvalidEncoding));
    }

    #[test]
    fn it_rejects_non_ascii_input() {
        assert_eq!(decode_hex("éé"), Err(InputError::InvalidEncoding));
    }

    #[test]
    fn it_encodes_lowercase() {
        assert_eq!(encode_hex(&[0xab, 0x01]), "ab01");
    }
}
