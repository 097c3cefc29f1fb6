//! Payload assembly.
//!
//! The signed message is the raw salt bytes immediately followed by the
//! UTF-8 bytes of the request path. There is no delimiter and the path is
//! not normalized, so percent-encoding, case and trailing slashes are all
//! significant.

/// Concatenate `salt` and the UTF-8 bytes of `path`.
pub fn assemble(salt: &[u8], path: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(salt.len() + path.len());
    payload.extend_from_slice(salt);
    payload.extend_from_slice(path.as_bytes());
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_puts_salt_before_path() {
        assert_eq!(assemble(&[0x01, 0x02], "/a"), vec![0x01, 0x02, b'/', b'a']);
    }

    #[test]
    fn it_keeps_path_bytes_verbatim() {
        let payload = assemble(&[], "/Ünïcode%20/");
        assert_eq!(payload, "/Ünïcode%20/".as_bytes());
    }
}
