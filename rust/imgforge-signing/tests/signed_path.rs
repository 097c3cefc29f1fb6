//! End-to-end properties of signed-path generation and verification.

use imgforge_signing::hex::encode_hex;
use imgforge_signing::{
    Field, InputError, UrlSigner, VerificationError, encoding, generate_signed_path,
    verify_signed_path,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use testresult::TestResult;

const KEY: &str = "943b421c9eb07c830af81030552c86009268de4e532ba2ee2eab8247c6da0881";
const SALT: &str = "520f986b998545b4785e0defbc4f3c1203f22de2374a3d53cb7a7fe9fea309c5";
const PATH: &str = "/resize:fill:800:600/plain/https://example.com/cat.jpg@webp";

#[test]
fn it_signs_the_documented_example() -> TestResult {
    let signed = generate_signed_path(KEY, SALT, PATH)?;

    assert_eq!(
        signed.signature().to_token(),
        "QwZ3L457JJoKE__U_vPOKfBTJozFis73Ny_6e5zK-5Q"
    );
    assert_eq!(
        signed.to_string(),
        format!("QwZ3L457JJoKE__U_vPOKfBTJozFis73Ny_6e5zK-5Q{PATH}")
    );
    Ok(())
}

#[test]
fn it_puts_salt_before_path_in_the_payload() -> TestResult {
    // Signing path-then-salt would yield f6fV5HCmxTWcYi3W5AXlsLa6RMJg913-PjKKbg3VWQY.
    let signed = generate_signed_path(
        "6b6579",
        "73616c74",
        "/resize:fill:800:600/plain/https://x/y.jpg@webp",
    )?;

    assert_eq!(
        signed.signature().to_token(),
        "zgh0DPDUcrCl1_Uk5Ur7lb4wM9qjG2qtTFUCqnrEmF0"
    );
    Ok(())
}

#[test]
fn it_builds_the_example_url() -> TestResult {
    let signed = generate_signed_path(KEY, SALT, PATH)?;
    let url = signed.to_url(&url::Url::parse("https://image.example.com")?)?;

    assert_eq!(
        url.as_str(),
        format!("https://image.example.com/QwZ3L457JJoKE__U_vPOKfBTJozFis73Ny_6e5zK-5Q{PATH}")
    );
    Ok(())
}

#[test]
fn it_validates_hex_inputs() {
    let cases = [
        ("a", InputError::OddLength),
        ("zz", InputError::InvalidEncoding),
        ("", InputError::MissingField),
    ];

    for (input, expected) in cases {
        let errors = generate_signed_path(input, SALT, PATH).unwrap_err();
        assert_eq!(errors.get(Field::Key), Some(expected), "key {input:?}");

        let errors = generate_signed_path(KEY, input, PATH).unwrap_err();
        assert_eq!(errors.get(Field::Salt), Some(expected), "salt {input:?}");
    }
}

#[test]
fn it_validates_paths() {
    let errors = generate_signed_path(KEY, SALT, "resize:fill:800:600").unwrap_err();
    assert_eq!(errors.get(Field::Path), Some(InputError::InvalidPath));

    let errors = generate_signed_path(KEY, SALT, " /resize:fill:800:600").unwrap_err();
    assert_eq!(errors.get(Field::Path), Some(InputError::InvalidPath));

    assert!(generate_signed_path(KEY, SALT, "/resize:fill:800:600/plain/https://x/y.jpg@webp").is_ok());
}

#[test]
fn it_shares_one_signer_across_threads() -> TestResult {
    let signer = std::sync::Arc::new(UrlSigner::new(KEY, SALT)?);

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let signer = signer.clone();
            std::thread::spawn(move || {
                let path = format!("/resize:fit:{index}00:0/plain/local:///{index}.png");
                let signed = signer.sign(&path).map_err(|e| e.to_string())?;
                signer
                    .verify(&signed.to_string())
                    .map(|path| path.to_string())
                    .map_err(|e| e.to_string())
            })
        })
        .collect();

    for (index, handle) in handles.into_iter().enumerate() {
        let verified = handle.join().map_err(|_| "thread panicked")??;
        assert_eq!(verified, format!("/resize:fit:{index}00:0/plain/local:///{index}.png"));
    }
    Ok(())
}

/// Any printable text after the leading slash, spaces and non-ASCII included.
fn request_path() -> impl Strategy<Value = String> {
    "/\\PC{0,120}"
}

fn secret_hex() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 1..80).prop_map(|bytes| encode_hex(&bytes))
}

proptest! {
    #[test]
    fn it_is_deterministic(key in secret_hex(), salt in secret_hex(), path in request_path()) {
        let first = generate_signed_path(&key, &salt, &path).unwrap();
        let second = generate_signed_path(&key, &salt, &path).unwrap();
        prop_assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn it_round_trips(key in secret_hex(), salt in secret_hex(), path in request_path()) {
        let signed = generate_signed_path(&key, &salt, &path).unwrap();
        let verified = verify_signed_path(&key, &salt, &signed.to_string()).unwrap();
        prop_assert_eq!(verified.as_str(), path.as_str());
    }

    #[test]
    fn it_returns_the_path_unchanged(path in request_path()) {
        let padded = format!("{path} ");
        let signed = generate_signed_path(KEY, SALT, &padded).unwrap();
        let verified = verify_signed_path(KEY, SALT, &signed.to_string()).unwrap();
        prop_assert_eq!(verified.as_str(), padded.as_str());
    }

    #[test]
    fn it_detects_path_tampering(
        key in secret_hex(),
        salt in secret_hex(),
        path in request_path(),
        index in any::<prop::sample::Index>(),
    ) {
        let signed = generate_signed_path(&key, &salt, &path).unwrap();

        // Replace one character of the path, keeping the leading slash.
        let mut chars: Vec<char> = path.chars().collect();
        prop_assume!(chars.len() > 1);
        let at = 1 + index.index(chars.len() - 1);
        chars[at] = if chars[at] == 'a' { 'b' } else { 'a' };
        let tampered: String = chars.into_iter().collect();

        let forged = format!("{}{}", signed.signature(), tampered);
        prop_assert_eq!(
            verify_signed_path(&key, &salt, &forged),
            Err(VerificationError::SignatureMismatch)
        );
    }

    #[test]
    fn it_detects_key_or_salt_changes(
        key in prop::collection::vec(any::<u8>(), 1..64),
        salt in prop::collection::vec(any::<u8>(), 1..64),
        path in request_path(),
        index in any::<prop::sample::Index>(),
        tamper_key in any::<bool>(),
    ) {
        let (key_hex, salt_hex) = (encode_hex(&key), encode_hex(&salt));
        let signed = generate_signed_path(&key_hex, &salt_hex, &path).unwrap().to_string();

        let (mut key, mut salt) = (key, salt);
        if tamper_key {
            let at = index.index(key.len());
            key[at] ^= 0x80;
        } else {
            let at = index.index(salt.len());
            salt[at] ^= 0x80;
        }

        prop_assert_eq!(
            verify_signed_path(&encode_hex(&key), &encode_hex(&salt), &signed),
            Err(VerificationError::SignatureMismatch)
        );
    }

    #[test]
    fn it_decodes_what_it_encodes(bytes in prop::collection::vec(any::<u8>(), 0..=32)) {
        let encoded = encoding::encode(&bytes);
        prop_assert!(!encoded.contains(['+', '/', '=']));
        prop_assert_eq!(encoding::decode(&encoded).unwrap(), bytes);
    }
}
