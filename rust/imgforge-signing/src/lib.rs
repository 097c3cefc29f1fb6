#![warn(missing_docs)]

//! Signed request paths for imgforge image URLs.
//!
//! An image URL carries its processing options and source in the path, for
//! example `/resize:fill:800:600/plain/https://example.com/cat.jpg@webp`.
//! To stop third parties from requesting arbitrary (and arbitrarily
//! expensive) transformations, the path is prefixed with an HMAC-SHA256
//! signature that the proxy recomputes before doing any work.
//!
//! The signature is computed in four steps:
//!
//! 1. the hex key and salt are decoded ([`hex`]),
//! 2. the salt bytes are followed by the UTF-8 path bytes ([`payload`]),
//! 3. the payload is signed with HMAC-SHA256 under the key ([`mac`]),
//! 4. the tag is encoded as unpadded URL-safe base64 ([`encoding`]).
//!
//! The signed path is the 43 character token immediately followed by the
//! original path. The scheme is deterministic: the same key, salt and path
//! always produce the same signed path.
//!
//! # Example
//!
//! ```
//! use imgforge_signing::{generate_signed_path, verify_signed_path};
//!
//! let key = "943b421c9eb07c830af81030552c86009268de4e532ba2ee2eab8247c6da0881";
//! let salt = "520f986b998545b4785e0defbc4f3c1203f22de2374a3d53cb7a7fe9fea309c5";
//! let path = "/resize:fill:800:600/plain/https://example.com/cat.jpg@webp";
//!
//! let signed = generate_signed_path(key, salt, path)?;
//! assert_eq!(
//!     signed.to_string(),
//!     "QwZ3L457JJoKE__U_vPOKfBTJozFis73Ny_6e5zK-5Q/resize:fill:800:600/plain/https://example.com/cat.jpg@webp",
//! );
//!
//! let verified = verify_signed_path(key, salt, &signed.to_string())?;
//! assert_eq!(verified.as_str(), path);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod hex;
pub mod mac;
pub mod path;
pub mod payload;
pub mod policy;
pub mod signer;

pub use config::SigningConfig;
pub use error::{
    ConfigError, Field, FieldError, InputError, UrlError, ValidationErrors, VerificationError,
};
pub use mac::Signature;
pub use path::{RequestPath, SignedPath};
pub use policy::KeyPolicy;
pub use signer::{Secret, UrlSigner, generate_signed_path, verify_signed_path};
