//! Request paths and the signed paths built from them.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{InputError, UrlError};
use crate::encoding;
use crate::mac::{SIGNATURE_LEN, Signature};

/// Length of the signature token that prefixes a [`SignedPath`].
pub const TOKEN_LEN: usize = encoding::encoded_len(SIGNATURE_LEN);

/// The unsigned part of an image URL: processing options plus source.
///
/// Only the leading `/` is checked; the internal structure belongs to the
/// proxy that serves the image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequestPath(String);

impl RequestPath {
    /// Validate and wrap a request path.
    pub fn new(path: impl Into<String>) -> Result<Self, InputError> {
        let path = path.into();
        if path.is_empty() {
            return Err(InputError::MissingField);
        }
        if !path.starts_with('/') {
            return Err(InputError::InvalidPath);
        }
        Ok(Self(path))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RequestPath {
    type Error = InputError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl From<RequestPath> for String {
    fn from(path: RequestPath) -> Self {
        path.0
    }
}

impl AsRef<str> for RequestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RequestPath {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A signature token immediately followed by the path it authorizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPath {
    signature: Signature,
    path: RequestPath,
}

impl SignedPath {
    /// Pair a signature with the path it was computed over.
    pub fn new(signature: Signature, path: RequestPath) -> Self {
        Self { signature, path }
    }

    /// The signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The signed request path.
    pub fn path(&self) -> &RequestPath {
        &self.path
    }

    /// Give up the request path.
    pub fn into_path(self) -> RequestPath {
        self.path
    }

    /// Split `input` into its signature token and path.
    ///
    /// Returns `None` if the input is shorter than a token, the token is
    /// not URL-safe base64 of a full signature, or what follows the token
    /// is not a valid request path. The signature is not checked here.
    pub fn parse(input: &str) -> Option<Self> {
        let token = input.get(..TOKEN_LEN)?;
        let path = input.get(TOKEN_LEN..)?;

        let bytes = encoding::decode(token).ok()?;
        let signature = Signature::try_from(bytes.as_slice()).ok()?;
        let path = RequestPath::new(path).ok()?;

        Some(Self { signature, path })
    }

    /// Append this signed path to `base`, as in
    /// `https://image.example.com/<signature>/<options>/...`.
    ///
    /// Fails with [`UrlError::Rewritten`] when the path contains something
    /// URL parsing would change (dot segments, spaces, `?` or `#`), since
    /// the resulting URL would no longer verify.
    pub fn to_url(&self, base: &Url) -> Result<Url, UrlError> {
        let base = base.as_str().trim_end_matches('/');
        let joined = format!("{base}/{self}");
        let url = Url::parse(&joined)?;

        if url.as_str() != joined {
            return Err(UrlError::Rewritten(url.into()));
        }
        Ok(url)
    }
}

impl std::fmt::Display for SignedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.signature, self.path)
    }
}

impl From<SignedPath> for String {
    fn from(signed: SignedPath) -> Self {
        signed.to_string()
    }
}
