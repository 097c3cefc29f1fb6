//! Error types for signed-path generation and verification.

use thiserror::Error;

/// A single input that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The request path to sign.
    Path,
    /// The hex-encoded signing key.
    Key,
    /// The hex-encoded salt.
    Salt,
}

impl Field {
    /// Human-readable field name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Key => "key",
            Self::Salt => "salt",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a single input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum InputError {
    /// The input is absent or empty.
    #[error("value is required")]
    MissingField,

    /// The input is not valid hex (or not valid URL-safe base64).
    #[error("invalid encoding")]
    InvalidEncoding,

    /// Hex input has an odd number of characters.
    #[error("hex length must be even")]
    OddLength,

    /// The request path does not start with `/`.
    #[error("path must start with '/'")]
    InvalidPath,

    /// Decoded secret is shorter than the configured minimum.
    #[error("expected at least {minimum} bytes, got {actual}")]
    TooShort {
        /// Minimum accepted length in bytes.
        minimum: usize,
        /// Decoded length in bytes.
        actual: usize,
    },

    /// Decoded secret consists only of zero bytes.
    #[error("value must not be all zero bytes")]
    AllZero,
}

/// An [`InputError`] attributed to the [`Field`] it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{field}: {error}")]
pub struct FieldError {
    /// The offending input.
    pub field: Field,
    /// What was wrong with it.
    pub error: InputError,
}

impl FieldError {
    /// Create a new field error.
    pub fn new(field: Field, error: InputError) -> Self {
        Self { field, error }
    }

    /// A sentence suitable for showing next to the input it describes.
    pub fn message(&self) -> String {
        let label = match self.field {
            Field::Path => "Path",
            Field::Key => "Key",
            Field::Salt => "Salt",
        };

        match (self.field, self.error) {
            (Field::Path, InputError::MissingField) => "Enter the path segment to sign.".into(),
            (Field::Path, InputError::InvalidPath) => {
                "Include the leading slash (example: /resize:fill:800:600/plain/...).".into()
            }
            (_, InputError::MissingField) => format!("{label} is required."),
            (_, InputError::InvalidEncoding) => {
                format!("{label} must be hexadecimal characters (0-9, a-f).")
            }
            (_, InputError::OddLength) => format!("{label} length must be even."),
            (_, InputError::InvalidPath) => format!("{label} must start with '/'."),
            (_, InputError::TooShort { minimum, actual }) => format!(
                "{label} must decode to at least {minimum} bytes (got {actual})."
            ),
            (_, InputError::AllZero) => format!("{label} must not be all zero bytes."),
        }
    }
}

/// Every field error found while validating one request.
///
/// Errors are kept in field order (path, key, salt) so callers can render
/// them deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn push(&mut self, field: Field, error: InputError) {
        self.0.push(FieldError::new(field, error));
    }

    /// Returns `true` if no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The error recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<InputError> {
        self.0.iter().find(|e| e.field == field).map(|e| e.error)
    }

    /// Iterate over the recorded errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl Extend<FieldError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Reasons a signed path is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// The key or salt supplied for verification is invalid.
    #[error("invalid verification input: {0}")]
    Invalid(#[from] ValidationErrors),

    /// The input cannot be split into a signature token and a path.
    #[error("signed path is malformed")]
    Malformed,

    /// The recomputed signature does not match the supplied one.
    #[error("signature mismatch")]
    SignatureMismatch,
}

/// Reasons a signed path cannot be placed under a base URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// The joined URL does not parse.
    #[error("invalid URL: {0}")]
    Parse(#[from] url::ParseError),

    /// URL parsing normalized the signed path, so the proxy would see a
    /// path other than the one that was signed.
    #[error("URL parsing rewrote the signed path to {0}")]
    Rewritten(String),
}

/// Errors from loading a [`crate::SigningConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Parse failure description.
        reason: String,
    },
}
