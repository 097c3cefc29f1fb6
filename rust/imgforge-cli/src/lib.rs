//! # imgforge-sign
//!
//! Command-line front end for [`imgforge_signing`]. It fills the role of
//! the signing form in the imgforge documentation: given a request path, a
//! key and a salt it prints the signature, the signed path and optionally a
//! full example URL. It can also verify a signed path the way the proxy
//! does.
//!
//! ```bash
//! export IMGFORGE_KEY=943b421c9eb07c830af81030552c86009268de4e532ba2ee2eab8247c6da0881
//! export IMGFORGE_SALT=520f986b998545b4785e0defbc4f3c1203f22de2374a3d53cb7a7fe9fea309c5
//! imgforge-sign sign /resize:fill:800:600/plain/https://example.com/cat.jpg@webp \
//!     --base https://image.example.com
//! ```

mod cli;
pub use cli::*;

use anyhow::{Result, anyhow};
use imgforge_signing::{
    Field, RequestPath, SignedPath, ValidationErrors, VerificationError,
};
use url::Url;

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A path was signed.
    Signed {
        /// The signed path (signature followed by path).
        signed: SignedPath,
        /// The signed path under the requested base URL.
        url: Option<Url>,
    },
    /// A signed path was verified.
    Verified {
        /// The authorized request path.
        path: RequestPath,
    },
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Signed { signed, url } => {
                writeln!(f, "Signature: {}", signed.signature())?;
                write!(f, "Signed URL: {signed}")?;
                if let Some(url) = url {
                    write!(f, "\nExample URL: {url}")?;
                }
                Ok(())
            }
            Self::Verified { path } => write!(f, "Verified path: {path}"),
        }
    }
}

/// Execute `command`, reading policy variables through `env`.
pub fn run(command: &Command, env: impl Fn(&str) -> Option<String>) -> Result<Outcome> {
    match command {
        Command::Sign {
            path,
            secrets,
            base,
        } => {
            tracing::debug!(base = ?base.as_ref().map(Url::as_str), "running sign");
            sign(path, secrets, base.as_ref(), env)
        }
        Command::Verify {
            signed_path,
            secrets,
        } => {
            tracing::debug!("running verify");
            verify(signed_path, secrets, env)
        }
    }
}

fn sign(
    path: &str,
    secrets: &Secrets,
    base: Option<&Url>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Outcome> {
    let config = secrets.config(env)?;

    let mut errors = ValidationErrors::new();
    let path = RequestPath::new(path.trim())
        .map_err(|error| errors.push(Field::Path, error))
        .ok();
    let signer = config.signer().map_err(|e| errors.extend(e)).ok();

    let (Some(path), Some(signer)) = (path, signer) else {
        tracing::warn!(count = errors.len(), "rejected sign input");
        return Err(anyhow!(render_errors(&errors)));
    };

    let signed = signer.sign_path(path);
    let url = base.map(|base| signed.to_url(base)).transpose()?;

    Ok(Outcome::Signed { signed, url })
}

fn verify(
    signed_path: &str,
    secrets: &Secrets,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Outcome> {
    let signer = secrets
        .config(env)?
        .signer()
        .map_err(|errors| {
            tracing::warn!(count = errors.len(), "rejected verify input");
            anyhow!(render_errors(&errors))
        })?;

    match signer.verify(signed_path.trim()) {
        Ok(path) => Ok(Outcome::Verified { path }),
        Err(VerificationError::Invalid(errors)) => {
            tracing::warn!(count = errors.len(), "rejected verify input");
            Err(anyhow!(render_errors(&errors)))
        }
        Err(error) => Err(error.into()),
    }
}

/// One line per field error, worded for the person who typed the input.
pub fn render_errors(errors: &ValidationErrors) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.field, error.message()))
        .collect::<Vec<_>>()
        .join("\n")
}
