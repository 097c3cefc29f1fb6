use clap::{Args, Parser, Subcommand};
use imgforge_signing::config::{KEY_VAR, SALT_VAR};
use imgforge_signing::{ConfigError, SigningConfig};
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "imgforge-sign")]
#[command(bin_name = "imgforge-sign")]
#[command(about = "Sign and verify imgforge image paths", long_about = None)]
pub struct SignCli {
    /// Log signing details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign a request path
    Sign {
        /// Path to sign, including processing options
        /// (e.g. /resize:fill:800:600/plain/https://example.com/cat.jpg@webp)
        path: String,

        #[command(flatten)]
        secrets: Secrets,

        /// Also print the full URL under this base (e.g. https://image.example.com)
        #[arg(long)]
        base: Option<Url>,
    },
    /// Verify a signed path and print the path it authorizes
    Verify {
        /// Signature token followed by the request path
        signed_path: String,

        #[command(flatten)]
        secrets: Secrets,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct Secrets {
    /// Hex-encoded signing key
    #[arg(long, env = "IMGFORGE_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Hex-encoded salt
    #[arg(long, env = "IMGFORGE_SALT", hide_env_values = true)]
    pub salt: Option<String>,
}

impl Secrets {
    /// Build a configuration from these secrets, reading the key policy
    /// through `env`.
    ///
    /// An absent key or salt becomes an empty string so that validation
    /// reports it alongside any other field errors.
    pub fn config(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<SigningConfig, ConfigError> {
        SigningConfig::from_lookup(|name| match name {
            KEY_VAR => Some(self.key.clone().unwrap_or_default()),
            SALT_VAR => Some(self.salt.clone().unwrap_or_default()),
            other => env(other),
        })
    }
}
