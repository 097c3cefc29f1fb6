use anyhow::Result;
use clap::Parser;
use imgforge_cli::{SignCli, run};
use tracing_subscriber::EnvFilter;

pub fn main() -> Result<()> {
    let cli = SignCli::parse();

    // RUST_LOG wins over --verbose when set.
    let default_filter = if cli.verbose {
        "imgforge_signing=debug,imgforge_cli=debug"
    } else {
        "imgforge_signing=info,imgforge_cli=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let outcome = run(&cli.command, |name| std::env::var(name).ok())?;
    println!("{outcome}");

    Ok(())
}
