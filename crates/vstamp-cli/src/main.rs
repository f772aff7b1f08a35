//! vstamp — stamp a `created` timestamp into every note of a vault.
//!
//! Usage: `vstamp <VAULT_PATH>`

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use vstamp_core::{ErrorSummary, StampConfig};
use vstamp_vault::{FsMetadataProvider, WalkEvent, Walker};

#[derive(Parser)]
#[command(name = "vstamp")]
#[command(version)]
#[command(about = "Stamp a created timestamp into the frontmatter of every note in a vault")]
struct Cli {
    /// Root directory of the vault
    vault_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    let config = StampConfig::default();
    let provider = FsMetadataProvider;
    let walker = Walker::new(&config, &provider);
    let mut summary = ErrorSummary::new();

    let result = walker.walk(&cli.vault_path, &mut summary, |event| match event {
        WalkEvent::Processed(path) => println!("Processed: {}", path.display()),
        WalkEvent::Failed(path, err) => println!("Error processing {}: {err}", path.display()),
    });

    if let Err(err) = result {
        println!(
            "Error walking the path {}: {err}",
            cli.vault_path.display()
        );
    }

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(summary.report().as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write summary")?;
    Ok(())
}
