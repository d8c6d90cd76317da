//! muFX CLI
//!
//! Computes, embeds, and verifies content-integrity hashes for muFX
//! HTML articles.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use mufx_cli::{CliArgs, MufxCli};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    if let Err(e) = args.check() {
        e.exit();
    }
    let cli = MufxCli::from_args("mufx", &args)?;
    cli.run(args)?;
    Ok(())
}
