//! CLI argument parsing and command definitions.
//!
//! With no subcommand, `mufx` hashes every article in the articles
//! directory, so `mufx` and `mufx --dry-run` are the everyday invocations.
//! Unrecognized arguments are rejected by clap with a usage error.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "mufx", author, version, about = "muFX article integrity hashing", long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "MUFX_CONFIG", global = true)]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Articles directory (overrides `articles.dir`).
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,

    /// Compute and display hashes without modifying any file. Only valid
    /// with no subcommand or with `hash`.
    #[arg(long)]
    pub dry_run: bool,

    /// Subcommand to execute. Defaults to `hash`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hash articles and embed the hash on each content container.
    Hash {
        /// Compute and display hashes without modifying any file.
        #[arg(long)]
        dry_run: bool,
    },

    /// Check published hashes against article content.
    Verify {
        /// Article files to verify. Verifies every article when omitted.
        files: Vec<PathBuf>,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "integrity.attribute").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

impl CliArgs {
    /// Whether this invocation is a dry run, from either `--dry-run` position.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || matches!(self.command, Some(Command::Hash { dry_run: true }))
    }

    /// Reject combinations clap cannot express, such as `--dry-run verify`.
    pub fn check(&self) -> Result<(), clap::Error> {
        let hashing = matches!(self.command, None | Some(Command::Hash { .. }));
        if self.dry_run && !hashing {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "--dry-run only applies to hashing; it cannot be combined with this subcommand",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
