//! MufxCli application.
//!
//! Wires parsed arguments, configuration and logging to the command handlers.

use std::sync::Arc;

use mufx_core::traits::ConfigProvider;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::MufxConfig;
use crate::{Result, config_handlers, integrity_handlers};

// ============================================================================
// MufxCli
// ============================================================================

/// CLI application parameterized over a config provider.
pub struct MufxCli<C: ConfigProvider> {
    name: String,
    config: Arc<C>,
    version: String,
}

impl MufxCli<MufxConfig> {
    /// Create from CLI args, loading config from file/env.
    ///
    /// A `--dir` flag takes precedence over `articles.dir`.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let mut config = MufxConfig::load(args.config.as_deref())?;
        if let Some(dir) = &args.dir {
            config = config.with_articles_dir(dir);
        }
        Ok(Self::new(name, config))
    }
}

impl<C: ConfigProvider> MufxCli<C> {
    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: C) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the config provider.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Initialise tracing-based logging on stderr.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        let dry_run = args.is_dry_run();

        match args.command {
            None | Some(Command::Hash { .. }) => {
                let dir = self.config.articles_dir()?;
                debug!("Articles directory: {}", dir.display());
                integrity_handlers::handle_hash(&*self.config, &dir, dry_run)?;
                Ok(())
            }
            Some(Command::Verify { files }) => {
                let dir = self.config.articles_dir()?;
                integrity_handlers::handle_verify(&*self.config, &dir, &files)?;
                Ok(())
            }
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
