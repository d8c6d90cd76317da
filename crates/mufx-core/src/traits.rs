//! Core traits for muFX configuration.
//!
//! [`ConfigProvider`] is the seam between however configuration is loaded
//! (TOML file, environment, CLI flags, test fixtures) and the integrity
//! hasher that consumes it.

use std::path::PathBuf;

use crate::Result;
use crate::util::files::ArticlePatterns;

/// Trait for integrity tooling configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use mufx_core::traits::ConfigProvider;
/// use mufx_core::{ArticlePatterns, Result};
///
/// #[derive(Clone)]
/// struct FixtureConfig {
///     dir: PathBuf,
/// }
///
/// impl ConfigProvider for FixtureConfig {
///     fn articles_dir(&self) -> Result<PathBuf> {
///         Ok(self.dir.clone())
///     }
///
///     fn article_patterns(&self) -> Result<ArticlePatterns> {
///         Ok(ArticlePatterns::default())
///     }
/// }
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// Directory scanned for article files.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be determined (e.g. the
    /// current directory is unavailable).
    fn articles_dir(&self) -> Result<PathBuf>;

    /// File name patterns identifying article files.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured pattern is not a valid glob.
    fn article_patterns(&self) -> Result<ArticlePatterns>;

    /// Name of the attribute carrying the integrity hash.
    fn integrity_attribute(&self) -> &str {
        "data-hash"
    }

    /// Marker classes of superseded integrity blocks.
    fn legacy_classes(&self) -> Vec<String> {
        vec!["integrity-explanation".into(), "integrity-box".into()]
    }
}
