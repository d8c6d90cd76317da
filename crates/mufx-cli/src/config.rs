//! Configuration for the muFX CLI.
//!
//! Provides the [`MufxConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `MUFX_CONFIG` environment variable
//! 3. XDG default: `~/.config/mufx/config.toml`
//! 4. Built-in defaults
//!
//! `MUFX_<SECTION>_<KEY>` environment variables overlay values,
//! e.g. `MUFX_ARTICLES_DIR=/srv/site`. List values are given as a JSON
//! array (the form `mufx config export` prints) or comma-separated:
//! `MUFX_INTEGRITY_LEGACY_CLASSES=integrity-box,integrity-note`.

use std::path::PathBuf;

use confyg::{Confygery, env};
use mufx_core::traits::ConfigProvider;
use mufx_core::util::paths::expand_tilde;
use mufx_core::{ArticlePatterns, DEFAULT_ARTICLE_PATTERNS, Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for the muFX CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MufxConfig {
    /// Article discovery.
    pub articles: ArticlesConfig,

    /// Hash embedding.
    pub integrity: IntegrityConfig,
}

/// Article discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticlesConfig {
    /// Directory holding published articles. Defaults to the current directory.
    pub dir: Option<String>,

    /// File name globs identifying articles.
    #[serde(deserialize_with = "string_list")]
    pub patterns: Vec<String>,
}

/// Hash embedding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrityConfig {
    /// Attribute carrying the hash on the content container.
    pub attribute: String,

    /// Marker classes of legacy integrity blocks removed on embedding.
    #[serde(deserialize_with = "string_list")]
    pub legacy_classes: Vec<String>,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for MufxConfig {
    fn default() -> Self {
        Self {
            articles: ArticlesConfig::default(),
            integrity: IntegrityConfig::default(),
        }
    }
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            patterns: DEFAULT_ARTICLE_PATTERNS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Default for IntegrityConfig {
    fn default() -> Self {
        Self {
            attribute: "data-hash".to_string(),
            legacy_classes: vec!["integrity-explanation".into(), "integrity-box".into()],
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl MufxConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("MUFX");
        env_opts.add_section("articles");
        env_opts.add_section("integrity");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("MUFX_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("mufx").join("config.toml"))
    }

    /// Override the articles directory.
    pub fn with_articles_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.articles.dir = Some(dir.into().to_string_lossy().into_owned());
        self
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten this config into environment variable pairs with `MUFX_` prefix.
    pub fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value: toml::Value =
            toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_toml_value(&value, "MUFX", &mut vars);
        Ok(vars)
    }
}

// ============================================================================
// ConfigProvider implementation
// ============================================================================

impl ConfigProvider for MufxConfig {
    fn articles_dir(&self) -> Result<PathBuf> {
        match &self.articles.dir {
            Some(p) => Ok(expand_tilde(p)),
            None => std::env::current_dir()
                .map_err(|e| Error::config(format!("Could not determine articles directory: {e}"))),
        }
    }

    fn article_patterns(&self) -> Result<ArticlePatterns> {
        let patterns = ArticlePatterns::new(&self.articles.patterns)?;
        if patterns.is_empty() {
            return Err(Error::config("articles.patterns must not be empty"));
        }
        Ok(patterns)
    }

    fn integrity_attribute(&self) -> &str {
        &self.integrity.attribute
    }

    fn legacy_classes(&self) -> Vec<String> {
        self.integrity.legacy_classes.clone()
    }
}

// ============================================================================
// Helper: list values from env overlays
// ============================================================================

/// Deserialize a list given either as a sequence or as a single string.
///
/// Environment overlays always arrive as strings; a string is read as a
/// JSON array when it looks like one, otherwise split on commas.
fn string_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringList {
        Items(Vec<String>),
        Joined(String),
    }

    match StringList::deserialize(deserializer)? {
        StringList::Items(items) => Ok(items),
        StringList::Joined(joined) => split_list(&joined).map_err(serde::de::Error::custom),
    }
}

/// Parse a JSON array of strings or a comma-separated list.
fn split_list(value: &str) -> std::result::Result<Vec<String>, serde_json::Error> {
    let value = value.trim();
    if value.starts_with('[') {
        return serde_json::from_str(value);
    }
    Ok(value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect())
}

// ============================================================================
// Helper: flatten TOML to env vars
// ============================================================================

/// Recursively flatten a TOML value into `KEY=value` pairs.
fn flatten_toml_value(value: &toml::Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let env_key = format!("{}_{}", prefix, key.to_uppercase());
                flatten_toml_value(val, &env_key, out);
            }
        }
        toml::Value::Array(arr) => {
            if let Ok(json) = serde_json::to_string(arr) {
                out.push((prefix.to_string(), json));
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Integer(i) => out.push((prefix.to_string(), i.to_string())),
        toml::Value::Float(f) => out.push((prefix.to_string(), f.to_string())),
        toml::Value::Boolean(b) => out.push((prefix.to_string(), b.to_string())),
        toml::Value::Datetime(dt) => out.push((prefix.to_string(), dt.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================
