//! muFX Core — shared types, traits, errors, and utilities.
//!
//! This crate provides the foundational types used across the muFX
//! integrity crates. It has no internal workspace dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration seam between the CLI and the hasher
//! - [`util`]: File discovery and path helpers

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;

pub use util::files::{ArticlePatterns, DEFAULT_ARTICLE_PATTERNS};
