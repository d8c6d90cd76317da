//! CLI for muFX article integrity hashing.
//!
//! # Key Abstractions
//!
//! - [`MufxCli<C>`](app::MufxCli): CLI application parameterized over a config provider
//! - [`MufxConfig`](config::MufxConfig): TOML/env configuration loaded with `confyg`

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod integrity_handlers;

pub use app::MufxCli;
pub use cli::CliArgs;
pub use config::MufxConfig;
pub use error::{Error, Result};
