//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: Article discovery, reading, and writing
//! - [`paths`]: Path helpers (tilde expansion)

pub mod files;
pub mod paths;
