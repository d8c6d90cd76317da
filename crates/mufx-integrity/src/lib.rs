//! muFX Integrity — content hashes for published articles.
//!
//! # Modules
//!
//! - [`html`]: Structural tag scanner (element location, attributes, removal)
//! - [`canonical`]: Canonical content extraction and normalization
//! - [`digest`]: SHA-256 integrity hash type
//! - [`inject`]: Embedding hashes and removing legacy integrity blocks
//! - [`hasher`]: Batch hashing over an articles directory
//! - [`verify`]: Checking published hashes against content

#![doc = include_str!("../README.md")]

pub mod canonical;
pub mod digest;
pub mod error;
pub mod hasher;
pub mod html;
pub mod inject;
pub mod verify;

mod proptests;

pub use canonical::{CanonicalContent, Container, ContainerKind};
pub use digest::IntegrityHash;
pub use error::{Error, Result};
pub use hasher::{FileOutcome, FileStatus, HashOptions, IntegrityHasher, Rewrite, RunReport};
pub use verify::{Verification, Verifier, VerifyStatus};
