//! Verification of published integrity hashes.
//!
//! Recomputes the canonical hash of an article and compares it with the
//! hash published on its content container. Uses the same canonicalization
//! as [`IntegrityHasher`](crate::IntegrityHasher), so a freshly hashed
//! article always verifies.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;
use mufx_core::util::files::{self, FileInfo};

use crate::canonical::CanonicalContent;
use crate::digest::IntegrityHash;
use crate::inject::{self, DEFAULT_HASH_ATTRIBUTE};

/// Outcome of verifying one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyStatus {
    /// Published hash matches the content.
    Verified,
    /// Published hash differs from the content's hash.
    Mismatch {
        /// Hash found in the document.
        published: IntegrityHash,
        /// Hash of the current content.
        computed: IntegrityHash,
    },
    /// The published value is not a 64-character lowercase hex digest.
    InvalidHash {
        /// Value found in the document.
        published: String,
        /// Hash of the current content.
        computed: IntegrityHash,
    },
    /// Content was found but no hash is published.
    NoHash {
        /// Hash of the current content.
        computed: IntegrityHash,
    },
    /// Neither an `<article>` nor a `<body>` element was found.
    NoContent,
    /// The file does not exist. Reported and skipped, not a failure.
    Missing,
    /// The file could not be read as UTF-8 text.
    Unreadable(String),
}

impl VerifyStatus {
    /// Whether the article passed verification.
    pub fn is_verified(&self) -> bool {
        *self == Self::Verified
    }

    /// Whether the article counts as failed. Missing files are skipped.
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Verified | Self::Missing)
    }

    /// Short uppercase label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "VERIFIED",
            Self::Mismatch { .. } => "MISMATCH",
            Self::InvalidHash { .. } => "INVALID HASH",
            Self::NoHash { .. } => "NO HASH",
            Self::NoContent => "NO CONTENT",
            Self::Missing => "NOT FOUND",
            Self::Unreadable(_) => "UNREADABLE",
        }
    }
}

impl fmt::Display for VerifyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verification result for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// File name as given or discovered.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// Outcome.
    pub status: VerifyStatus,
}

/// Checks published hashes against article content.
#[derive(Debug, Clone)]
pub struct Verifier {
    attribute: String,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_ATTRIBUTE)
    }
}

impl Verifier {
    /// Create a verifier reading the hash from `attribute`.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
        }
    }

    /// Verify a document held in memory.
    pub fn verify_document(&self, doc: &str) -> VerifyStatus {
        let Some(content) = CanonicalContent::extract(doc) else {
            return VerifyStatus::NoContent;
        };
        let computed = content.hash();

        let Some(raw) = inject::published_hash(doc, &content.container(), &self.attribute) else {
            return VerifyStatus::NoHash { computed };
        };

        match raw.parse::<IntegrityHash>() {
            Ok(published) if published == computed => VerifyStatus::Verified,
            Ok(published) => VerifyStatus::Mismatch {
                published,
                computed,
            },
            Err(e) => {
                debug!("{e}");
                VerifyStatus::InvalidHash {
                    published: raw.to_string(),
                    computed,
                }
            }
        }
    }

    /// Verify the article at `path`.
    pub fn verify_path(&self, path: &Path) -> Verification {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let status = if !files::exists(path) {
            VerifyStatus::Missing
        } else {
            match files::read_file(path) {
                Ok(doc) => self.verify_document(&doc),
                Err(e) => VerifyStatus::Unreadable(e.to_string()),
            }
        };
        debug!("{}: {}", name, status);

        Verification {
            name,
            path: path.to_path_buf(),
            status,
        }
    }

    /// Verify a discovered article.
    pub fn verify_file(&self, file: &FileInfo) -> Verification {
        Verification {
            name: file.name.clone(),
            ..self.verify_path(&file.path)
        }
    }
}
