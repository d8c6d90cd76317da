//! Batch integrity hashing over an articles directory.
//!
//! Each article is read, rewritten entirely in memory, and written back in
//! one call. Failures are recorded on that file's [`FileOutcome`] and the
//! run moves on; only an unreadable articles directory aborts a run.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use mufx_core::traits::ConfigProvider;
use mufx_core::util::files::{self, FileInfo};
use mufx_core::ArticlePatterns;

use crate::canonical::{CanonicalContent, ContainerKind, locate_container};
use crate::digest::IntegrityHash;
use crate::inject::{self, DEFAULT_HASH_ATTRIBUTE};
use crate::Result;

/// Options controlling a hashing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashOptions {
    /// Compute and report only; never write.
    pub dry_run: bool,
    /// Attribute carrying the hash on the content container.
    pub attribute: String,
    /// Marker classes of legacy integrity blocks to remove.
    pub legacy_classes: Vec<String>,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            attribute: DEFAULT_HASH_ATTRIBUTE.to_string(),
            legacy_classes: vec!["integrity-explanation".into(), "integrity-box".into()],
        }
    }
}

/// A document rewritten in memory, ready to be written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Hash of the document's canonical content.
    pub hash: IntegrityHash,
    /// Element the hash was computed over and attached to.
    pub container: ContainerKind,
    /// Full rewritten document.
    pub document: String,
    /// Number of legacy integrity blocks removed.
    pub legacy_removed: usize,
}

/// What happened to one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// The file was rewritten.
    Updated,
    /// The file already carried the current hash; nothing was written.
    Unchanged,
    /// Dry run; nothing was written.
    DryRun,
    /// Neither an `<article>` nor a `<body>` element was found.
    NoContent,
    /// The file could not be read as UTF-8 text.
    ReadFailed(String),
    /// The rewritten document could not be written back.
    WriteFailed(String),
}

/// Result of processing one article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// File name.
    pub name: String,
    /// Full path.
    pub path: PathBuf,
    /// Computed hash, when content was found.
    pub hash: Option<IntegrityHash>,
    /// Outcome.
    pub status: FileStatus,
    /// Legacy integrity blocks removed (or that would be, in a dry run).
    pub legacy_removed: usize,
}

impl FileOutcome {
    /// Whether the file on disk was changed.
    pub fn is_modified(&self) -> bool {
        self.status == FileStatus::Updated
    }

    fn skipped(file: &FileInfo, status: FileStatus) -> Self {
        Self {
            name: file.name.clone(),
            path: file.path.clone(),
            hash: None,
            status,
            legacy_removed: 0,
        }
    }
}

/// Summary of a hashing run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Directory that was scanned.
    pub dir: PathBuf,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// One entry per discovered article, in processing order.
    pub files: Vec<FileOutcome>,
}

impl RunReport {
    /// No article files were found.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of files rewritten on disk. Always zero for a dry run.
    pub fn modified(&self) -> usize {
        self.files.iter().filter(|f| f.is_modified()).count()
    }

    /// Number of files a hash was computed for.
    pub fn hashed(&self) -> usize {
        self.files.iter().filter(|f| f.hash.is_some()).count()
    }

    /// Number of files skipped with a warning.
    pub fn skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| {
                matches!(
                    f.status,
                    FileStatus::NoContent | FileStatus::ReadFailed(_) | FileStatus::WriteFailed(_)
                )
            })
            .count()
    }
}

/// Computes integrity hashes for article files and writes them back.
#[derive(Debug, Clone)]
pub struct IntegrityHasher {
    patterns: ArticlePatterns,
    options: HashOptions,
}

impl IntegrityHasher {
    /// Create a hasher for files matching `patterns`.
    pub fn new(patterns: ArticlePatterns, options: HashOptions) -> Self {
        Self { patterns, options }
    }

    /// Create a hasher from configuration.
    pub fn from_config<C: ConfigProvider>(config: &C, dry_run: bool) -> Result<Self> {
        let options = HashOptions {
            dry_run,
            attribute: config.integrity_attribute().to_string(),
            legacy_classes: config.legacy_classes(),
        };
        Ok(Self::new(config.article_patterns()?, options))
    }

    /// Rewrite a document: drop legacy integrity blocks, hash the canonical
    /// content, and embed the hash on the content container.
    ///
    /// Legacy blocks are removed before hashing so the embedded hash always
    /// matches the canonical content of the document as written. A marked
    /// block that wraps the container is kept.
    ///
    /// Returns `None` when the document has no content container.
    pub fn rewrite(&self, doc: &str) -> Option<Rewrite> {
        let original = locate_container(doc)?;
        let (stripped, legacy_removed) =
            inject::strip_legacy_blocks(doc, &self.options.legacy_classes, &original.element);
        let content = CanonicalContent::extract(&stripped)?;
        let hash = content.hash();
        let container = content.container();
        let document = inject::embed_hash(&stripped, &container, &self.options.attribute, &hash);

        Some(Rewrite {
            hash,
            container: container.kind,
            document,
            legacy_removed,
        })
    }

    /// Hash one article and, unless this is a dry run, write it back.
    pub fn process_file(&self, file: &FileInfo) -> FileOutcome {
        let original = match files::read_file(&file.path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping {}: {}", file.name, e);
                return FileOutcome::skipped(file, FileStatus::ReadFailed(e.to_string()));
            }
        };

        let Some(rewrite) = self.rewrite(&original) else {
            warn!("Skipping {}: no <article> or <body> content found", file.name);
            return FileOutcome::skipped(file, FileStatus::NoContent);
        };

        debug!(
            "{}: hashed <{}> content, {} legacy block(s)",
            file.name, rewrite.container, rewrite.legacy_removed
        );

        let status = if self.options.dry_run {
            FileStatus::DryRun
        } else if rewrite.document == original {
            FileStatus::Unchanged
        } else {
            match files::write_file(&file.path, &rewrite.document) {
                Ok(()) => {
                    info!("{}: wrote {}", file.name, rewrite.hash.short());
                    FileStatus::Updated
                }
                Err(e) => {
                    warn!("Failed to write {}: {}", file.name, e);
                    FileStatus::WriteFailed(e.to_string())
                }
            }
        };

        FileOutcome {
            name: file.name.clone(),
            path: file.path.clone(),
            hash: Some(rewrite.hash),
            status,
            legacy_removed: rewrite.legacy_removed,
        }
    }

    /// Hash every article in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error only if `dir` cannot be listed.
    pub fn run(&self, dir: &Path) -> Result<RunReport> {
        self.run_with_progress(dir, |_| {})
    }

    /// Hash every article in `dir`, calling `on_file` after each one.
    pub fn run_with_progress<F>(&self, dir: &Path, mut on_file: F) -> Result<RunReport>
    where
        F: FnMut(&FileOutcome),
    {
        debug!("Matching {} article pattern(s)", self.patterns.len());
        let articles = files::find_articles(dir, &self.patterns)?;
        if articles.is_empty() {
            info!("No article files found in {}", dir.display());
        }

        let mut outcomes = Vec::with_capacity(articles.len());
        for file in &articles {
            let outcome = self.process_file(file);
            on_file(&outcome);
            outcomes.push(outcome);
        }

        Ok(RunReport {
            dir: dir.to_path_buf(),
            dry_run: self.options.dry_run,
            files: outcomes,
        })
    }
}
