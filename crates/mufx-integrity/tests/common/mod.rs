//! Common fixtures for integrity integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use mufx_core::ArticlePatterns;
use mufx_integrity::{HashOptions, IntegrityHasher};
use tempfile::TempDir;

/// A temporary articles directory.
pub struct ArticleDir {
    dir: TempDir,
}

impl ArticleDir {
    /// Creates an empty articles directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `name` and returns the full path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    /// Reads `name` back.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }

    /// Raw bytes of `name`.
    pub fn bytes(&self, name: &str) -> Vec<u8> {
        fs::read(self.dir.path().join(name)).unwrap()
    }
}

/// Hasher with default patterns and options.
pub fn hasher() -> IntegrityHasher {
    IntegrityHasher::new(ArticlePatterns::default(), HashOptions::default())
}

/// Hasher in dry-run mode.
pub fn dry_run_hasher() -> IntegrityHasher {
    IntegrityHasher::new(
        ArticlePatterns::default(),
        HashOptions {
            dry_run: true,
            ..Default::default()
        },
    )
}

/// A full daily signal page around `body`.
pub fn signal_page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>muFX Signal Check</title>
  <style>body {{ font-family: serif; }}</style>
</head>
<body>
  <header class="masthead">muFX</header>
  <article class="article-body">
{body}
  </article>
  <footer><p>Not investment advice.</p></footer>
</body>
</html>
"#
    )
}
