//! File utilities for article discovery, reading, and writing.
//!
//! Discovery is deliberately flat: only regular files directly inside the
//! articles directory are considered, and results come back sorted by file
//! name so every run visits articles in the same order.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, warn};

use crate::{Error, Result};

/// File name patterns of the four article families: daily signal,
/// thematic, quarterly outlook, and flash note.
pub const DEFAULT_ARTICLE_PATTERNS: [&str; 4] = [
    "signal-*.html",
    "thematic-*.html",
    "q*-outlook.html",
    "flash-*.html",
];

/// A compiled set of file name globs.
#[derive(Debug, Clone)]
pub struct ArticlePatterns {
    patterns: Vec<Pattern>,
}

impl ArticlePatterns {
    /// Compile a list of glob strings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first invalid glob.
    pub fn new<I, S>(globs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = globs
            .into_iter()
            .map(|g| {
                let g = g.as_ref();
                Pattern::new(g)
                    .map_err(|e| Error::config(format!("invalid article pattern '{g}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Whether `file_name` matches any pattern.
    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(file_name))
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns are configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for ArticlePatterns {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_ARTICLE_PATTERNS
                .iter()
                .filter_map(|g| Pattern::new(g).ok())
                .collect(),
        }
    }
}

/// Information about a discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name, e.g. `signal-20260226.html`.
    pub name: String,
}

/// Find article files directly inside `base_path`, sorted by name.
///
/// Subdirectories are not descended into. Entries whose names are not valid
/// UTF-8 are skipped.
///
/// # Errors
///
/// Returns an error if `base_path` itself cannot be read. Failures on
/// individual entries are logged and skipped.
pub fn find_articles(base_path: &Path, patterns: &ArticlePatterns) -> Result<Vec<FileInfo>> {
    let entries = fs::read_dir(base_path).map_err(|e| Error::io_with_path(e, base_path))?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", base_path.display(), e);
                continue;
            }
        };
        let path = entry.path();

        // Skip directories and anything else that is not a file
        if !path.is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!("Skipping non UTF-8 file name: {:?}", entry.file_name());
            continue;
        };

        if patterns.matches(&name) {
            files.push(FileInfo { path, name });
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Found {} article(s) in {}", files.len(), base_path.display());
    Ok(files)
}

/// Read a file's contents as a string.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))
}

/// Replace a file's contents with `contents` in a single write.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::io_with_path(e, path))
}

/// Check if a path exists.
pub fn exists(path: &Path) -> bool {
    fs::exists(path).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "<article>x</article>").unwrap();
        path
    }

    #[test]
    fn test_default_patterns_match_article_families() {
        let patterns = ArticlePatterns::default();
        assert_eq!(patterns.len(), 4);
        assert!(patterns.matches("signal-20260226.html"));
        assert!(patterns.matches("thematic-dollar-cycle.html"));
        assert!(patterns.matches("q2-outlook.html"));
        assert!(patterns.matches("q3-2026-outlook.html"));
        assert!(patterns.matches("flash-boj.html"));
    }

    #[test]
    fn test_default_patterns_reject_others() {
        let patterns = ArticlePatterns::default();
        assert!(!patterns.matches("index.html"));
        assert!(!patterns.matches("signal-20260226.md"));
        assert!(!patterns.matches("weekly-20260301.html"));
        assert!(!patterns.matches("outlook.html"));
    }

    #[test]
    fn test_patterns_invalid_glob() {
        let err = ArticlePatterns::new(["signal-[.html"]).unwrap_err();
        assert!(err.to_string().contains("signal-[.html"));
    }

    #[test]
    fn test_patterns_custom() {
        let patterns = ArticlePatterns::new(["weekly-*.html"]).unwrap();
        assert!(patterns.matches("weekly-20260301.html"));
        assert!(!patterns.matches("signal-20260226.html"));
        assert_eq!(patterns.len(), 1);
    }

    #[test]
    fn test_find_articles_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "signal-20260227.html");
        touch(temp.path(), "flash-boj.html");
        touch(temp.path(), "signal-20260226.html");
        touch(temp.path(), "index.html");
        touch(temp.path(), "notes.md");

        let files = find_articles(temp.path(), &ArticlePatterns::default()).unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "flash-boj.html",
                "signal-20260226.html",
                "signal-20260227.html"
            ]
        );
    }

    #[test]
    fn test_find_articles_not_recursive() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("archive");
        fs::create_dir(&archive).unwrap();
        touch(&archive, "signal-20250101.html");
        touch(temp.path(), "signal-20260226.html");

        let files = find_articles(temp.path(), &ArticlePatterns::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, temp.path().join("signal-20260226.html"));
    }

    #[test]
    fn test_find_articles_skips_matching_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("signal-dir.html")).unwrap();

        let files = find_articles(temp.path(), &ArticlePatterns::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_articles_empty_dir() {
        let temp = TempDir::new().unwrap();
        let files = find_articles(temp.path(), &ArticlePatterns::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_articles_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let err = find_articles(&missing, &ArticlePatterns::default()).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_read_and_write_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("signal-20260226.html");
        write_file(&path, "<article>Dollar fades</article>").unwrap();
        assert_eq!(read_file(&path).unwrap(), "<article>Dollar fades</article>");
    }

    #[test]
    fn test_read_file_not_found() {
        let temp = TempDir::new().unwrap();
        let nonexistent = temp.path().join("nonexistent.html");

        let result = read_file(&nonexistent);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("nonexistent.html"));
    }

    #[test]
    fn test_read_file_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("signal-bad.html");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(read_file(&path).is_err());
    }

    #[test]
    fn test_exists() {
        let temp = TempDir::new().unwrap();
        let path = touch(temp.path(), "flash-boj.html");
        assert!(exists(&path));
        assert!(!exists(&temp.path().join("nonexistent.html")));
    }
}
