//! Handler functions for the hash and verify commands.
//!
//! Report lines are built by plain formatting functions and printed by the
//! handlers, so the wording is testable without capturing stdout.

use std::path::{Path, PathBuf};

use mufx_core::traits::ConfigProvider;
use mufx_core::util::files;
use mufx_integrity::{
    FileOutcome, FileStatus, IntegrityHasher, RunReport, Verification, Verifier, VerifyStatus,
};
use tracing::info;

use crate::{Error, Result};

// ============================================================================
// hash
// ============================================================================

/// Hash every article in `dir`, printing each result as it completes.
pub fn handle_hash<C: ConfigProvider>(config: &C, dir: &Path, dry_run: bool) -> Result<RunReport> {
    let hasher = IntegrityHasher::from_config(config, dry_run)?;
    info!(
        "Hashing articles in {}{}",
        dir.display(),
        if dry_run { " (dry run)" } else { "" }
    );

    let report = hasher.run_with_progress(dir, |outcome| {
        for line in outcome_lines(outcome) {
            match outcome.hash {
                Some(_) => println!("{line}"),
                None => eprintln!("{line}"),
            }
        }
    })?;

    if report.is_empty() {
        println!("No article files found in {}", dir.display());
    }
    println!("{}", summary_line(&report));
    Ok(report)
}

/// Report lines for one processed article.
pub fn outcome_lines(outcome: &FileOutcome) -> Vec<String> {
    let Some(hash) = &outcome.hash else {
        let reason = match &outcome.status {
            FileStatus::NoContent => "no <article> or <body> content found".to_string(),
            FileStatus::ReadFailed(e) => format!("could not read: {e}"),
            other => format!("{other:?}"),
        };
        return vec![format!("  ! {}: skipped, {}", outcome.name, reason)];
    };

    let status = match &outcome.status {
        FileStatus::Updated => "updated".to_string(),
        FileStatus::Unchanged => "already current, not modified".to_string(),
        FileStatus::DryRun => "dry run, not modified".to_string(),
        FileStatus::WriteFailed(e) => format!("NOT WRITTEN: {e}"),
        other => format!("{other:?}"),
    };

    let mut lines = vec![
        format!("  {}", outcome.name),
        format!("    hash:  {hash}"),
        format!("    short: {}", hash.short()),
        format!("    {status}"),
    ];
    if outcome.legacy_removed > 0 {
        let verb = if outcome.is_modified() { "removed" } else { "would remove" };
        lines.push(format!(
            "    {verb} {} legacy integrity block(s)",
            outcome.legacy_removed
        ));
    }
    lines
}

/// Final summary line of a hashing run.
pub fn summary_line(report: &RunReport) -> String {
    let mut line = format!(
        "{} file(s) modified, {} hashed, {} skipped (dry run: {})",
        report.modified(),
        report.hashed(),
        report.skipped(),
        if report.dry_run { "yes" } else { "no" }
    );
    if report.dry_run {
        line.push_str("; no files were changed");
    }
    line
}

// ============================================================================
// verify
// ============================================================================

/// Verify `targets`, or every article in `dir` when `targets` is empty.
///
/// Missing files are reported and skipped. Fails with
/// [`Error::VerificationFailed`] when any other article is not verified.
pub fn handle_verify<C: ConfigProvider>(
    config: &C,
    dir: &Path,
    targets: &[PathBuf],
) -> Result<Vec<Verification>> {
    let results = verify_targets(config, dir, targets)?;

    if results.is_empty() {
        println!("No article files found in {}", dir.display());
    }
    for v in &results {
        for line in verification_lines(v) {
            println!("{line}");
        }
    }

    let missing = results
        .iter()
        .filter(|v| v.status == VerifyStatus::Missing)
        .count();
    let failed = results.iter().filter(|v| v.status.is_failure()).count();
    if failed > 0 {
        return Err(Error::VerificationFailed {
            failed,
            total: results.len() - missing,
        });
    }
    println!("{}", verify_summary_line(results.len() - missing, missing));
    Ok(results)
}

/// Run verification without printing.
pub fn verify_targets<C: ConfigProvider>(
    config: &C,
    dir: &Path,
    targets: &[PathBuf],
) -> Result<Vec<Verification>> {
    let verifier = Verifier::new(config.integrity_attribute());

    if targets.is_empty() {
        let articles = files::find_articles(dir, &config.article_patterns()?)?;
        return Ok(articles.iter().map(|f| verifier.verify_file(f)).collect());
    }
    Ok(targets.iter().map(|p| verifier.verify_path(p)).collect())
}

/// Closing line of a successful verify run.
pub fn verify_summary_line(verified: usize, missing: usize) -> String {
    if missing == 0 {
        format!("{verified} article(s) verified")
    } else {
        format!("{verified} article(s) verified, {missing} not found and skipped")
    }
}

/// Report lines for one verification.
pub fn verification_lines(v: &Verification) -> Vec<String> {
    let mark = match &v.status {
        VerifyStatus::Verified => "ok",
        VerifyStatus::Missing => "--",
        _ => "!!",
    };
    let mut lines = vec![format!("  {mark} {}: {}", v.name, v.status)];
    match &v.status {
        VerifyStatus::Mismatch {
            published,
            computed,
        } => {
            lines.push(format!("     Published: {published}"));
            lines.push(format!("     Computed:  {computed}"));
        }
        VerifyStatus::InvalidHash {
            published,
            computed,
        } => {
            lines.push(format!("     Published: {published} (not a SHA-256 digest)"));
            lines.push(format!("     Computed:  {computed}"));
        }
        VerifyStatus::NoHash { computed } => {
            lines.push(format!("     Computed:  {computed}"));
        }
        VerifyStatus::Unreadable(e) => lines.push(format!("     {e}")),
        _ => {}
    }
    lines
}

// ============================================================================
// Tests
// ============================================================================
