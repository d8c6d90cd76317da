use mufx_integrity::{FileStatus, IntegrityHash, Verifier};

use crate::common::{ArticleDir, dry_run_hasher, hasher, signal_page};

#[test]
fn test_signal_scenario_injects_hash() {
    let dir = ArticleDir::new();
    dir.write(
        "signal-20260226.html",
        r#"<article class="article-body">Dollar fades to 97.70.</article>"#,
    );

    let report = hasher().run(dir.path()).unwrap();

    let expected = IntegrityHash::compute("Dollar fades to 97.70.");
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].hash.as_ref(), Some(&expected));
    assert_eq!(report.modified(), 1);
    assert_eq!(
        dir.read("signal-20260226.html"),
        format!(
            r#"<article class="article-body" data-hash="{expected}">Dollar fades to 97.70.</article>"#
        )
    );
}

#[test]
fn test_second_run_is_idempotent() {
    let dir = ArticleDir::new();
    dir.write(
        "thematic-dollar-cycle.html",
        &signal_page("<p>The dollar cycle turns.</p>"),
    );

    let first = hasher().run(dir.path()).unwrap();
    let after_first = dir.bytes("thematic-dollar-cycle.html");
    let second = hasher().run(dir.path()).unwrap();

    assert_eq!(first.files[0].hash, second.files[0].hash);
    assert_eq!(first.modified(), 1);
    assert_eq!(second.modified(), 0);
    assert_eq!(second.files[0].status, FileStatus::Unchanged);
    assert_eq!(dir.bytes("thematic-dollar-cycle.html"), after_first);
}

#[test]
fn test_visible_text_change_changes_hash() {
    let dir = ArticleDir::new();
    dir.write("signal-a.html", &signal_page("<p>Gold at 2,650.</p>"));
    dir.write("signal-b.html", &signal_page("<p>Gold at 2,651.</p>"));

    let report = dry_run_hasher().run(dir.path()).unwrap();
    assert_ne!(report.files[0].hash, report.files[1].hash);
}

#[test]
fn test_presentation_change_keeps_hash() {
    let dir = ArticleDir::new();
    dir.write(
        "signal-a.html",
        &signal_page("<p>EUR/USD 1.0850</p><svg><text>1.08</text></svg><script>a()</script>"),
    );
    dir.write(
        "signal-b.html",
        &signal_page("<p>EUR/USD 1.0850</p><svg><text>9.99</text></svg><script>b()</script><style>p{}</style>"),
    );

    let report = dry_run_hasher().run(dir.path()).unwrap();
    assert_eq!(report.files[0].hash, report.files[1].hash);
}

#[test]
fn test_whitespace_edit_keeps_hash() {
    let dir = ArticleDir::new();
    dir.write("flash-a.html", "<article><p>BoJ holds rates.</p></article>");
    dir.write(
        "flash-b.html",
        "<article>\n\n  <p>BoJ   holds\n\n rates.</p>\n\n</article>",
    );

    let report = dry_run_hasher().run(dir.path()).unwrap();
    assert_eq!(report.files[0].hash, report.files[1].hash);
}

#[test]
fn test_dry_run_leaves_bytes_identical() {
    let dir = ArticleDir::new();
    let page = signal_page("<p>USD/JPY 151.20</p><div class=\"integrity-box\">old</div>");
    dir.write("signal-20260227.html", &page);
    let before = dir.bytes("signal-20260227.html");

    let report = dry_run_hasher().run(dir.path()).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.modified(), 0);
    assert_eq!(report.files[0].status, FileStatus::DryRun);
    assert_eq!(dir.bytes("signal-20260227.html"), before);
}

#[test]
fn test_dry_run_counts_only_matching_files() {
    let dir = ArticleDir::new();
    dir.write("signal-20260226.html", "<article>one</article>");
    dir.write("thematic-gold.html", "<article>two</article>");
    dir.write("q2-outlook.html", "<article>three</article>");
    dir.write("index.html", "<article>skip</article>");
    dir.write("weekly-20260301.html", "<article>skip</article>");

    let report = dry_run_hasher().run(dir.path()).unwrap();

    let names: Vec<_> = report.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["q2-outlook.html", "signal-20260226.html", "thematic-gold.html"]
    );
    assert_eq!(report.modified(), 0);
}

#[test]
fn test_file_without_container_is_skipped() {
    let dir = ArticleDir::new();
    dir.write("flash-broken.html", "<div>no container</div>");
    dir.write("flash-good.html", "<article>fine</article>");

    let report = hasher().run(dir.path()).unwrap();

    assert_eq!(report.files[0].status, FileStatus::NoContent);
    assert_eq!(report.modified(), 1);
    assert_eq!(report.skipped(), 1);
    assert_eq!(dir.read("flash-broken.html"), "<div>no container</div>");
}

#[test]
fn test_unreadable_file_does_not_stop_run() {
    let dir = ArticleDir::new();
    std::fs::write(dir.path().join("signal-binary.html"), [0xffu8, 0xfe, 0xfd]).unwrap();
    dir.write("signal-text.html", "<article>text</article>");

    let report = hasher().run(dir.path()).unwrap();

    assert!(matches!(report.files[0].status, FileStatus::ReadFailed(_)));
    assert_eq!(report.files[1].status, FileStatus::Updated);
}

#[test]
fn test_legacy_blocks_removed_and_rest_preserved() {
    let dir = ArticleDir::new();
    let page = signal_page("<p>Brent 74.10</p>").replace(
        "  <footer>",
        "  <div class=\"integrity-explanation\">\n    <h3>About this hash</h3>\n    <p>SHA-256 ...</p>\n  </div>\n  <footer>",
    );
    dir.write("signal-20260301.html", &page);

    let report = hasher().run(dir.path()).unwrap();
    let written = dir.read("signal-20260301.html");
    let hash = report.files[0].hash.clone().unwrap();

    assert_eq!(report.files[0].legacy_removed, 1);
    assert!(!written.contains("integrity-explanation"));
    let expected = signal_page("<p>Brent 74.10</p>")
        .replace(
            r#"<article class="article-body">"#,
            &format!(r#"<article class="article-body" data-hash="{hash}">"#),
        )
        .replace("  <footer>", "  \n  <footer>");
    assert_eq!(written, expected);
}

#[test]
fn test_rehash_after_edit_replaces_hash() {
    let dir = ArticleDir::new();
    dir.write("signal-20260302.html", "<article>DXY 97.70</article>");
    hasher().run(dir.path()).unwrap();

    let edited = dir.read("signal-20260302.html").replace("97.70", "97.95");
    dir.write("signal-20260302.html", &edited);
    let report = hasher().run(dir.path()).unwrap();

    let written = dir.read("signal-20260302.html");
    let expected = IntegrityHash::compute("DXY 97.95");
    assert_eq!(report.files[0].hash.as_ref(), Some(&expected));
    assert_eq!(written.matches("data-hash=").count(), 1);
    assert!(written.contains(expected.as_str()));
    assert!(
        Verifier::default()
            .verify_path(&dir.path().join("signal-20260302.html"))
            .status
            .is_verified()
    );
}
