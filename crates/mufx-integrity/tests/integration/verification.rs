use mufx_core::ArticlePatterns;
use mufx_core::util::files::find_articles;
use mufx_integrity::{Verifier, VerifyStatus};

use crate::common::{ArticleDir, hasher, signal_page};

#[test]
fn test_hashed_directory_verifies() {
    let dir = ArticleDir::new();
    dir.write("signal-20260226.html", &signal_page("<p>DXY 97.70</p>"));
    dir.write("q2-outlook.html", &signal_page("<p>Q2: range trade.</p>"));
    hasher().run(dir.path()).unwrap();

    let verifier = Verifier::default();
    for file in find_articles(dir.path(), &ArticlePatterns::default()).unwrap() {
        let v = verifier.verify_file(&file);
        assert_eq!(v.status, VerifyStatus::Verified, "{}", v.name);
    }
}

#[test]
fn test_edit_after_hashing_is_detected() {
    let dir = ArticleDir::new();
    let path = dir.write("flash-ecb.html", &signal_page("<p>ECB cuts 25bp.</p>"));
    hasher().run(dir.path()).unwrap();

    let tampered = dir.read("flash-ecb.html").replace("25bp", "50bp");
    dir.write("flash-ecb.html", &tampered);

    let v = Verifier::default().verify_path(&path);
    assert!(matches!(v.status, VerifyStatus::Mismatch { .. }));
}

#[test]
fn test_unhashed_article_reports_no_hash() {
    let dir = ArticleDir::new();
    let path = dir.write("thematic-yen.html", "<article>Yen carry.</article>");
    let v = Verifier::default().verify_path(&path);
    assert!(matches!(v.status, VerifyStatus::NoHash { .. }));
}
