//! Integration tests for ColorNormalizer against the real filesystem
//!
//! These tests verify:
//! - End-to-end rewriting of the listed articles
//! - Missing files are skipped silently
//! - Progress and completion notices on the output stream
//! - Failure mid-run leaves earlier files written and later files untouched

use camino::Utf8PathBuf;
use colornorm::services::{ApplyMode, ColorNormalizer, FileOutcome, NormalizeError};
use colornorm::{COMPLETION_NOTICE, TARGET_FILES};
use std::fs;
use tempfile::TempDir;

fn create_site_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, root)
}

fn run(root: &Utf8PathBuf, mode: ApplyMode) -> (Result<usize, NormalizeError>, String) {
    let normalizer = ColorNormalizer::new(root, mode).unwrap();
    let mut out = Vec::new();
    let result = normalizer
        .normalize(&TARGET_FILES, &mut out)
        .map(|summary| summary.updated.len());
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_trading_basics_end_to_end() {
    let (_temp_dir, root) = create_site_dir();
    let page = root.join("trading-basics.html");
    fs::write(
        &page,
        r##"<html><body><svg><rect fill="#0f172a" stroke="#475569"/></svg></body></html>"##,
    )
    .unwrap();

    let (result, output) = run(&root, ApplyMode::SinglePass);

    assert_eq!(result.unwrap(), 1);
    let content = fs::read_to_string(&page).unwrap();
    assert!(content.contains(r##"<rect fill="#ffffff" stroke="#000000"/>"##));
    assert!(output.lines().any(|l| l == "Updated trading-basics.html"));
    assert_eq!(
        output,
        format!("Updated trading-basics.html\n{}\n", COMPLETION_NOTICE)
    );
}

#[test]
fn test_no_listed_files_present() {
    let (_temp_dir, root) = create_site_dir();
    fs::write(root.join("index.html"), r##"<rect fill="#111827"/>"##).unwrap();

    let (result, output) = run(&root, ApplyMode::SinglePass);

    assert_eq!(result.unwrap(), 0);
    assert_eq!(output.lines().count(), 1);
    assert_eq!(output.trim_end(), COMPLETION_NOTICE);
    assert!(!output.contains("Updated"));

    // unlisted files are never touched
    assert_eq!(
        fs::read_to_string(root.join("index.html")).unwrap(),
        r##"<rect fill="#111827"/>"##
    );
    assert_eq!(fs::read_dir(&root).unwrap().count(), 1);
}

#[test]
fn test_notices_follow_list_order() {
    let (_temp_dir, root) = create_site_dir();
    for name in ["thought.html", "forex-article.html", "risk-management.html"] {
        fs::write(root.join(name), r##"<text fill="#fff">x</text>"##).unwrap();
    }

    let (result, output) = run(&root, ApplyMode::SinglePass);

    assert_eq!(result.unwrap(), 3);
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Updated forex-article.html",
            "Updated risk-management.html",
            "Updated thought.html",
            COMPLETION_NOTICE,
        ]
    );
}

#[test]
fn test_file_without_colors_is_still_reported() {
    let (_temp_dir, root) = create_site_dir();
    let page = root.join("support-resistance.html");
    fs::write(&page, "<p>No charts here.</p>\n").unwrap();

    let normalizer = ColorNormalizer::new(&root, ApplyMode::SinglePass).unwrap();
    let outcome = normalizer.normalize_file("support-resistance.html").unwrap();

    assert_eq!(
        outcome,
        FileOutcome::Updated {
            replacements: 0,
            bytes_written: 23,
        }
    );
    assert_eq!(fs::read_to_string(&page).unwrap(), "<p>No charts here.</p>\n");
}

#[test]
fn test_cascade_mode_rewrites_rule_by_rule() {
    let (_temp_dir, root) = create_site_dir();
    let page = root.join("technical-analysis.html");
    fs::write(
        &page,
        r##"<rect fill="#0f172a"/><circle fill="#10b981"/><circle fill="#ffdd57"/><text fill="#071427"/>"##,
    )
    .unwrap();

    let (result, _) = run(&root, ApplyMode::Cascade);

    assert_eq!(result.unwrap(), 1);
    assert_eq!(
        fs::read_to_string(&page).unwrap(),
        r##"<rect fill="#000000"/><circle fill="#ffffff"/><circle fill="#ffffff"/><text fill="#000000"/>"##
    );
}

#[test]
fn test_unreadable_entry_stops_run() {
    let (_temp_dir, root) = create_site_dir();
    let first = root.join("trading-basics.html");
    let later = root.join("risk-management.html");
    fs::write(&first, r##"<rect fill="#111827"/>"##).unwrap();
    fs::write(&later, r##"<rect fill="#111827"/>"##).unwrap();
    // exists, but cannot be read as a file
    fs::create_dir(root.join("forex-article.html")).unwrap();

    let (result, output) = run(&root, ApplyMode::SinglePass);

    match result {
        Err(NormalizeError::Read { path, .. }) => {
            assert_eq!(path.file_name(), Some("forex-article.html"))
        }
        other => panic!("expected read error, got {:?}", other),
    }
    assert_eq!(output, "Updated trading-basics.html\n");
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        r##"<rect fill="#ffffff"/>"##
    );
    assert_eq!(
        fs::read_to_string(&later).unwrap(),
        r##"<rect fill="#111827"/>"##
    );
}

#[test]
fn test_invalid_utf8_is_a_read_error() {
    let (_temp_dir, root) = create_site_dir();
    let page = root.join("thought.html");
    fs::write(&page, [0x3c, 0xff, 0xfe, 0x3e]).unwrap();

    let normalizer = ColorNormalizer::new(&root, ApplyMode::SinglePass).unwrap();
    let err = normalizer.normalize_file("thought.html").unwrap_err();

    match err {
        NormalizeError::Read { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::InvalidData)
        }
        other => panic!("expected read error, got {}", other),
    }
    assert_eq!(fs::read(&page).unwrap(), vec![0x3c, 0xff, 0xfe, 0x3e]);
}

#[test]
fn test_unicode_content_round_trips() {
    let (_temp_dir, root) = create_site_dir();
    let page = root.join("trading-psychology.html");
    fs::write(
        &page,
        r##"<p>Fear → greed · 恐怖</p><svg><path stroke="#a78bfa"/></svg>"##,
    )
    .unwrap();

    let (result, _) = run(&root, ApplyMode::SinglePass);

    assert_eq!(result.unwrap(), 1);
    assert_eq!(
        fs::read_to_string(&page).unwrap(),
        r##"<p>Fear → greed · 恐怖</p><svg><path stroke="#000000"/></svg>"##
    );
}
