//! Integration tests for script replay and export writing.
//!
//! Drives `run_apply` against scripts on disk and inspects the
//! `website-export.json` it leaves behind.

use std::path::Path;

use builder_cli::{run_apply, ReplayConfig};
use builder_core::EXPORT_FILE_NAME;
use chrono::{DateTime, TimeZone, Utc};

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
    let path = dir.join("script.json");
    std::fs::write(&path, body).expect("write script");
    path
}

fn read_export(dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.join(EXPORT_FILE_NAME)).expect("export exists");
    serde_json::from_str(&raw).expect("export is json")
}

// ==========================================================================
// Success cases
// ==========================================================================

#[test]
fn test_apply_writes_export_with_every_page() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(
        dir.path(),
        r#"[
            {"op":"addElement","element":{"id":"hero","type":"section","styles":{}}},
            {"op":"addElement","element":{"id":"title","type":"heading","content":"Welcome","styles":{}},"parentId":"hero"},
            {"op":"addPage","name":"About Us"},
            {"op":"addFromPalette","type":"text"},
            {"op":"updatePageSEO","id":"page-1","seo":{"title":"Home page"}}
        ]"#,
    );
    let out = dir.path().join("out");

    let summary =
        run_apply(&script, &out, ReplayConfig::default(), fixed_time()).expect("apply succeeds");
    assert_eq!(summary.applied, 5);
    assert!(summary.rejected.is_empty());
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.elements, 3);
    assert_eq!(summary.output, Some(out.join(EXPORT_FILE_NAME)));

    let export = read_export(&out);
    let pages = export["pages"].as_array().expect("pages array");
    assert_eq!(pages.len(), 2);

    let home = &pages[0];
    assert_eq!(home["id"], "page-1");
    assert_eq!(home["seo"]["title"], "Home page");
    assert_eq!(home["exportedAt"], "2024-05-01T12:30:00.000Z");
    assert_eq!(home["elements"][0]["id"], "hero");
    assert_eq!(home["elements"][0]["children"][0]["content"], "Welcome");

    let about = &pages[1];
    assert_eq!(about["name"], "About Us");
    assert_eq!(about["path"], "/about-us");
    assert_eq!(about["elements"][0]["type"], "text");
}

#[test]
fn test_apply_counts_rejected_commands() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(
        dir.path(),
        r#"[
            {"op":"deletePage","id":"page-1"},
            {"op":"addFromPalette","type":"button","parentId":"missing"},
            {"op":"redo"},
            {"op":"toggleDarkMode"}
        ]"#,
    );

    let summary = run_apply(&script, dir.path(), ReplayConfig::default(), fixed_time())
        .expect("apply succeeds");
    assert_eq!(summary.applied, 1);
    let rejected: Vec<_> = summary.rejected.iter().map(|r| r.index).collect();
    assert_eq!(rejected, vec![0, 1, 2]);

    let export = read_export(dir.path());
    assert_eq!(export["pages"].as_array().map(Vec::len), Some(1));
    assert_eq!(
        export["pages"][0]["elements"].as_array().map(Vec::len),
        Some(0)
    );
}

#[test]
fn test_apply_respects_history_limit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(
        dir.path(),
        r#"[
            {"op":"addPage","name":"One"},
            {"op":"addPage","name":"Two"},
            {"op":"addPage","name":"Three"},
            {"op":"undo"},
            {"op":"undo"},
            {"op":"undo"}
        ]"#,
    );

    let summary = run_apply(
        &script,
        dir.path(),
        ReplayConfig { history_limit: 2 },
        fixed_time(),
    )
    .expect("apply succeeds");
    // Only one step back fits in a two-entry history.
    assert_eq!(summary.applied, 4);
    assert_eq!(summary.pages, 3);
}

// ==========================================================================
// Error cases
// ==========================================================================

#[test]
fn test_apply_reports_missing_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = run_apply(
        &dir.path().join("nope.json"),
        dir.path(),
        ReplayConfig::default(),
        fixed_time(),
    )
    .expect_err("missing script fails");
    assert!(err.to_string().contains("Failed to read script"));
    assert!(!dir.path().join(EXPORT_FILE_NAME).exists());
}

#[test]
fn test_apply_reports_malformed_script() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = write_script(dir.path(), r#"[{"op":"addPage"}]"#);
    let err = run_apply(&script, dir.path(), ReplayConfig::default(), fixed_time())
        .expect_err("malformed script fails");
    assert!(err.to_string().contains("Invalid script"));
}
