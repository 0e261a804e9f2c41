use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lbdump_core::report::TextReport;
use lbdump_core::{Summary, fixtures, scan_source};

fn golden_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
}

fn load_expected_summary(case: &str) -> Summary {
    let expected_path = golden_root().join(case).join("expected_summary.json");
    let expected_json = fs::read_to_string(&expected_path).expect("read expected_summary.json");
    serde_json::from_str(&expected_json).expect("parse expected summary")
}

fn run_golden(case: &str, image: Vec<u8>) {
    let dir = golden_root().join(case);
    let expected_report =
        fs::read_to_string(dir.join("expected_report.txt")).expect("read expected_report.txt");
    let expected = load_expected_summary(case);

    let label = Path::new(case).with_extension("lbd");
    let mut sink = TextReport::new(Vec::new());
    let mut actual =
        scan_source(&label, io::Cursor::new(image), &mut sink).expect("scan fixture");
    actual.generated_at = expected.generated_at.clone();

    let report = String::from_utf8(sink.into_inner()).expect("report is UTF-8");
    assert_eq!(report, expected_report, "report mismatch in {case}");

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");
    assert_eq!(actual_value, expected_value, "summary mismatch in {case}");
}

#[test]
fn golden_empty_tod() {
    run_golden("empty_tod", fixtures::empty_tod());
}

#[test]
fn golden_single_frame() {
    run_golden("single_frame", fixtures::single_frame());
}

#[test]
fn golden_multi_tod() {
    run_golden("multi_tod", fixtures::multi_tod());
}

#[test]
fn golden_single_frame_tallies_each_kind_once() {
    let summary = load_expected_summary("single_frame");
    let kinds: Vec<&str> = summary
        .tod
        .packet_kinds
        .iter()
        .map(|entry| entry.kind.as_str())
        .collect();
    assert_eq!(kinds, ["attribute", "Object control", "1100"]);
    assert!(summary.tod.packet_kinds.iter().all(|entry| entry.count == 1));
}

#[test]
fn golden_multi_tod_reports_the_length_field() {
    let summary = load_expected_summary("multi_tod");
    assert_eq!(summary.mos.tod_count, 3);
    assert_eq!(summary.mos.tod_length_bytes, Some(16));
}
