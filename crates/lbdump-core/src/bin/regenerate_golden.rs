use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lbdump_core::report::TextReport;
use lbdump_core::{DEFAULT_GENERATED_AT, fixtures, scan_source};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    for (case, image) in cases() {
        let dir = root.join(case);
        fs::create_dir_all(&dir)
            .map_err(|err| format!("failed to create {}: {}", dir.display(), err))?;
        regenerate_one(&dir, case, &image)?;
    }
    Ok(())
}

fn cases() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("empty_tod", fixtures::empty_tod()),
        ("single_frame", fixtures::single_frame()),
        ("multi_tod", fixtures::multi_tod()),
    ]
}

fn regenerate_one(dir: &Path, case: &str, image: &[u8]) -> Result<(), String> {
    let label = Path::new(case).with_extension("lbd");
    let mut sink = TextReport::new(Vec::new());
    let mut summary = scan_source(&label, io::Cursor::new(image.to_vec()), &mut sink)
        .map_err(|err| format!("scan failed for {}: {}", case, err))?;
    // pin the only nondeterministic field so regenerated files stay stable
    summary.generated_at = DEFAULT_GENERATED_AT.to_string();

    let report = String::from_utf8(sink.into_inner())
        .map_err(|err| format!("report for {} is not UTF-8: {}", case, err))?;
    let json = serde_json::to_string(&summary)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;

    let report_path = dir.join("expected_report.txt");
    fs::write(&report_path, report)
        .map_err(|err| format!("failed to write {}: {}", report_path.display(), err))?;
    let summary_path = dir.join("expected_summary.json");
    fs::write(&summary_path, json)
        .map_err(|err| format!("failed to write {}: {}", summary_path.display(), err))?;
    Ok(())
}
