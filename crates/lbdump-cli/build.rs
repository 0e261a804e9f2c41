use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    // CI sets GITHUB_SHA; local builds ask git directly.
    let full = env::var("GITHUB_SHA")
        .ok()
        .filter(|sha| !sha.is_empty())
        .or_else(|| git_output(&["rev-parse", "HEAD"]));

    let (full, short) = match full {
        Some(sha) => {
            let short = sha[..sha.len().min(7)].to_string();
            (sha, short)
        }
        None => ("unknown".to_string(), "unknown".to_string()),
    };
    let date = git_output(&["log", "-1", "--format=%cI"]).unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=LBDUMP_BUILD_COMMIT={short}");
    println!("cargo:rustc-env=LBDUMP_BUILD_COMMIT_FULL={full}");
    println!("cargo:rustc-env=LBDUMP_BUILD_DATE={date}");
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
