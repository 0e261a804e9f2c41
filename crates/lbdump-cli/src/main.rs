use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use glob::glob;

use lbdump_core::report::{NullReport, TextReport};
use lbdump_core::{DecodeError, ScanError, Summary, scan_lbd_file};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LBDUMP_BUILD_COMMIT"),
    ")\ncommit: ",
    env!("LBDUMP_BUILD_COMMIT_FULL"),
    "\nbuilt: ",
    env!("LBDUMP_BUILD_DATE"),
);

#[derive(Parser, Debug)]
#[command(name = "lbdump")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Structure dumper for LBD level archives (LMM/MOM/MOS/TOD animation chain).",
    long_about = None,
    after_help = "Examples:\n  lbdump M013.LBD\n  lbdump M013.LBD --json --pretty\n  lbdump 'STG00/M*.LBD' -s summary.json"
)]
struct Cli {
    /// Path to an .lbd file (a glob pattern matching a single file also works)
    input: PathBuf,

    /// Print the JSON summary to stdout instead of the text report
    #[arg(long)]
    json: bool,

    /// Also write the JSON summary to this path
    #[arg(short = 's', long)]
    summary: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress the text report and status notes
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(err.to_string(), None)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&cli.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    if let Some(summary_path) = cli.summary.as_ref() {
        let summary_abs = summary_path
            .parent()
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    fs::canonicalize(".")
                } else {
                    fs::canonicalize(parent)
                }
            })
            .transpose()
            .with_context(|| {
                format!("Failed to resolve summary path: {}", summary_path.display())
            })?;
        if let Some(summary_dir) = summary_abs {
            let summary_target = summary_dir.join(
                summary_path
                    .file_name()
                    .ok_or_else(|| anyhow::anyhow!("Invalid summary path"))?,
            );
            if summary_target == input_abs {
                return Err(CliError::new(
                    format!(
                        "summary path must differ from input: {}",
                        summary_path.display()
                    ),
                    Some("choose a different output path".to_string()),
                ));
            }
        }
    }

    let meta = fs::metadata(&resolved_input)
        .with_context(|| format!("Failed to read input file: {}", resolved_input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", cli.input.display()),
            Some("use an .lbd file".to_string()),
        ));
    }

    let summary = scan_input(&resolved_input, cli.quiet || cli.json)?;

    if cli.json {
        let json = serialize_summary(&summary, cli.pretty, cli.compact)?;
        print!("{}", json);
    }

    if let Some(summary_path) = cli.summary.as_ref() {
        let json = serialize_summary(&summary, cli.pretty, cli.compact)?;
        if let Some(parent) = summary_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(summary_path, json)
            .with_context(|| format!("Failed to write summary: {}", summary_path.display()))?;
        if !cli.quiet {
            eprintln!("OK: summary written -> {}", summary_path.display());
        }
    }

    Ok(())
}

fn scan_input(path: &Path, silent: bool) -> Result<Summary, CliError> {
    let result = if silent {
        scan_lbd_file(path, &mut NullReport)
    } else {
        let mut sink = TextReport::new(io::stdout().lock());
        scan_lbd_file(path, &mut sink)
    };
    result.map_err(|err| scan_error(path, err))
}

fn scan_error(path: &Path, err: ScanError) -> CliError {
    let hint = match &err {
        ScanError::Decode(DecodeError::SignatureMismatch { layer: "LBD", .. }) => {
            Some("the file does not start with an LBD signature".to_string())
        }
        _ => None,
    };
    CliError::new(format!("failed to scan {}: {}", path.display(), err), hint)
}

fn serialize_summary(summary: &Summary, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(summary)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(summary)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use an .lbd file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "lbd" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected an .lbd file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected an .lbd file".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single archive, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches.iter().take(3).collect::<Vec<_>>();
        if !listed.is_empty() {
            let mut details = String::new();
            details.push_str("; matches: ");
            details.push_str(
                &listed
                    .into_iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            if matches.len() > 3 {
                details.push_str(", ...");
            }
            message.push_str(&details);
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
