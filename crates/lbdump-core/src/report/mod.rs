//! Report sinks and renderers.
//!
//! Decoders stream their findings through [`ReportSink`] as they go, so a
//! partially decoded file still yields the lines produced before the
//! failure. [`TextReport`] renders the classic sectioned text layout;
//! [`NullReport`] discards everything for validation-only runs.

use std::fmt;
use std::io::Write;

/// Total width of a section heading rule, label included.
pub const HEADING_RULE_WIDTH: usize = 38;

/// Receives decoded structure as section headings and formatted lines.
pub trait ReportSink {
    /// Open a new section for the given layer label.
    fn heading(&mut self, label: &str);
    /// Emit one formatted line within the current section.
    fn line(&mut self, text: fmt::Arguments<'_>);
}

/// Render the rule for a section heading, `=== LBD ===...` padded with
/// equals signs to [`HEADING_RULE_WIDTH`].
pub fn heading_rule(label: &str) -> String {
    let pad = HEADING_RULE_WIDTH.saturating_sub(label.len() + 1);
    format!("=== {} {}", label, "=".repeat(pad))
}

/// Text renderer over any writer. Write failures are swallowed; the report
/// is best-effort output and never masks a decode result.
pub struct TextReport<W> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the renderer and hand back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextReport<W> {
    fn heading(&mut self, label: &str) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "{}", heading_rule(label));
    }

    fn line(&mut self, text: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{text}");
    }
}

/// Sink that drops all output.
pub struct NullReport;

impl ReportSink for NullReport {
    fn heading(&mut self, _label: &str) {}
    fn line(&mut self, _text: fmt::Arguments<'_>) {}
}

/// Records every sink call as a plain string, headings prefixed with `== `.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordedReport {
    pub entries: Vec<String>,
}

#[cfg(test)]
impl ReportSink for RecordedReport {
    fn heading(&mut self, label: &str) {
        self.entries.push(format!("== {label}"));
    }

    fn line(&mut self, text: fmt::Arguments<'_>) {
        self.entries.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_pads_short_labels_to_the_fixed_width() {
        assert_eq!(heading_rule("LBD"), format!("=== LBD {}", "=".repeat(34)));
        assert_eq!(heading_rule("LBD").len(), 42);
    }

    #[test]
    fn rule_never_panics_on_oversized_labels() {
        let label = "a label wider than the rule itself would ever be";
        let rule = heading_rule(label);
        assert!(rule.starts_with("=== "));
        assert!(rule.contains(label));
    }

    #[test]
    fn text_report_writes_headings_and_lines_in_order() {
        let mut report = TextReport::new(Vec::new());
        report.heading("TOD");
        report.line(format_args!("Version: {}", 1));
        let out = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(out, format!("\n=== TOD {}\nVersion: 1\n", "=".repeat(34)));
    }
}
