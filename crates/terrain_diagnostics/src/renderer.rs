//! Diagnostic formatting for terminal output, with or without color.

use crate::diagnostic::Diagnostic;
use crate::diagnostics::Diagnostics;
use crate::severity::Severity;
use owo_colors::{OwoColorize, Style};

/// Hint printed after a compact warning summary.
pub const COMPACT_WARNINGS_HINT: &str =
    "To see the full warning notes, run terrain without --compact-warnings.";

/// Output sink a rendered diagnostic is written to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Which stream each severity goes to.
///
/// Errors go to stderr so they survive `terrain output > file`; warnings sit on
/// stdout next to the values they qualify.
pub const SEVERITY_STREAMS: [(Severity, Stream); 2] = [
    (Severity::Warning, Stream::Stdout),
    (Severity::Error, Stream::Stderr),
];

/// Looks up the stream for `severity` in [`SEVERITY_STREAMS`].
pub fn stream_for(severity: Severity) -> Stream {
    SEVERITY_STREAMS
        .iter()
        .find(|(s, _)| *s == severity)
        .map_or(Stream::Stderr, |(_, stream)| *stream)
}

/// How a finalized diagnostics collection should be presented.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct RenderMode {
    /// Whether ANSI color decoration is allowed.
    pub color: bool,
    /// Whether a warnings-only collection is shown as a summary list.
    pub compact_warnings: bool,
}

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a block format for terminals.
///
/// Produces output like:
/// ```text
///
/// Error: Invalid output format
///
/// The -raw and -json options are mutually-exclusive.
/// ```
///
/// Color is applied by [`paint`] only; the plain and colored forms of the same
/// diagnostic contain the same characters once escape sequences are removed.
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The terminal width for wrapping detail text.
    pub width: usize,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool, width: usize) -> Self {
        Self { color, width }
    }

    /// Renders a warnings-only collection as a list of summaries.
    pub fn render_compact(&self, diags: &Diagnostics) -> String {
        let mut out = paint("Warnings:", severity_style(Severity::Warning), self.color);
        out.push_str("\n\n");
        for diag in diags {
            out.push_str("- ");
            out.push_str(diag.summary());
            if diag.occurrences() > 1 {
                out.push_str(&format!(" ({} occurrences)", diag.occurrences()));
            }
            out.push('\n');
        }
        out
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::from("\n");

        // The summary is not wrapped: it may hold the text of an underlying
        // error that doesn't survive reflowing.
        let label = format!("{}: ", diag.severity());
        out.push_str(&paint(&label, severity_style(diag.severity()), self.color));
        out.push_str(&paint(diag.summary(), Style::new().bold(), self.color));
        out.push_str("\n\n");

        if let Some(detail) = detail_text(diag) {
            for line in detail.split('\n') {
                if self.width > 1 && !line.starts_with(' ') {
                    out.push_str(&wrap(line, self.width - 1));
                } else {
                    out.push_str(line);
                }
                out.push('\n');
            }
        }

        out
    }
}

/// Applies `style` to `text` when `enabled`, otherwise returns it unchanged.
pub fn paint(text: &str, style: Style, enabled: bool) -> String {
    if enabled {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Warning => Style::new().bold().yellow(),
        Severity::Error => Style::new().bold().red(),
    }
}

/// The detail paragraph plus a note about consolidated duplicates.
fn detail_text(diag: &Diagnostic) -> Option<String> {
    let note = match diag.similar() {
        0 => None,
        1 => Some("(and one more similar warning elsewhere)".to_string()),
        n => Some(format!("(and {n} more similar warnings elsewhere)")),
    };
    match (diag.detail(), note) {
        (Some(detail), Some(note)) => Some(format!("{detail}\n\n{note}")),
        (Some(detail), None) => Some(detail.to_string()),
        (None, note) => note,
    }
}

/// Greedy word wrap on spaces. Words longer than `width` stay on their own line.
fn wrap(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for word in line.split(' ') {
        let len = word.chars().count();
        if column > 0 && column + 1 + len > width {
            out.push('\n');
            column = 0;
        } else if column > 0 {
            out.push(' ');
            column += 1;
        }
        out.push_str(word);
        column += len;
    }
    out
}
