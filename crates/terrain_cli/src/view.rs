//! Shared presentation for commands: diagnostics routing and plain text.

use std::io;

use terrain_diagnostics::{
    stream_for, DiagnosticRenderer, Diagnostics, RenderMode, Stream, TerminalRenderer,
    COMPACT_WARNINGS_HINT, CONSOLIDATE_MIN_DUPLICATES,
};

use crate::streams::Streams;

/// Writes command results and diagnostics to a pair of streams.
pub struct View {
    streams: Streams,
    mode: RenderMode,
}

impl View {
    /// Creates a view over `streams`.
    pub fn new(streams: Streams, mode: RenderMode) -> Self {
        Self { streams, mode }
    }

    /// Renders a finalized diagnostics collection.
    ///
    /// Diagnostics are sorted and repeated warnings consolidated first. A
    /// warnings-only collection in compact mode becomes a summary list on
    /// stdout; otherwise each diagnostic goes to the stream for its severity.
    pub fn diagnostics(&mut self, diags: Diagnostics) -> io::Result<()> {
        let diags = diags
            .sorted()
            .consolidate_warnings(CONSOLIDATE_MIN_DUPLICATES);
        if diags.is_empty() {
            return Ok(());
        }

        if self.mode.compact_warnings && diags.only_warnings() {
            let renderer =
                TerminalRenderer::new(self.mode.color, self.streams.columns(Stream::Stdout));
            let text = format!(
                "\n{}\n{}\n",
                renderer.render_compact(&diags),
                COMPACT_WARNINGS_HINT
            );
            return self.write(Stream::Stdout, &text);
        }

        for diag in &diags {
            let stream = stream_for(diag.severity());
            let renderer = TerminalRenderer::new(self.mode.color, self.streams.columns(stream));
            let text = renderer.render(diag);
            self.write(stream, &text)?;
        }
        Ok(())
    }

    /// Points the user at the help for `command`.
    pub fn help_prompt(&mut self, command: &str) -> io::Result<()> {
        let text =
            format!("\nFor more help on using this command, run:\n  terrain {command} -help\n");
        self.write(Stream::Stderr, &text)
    }

    /// Writes `text` to stdout as-is.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.write(Stream::Stdout, text)
    }

    /// Writes `text` and a newline to stdout.
    pub fn println(&mut self, text: &str) -> io::Result<()> {
        self.write(Stream::Stdout, text)?;
        self.write(Stream::Stdout, "\n")
    }

    /// Flushes both streams.
    pub fn flush(&mut self) -> io::Result<()> {
        self.streams.flush()
    }

    fn write(&mut self, stream: Stream, text: &str) -> io::Result<()> {
        self.streams.writer(stream).write_all(text.as_bytes())
    }
}
