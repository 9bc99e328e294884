//! The output sinks a command writes to.

use std::io::{self, Write};

use is_terminal::IsTerminal;
use terminal_size::{terminal_size_of, Width};
use terrain_diagnostics::Stream;

/// Wrap width used when the terminal size is unknown.
pub const DEFAULT_COLUMNS: usize = 78;

/// Standard output and standard error, plus their display widths.
pub struct Streams {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
    stdout_columns: usize,
    stderr_columns: usize,
}

impl Streams {
    /// Streams backed by the process's stdout and stderr.
    pub fn stdio() -> Self {
        let stdout_columns = match terminal_size_of(io::stdout()) {
            Some((Width(w), _)) if w > 0 => usize::from(w),
            _ => DEFAULT_COLUMNS,
        };
        let stderr_columns = match terminal_size_of(io::stderr()) {
            Some((Width(w), _)) if w > 0 => usize::from(w),
            _ => DEFAULT_COLUMNS,
        };
        Self {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
            stdout_columns,
            stderr_columns,
        }
    }

    /// Streams backed by arbitrary writers sharing one width.
    pub fn new(stdout: Box<dyn Write>, stderr: Box<dyn Write>, columns: usize) -> Self {
        Self {
            stdout,
            stderr,
            stdout_columns: columns,
            stderr_columns: columns,
        }
    }

    /// The writer behind `stream`.
    pub fn writer(&mut self, stream: Stream) -> &mut dyn Write {
        match stream {
            Stream::Stdout => self.stdout.as_mut(),
            Stream::Stderr => self.stderr.as_mut(),
        }
    }

    /// Display width of `stream` in columns.
    pub fn columns(&self, stream: Stream) -> usize {
        match stream {
            Stream::Stdout => self.stdout_columns,
            Stream::Stderr => self.stderr_columns,
        }
    }

    /// Flushes both writers.
    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}

/// Returns `true` if the process's stdout is attached to a terminal.
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}
