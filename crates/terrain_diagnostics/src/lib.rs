//! Diagnostic creation, consolidation, and terminal formatting.
//!
//! This crate provides immutable [`Diagnostic`] values, the append-only
//! [`Diagnostics`] collection that each command invocation threads through its
//! stages, and the [`TerminalRenderer`] that turns a finalized collection into
//! text with or without color.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod diagnostics;
pub mod renderer;
pub mod severity;

pub use diagnostic::Diagnostic;
pub use diagnostics::{Diagnostics, CONSOLIDATE_MIN_DUPLICATES};
pub use renderer::{
    stream_for, DiagnosticRenderer, RenderMode, Stream, TerminalRenderer, COMPACT_WARNINGS_HINT,
    SEVERITY_STREAMS,
};
pub use severity::Severity;
