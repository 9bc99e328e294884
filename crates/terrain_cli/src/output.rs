//! Implementation of the `terrain output` command.
//!
//! Parses the command's own flags, fetches output values through a
//! [`StateReader`], renders them in the selected form, and reports all
//! diagnostics gathered along the way. Exit code 1 means at least one
//! error was reported.

use std::error::Error;

use terrain_diagnostics::{Diagnostic, Diagnostics, RenderMode};
use terrain_state::{Outputs, StateReader};
use tracing::debug;

use crate::arguments::{parse_output, wants_help, OutputArguments};
use crate::output_view::render_outputs;
use crate::streams::Streams;
use crate::view::View;
use crate::GlobalArgs;

/// One-line description shown in command listings.
pub const SYNOPSIS: &str = "Show output values from your root module";

/// Full help text for `terrain output -help`.
pub const HELP: &str = "\
Usage: terrain [global options] output [options] [NAME]

  Reads an output variable from a state file and prints the value.
  With no additional arguments, output will display all the outputs
  for the root module. If NAME is not specified, all outputs are
  printed.

Options:

  -state=path      Path to the state file to read. Defaults to
                   the configured state path, \"terrain.tfstate\"
                   unless terrain.toml says otherwise.

  -no-color        If specified, output won't contain any color.

  -json            If specified, machine readable output will be
                   printed in JSON format.

  -raw             For value types that can be automatically
                   converted to a string, will print the raw
                   string directly, rather than a human-oriented
                   representation of the value.
";

/// Where a run of the command has got to. Runs only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Init,
    Parsed,
    Fetched,
    Rendered,
    Success,
    Failure,
}

struct Progress {
    stage: Stage,
}

impl Progress {
    fn new() -> Self {
        debug!(stage = ?Stage::Init, "output command started");
        Self { stage: Stage::Init }
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(
            next > self.stage && self.stage < Stage::Success,
            "output command cannot move from {:?} to {next:?}",
            self.stage
        );
        debug!(from = ?self.stage, to = ?next, "output command stage");
        self.stage = next;
    }

    /// Moves to the terminal stage matching `diags` and returns the exit code.
    fn finish(&mut self, diags: &Diagnostics) -> i32 {
        debug!(
            errors = diags.error_count(),
            warnings = diags.warning_count(),
            "output command finished"
        );
        if diags.has_errors() {
            self.advance(Stage::Failure);
            1
        } else {
            self.advance(Stage::Success);
            0
        }
    }
}

/// Runs the `terrain output` command over the raw `tokens` after the
/// subcommand name.
pub fn run(
    tokens: &[String],
    global: &GlobalArgs,
    state: &dyn StateReader,
    streams: Streams,
) -> Result<i32, Box<dyn Error>> {
    if wants_help(tokens) {
        let mut view = View::new(streams, RenderMode::default());
        view.print(HELP)?;
        view.flush()?;
        return Ok(0);
    }

    let mut progress = Progress::new();
    let (args, diags) = parse_output(tokens);
    let mut view = View::new(
        streams,
        RenderMode {
            color: global.color && args.color,
            compact_warnings: global.compact_warnings,
        },
    );
    progress.advance(Stage::Parsed);

    if diags.has_errors() {
        let code = progress.finish(&diags);
        view.diagnostics(diags)?;
        view.help_prompt("output")?;
        view.flush()?;
        return Ok(code);
    }

    let (outputs, diags) = fetch_outputs(state, &args, diags);
    progress.advance(Stage::Fetched);

    if diags.has_errors() {
        let code = progress.finish(&diags);
        view.diagnostics(diags)?;
        view.flush()?;
        return Ok(code);
    }

    let rendered = render_outputs(&mut view, args.view_type, &args.name, &outputs)?;
    let diags = diags.extend(rendered);
    progress.advance(Stage::Rendered);

    let code = progress.finish(&diags);
    view.diagnostics(diags)?;
    view.flush()?;
    Ok(code)
}

fn fetch_outputs(
    state: &dyn StateReader,
    args: &OutputArguments,
    diags: Diagnostics,
) -> (Outputs, Diagnostics) {
    match state.outputs(args.state_path_override()) {
        Ok(outputs) => (outputs.unwrap_or_default(), diags),
        Err(err) => {
            debug!(error = %err, "failed to load state");
            (
                Outputs::new(),
                diags.append(Diagnostic::error("Failed to load state", err.to_string())),
            )
        }
    }
}
