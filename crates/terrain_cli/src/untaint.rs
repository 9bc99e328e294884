//! The `terrain untaint` command.
//!
//! Only the help text is provided. Clearing the tainted flag rewrites state,
//! and terrain never writes state, so running the command reports an error.

use std::error::Error;

use terrain_diagnostics::{Diagnostic, RenderMode};

use crate::arguments::wants_help;
use crate::streams::Streams;
use crate::view::View;
use crate::GlobalArgs;

/// One-line description shown in command listings.
pub const SYNOPSIS: &str = "Remove the 'tainted' state from a resource instance";

/// Full help text for `terrain untaint -help`.
pub const HELP: &str = "\
Usage: terrain [global options] untaint [options] name

  A tainted resource instance is one that may not be fully functional,
  either because its creation partially failed or because it was marked
  as tainted by hand.

  This command removes that mark from a resource instance, so that it is
  seen as fully-functional and not in need of replacement.

  This will not modify your infrastructure directly. It only modifies
  your state file to clear the tainted flag.

Options:

  -allow-missing          If specified, the command will succeed (exit code 0)
                          even if the resource is missing.

  -lock=false             Don't hold a state lock during the operation.

  -lock-timeout=0s        Duration to retry a state lock.
";

/// Runs the `terrain untaint` command.
pub fn run(tokens: &[String], global: &GlobalArgs, streams: Streams) -> Result<i32, Box<dyn Error>> {
    if wants_help(tokens) {
        let mut view = View::new(streams, RenderMode::default());
        view.print(HELP)?;
        view.flush()?;
        return Ok(0);
    }

    let mut view = View::new(
        streams,
        RenderMode {
            color: global.color,
            compact_warnings: global.compact_warnings,
        },
    );
    view.diagnostics(
        Diagnostic::error(
            "Command unavailable",
            "The untaint command modifies state, and terrain only reads state. Use the tool \
             that manages this state to untaint resource instances.",
        )
        .into(),
    )?;
    view.flush()?;
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streams::capture::captured;
    use std::path::PathBuf;

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: false,
            verbose: false,
            color: false,
            compact_warnings: false,
            state_path: PathBuf::from("terrain.tfstate"),
        }
    }

    #[test]
    fn help_succeeds() {
        let (streams, out, err) = captured();
        let code = run(&["-help".to_string()], &global(), streams).unwrap();
        assert_eq!(code, 0);
        assert!(out.contents().starts_with("Usage: terrain [global options] untaint"));
        assert!(err.contents().is_empty());
    }

    #[test]
    fn running_reports_unavailable() {
        let (streams, out, err) = captured();
        let code = run(&["aws_instance.web".to_string()], &global(), streams).unwrap();
        assert_eq!(code, 1);
        assert!(out.contents().is_empty());
        assert!(err.contents().contains("Error: Command unavailable"));
    }
}
