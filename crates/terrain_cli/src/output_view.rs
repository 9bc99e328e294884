//! Rendering of output values in the human, JSON and raw forms.

use std::io;

use terrain_diagnostics::{Diagnostic, Diagnostics};
use terrain_state::{format_value, raw_string, OutputValue, Outputs, RawValueError};
use tracing::debug;

use crate::arguments::ViewType;
use crate::view::View;

/// Writes `outputs` (or just the one called `name`) to stdout.
///
/// Problems with the requested values come back as diagnostics for the
/// caller to append to the run's collection. An `Err` is a failed write.
pub fn render_outputs(
    view: &mut View,
    view_type: ViewType,
    name: &str,
    outputs: &Outputs,
) -> io::Result<Diagnostics> {
    debug!(?view_type, name, count = outputs.len(), "rendering outputs");
    match view_type {
        ViewType::Human => human(view, name, outputs),
        ViewType::Json => json(view, name, outputs),
        ViewType::Raw => raw(view, name, outputs),
    }
}

fn human(view: &mut View, name: &str, outputs: &Outputs) -> io::Result<Diagnostics> {
    if !name.is_empty() {
        return match outputs.get(name) {
            Some(output) => {
                view.println(&format_value(&output.value, &output.value_type, 0))?;
                Ok(Diagnostics::new())
            }
            None => Ok(output_not_found(name).into()),
        };
    }

    if outputs.is_empty() {
        return Ok(no_outputs().into());
    }

    let lines: Vec<String> = outputs
        .iter()
        .map(|(name, output)| format!("{name} = {}", human_listing(output)))
        .collect();
    view.println(&lines.join("\n"))?;
    Ok(Diagnostics::new())
}

/// A value as shown in the full listing, where sensitive values are hidden.
fn human_listing(output: &OutputValue) -> String {
    if output.sensitive {
        "<sensitive>".to_string()
    } else {
        format_value(&output.value, &output.value_type, 0)
    }
}

fn json(view: &mut View, name: &str, outputs: &Outputs) -> io::Result<Diagnostics> {
    let text = if name.is_empty() {
        serde_json::to_string_pretty(outputs)
    } else {
        match outputs.get(name) {
            Some(output) => serde_json::to_string_pretty(&output.value),
            None => return Ok(output_not_found(name).into()),
        }
    };
    let text = text.map_err(io::Error::other)?;
    view.println(&text)?;
    Ok(Diagnostics::new())
}

fn raw(view: &mut View, name: &str, outputs: &Outputs) -> io::Result<Diagnostics> {
    let Some(output) = outputs.get(name) else {
        return Ok(output_not_found(name).into());
    };
    match raw_string(&output.value, &output.value_type) {
        Ok(text) => {
            view.print(&text)?;
            Ok(Diagnostics::new())
        }
        Err(RawValueError::Null) => Ok(Diagnostic::error(
            "Unsupported value for raw output",
            format!("The value for output value {name:?} is null, so -raw mode cannot print it."),
        )
        .into()),
        Err(RawValueError::Unsupported(type_name)) => Ok(Diagnostic::error(
            "Unsupported value for raw output",
            format!(
                "The -raw option only supports strings, numbers, and boolean values, but output \
                 value {name:?} is {type_name}.\n\nUse the -json option for machine-readable \
                 representations of output values that have complex types."
            ),
        )
        .into()),
    }
}

fn output_not_found(name: &str) -> Diagnostic {
    Diagnostic::error(
        "Output not found",
        format!(
            "The output variable {name:?} could not be found in the state file. If you recently \
             added this to your configuration, be sure to run `terrain apply`, since the state \
             won't be updated with new output variables until that command is run."
        ),
    )
}

fn no_outputs() -> Diagnostic {
    Diagnostic::warning(
        "No outputs found",
        "The state file either has no outputs defined, or all the defined outputs are empty. \
         Please define an output in your configuration with the `output` keyword and run \
         `terrain refresh` for it to become available.",
    )
}
