//! Argument parsing for `terrain output`.
//!
//! The command takes single-dash long flags (`-json`, `-state=path`). Tokens
//! are rewritten into clap's double-dash form up to the first positional
//! argument, parsed with a builder-API [`clap::Command`], and then checked
//! against the flag combination rules. Every rule runs even after an earlier
//! one failed, so one invocation reports every problem at once.

use std::path::Path;

use clap::builder::BoolishValueParser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, ArgMatches, Command};
use terrain_diagnostics::{Diagnostic, Diagnostics};

/// How output values are presented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewType {
    /// `name = value` lines for people.
    #[default]
    Human,
    /// A JSON document for programs.
    Json,
    /// The bare string form of a single primitive value.
    Raw,
}

/// The validated arguments of one `terrain output` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputArguments {
    /// The output to show; empty shows all of them.
    pub name: String,
    /// Selected presentation.
    pub view_type: ViewType,
    /// State file override; empty uses the configured default.
    pub state_path: String,
    /// Whether color is allowed (`-no-color` clears it).
    pub color: bool,
}

impl Default for OutputArguments {
    fn default() -> Self {
        Self {
            name: String::new(),
            view_type: ViewType::Human,
            state_path: String::new(),
            color: true,
        }
    }
}

impl OutputArguments {
    /// The `-state` path, if one was given.
    pub fn state_path_override(&self) -> Option<&Path> {
        (!self.state_path.is_empty()).then(|| Path::new(&self.state_path))
    }
}

/// Raw flag values before validation.
#[derive(Default)]
struct Flags {
    no_color: bool,
    json: bool,
    raw: bool,
    state: String,
    positional: Vec<String>,
}

impl Flags {
    fn from_matches(matches: &ArgMatches) -> Self {
        let flag = |id: &str| matches.get_one::<bool>(id).copied().unwrap_or(false);
        Self {
            no_color: flag("no-color"),
            json: flag("json"),
            raw: flag("raw"),
            state: matches.get_one::<String>("state").cloned().unwrap_or_default(),
            positional: matches
                .get_many::<String>("name")
                .map(|names| names.cloned().collect())
                .unwrap_or_default(),
        }
    }
}

fn bool_flag(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .action(ArgAction::Set)
        .num_args(0..=1)
        .require_equals(true)
        .default_missing_value("true")
        .default_value("false")
        .value_parser(BoolishValueParser::new())
}

fn output_flags() -> Command {
    Command::new("output")
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .color(clap::ColorChoice::Never)
        .arg(bool_flag("no-color"))
        .arg(bool_flag("json"))
        .arg(bool_flag("raw"))
        .arg(
            Arg::new("state")
                .long("state")
                .value_name("path")
                .num_args(1)
                .allow_hyphen_values(true)
                .default_value(""),
        )
        .arg(
            Arg::new("name")
                .action(ArgAction::Append)
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

/// Parses and validates `terrain output` arguments.
///
/// Always returns a best-effort [`OutputArguments`]. When the returned
/// diagnostics contain errors, callers must not act on the view type.
pub fn parse_output(tokens: &[String]) -> (OutputArguments, Diagnostics) {
    let mut diags = Diagnostics::new();
    let normalized = normalize(tokens);

    let flags = match output_flags().try_get_matches_from(&normalized) {
        Ok(matches) => Flags::from_matches(&matches),
        Err(err) => {
            diags = diags.append(Diagnostic::error(
                "Failed to parse command-line flags",
                flag_error_message(&err),
            ));
            output_flags()
                .try_get_matches_from(parseable_only(&normalized))
                .map(|matches| Flags::from_matches(&matches))
                .unwrap_or_default()
        }
    };

    if flags.positional.len() > 1 {
        diags = diags.append(Diagnostic::error(
            "Unexpected argument",
            "The output command expects exactly one argument with the name of an output \
             variable or no arguments to show all outputs.",
        ));
    }

    let (mut json, mut raw) = (flags.json, flags.raw);
    if json && raw {
        diags = diags.append(Diagnostic::error(
            "Invalid output format",
            "The -raw and -json options are mutually-exclusive.",
        ));
        // The intended format is unknowable, so fall back to the default.
        json = false;
        raw = false;
    }

    let name = flags.positional.into_iter().next().unwrap_or_default();

    if raw && name.is_empty() {
        diags = diags.append(Diagnostic::error(
            "Output name required",
            "You must give the name of a single output value when using the -raw option.",
        ));
    }

    let view_type = match (json, raw) {
        (true, _) => ViewType::Json,
        (false, true) => ViewType::Raw,
        (false, false) => ViewType::Human,
    };

    let args = OutputArguments {
        name,
        view_type,
        state_path: flags.state,
        color: !flags.no_color,
    };
    (args, diags)
}

/// Returns `true` if a help flag appears before the first positional argument.
pub fn wants_help(tokens: &[String]) -> bool {
    tokens
        .iter()
        .take_while(|t| t.as_str() != "--" && t.len() > 1 && t.starts_with('-'))
        .any(|t| matches!(t.as_str(), "-h" | "-help" | "--help"))
}

/// Rewrites `-flag` into `--flag` up to the first positional or `--`.
fn normalize(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        if token == "--" || token == "-" || !token.starts_with('-') {
            out.push(token.clone());
            out.extend(iter.cloned());
            break;
        }
        let long = if token.starts_with("--") {
            token.clone()
        } else {
            format!("-{token}")
        };
        let separate_value = long == "--state";
        out.push(long);
        if separate_value {
            if let Some(value) = iter.next() {
                out.push(value.clone());
            }
        }
    }
    out
}

/// Drops every flag that fails to parse on its own.
fn parseable_only(normalized: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(normalized.len());
    let mut iter = normalized.iter();
    while let Some(token) = iter.next() {
        if token == "--" || token == "-" || !token.starts_with('-') {
            out.push(token.clone());
            out.extend(iter.cloned());
            break;
        }
        let mut group = vec![token.clone()];
        if token == "--state" {
            group.extend(iter.next().cloned());
        }
        if output_flags().try_get_matches_from(&group).is_ok() {
            out.extend(group);
        }
    }
    out
}

/// Describes a clap failure in terms of the single-dash flags users type.
fn flag_error_message(err: &clap::Error) -> String {
    let flag = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(flag_display(arg)),
        _ => None,
    };
    let value = match err.get(ContextKind::InvalidValue) {
        Some(ContextValue::String(value)) => Some(value.as_str()),
        _ => None,
    };

    match (err.kind(), flag, value) {
        (ErrorKind::UnknownArgument, Some(flag), _) => {
            format!("flag provided but not defined: {flag}")
        }
        (ErrorKind::InvalidValue, Some(flag), Some("") | None) => {
            format!("flag needs an argument: {flag}")
        }
        (ErrorKind::InvalidValue | ErrorKind::ValueValidation, Some(flag), Some(value)) => {
            format!("invalid value {value:?} for flag {flag}")
        }
        _ => {
            let rendered = err.render().to_string();
            let first = rendered.lines().next().unwrap_or_default();
            first.trim_start_matches("error: ").to_string()
        }
    }
}

/// `--state <path>` -> `-state`
fn flag_display(arg: &str) -> String {
    let name = arg
        .trim_start_matches('-')
        .split(['=', ' ', '['])
        .next()
        .unwrap_or_default();
    format!("-{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_diagnostics::Severity;

    fn parse(tokens: &[&str]) -> (OutputArguments, Diagnostics) {
        let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
        parse_output(&tokens)
    }

    fn summaries(diags: &Diagnostics) -> Vec<&str> {
        diags.iter().map(|d| d.summary()).collect()
    }

    #[test]
    fn no_arguments_shows_everything() {
        let (args, diags) = parse(&[]);
        assert!(diags.is_empty());
        assert_eq!(args, OutputArguments::default());
        assert!(args.state_path_override().is_none());
    }

    #[test]
    fn single_name() {
        let (args, diags) = parse(&["greeting"]);
        assert!(diags.is_empty());
        assert_eq!(args.name, "greeting");
        assert_eq!(args.view_type, ViewType::Human);
    }

    #[test]
    fn json_flag() {
        let (args, diags) = parse(&["-json"]);
        assert!(diags.is_empty());
        assert_eq!(args.view_type, ViewType::Json);
    }

    #[test]
    fn raw_with_name() {
        let (args, diags) = parse(&["-raw", "greeting"]);
        assert!(diags.is_empty());
        assert_eq!(args.view_type, ViewType::Raw);
        assert_eq!(args.name, "greeting");
    }

    #[test]
    fn double_dash_flags_are_accepted() {
        let (args, diags) = parse(&["--json", "--no-color", "greeting"]);
        assert!(diags.is_empty());
        assert_eq!(args.view_type, ViewType::Json);
        assert!(!args.color);
    }

    #[test]
    fn no_color_flag() {
        let (args, diags) = parse(&["-no-color"]);
        assert!(diags.is_empty());
        assert!(!args.color);
    }

    #[test]
    fn explicit_bool_values() {
        let (args, diags) = parse(&["-json=false", "-no-color=true"]);
        assert!(diags.is_empty());
        assert_eq!(args.view_type, ViewType::Human);
        assert!(!args.color);
    }

    #[test]
    fn repeated_flag_last_wins() {
        let (args, diags) = parse(&["-json", "-json=false"]);
        assert!(diags.is_empty());
        assert_eq!(args.view_type, ViewType::Human);
    }

    #[test]
    fn state_with_equals() {
        let (args, diags) = parse(&["-state=prod.tfstate"]);
        assert!(diags.is_empty());
        assert_eq!(args.state_path, "prod.tfstate");
        assert_eq!(args.state_path_override(), Some(Path::new("prod.tfstate")));
    }

    #[test]
    fn state_with_separate_value() {
        let (args, diags) = parse(&["-state", "prod.tfstate", "greeting"]);
        assert!(diags.is_empty());
        assert_eq!(args.state_path, "prod.tfstate");
        assert_eq!(args.name, "greeting");
    }

    #[test]
    fn json_and_raw_conflict() {
        let (args, diags) = parse(&["-json", "-raw"]);
        assert_eq!(diags.len(), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.summary(), "Invalid output format");
        assert!(diag.detail().unwrap().contains("mutually-exclusive"));
        assert_eq!(args.view_type, ViewType::Human);
    }

    #[test]
    fn json_and_raw_conflict_always_falls_back_to_human() {
        let extras: [&[&str]; 4] = [&[], &["name"], &["-no-color"], &["-state=x", "name"]];
        for extra in extras {
            let mut tokens = vec!["-raw", "-json"];
            tokens.extend_from_slice(extra);
            let (args, diags) = parse(&tokens);
            assert_eq!(args.view_type, ViewType::Human, "tokens: {tokens:?}");
            let conflicts = diags
                .iter()
                .filter(|d| d.summary() == "Invalid output format")
                .count();
            assert_eq!(conflicts, 1, "tokens: {tokens:?}");
            assert!(!summaries(&diags).contains(&"Output name required"));
        }
    }

    #[test]
    fn raw_without_name() {
        let (args, diags) = parse(&["-raw"]);
        assert_eq!(summaries(&diags), vec!["Output name required"]);
        assert!(diags.has_errors());
        assert_eq!(args.view_type, ViewType::Raw);
    }

    #[test]
    fn too_many_names() {
        let (args, diags) = parse(&["foo", "bar"]);
        assert_eq!(summaries(&diags), vec!["Unexpected argument"]);
        assert_eq!(args.name, "foo");
    }

    #[test]
    fn too_many_names_with_any_flags() {
        let flag_sets: [&[&str]; 4] = [&[], &["-json"], &["-raw"], &["-json", "-raw"]];
        for flags in flag_sets {
            let mut tokens = flags.to_vec();
            tokens.extend(["a", "b", "c"]);
            let (_, diags) = parse(&tokens);
            assert!(
                summaries(&diags).contains(&"Unexpected argument"),
                "tokens: {tokens:?}"
            );
        }
    }

    #[test]
    fn flags_after_name_are_positional() {
        let (args, diags) = parse(&["greeting", "-json"]);
        assert_eq!(summaries(&diags), vec!["Unexpected argument"]);
        assert_eq!(args.view_type, ViewType::Human);
    }

    #[test]
    fn double_dash_ends_flags() {
        let (args, diags) = parse(&["--", "-json"]);
        assert!(diags.is_empty());
        assert_eq!(args.name, "-json");
        assert_eq!(args.view_type, ViewType::Human);
    }

    #[test]
    fn valid_combinations_have_no_errors() {
        let cases: [&[&str]; 7] = [
            &[],
            &["a"],
            &["-json"],
            &["-json", "a"],
            &["-raw", "a"],
            &["-no-color", "-state=s", "a"],
            &["-state", "s"],
        ];
        for tokens in cases {
            let (_, diags) = parse(tokens);
            assert!(!diags.has_errors(), "tokens: {tokens:?}");
        }
    }

    #[test]
    fn unknown_flag_reports_and_keeps_going() {
        let (args, diags) = parse(&["-bogus", "-json", "greeting"]);
        assert_eq!(summaries(&diags), vec!["Failed to parse command-line flags"]);
        let detail = diags.iter().next().unwrap().detail().unwrap();
        assert_eq!(detail, "flag provided but not defined: -bogus");
        assert_eq!(args.view_type, ViewType::Json);
        assert_eq!(args.name, "greeting");
    }

    #[test]
    fn invalid_bool_value() {
        let (_, diags) = parse(&["-json=maybe"]);
        assert_eq!(summaries(&diags), vec!["Failed to parse command-line flags"]);
        let detail = diags.iter().next().unwrap().detail().unwrap();
        assert!(detail.contains("maybe"), "detail: {detail}");
        assert!(detail.contains("-json"), "detail: {detail}");
    }

    #[test]
    fn state_missing_value() {
        let (args, diags) = parse(&["-state"]);
        assert_eq!(summaries(&diags), vec!["Failed to parse command-line flags"]);
        assert!(diags.iter().next().unwrap().detail().unwrap().contains("-state"));
        assert!(args.state_path.is_empty());
    }

    #[test]
    fn every_rule_is_reported() {
        let (_, diags) = parse(&["-bogus", "-json", "-raw", "a", "b"]);
        assert_eq!(
            summaries(&diags),
            vec![
                "Failed to parse command-line flags",
                "Unexpected argument",
                "Invalid output format",
            ]
        );
    }

    #[test]
    fn help_detection() {
        let help = |tokens: &[&str]| {
            let tokens: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
            wants_help(&tokens)
        };
        assert!(help(&["-help"]));
        assert!(help(&["-json", "-h"]));
        assert!(help(&["--help"]));
        assert!(!help(&["greeting", "-help"]));
        assert!(!help(&["--", "-help"]));
        assert!(!help(&[]));
    }

    #[test]
    fn normalize_stops_at_positional() {
        let tokens: Vec<String> = ["-json", "-state", "-weird", "name", "-raw"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(
            normalize(&tokens),
            vec!["--json", "--state", "-weird", "name", "-raw"]
        );
    }

    #[test]
    fn flag_display_trims_usage() {
        assert_eq!(flag_display("--state <path>"), "-state");
        assert_eq!(flag_display("--json[=<json>]"), "-json");
        assert_eq!(flag_display("--bogus"), "-bogus");
    }
}
