//! Configuration types deserialized from `terrain.toml`.

use serde::Deserialize;

/// Default location of the local state file, relative to the working
/// directory.
pub const DEFAULT_STATE_PATH: &str = "terrain.tfstate";

/// The top-level settings parsed from `terrain.toml`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct TerrainConfig {
    /// Diagnostic and value rendering defaults.
    #[serde(default)]
    pub view: ViewConfig,
    /// Where state is read from.
    #[serde(default)]
    pub state: StateConfig,
}

/// The `[view]` section.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ViewConfig {
    /// Whether to emit colored output.
    #[serde(default)]
    pub color: ColorChoice,
    /// Show warnings-only diagnostics as a compact summary list.
    #[serde(default)]
    pub compact_warnings: bool,
}

/// The `[state]` section.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct StateConfig {
    /// Path of the state file used when `-state` is not given.
    #[serde(default = "default_state_path")]
    pub path: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

fn default_state_path() -> String {
    DEFAULT_STATE_PATH.to_string()
}

/// Controls whether colored output is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

impl ColorChoice {
    /// Resolves the choice given whether the output is a terminal.
    pub fn resolve(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_choice_resolution() {
        assert!(ColorChoice::Auto.resolve(true));
        assert!(!ColorChoice::Auto.resolve(false));
        assert!(ColorChoice::Always.resolve(false));
        assert!(!ColorChoice::Never.resolve(true));
    }

    #[test]
    fn defaults() {
        let config = TerrainConfig::default();
        assert_eq!(config.view.color, ColorChoice::Auto);
        assert!(!config.view.compact_warnings);
        assert_eq!(config.state.path, "terrain.tfstate");
    }
}
