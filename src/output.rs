//! Progress markers and the startup banner.
//!
//! Markers are emoji on a colour terminal and `-I-`, `-.-`, `-W-`, `-E-`
//! otherwise. `--color` decides, and `auto` defers to `NO_COLOR`,
//! `CLICOLOR`, `CLICOLOR_FORCE`, `TERM=dumb` and whether stdout is a TTY.

use std::env;

/// Whether progress lines use emoji markers.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve `--color always|never|auto` against the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => terminal_wants_color(),
        };
        Self { use_color }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

fn terminal_wants_color() -> bool {
    let var = |name| env::var(name).unwrap_or_default();

    // https://no-color.org/: presence alone disables, even when empty
    if env::var_os("NO_COLOR").is_some() || var("CLICOLOR") == "0" {
        return false;
    }
    let forced = var("CLICOLOR_FORCE");
    if !forced.is_empty() && forced != "0" {
        return true;
    }
    var("TERM") != "dumb" && console::Term::stdout().features().colors_supported()
}

/// `emoji_str` when colour is on, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Prefix for a line of progress output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A milestone, e.g. setup finished.
    Info,
    /// An intermediate step.
    Step,
    /// Something was skipped or degraded.
    Warning,
    /// The run failed.
    Error,
}

impl Marker {
    /// The marker text for this configuration.
    pub fn render(self, config: &OutputConfig) -> &'static str {
        match self {
            Marker::Info => emoji(config, "✅", "-I-"),
            Marker::Step => emoji(config, "🔹", "-.-"),
            Marker::Warning => emoji(config, "⚠️ ", "-W-"),
            Marker::Error => emoji(config, "❌", "-E-"),
        }
    }
}

/// Startup banner.
pub const LOGO: &str = r#"
 __  __         __                      __
 \ \/ /__  ____/ /____  ____ ___ ___ / /___ _____
  \  / _ \/ __/ __/ _ \/___/(_-</ -_) __/ // / _ \
  /_/\___/\__/\__/\___/    /___/\__/\__/\_,_/ .__/
                                          /_/
"#;
