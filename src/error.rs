//! # Error Handling
//!
//! This module defines the centralized error type for the `yocto-setup`
//! library. It uses `thiserror` to build a single `Error` enum covering every
//! failure the bootstrap can hit, each with a descriptive message.
//!
//! ## Key Components
//!
//! - **`Error`**: All failure modes of the library, grouped as:
//!   - Configuration errors (missing file, unknown section, malformed INI).
//!   - Git errors (clone failures, other git command failures).
//!   - Push notification errors.
//!   - I/O errors from workspace preparation.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! None of these errors are retried; callers propagate them with `?` and the
//! binary reports them once at the top level.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for yocto-setup operations
#[derive(Error, Debug)]
pub enum Error {
    /// The project configuration file does not exist.
    #[error("Configuration settings file ({}) not found", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration file is valid INI but does not fit the expected
    /// layout, e.g. it names an unknown section.
    #[error("Configuration syntax error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigSyntax {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The configuration file could not be parsed as INI at all.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// An error occurred while cloning a Git repository.
    ///
    /// Includes the repository URL, the error message, and an optional hint
    /// for resolution.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A Git command other than clone failed.
    #[error("Git command failed in {}: {command} - {stderr}", dir.display())]
    GitCommand {
        command: String,
        dir: PathBuf,
        stderr: String,
    },

    /// The push notification could not be delivered.
    #[error("Notification error: {url} - {message}")]
    Notification { url: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config_not_found() {
        let error = Error::ConfigNotFound {
            path: PathBuf::from("config/config.ini"),
        };
        let display = format!("{}", error);
        assert!(display.contains("not found"));
        assert!(display.contains("config/config.ini"));
    }

    #[test]
    fn test_error_display_config_syntax_with_hint() {
        let error = Error::ConfigSyntax {
            message: "Unknown section foo in config.ini".to_string(),
            hint: Some("Known sections: globalconfig, yocto".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Configuration syntax error"));
        assert!(display.contains("Unknown section foo"));
        assert!(display.contains("hint:"));
        assert!(display.contains("globalconfig"));
    }

    #[test]
    fn test_error_display_config_syntax_without_hint() {
        let error = Error::ConfigSyntax {
            message: "Unknown section foo".to_string(),
            hint: None,
        };
        let display = format!("{}", error);
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_git_clone() {
        let error = Error::GitClone {
            url: "https://example.org/poky.git".to_string(),
            message: "Authentication failed".to_string(),
            hint: Some("Check SSH keys".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("Git clone error"));
        assert!(display.contains("https://example.org/poky.git"));
        assert!(display.contains("Authentication failed"));
        assert!(display.contains("Check SSH keys"));
    }

    #[test]
    fn test_error_display_git_command() {
        let error = Error::GitCommand {
            command: "checkout rocko".to_string(),
            dir: PathBuf::from("poky"),
            stderr: "pathspec 'rocko' did not match".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Git command failed in poky"));
        assert!(display.contains("checkout rocko"));
        assert!(display.contains("did not match"));
    }

    #[test]
    fn test_error_display_notification() {
        let error = Error::Notification {
            url: "http://api.pushetta.com/api/pushes/chan/".to_string(),
            message: "status code 401".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Notification error"));
        assert!(display.contains("status code 401"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: Error = io_error.into();
        let display = format!("{}", error);
        assert!(display.contains("I/O error"));
        assert!(display.contains("denied"));
    }
}
