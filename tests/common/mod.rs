//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and INI snippets
//! to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_config(configs::EXAMPLE);
//!     fixture.command().arg("--setup").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::git_repo;
    pub use super::TestFixture;
}

/// Common project file snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// The example project: poky on rocko, Xilinx overlays on master.
    pub const EXAMPLE: &str = r#"
[globalconfig]
project = demo
work = v_yocto

[yocto]
repo_yocto = https://example.org/poky.git
branch = rocko

[xilinx]
repo_xilinx = https://example.org/meta-
branch = master

[zynqberry]
repo_zynqberry = https://example.org/boards/
branch = master
"#;

    /// Names a section outside the known five.
    pub const UNKNOWN_SECTION: &str = r#"
[globalconfig]
work = v_yocto

[petalinux]
branch = master
"#;

    /// Not INI at all.
    pub const MALFORMED: &str = "[yocto\nbranch rocko\n";
}

/// Build a local git repository at `path` whose first commit sits on
/// `trunk`, with each of `branches` pointing at it.
///
/// Panics if `git` is not available; callers are gated behind the
/// `integration-tests` feature.
#[allow(dead_code)]
pub fn git_repo(path: &Path, branches: &[&str]) {
    std::fs::create_dir_all(path).expect("Failed to create repository directory");

    let git = |args: &[&str]| {
        let status = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["-c", "user.name=test", "-c", "user.email=test@example.org"])
            .args(args)
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    };

    git(&["init", "--quiet"]);
    git(&["checkout", "--quiet", "-b", "trunk"]);
    git(&["commit", "--quiet", "--allow-empty", "-m", "initial"]);
    for branch in branches {
        git(&["branch", branch]);
    }
}

/// A test fixture that provides a temporary directory with optional config.
///
/// This struct simplifies the common pattern of creating a temp directory
/// and populating it with a `config/config.ini` project file, the location
/// the CLI reads by default.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_config(configs::EXAMPLE)
///     .with_dir("v_yocto/poky");
///
/// fixture.command().arg("--setup").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `config/config.ini` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("config/config.ini")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Create an (empty) directory.
    #[allow(dead_code)]
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command configured to run in this fixture's directory.
    ///
    /// Colour is forced off so output carries the plain `-I-`/`-W-` markers.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("yocto-setup");
        cmd.current_dir(self.path())
            .env_remove("YOCTO_SETUP_INI")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }

    /// Create a command with no arguments at all, for command file tests.
    #[allow(dead_code)]
    pub fn bare_command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("yocto-setup");
        cmd.current_dir(self.path())
            .env_remove("YOCTO_SETUP_INI")
            .env("NO_COLOR", "1");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_config() {
        let fixture = TestFixture::new().with_config(configs::EXAMPLE);
        assert!(fixture.path().join("config/config.ini").exists());
    }

    #[test]
    fn test_configs_parse_as_expected() {
        assert!(yocto_setup::config::parse(configs::EXAMPLE).is_ok());
        assert!(yocto_setup::config::parse(configs::UNKNOWN_SECTION).is_err());
        assert!(yocto_setup::config::parse(configs::MALFORMED).is_err());
    }
}
