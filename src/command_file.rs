//! Command file support.
//!
//! Running the tool with no arguments reads them from `pyocto.cmd` in the
//! current directory instead, so a workspace can keep its usual invocation
//! next to its configuration:
//!
//! ```text
//! # bootstrap the demo board
//! --ini config/zynqberry.ini
//! --setup -n   # notify when done
//! ```
//!
//! Everything after a `#` on a line is ignored; the rest is split on
//! whitespace. There is no quoting.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Result;

/// Name of the command file looked up in the current directory.
pub const COMMAND_FILE: &str = "pyocto.cmd";

/// Split command file content into argument tokens.
pub fn parse_tokens(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}

/// Decide which arguments to parse.
///
/// `args` is the full process argument list, program name first. When it has
/// anything besides the program name it is returned unchanged. Otherwise the
/// tokens of `command_file` are used if the file exists, and `--help` if it
/// does not.
pub fn resolve_args(args: Vec<OsString>, command_file: &Path) -> Result<Vec<OsString>> {
    if args.len() > 1 {
        return Ok(args);
    }

    let program = args
        .into_iter()
        .next()
        .unwrap_or_else(|| OsString::from(env!("CARGO_PKG_NAME")));

    let tokens = if command_file.exists() {
        debug!("reading arguments from {}", command_file.display());
        parse_tokens(&fs::read_to_string(command_file)?)
    } else {
        vec!["--help".to_string()]
    };

    Ok(std::iter::once(program)
        .chain(tokens.into_iter().map(OsString::from))
        .collect())
}
