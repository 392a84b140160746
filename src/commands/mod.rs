//! # CLI Action Implementations
//!
//! Each action flag of the `yocto-setup` command line is implemented in its
//! own file. The `execute` function of each module performs the action,
//! calling into the `yocto_setup` library for the actual work.
//!
//! - `setup`: prepare the work folder and clone every repository.
//! - `unsupported`: the `--clear`, `--build` and `--update` placeholders.

pub mod setup;
pub mod unsupported;
