//! # Yocto Workspace Bootstrapper
//!
//! This library provides the core functionality behind the `yocto-setup`
//! command-line tool: it reads an INI project file that names a base
//! distribution repository (poky) and its hardware overlay layers, and clones
//! them into a fixed directory layout at their configured branches.
//!
//! ## Quick Example
//!
//! ```
//! use yocto_setup::config;
//! use yocto_setup::repository::{RepositoryDescriptor, RepositoryId};
//!
//! let config = config::parse(
//!     "[yocto]\nrepo_yocto = https://example.org/poky.git\nbranch = rocko\n",
//! )
//! .unwrap();
//!
//! let poky = RepositoryDescriptor::new(RepositoryId::BaseDistribution, &config);
//! assert_eq!(poky.source_url, "https://example.org/poky.git");
//! assert_eq!(poky.branch, "rocko");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: The five INI sections, their defaults, and
//!   the loader that merges a file over them.
//! - **Repositories (`repository`, `git`)**: Which repositories make up a
//!   workspace, where each one goes, and the `git` calls that fetch it.
//! - **Workspace (`workspace`)**: Creating and entering the work folder.
//! - **Notifications (`notify`)**: Optional push message when a run ends.
//! - **Command file (`command_file`)**: Arguments read from `pyocto.cmd`.
//! - **Output (`output`)**: Terminal markers and colour detection.
//!
//! ## Execution Flow
//!
//! 1.  **Arguments**: Resolve the command line or the command file.
//! 2.  **Load**: Parse the project file. This never touches the filesystem
//!     beyond reading the file.
//! 3.  **Prepare**: Create and enter the work folder.
//! 4.  **Clone**: Clone poky, then each overlay inside it, checking out the
//!     configured branches.
//! 5.  **Notify**: Optionally push a completion message.

pub mod command_file;
pub mod config;
pub mod error;
pub mod git;
pub mod notify;
pub mod output;
pub mod repository;
pub mod workspace;
