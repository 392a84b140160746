//! # Repository Bootstrapping
//!
//! This module clones the layers of a Yocto workspace into their fixed
//! layout:
//!
//! ```text
//! <work>/
//! └── poky/                      base distribution
//!     ├── meta-xilinx/           vendor overlays
//!     ├── meta-xilinx-tools/
//!     ├── meta-xilinx-petalinux/
//!     └── meta-zynqberry/        board overlay
//! ```
//!
//! ## Design
//!
//! The [`Bootstrapper`] decides *what* to clone and *where*; the actual Git
//! work goes through the [`GitOperations`] trait. [`DefaultGitOperations`]
//! wraps the system `git` command, and tests swap in a recording mock.
//!
//! Every target path is derived from the workspace root, so nested clones do
//! not depend on the process working directory.
//!
//! A repository whose directory already exists is skipped; nothing verifies
//! or updates its branch.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::{Layer, ProjectConfig};
use crate::error::Result;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Clones `url` into `target_dir`.
    fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()>;

    /// Checks out `branch` in the repository at `repo_dir`.
    fn checkout(&self, repo_dir: &Path, branch: &str) -> Result<()>;

    /// Returns the branch checked out in the repository at `repo_dir`.
    fn current_branch(&self, repo_dir: &Path) -> Result<String>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone(url, target_dir)
    }

    fn checkout(&self, repo_dir: &Path, branch: &str) -> Result<()> {
        crate::git::checkout(repo_dir, branch)
    }

    fn current_branch(&self, repo_dir: &Path) -> Result<String> {
        crate::git::current_branch(repo_dir)
    }
}

/// Directory the base distribution is cloned into.
pub const BASE_DIRECTORY: &str = "poky";

/// The repositories that make up a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryId {
    /// The base distribution (poky).
    BaseDistribution,
    /// meta-xilinx
    VendorOverlayA,
    /// meta-xilinx-tools
    VendorOverlayB,
    /// meta-xilinx-petalinux
    VendorOverlayC,
    /// meta-zynqberry
    BoardOverlay,
}

impl RepositoryId {
    /// Every repository, in clone order.
    pub const ALL: [RepositoryId; 5] = [
        RepositoryId::BaseDistribution,
        RepositoryId::VendorOverlayA,
        RepositoryId::VendorOverlayB,
        RepositoryId::VendorOverlayC,
        RepositoryId::BoardOverlay,
    ];

    /// Directory name of the clone. Overlays also use it as the URL suffix.
    pub fn directory_name(self) -> &'static str {
        match self {
            RepositoryId::BaseDistribution => BASE_DIRECTORY,
            RepositoryId::VendorOverlayA => "meta-xilinx",
            RepositoryId::VendorOverlayB => "meta-xilinx-tools",
            RepositoryId::VendorOverlayC => "meta-xilinx-petalinux",
            RepositoryId::BoardOverlay => "meta-zynqberry",
        }
    }

    /// Layer whose section supplies the URL and branch.
    pub fn layer(self) -> Layer {
        match self {
            RepositoryId::BaseDistribution => Layer::Base,
            RepositoryId::VendorOverlayA
            | RepositoryId::VendorOverlayB
            | RepositoryId::VendorOverlayC => Layer::Vendor,
            RepositoryId::BoardOverlay => Layer::Board,
        }
    }

    /// Whether this repository is an overlay nested in the base distribution.
    pub fn is_overlay(self) -> bool {
        self != RepositoryId::BaseDistribution
    }

    /// Parent directory of the clone, relative to the workspace root.
    pub fn parent_directory(self) -> &'static Path {
        if self.is_overlay() {
            Path::new(BASE_DIRECTORY)
        } else {
            Path::new("")
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directory_name())
    }
}

/// Everything needed to clone one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    pub id: RepositoryId,
    /// Relative to the workspace root.
    pub parent_directory: PathBuf,
    pub source_url: String,
    pub branch: String,
}

impl RepositoryDescriptor {
    /// Derive the descriptor for `id` from the project configuration.
    ///
    /// Overlay URLs are built with [`overlay_url`]; the base distribution uses
    /// its layer URL unchanged.
    pub fn new(id: RepositoryId, config: &ProjectConfig) -> Self {
        let layer = config.layer(id.layer());
        let source_url = if id.is_overlay() {
            overlay_url(&layer.repository_url, id.directory_name())
        } else {
            layer.repository_url.clone()
        };

        Self {
            id,
            parent_directory: id.parent_directory().to_path_buf(),
            source_url,
            branch: layer.branch.clone(),
        }
    }

    /// Clone target, relative to the workspace root.
    pub fn relative_path(&self) -> PathBuf {
        self.parent_directory.join(self.id.directory_name())
    }
}

/// Append an overlay name to a layer URL.
///
/// This is string concatenation, not URL joining: the layer URL must already
/// end with the right separator. A layer URL that already ends with a
/// dash-terminated prefix of the name (`https://host/meta-` for
/// `meta-xilinx`) does not get that prefix twice.
pub fn overlay_url(base: &str, name: &str) -> String {
    let overlap = name
        .match_indices('-')
        .map(|(i, _)| &name[..=i])
        .filter(|prefix| base.ends_with(prefix))
        .map(str::len)
        .max()
        .unwrap_or(0);
    format!("{}{}", base, &name[overlap..])
}

/// Result of a single [`Bootstrapper::clone_repository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    /// The repository was cloned; `branch` is what git reports after checkout.
    Cloned { branch: String },
    /// The target directory already existed and was left alone.
    Skipped,
}

/// Clones workspace repositories below a root directory.
pub struct Bootstrapper {
    root: PathBuf,
    config: ProjectConfig,
    git_ops: Box<dyn GitOperations>,
}

impl Bootstrapper {
    /// Creates a bootstrapper that uses the system `git` command.
    pub fn new(root: impl Into<PathBuf>, config: ProjectConfig) -> Self {
        Self::with_operations(root, config, Box::new(DefaultGitOperations))
    }

    /// Creates a bootstrapper with a custom `GitOperations` implementation.
    pub fn with_operations(
        root: impl Into<PathBuf>,
        config: ProjectConfig,
        git_ops: Box<dyn GitOperations>,
    ) -> Self {
        Self {
            root: root.into(),
            config,
            git_ops,
        }
    }

    /// The workspace root all clone targets are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Describe how `id` would be cloned.
    pub fn descriptor(&self, id: RepositoryId) -> RepositoryDescriptor {
        RepositoryDescriptor::new(id, &self.config)
    }

    /// Clone `id` if its directory is absent, then check out its branch.
    ///
    /// Git failures are returned unchanged. Nothing is cleaned up, so a failed
    /// checkout leaves the fresh clone on disk.
    pub fn clone_repository(&self, id: RepositoryId) -> Result<CloneOutcome> {
        info!("Clone the following repo: {}", id);
        let descriptor = self.descriptor(id);
        let target = self.root.join(descriptor.relative_path());

        if target.exists() {
            warn!(
                "{} exists. Consider using the update switch - skip the clone",
                id
            );
            return Ok(CloneOutcome::Skipped);
        }

        self.git_ops.clone_repo(&descriptor.source_url, &target)?;
        self.git_ops.checkout(&target, &descriptor.branch)?;
        let branch = self.git_ops.current_branch(&target)?;
        info!("selected branch for {}: {}", id, branch);

        Ok(CloneOutcome::Cloned { branch })
    }
}
