//! Workspace preparation.
//!
//! Creating the work folder and moving into it is a separate, explicit step so
//! that loading a configuration never touches the filesystem.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;

/// The prepared work folder. The process current directory points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
    created: bool,
}

impl Workspace {
    /// Create `dir` if it does not exist yet, then make it the current
    /// directory for the rest of the process.
    pub fn prepare(dir: &Path) -> Result<Self> {
        let created = !dir.exists();
        if created {
            info!("setup the work folder {}", dir.display());
            fs::create_dir_all(dir)?;
        }

        env::set_current_dir(dir)?;
        let root = env::current_dir()?;
        info!("path is now: {}", root.display());

        Ok(Self { root, created })
    }

    /// Absolute path of the work folder.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether [`Workspace::prepare`] had to create the folder.
    pub fn was_created(&self) -> bool {
        self.created
    }
}
