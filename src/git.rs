use std::path::Path;
use std::process::{Command, Output};

use log::debug;

use crate::error::Error;

/// Clone a repository into `target_dir`, leaving the default branch checked out
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
pub fn clone(url: &str, target_dir: &Path) -> Result<(), Error> {
    debug!("git clone {} {}", url, target_dir.display());
    let output = Command::new("git")
        .args(["clone", url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
            hint: Some("Is git installed and on PATH?".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "Make sure you have access to the repository: \
                load your SSH key into ssh-agent or configure git credentials"
                    .to_string(),
            )
        } else {
            None
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message: stderr.trim().to_string(),
            hint,
        });
    }

    Ok(())
}

/// Check out `branch` inside `repo_dir`. The name is passed to git verbatim.
pub fn checkout(repo_dir: &Path, branch: &str) -> Result<(), Error> {
    run_git(repo_dir, &["checkout", branch])?;
    Ok(())
}

/// Name of the branch currently checked out in `repo_dir`
///
/// Returns `HEAD` when the checkout is detached (e.g. a tag was requested).
pub fn current_branch(repo_dir: &Path) -> Result<String, Error> {
    let output = run_git(repo_dir, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn run_git(repo_dir: &Path, args: &[&str]) -> Result<Output, Error> {
    let command = args.join(" ");
    debug!("git -C {} {}", repo_dir.display(), command);

    let output = Command::new("git")
        .arg("-C")
        .arg(repo_dir)
        .args(args)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            dir: repo_dir.to_path_buf(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command,
            dir: repo_dir.to_path_buf(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}
