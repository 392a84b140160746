//! # Setup Command Implementation
//!
//! `--setup` assembles a fresh workspace:
//!
//! 1.  Create the work folder named by `[globalconfig] work` and enter it.
//! 2.  Clone poky from `[yocto]` and check out its branch.
//! 3.  Clone the vendor overlays from `[xilinx]` into `poky/`.
//! 4.  Clone the board overlay from `[zynqberry]` into `poky/`.
//!
//! Repositories that already exist are left alone, so running setup twice is
//! harmless. The first git failure aborts the run.

use anyhow::Result;

use yocto_setup::config::ProjectConfig;
use yocto_setup::output::{Marker, OutputConfig};
use yocto_setup::repository::{Bootstrapper, CloneOutcome, RepositoryId};
use yocto_setup::workspace::Workspace;

/// Message pushed when setup completes.
pub const SETUP_DONE_MESSAGE: &str = "PYOCTO (setup) is over";

/// Repositories cloned by setup, in order.
pub fn clone_order(with_petalinux: bool) -> Vec<RepositoryId> {
    RepositoryId::ALL
        .into_iter()
        .filter(|id| with_petalinux || *id != RepositoryId::VendorOverlayC)
        .collect()
}

/// Execute the setup action and return the completion message.
pub fn execute(
    config: &ProjectConfig,
    output: &OutputConfig,
    with_petalinux: bool,
) -> Result<String> {
    let step = Marker::Step.render(output);

    let workspace = Workspace::prepare(&config.global.work_directory).map_err(|e| {
        anyhow::anyhow!(
            "Failed to prepare work folder {}: {}",
            config.global.work_directory.display(),
            e
        )
    })?;
    if workspace.was_created() {
        println!("{} setup the work folder", step);
    }
    println!("{} path is now: {}", step, workspace.root().display());

    let bootstrapper = Bootstrapper::new(workspace.root(), config.clone());
    run(&bootstrapper, output, with_petalinux)
}

/// Clone every repository in [`clone_order`] through `bootstrapper`.
pub fn run(
    bootstrapper: &Bootstrapper,
    output: &OutputConfig,
    with_petalinux: bool,
) -> Result<String> {
    let step = Marker::Step.render(output);

    println!("{} clone the yocto repos.", step);
    for id in clone_order(with_petalinux) {
        println!("{} Clone the following repo: {}", Marker::Info.render(output), id);
        match bootstrapper.clone_repository(id)? {
            CloneOutcome::Cloned { branch } => {
                println!("{} selected branch for {}: {}", step, id, branch);
            }
            CloneOutcome::Skipped => {
                println!(
                    "{} {} exists. Consider using the update switch - skip the clone",
                    Marker::Warning.render(output),
                    id
                );
            }
        }
    }

    println!("{} Setup is DONE ----", Marker::Info.render(output));
    Ok(SETUP_DONE_MESSAGE.to_string())
}
