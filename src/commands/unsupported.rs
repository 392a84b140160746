//! `--clear`, `--build` and `--update` are placeholders. They report that the
//! action is not supported and do nothing else: no work folder, no git, no
//! notification.

use log::debug;

use yocto_setup::output::{Marker, OutputConfig};

use crate::cli::Action;

/// The line printed for an unsupported action.
pub fn message(action: &Action) -> String {
    format!("{} is not supported", action.name())
}

/// Execute a placeholder action.
pub fn execute(action: &Action, output: &OutputConfig) {
    if let Action::Update(target) = action {
        debug!("update target {} ignored", target);
    }
    println!("{} {}", Marker::Warning.render(output), message(action));
}
