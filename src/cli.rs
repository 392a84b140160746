//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use log::warn;

use yocto_setup::config::{self, DEFAULT_INI_PATH};
use yocto_setup::notify;
use yocto_setup::output::{Marker, OutputConfig, LOGO};

use crate::commands;

/// Yocto Setup - Bootstrap a Yocto build workspace from an INI project file
#[derive(Parser, Debug)]
#[command(name = "yocto-setup")]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .args(["setup", "clear", "build", "update"])
        .multiple(false)
))]
pub struct Cli {
    /// Project INI file
    #[arg(long = "ini", value_name = "PATH", default_value = DEFAULT_INI_PATH, env = "YOCTO_SETUP_INI")]
    ini: PathBuf,

    /// Create the work folder and clone poky with its overlay layers
    #[arg(long)]
    setup: bool,

    /// Clear a Yocto build project (not supported yet)
    #[arg(long)]
    clear: bool,

    /// Build the Yocto project (not supported yet)
    #[arg(long)]
    build: bool,

    /// Update the git repositories (not supported yet)
    #[arg(long, value_name = "TARGET")]
    update: Option<String>,

    /// Also clone meta-xilinx-petalinux during setup
    #[arg(long, requires = "setup")]
    petalinux: bool,

    /// Send a push notification when the run finishes
    #[arg(short = 'n', long)]
    notify: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

/// The single action requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Setup,
    Clear,
    Build,
    Update(String),
}

impl Action {
    /// Name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Setup => "setup",
            Action::Clear => "clear",
            Action::Build => "build",
            Action::Update(_) => "update",
        }
    }
}

impl Cli {
    /// Output settings derived from `--color` and the environment.
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::from_env_and_flag(&self.color)
    }

    fn action(&self) -> Option<Action> {
        if self.setup {
            Some(Action::Setup)
        } else if self.clear {
            Some(Action::Clear)
        } else if self.build {
            Some(Action::Build)
        } else {
            self.update.clone().map(Action::Update)
        }
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = self.output_config();
        println!("{}", LOGO);

        let message = match self.action() {
            Some(Action::Setup) => {
                let config = config::load(&self.ini).map_err(|e| {
                    anyhow::anyhow!("Failed to load config from {}: {}", self.ini.display(), e)
                })?;
                let message = commands::setup::execute(&config, &output, self.petalinux)?;
                self.notify_if_requested(&config, &message, &output)?;
                Some(message)
            }
            Some(action) => {
                commands::unsupported::execute(&action, &output);
                return Ok(());
            }
            None => None,
        };

        if message.is_none() && self.notify {
            warn!("no action was requested - nothing to notify");
        }

        println!("{} done", Marker::Step.render(&output));
        Ok(())
    }

    fn notify_if_requested(
        &self,
        config: &config::ProjectConfig,
        message: &str,
        output: &OutputConfig,
    ) -> Result<()> {
        if !self.notify {
            return Ok(());
        }
        let notifier = notify::notifier_for(&config.notification);
        if notifier.is_enabled() {
            println!("{} Send notification", Marker::Step.render(output));
            notifier.notify(message)?;
        }
        Ok(())
    }
}

/// Install the logger. `RUST_LOG` takes precedence over `--log-level`.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init()
        .ok();
}
