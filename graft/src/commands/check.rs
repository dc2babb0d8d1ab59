use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use graft_patch::Feature;

use super::{UnwrapOrExit, load_config};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Project directory containing graft.toml and the target file
    #[arg(default_value = ".")]
    pub dest: PathBuf,

    /// Feature to check for
    #[arg(short, long, default_value = "api-docs")]
    pub feature: Feature,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.dest);

        let report = ops::check(config, &self.dest, self.feature).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        if report.needs_patch() {
            std::process::exit(1);
        }

        Ok(())
    }
}
