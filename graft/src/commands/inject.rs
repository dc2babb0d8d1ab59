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
pub struct InjectCommand {
    /// Project directory containing graft.toml and the target file
    #[arg(default_value = ".")]
    pub dest: PathBuf,

    /// Feature to inject
    #[arg(short, long, default_value = "api-docs")]
    pub feature: Feature,

    /// Print the patched file instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl InjectCommand {
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.dest);

        let report = ops::inject(config, &self.dest, self.feature, self.dry_run).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
