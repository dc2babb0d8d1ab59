use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use graft_patch::Feature;

use super::load_config;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PlanCommand {
    /// Project directory containing graft.toml
    #[arg(default_value = ".")]
    pub dest: PathBuf,

    /// Feature to describe
    #[arg(short, long, default_value = "api-docs")]
    pub feature: Feature,
}

impl PlanCommand {
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.dest);

        let report = ops::plan(&config, self.feature);
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
