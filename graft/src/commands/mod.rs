mod check;
mod completions;
mod fmt;
mod inject;
mod plan;

use std::path::Path;

use check::CheckCommand;
use clap::{ArgAction, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use fmt::FmtCommand;
use graft_patch::Config;
use inject::InjectCommand;
use plan::PlanCommand;

/// Extension trait for exiting on library errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for graft_patch::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Load `graft.toml` from `dir`, exiting on invalid config.
pub(crate) fn load_config(dir: &Path) -> Config {
    Config::load(dir).unwrap_or_exit()
}

#[derive(Parser)]
#[command(name = "graft")]
#[command(version)]
#[command(about = "Wire optional features into generated TypeScript sources")]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Inject(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Fmt(cmd) => cmd.run(),
            Commands::Plan(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Patch the target source file with a feature
    Inject(InjectCommand),

    /// Check whether a feature is already applied (exit 1 if not)
    Check(CheckCommand),

    /// Rewrite the target source file in canonical form
    Fmt(FmtCommand),

    /// List the edits a feature applies and their anchors
    Plan(PlanCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
