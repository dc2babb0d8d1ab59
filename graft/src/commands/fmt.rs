use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use graft_patch::{PatchOutcome, Patcher};

use super::{UnwrapOrExit, load_config};

#[derive(Args)]
pub struct FmtCommand {
    /// Project directory containing graft.toml and the target file
    #[arg(default_value = ".")]
    pub dest: PathBuf,

    /// Check if the file is formatted without making changes (exit 1 if not)
    #[arg(long)]
    pub check: bool,
}

impl FmtCommand {
    pub fn run(&self) -> Result<()> {
        let config = load_config(&self.dest);
        let path = self.dest.join(&config.target.file);
        let outcome = Patcher::new(config)
            .dry_run(self.check)
            .format_file(&path)
            .unwrap_or_exit();

        match outcome {
            PatchOutcome::Skipped { path } => {
                eprintln!("error: {} not found", path.display());
                std::process::exit(1);
            }
            PatchOutcome::Pending { path, .. } => {
                eprintln!("error: {} is not formatted", path.display());
                eprintln!("Run `graft fmt` to fix.");
                std::process::exit(1);
            }
            PatchOutcome::Unchanged { path, .. } if self.check => {
                println!("{} is formatted", path.display());
            }
            PatchOutcome::Unchanged { path, .. } => {
                println!("{} is already formatted", path.display());
            }
            PatchOutcome::Written { path, .. } => {
                println!("Formatted {}", path.display());
            }
        }

        Ok(())
    }
}
