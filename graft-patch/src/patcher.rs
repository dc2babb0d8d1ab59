//! Loading, patching and saving one source file.

use std::path::{Path, PathBuf};

use graft_core::WriteResult;
use graft_ts::SourceDocument;
use tracing::{info, warn};

use crate::{
    Config, Error, Feature, FeaturePlan, Result,
    pipeline::{AppliedEdit, Diagnostic, PatchContext, PatchState, Pipeline},
};

/// Result of patching or formatting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The file does not exist; nothing was read or written.
    Skipped { path: PathBuf },
    /// The file already had the canonical patched content.
    Unchanged {
        path: PathBuf,
        diagnostics: Vec<Diagnostic>,
    },
    /// The file was rewritten.
    Written {
        path: PathBuf,
        diagnostics: Vec<Diagnostic>,
        applied: Vec<AppliedEdit>,
    },
    /// Dry run: the file would be rewritten with `content`.
    Pending {
        path: PathBuf,
        diagnostics: Vec<Diagnostic>,
        applied: Vec<AppliedEdit>,
        content: String,
    },
}

impl PatchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            PatchOutcome::Skipped { path }
            | PatchOutcome::Unchanged { path, .. }
            | PatchOutcome::Written { path, .. }
            | PatchOutcome::Pending { path, .. } => path,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            PatchOutcome::Skipped { .. } => &[],
            PatchOutcome::Unchanged { diagnostics, .. }
            | PatchOutcome::Written { diagnostics, .. }
            | PatchOutcome::Pending { diagnostics, .. } => diagnostics,
        }
    }

    /// Final state of the run that produced this outcome.
    pub fn state(&self) -> PatchState {
        match self {
            PatchOutcome::Skipped { .. } => PatchState::Skipped,
            PatchOutcome::Unchanged { .. } | PatchOutcome::Written { .. } => PatchState::Saved,
            PatchOutcome::Pending { .. } => PatchState::ConstructorPatched,
        }
    }

    /// Whether the file was, or in a dry run would be, rewritten.
    pub fn changes_file(&self) -> bool {
        matches!(
            self,
            PatchOutcome::Written { .. } | PatchOutcome::Pending { .. }
        )
    }
}

/// Applies feature plans to source files.
///
/// # Example
///
/// ```ignore
/// let patcher = Patcher::new(Config::load(dest)?);
/// match patcher.inject(dest, Feature::ApiDocs)? {
///     PatchOutcome::Skipped { path } => println!("skip: {} not found", path.display()),
///     outcome => println!("patched {}", outcome.path().display()),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Patcher {
    config: Config,
    dry_run: bool,
}

impl Patcher {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    /// Compute outcomes without writing any file.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn plan(&self, feature: Feature) -> FeaturePlan {
        feature.plan(&self.config)
    }

    /// Patch the configured target file inside `dest_dir`.
    pub fn inject(&self, dest_dir: &Path, feature: Feature) -> Result<PatchOutcome> {
        self.patch_file(&dest_dir.join(&self.config.target.file), feature)
    }

    /// Apply `feature` to source text.
    pub fn patch_source(&self, source: &str, name: &str, feature: Feature) -> Result<PatchContext> {
        let document = SourceDocument::parse(source, name)?;
        Pipeline::new().run(document, self.plan(feature), &self.config.target.class)
    }

    /// Apply `feature` to the file at `path` and save the canonical result.
    ///
    /// A missing file is skipped with a warning. A missing target class is a
    /// structural precondition error and leaves the file untouched.
    pub fn patch_file(&self, path: &Path, feature: Feature) -> Result<PatchOutcome> {
        let Some(source) = read(path)? else {
            warn!(path = %path.display(), "skip: file not found");
            return Ok(PatchOutcome::Skipped {
                path: path.to_path_buf(),
            });
        };

        let mut ctx = self.patch_source(&source, &path.display().to_string(), feature)?;
        let diagnostics = std::mem::take(&mut ctx.diagnostics);
        let applied = std::mem::take(&mut ctx.applied);
        let path = path.to_path_buf();

        if self.dry_run {
            let content = ctx.document.render(&self.config.style());
            return Ok(if content == source {
                PatchOutcome::Unchanged { path, diagnostics }
            } else {
                PatchOutcome::Pending {
                    path,
                    diagnostics,
                    applied,
                    content,
                }
            });
        }

        let written = ctx.document.save(&path, &self.config.style())?;
        ctx.advance(PatchState::Saved);
        Ok(match written {
            WriteResult::Written => {
                info!(path = %path.display(), %feature, "patched");
                PatchOutcome::Written {
                    path,
                    diagnostics,
                    applied,
                }
            }
            WriteResult::Unchanged => {
                info!(path = %path.display(), %feature, "already up to date");
                PatchOutcome::Unchanged { path, diagnostics }
            }
        })
    }

    /// Rewrite the file at `path` in canonical form without applying edits.
    pub fn format_file(&self, path: &Path) -> Result<PatchOutcome> {
        let Some(source) = read(path)? else {
            warn!(path = %path.display(), "skip: file not found");
            return Ok(PatchOutcome::Skipped {
                path: path.to_path_buf(),
            });
        };

        let document = SourceDocument::parse(&source, path.display().to_string())?;
        let path = path.to_path_buf();
        let style = self.config.style();

        if self.dry_run {
            let content = document.render(&style);
            return Ok(if content == source {
                PatchOutcome::Unchanged {
                    path,
                    diagnostics: Vec::new(),
                }
            } else {
                PatchOutcome::Pending {
                    path,
                    diagnostics: Vec::new(),
                    applied: Vec::new(),
                    content,
                }
            });
        }

        Ok(match document.save(&path, &style)? {
            WriteResult::Written => PatchOutcome::Written {
                path,
                diagnostics: Vec::new(),
                applied: Vec::new(),
            },
            WriteResult::Unchanged => PatchOutcome::Unchanged {
                path,
                diagnostics: Vec::new(),
            },
        })
    }
}

fn read(path: &Path) -> Result<Option<String>> {
    graft_core::read_if_exists(path).map_err(|source| {
        Box::new(Error::Read {
            path: path.to_path_buf(),
            source,
        })
    })
}
