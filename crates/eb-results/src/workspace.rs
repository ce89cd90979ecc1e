//! Per-variant destination directories.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use eb_core::validate_label;

use crate::{ArtifactError, ArtifactResult};

/// How a variant workspace is prepared before files are moved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkspaceMode {
    /// Clear both directories first; nothing from an earlier batch survives.
    #[default]
    Rebuild,
    /// Keep what is there and add to it.
    Append,
}

/// `<work_dir>/<variant>/` for results and `<work_dir>/<variant>_scratchfiles/`
/// for scratch captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantWorkspace {
    pub results_dir: PathBuf,
    pub scratch_dir: PathBuf,
}

impl VariantWorkspace {
    pub fn for_variant(work_dir: &Path, variant: &str) -> ArtifactResult<Self> {
        validate_label(variant)?;
        Ok(Self {
            results_dir: work_dir.join(variant),
            scratch_dir: work_dir.join(format!("{}_scratchfiles", variant)),
        })
    }

    /// Set the workspace up for a new run. [`WorkspaceMode::Rebuild`] clears
    /// both directories; [`WorkspaceMode::Append`] only creates them.
    pub fn prepare(&self, mode: WorkspaceMode) -> ArtifactResult<()> {
        if mode == WorkspaceMode::Rebuild {
            for dir in [&self.results_dir, &self.scratch_dir] {
                match fs::remove_dir_all(dir) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(ArtifactError::io("clear", dir)(e)),
                }
            }
        }
        self.ensure()
    }

    /// Create both directories if they do not exist; existing contents stay.
    pub fn ensure(&self) -> ArtifactResult<()> {
        for dir in [&self.results_dir, &self.scratch_dir] {
            fs::create_dir_all(dir).map_err(ArtifactError::io("create", dir))?;
        }
        Ok(())
    }
}
