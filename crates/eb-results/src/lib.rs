//! eb-results: post-run artifact lifecycle for simulation variants.
//!
//! After the simulator exits, the model's working directory holds result
//! libraries, exported tables, scratch captures and engine junk. This crate
//! purges stale results, sorts every file into the variant's workspace by
//! name pattern, and records what happened.

pub mod classify;
pub mod expected;
pub mod gather;
pub mod hash;
pub mod manifest;
pub mod purge;
pub mod relocate;
pub mod workspace;

pub use classify::{Classification, classify};
pub use expected::{MissingArtifact, check_expected_artifacts};
pub use gather::{archive_climate_files, gather_from};
pub use hash::script_digest;
pub use manifest::{MANIFEST_FILE, RunManifest, load_manifest, save_manifest};
pub use purge::{PurgeMode, purge_stale_results};
pub use relocate::{RelocationAction, RelocationReport, relocate};
pub use workspace::{VariantWorkspace, WorkspaceMode};

use std::path::PathBuf;

pub type ArtifactResult<T> = Result<T, ArtifactError>;

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to {op} {}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] eb_core::CoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ArtifactError {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| ArtifactError::Io { op, path, source }
    }
}
