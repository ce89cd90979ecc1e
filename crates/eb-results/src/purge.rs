//! Stale result removal before a run.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use eb_core::{ResultKind, validate_label};
use tracing::debug;

use crate::{ArtifactError, ArtifactResult};

const CONTENTS_EXTENSION: &str = "contents";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PurgeMode {
    /// Remove result libraries and the QA contents report.
    #[default]
    Full,
    /// Remove result libraries but keep `<variant>.contents`.
    PreserveContents,
}

/// Remove result libraries of every kind left by an earlier run of `variant`.
///
/// Returns the paths that were actually removed.
pub fn purge_stale_results(
    work_dir: &Path,
    variant: &str,
    mode: PurgeMode,
) -> ArtifactResult<Vec<PathBuf>> {
    validate_label(variant)?;

    let mut names: Vec<String> = [ResultKind::Zone, ResultKind::MassFlow, ResultKind::Plant]
        .iter()
        .map(|kind| kind.file_name(variant))
        .collect();
    if mode == PurgeMode::Full {
        names.push(format!("{}.{}", variant, CONTENTS_EXTENSION));
    }

    let mut removed = Vec::new();
    for name in names {
        let path = work_dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed stale result");
                removed.push(path);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(ArtifactError::io("remove", &path)(e)),
        }
    }
    Ok(removed)
}
