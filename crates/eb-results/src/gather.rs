//! Collecting engine output that lands outside the working directory, and
//! archiving climate evaluation files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;

use crate::relocate::{list_files, move_file};
use crate::{ArtifactError, ArtifactResult};

/// Move every `<variant>.*` file from `source_dir` into `work_dir`.
///
/// A missing `source_dir` means there is nothing to gather.
pub fn gather_from(source_dir: &Path, work_dir: &Path, variant: &str) -> ArtifactResult<usize> {
    if !source_dir.is_dir() {
        debug!(dir = %source_dir.display(), "nothing to gather");
        return Ok(0);
    }

    let prefix = format!("{}.", variant);
    let mut gathered = 0;
    for name in list_files(source_dir)? {
        if name.starts_with(&prefix) && move_file(&source_dir.join(&name), &work_dir.join(&name))? {
            gathered += 1;
        }
    }
    Ok(gathered)
}

/// Rebuild `<work_dir>/<clm>_eval/` and move every `<clm>_*` file into it.
pub fn archive_climate_files(work_dir: &Path, clm: &str) -> ArtifactResult<usize> {
    eb_core::validate_label(clm)?;
    let archive = work_dir.join(format!("{}_eval", clm));
    match fs::remove_dir_all(&archive) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(ArtifactError::io("clear", &archive)(e)),
    }
    fs::create_dir_all(&archive).map_err(ArtifactError::io("create", &archive))?;

    let prefix = format!("{}_", clm);
    let mut moved = 0;
    for name in list_files(work_dir)? {
        if name.starts_with(&prefix) && move_file(&work_dir.join(&name), &archive.join(&name))? {
            moved += 1;
        }
    }
    Ok(moved)
}
