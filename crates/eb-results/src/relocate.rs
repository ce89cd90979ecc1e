//! Sorting a working directory into the variant workspace.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::classify::{Classification, classify};
use crate::workspace::{VariantWorkspace, WorkspaceMode};
use crate::{ArtifactError, ArtifactResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationAction {
    Moved { from: PathBuf, to: PathBuf },
    Archived { from: PathBuf, to: PathBuf },
    Deleted { path: PathBuf },
    /// The file disappeared between listing and handling it.
    AlreadyGone { path: PathBuf },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelocationReport {
    pub workspace: Option<VariantWorkspace>,
    pub actions: Vec<RelocationAction>,
    /// File names left in place.
    pub untouched: Vec<String>,
}

impl RelocationReport {
    pub fn moved(&self) -> usize {
        self.count(|a| matches!(a, RelocationAction::Moved { .. }))
    }

    pub fn archived(&self) -> usize {
        self.count(|a| matches!(a, RelocationAction::Archived { .. }))
    }

    pub fn deleted(&self) -> usize {
        self.count(|a| matches!(a, RelocationAction::Deleted { .. }))
    }

    /// True when the pass changed nothing in the working directory.
    pub fn is_noop(&self) -> bool {
        self.actions
            .iter()
            .all(|a| matches!(a, RelocationAction::AlreadyGone { .. }))
    }

    fn count(&self, pred: impl Fn(&RelocationAction) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }
}

/// Move `from` to `to`. Returns `false` when `from` no longer exists.
pub(crate) fn move_file(from: &Path, to: &Path) -> ArtifactResult<bool> {
    match fs::rename(from, to) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound && !from.exists() => Ok(false),
        Err(e) if e.kind() == ErrorKind::NotFound || e.kind() == ErrorKind::PermissionDenied => {
            Err(ArtifactError::io("move", from)(e))
        }
        // Most likely a rename across file systems.
        Err(_) => {
            fs::copy(from, to).map_err(ArtifactError::io("copy", from))?;
            fs::remove_file(from).map_err(ArtifactError::io("remove", from))?;
            Ok(true)
        }
    }
}

/// Regular files directly inside `dir`, sorted by name.
pub(crate) fn list_files(dir: &Path) -> ArtifactResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(ArtifactError::io("list", dir))? {
        let entry = entry.map_err(ArtifactError::io("list", dir))?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "skipping non UTF-8 file name"),
        }
    }
    names.sort();
    Ok(names)
}

/// First free `<stem>_<n>.<ext>` (n >= 2) next to `target`.
fn collision_free(target: PathBuf) -> PathBuf {
    if !target.exists() {
        return target;
    }
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = target
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let parent = target.parent().map(Path::to_path_buf).unwrap_or_default();
    (2u32..)
        .map(|n| parent.join(format!("{}_{}{}", stem, n, ext)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(target)
}

/// Classify every file in `work_dir` and move, archive or delete it.
///
/// The workspace directories are created when missing but never cleared
/// here; clearing belongs to the start of a run ([`VariantWorkspace::prepare`]),
/// so a second pass over a sorted directory changes nothing. In
/// [`WorkspaceMode::Append`] scratch files that would overwrite an archived
/// one get a numeric suffix. A file that vanishes mid-pass is recorded as
/// already handled; any other I/O failure aborts the pass.
pub fn relocate(
    work_dir: &Path,
    variant: &str,
    mode: WorkspaceMode,
) -> ArtifactResult<RelocationReport> {
    let workspace = VariantWorkspace::for_variant(work_dir, variant)?;
    workspace.ensure()?;

    let mut report = RelocationReport::default();
    for name in list_files(work_dir)? {
        let from = work_dir.join(&name);
        let class = classify(&name, variant);

        let action = match class {
            Classification::VariantResult | Classification::Data => {
                let to = workspace.results_dir.join(&name);
                move_file(&from, &to)?.then_some(RelocationAction::Moved {
                    from: from.clone(),
                    to,
                })
            }
            Classification::Table => {
                let to = workspace.results_dir.join(format!("{}.csv", variant));
                move_file(&from, &to)?.then_some(RelocationAction::Moved {
                    from: from.clone(),
                    to,
                })
            }
            Classification::Scratch => {
                let target = workspace.scratch_dir.join(&name);
                let to = match mode {
                    WorkspaceMode::Rebuild => target,
                    WorkspaceMode::Append => collision_free(target),
                };
                move_file(&from, &to)?.then_some(RelocationAction::Archived {
                    from: from.clone(),
                    to,
                })
            }
            Classification::Junk => match fs::remove_file(&from) {
                Ok(()) => Some(RelocationAction::Deleted { path: from.clone() }),
                Err(e) if e.kind() == ErrorKind::NotFound => None,
                Err(e) => return Err(ArtifactError::io("remove", &from)(e)),
            },
            Classification::Untouched => {
                report.untouched.push(name);
                continue;
            }
        };

        let action = action.unwrap_or(RelocationAction::AlreadyGone { path: from });
        debug!(?action, "relocated");
        report.actions.push(action);
    }

    info!(
        variant,
        moved = report.moved(),
        archived = report.archived(),
        deleted = report.deleted(),
        untouched = report.untouched.len(),
        "relocated artifacts"
    );
    report.workspace = Some(workspace);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(prefix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "{}_{}_{}",
            prefix,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn vanished_source_is_not_an_error() {
        let dir = scratch_dir("eb_results_vanished");
        let from = dir.join("X.res");
        fs::write(&from, "r").unwrap();
        let listed = list_files(&dir).unwrap();
        assert_eq!(listed, ["X.res"]);

        // Gone between listing and moving.
        fs::remove_file(&from).unwrap();
        assert!(!move_file(&from, &dir.join("moved.res")).unwrap());
        assert!(!dir.join("moved.res").exists());
    }

    #[test]
    fn collision_free_picks_first_unused_suffix() {
        let dir = scratch_dir("eb_results_collision");
        let target = dir.join("X_bps.scratch");
        assert_eq!(collision_free(target.clone()), target);

        fs::write(&target, "1").unwrap();
        fs::write(dir.join("X_bps_2.scratch"), "2").unwrap();
        assert_eq!(collision_free(target), dir.join("X_bps_3.scratch"));
    }
}
