//! Expected result libraries after a run.

use std::path::Path;

use eb_core::{Domain, ResultKind};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A result library the domain should have produced but did not.
///
/// Not an error: the batch driver decides whether it is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingArtifact {
    pub kind: ResultKind,
    pub file_name: String,
}

pub fn check_expected_artifacts(
    results_dir: &Path,
    variant: &str,
    domain: Domain,
) -> Vec<MissingArtifact> {
    domain
        .result_kinds()
        .iter()
        .filter_map(|kind| {
            let file_name = kind.file_name(variant);
            if results_dir.join(&file_name).is_file() {
                None
            } else {
                warn!(
                    variant,
                    file = %file_name,
                    "expected {} not found",
                    kind.description()
                );
                Some(MissingArtifact {
                    kind: *kind,
                    file_name,
                })
            }
        })
        .collect()
}
