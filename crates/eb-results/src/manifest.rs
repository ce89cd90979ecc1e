//! Per-variant run manifest written next to the results.

use std::fs;
use std::path::Path;

use eb_core::{Domain, RunParameters};
use serde::{Deserialize, Serialize};

use crate::expected::MissingArtifact;
use crate::{ArtifactError, ArtifactResult};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub variant: String,
    pub config: String,
    pub domain: Domain,
    pub parameters: RunParameters,
    /// UTC, RFC 3339.
    pub timestamp: String,
    pub script_sha256: String,
    pub cpu_time: Option<String>,
    pub moved: usize,
    pub archived: usize,
    pub deleted: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<MissingArtifact>,
}

impl RunManifest {
    pub fn now_timestamp() -> String {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }
}

pub fn save_manifest(results_dir: &Path, manifest: &RunManifest) -> ArtifactResult<()> {
    let path = results_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest)?;
    fs::write(&path, json).map_err(ArtifactError::io("write", &path))
}

pub fn load_manifest(results_dir: &Path) -> ArtifactResult<RunManifest> {
    let path = results_dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).map_err(ArtifactError::io("read", &path))?;
    Ok(serde_json::from_str(&content)?)
}
