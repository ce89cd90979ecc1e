//! Error types for the eb-app service layer.

use std::path::PathBuf;

/// Service layer error; wraps the errors of every backend crate so the CLI
/// has a single type to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Batch file error: {0}")]
    Project(#[from] eb_project::ProjectError),

    #[error("Batch validation failed: {0}")]
    Validation(#[from] eb_project::ValidationError),

    #[error(transparent)]
    Core(#[from] eb_core::CoreError),

    #[error("Engine error: {0}")]
    Engine(#[from] eb_engine::EngineError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] eb_results::ArtifactError),

    #[error("Variant not found: {0}")]
    VariantNotFound(String),

    #[error("No climate line in {}", .path.display())]
    ClimateLineMissing { path: PathBuf },

    #[error("Failed to {op} model file {}", .path.display())]
    ModelFile {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Variant '{variant}' is missing results: {}", .files.join(", "))]
    MissingResults { variant: String, files: Vec<String> },
}

/// Result type for eb-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub(crate) fn model_file(
        op: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| AppError::ModelFile { op, path, source }
    }
}
