//! eb-project: batch file format and validation.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_batch};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Make relative model paths relative to the batch file's directory.
fn anchor_paths(batch: &mut BatchDef, batch_path: &std::path::Path) {
    let Some(base) = batch_path.parent() else {
        return;
    };
    if batch.model.work_dir.is_relative() {
        batch.model.work_dir = base.join(&batch.model.work_dir);
    }
    if let Some(tmp_dir) = batch.model.tmp_dir.as_mut() {
        if tmp_dir.is_relative() {
            *tmp_dir = base.join(&*tmp_dir);
        }
    }
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<BatchDef> {
    let content = std::fs::read_to_string(path)?;
    let mut batch: BatchDef = serde_yaml::from_str(&content)?;
    batch = migrate_to_latest(batch)?;
    anchor_paths(&mut batch, path);
    validate_batch(&batch)?;
    Ok(batch)
}

pub fn save_yaml(path: &std::path::Path, batch: &BatchDef) -> ProjectResult<()> {
    validate_batch(batch)?;
    let content = serde_yaml::to_string(batch)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<BatchDef> {
    let content = std::fs::read_to_string(path)?;
    let mut batch: BatchDef = serde_json::from_str(&content)?;
    batch = migrate_to_latest(batch)?;
    anchor_paths(&mut batch, path);
    validate_batch(&batch)?;
    Ok(batch)
}

pub fn save_json(path: &std::path::Path, batch: &BatchDef) -> ProjectResult<()> {
    validate_batch(batch)?;
    let content = serde_json::to_string_pretty(batch)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load by extension: `.json` as JSON, anything else as YAML.
pub fn load_batch(path: &std::path::Path) -> ProjectResult<BatchDef> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_json(path),
        _ => load_yaml(path),
    }
}
