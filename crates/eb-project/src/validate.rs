//! Batch validation logic.

use std::collections::HashSet;

use eb_core::{CoreError, Domain, validate_label};

use crate::schema::BatchDef;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate variant label: {label}")]
    DuplicateLabel { label: String },

    #[error("Invalid value: {field} = {value:?} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Batch '{name}' has no variants")]
    NoVariants { name: String },

    #[error("Variant '{label}': {source}")]
    Variant { label: String, source: CoreError },

    #[error("Defaults: {0}")]
    Defaults(CoreError),

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_text(field: impl Into<String>, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "must not be empty"));
    }
    if value.contains(['\n', '\r']) {
        return Err(invalid(field, value, "must be a single line"));
    }
    Ok(())
}

pub fn validate_batch(batch: &BatchDef) -> Result<(), ValidationError> {
    if batch.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: batch.version,
        });
    }

    check_text("model.config", &batch.model.config)?;
    if batch.model.config.contains(['/', '\\']) {
        return Err(invalid(
            "model.config",
            &batch.model.config,
            "give the file name only; the directory is model.work_dir",
        ));
    }
    check_text("engine.simulator", &batch.engine.simulator)?;
    check_text("engine.project_manager", &batch.engine.project_manager)?;

    Domain::from_key(batch.defaults.domain).map_err(ValidationError::Defaults)?;

    if batch.variants.is_empty() {
        return Err(ValidationError::NoVariants {
            name: batch.name.clone(),
        });
    }

    let mut labels = HashSet::new();
    for variant in &batch.variants {
        validate_label(&variant.label).map_err(|source| ValidationError::Variant {
            label: variant.label.clone(),
            source,
        })?;
        if !labels.insert(variant.label.as_str()) {
            return Err(ValidationError::DuplicateLabel {
                label: variant.label.clone(),
            });
        }

        batch
            .resolve(variant)
            .map_err(|source| ValidationError::Variant {
                label: variant.label.clone(),
                source,
            })?;

        for (index, edit) in variant.edits.iter().enumerate() {
            for value in edit.text_fields() {
                check_text(format!("{}.edits[{}]", variant.label, index), value)?;
            }
        }
    }

    Ok(())
}
