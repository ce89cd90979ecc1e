//! Schema migration framework.

use crate::ProjectError;
use crate::schema::BatchDef;

pub const LATEST_VERSION: u32 = 1;

pub fn migrate_to_latest(mut batch: BatchDef) -> Result<BatchDef, ProjectError> {
    while batch.version < LATEST_VERSION {
        batch = migrate_one_version(batch)?;
    }
    Ok(batch)
}

fn migrate_one_version(batch: BatchDef) -> Result<BatchDef, ProjectError> {
    match batch.version {
        0 => migrate_v0_to_v1(batch),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 0 is accepted as an alias of version 1.
fn migrate_v0_to_v1(mut batch: BatchDef) -> Result<BatchDef, ProjectError> {
    batch.version = 1;
    Ok(batch)
}
