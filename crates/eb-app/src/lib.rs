//! Shared application service layer for batch simulation.
//!
//! Runs one variant or a whole batch end to end: stale purge, optional QA
//! report, model edits, the simulation itself, result gathering, the
//! expected-result check, artifact relocation and the run manifest. The CLI is a
//! thin front end over this crate.

pub mod batch_service;
pub mod error;
pub mod geometry;
pub mod progress;

pub use batch_service::{
    BatchOutcome, EditOutcome, RunOptions, VariantOutcome, apply_edit, preview_script, run_batch,
    run_batch_with_progress, run_variant, run_variant_with_progress,
};
pub use error::{AppError, AppResult};
pub use geometry::count_geometry_matches;
pub use progress::{RunProgressEvent, RunStage};
