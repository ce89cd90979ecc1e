//! eb-core: shared vocabulary for driving the building simulator in batch.
//!
//! Contains:
//! - domain (which subsystems take part in a run and the result files they produce)
//! - params (simulation period, time steps and variant naming)
//! - error (shared error types)

pub mod domain;
pub mod error;
pub mod params;

pub use domain::{Domain, ResultKind};
pub use error::{CoreError, CoreResult};
pub use params::{DayMonth, RunParameters, validate_label};
