//! eb-engine: running the simulator's text-mode executables.
//!
//! An engine call feeds a complete script on stdin, captures everything the
//! process prints into a scratch file and reports the CPU-time line the
//! simulator prints on completion. Calls block until the process exits.

pub mod launcher;
pub mod runner;
pub mod scratch;

pub use launcher::{EngineExit, EngineLauncher, SystemLauncher};
pub use runner::{EngineRun, Invocation, run_engine};
pub use scratch::{CPU_TIME_MARKER, SCRATCH_EXTENSION, find_cpu_time, scratch_file_name};

use std::path::PathBuf;

/// Simulator executable.
pub const SIMULATOR: &str = "bps";
/// Project manager executable.
pub const PROJECT_MANAGER: &str = "prj";

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("Failed to create scratch file {}", .path.display())]
    Scratch {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to start {program}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Failed to feed script to {program}")]
    Input {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with failure (code {code:?}), see {}", .scratch.display())]
    ProcessFailed {
        program: String,
        code: Option<i32>,
        scratch: PathBuf,
    },

    #[error("Failed to read scratch file {}", .path.display())]
    ScanScratch {
        path: PathBuf,
        source: std::io::Error,
    },
}
