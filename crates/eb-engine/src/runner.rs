//! Engine invocation and completion scanning.

use std::fs::File;
use std::path::PathBuf;

use eb_script::Script;
use tracing::{info, warn};

use crate::launcher::{EngineExit, EngineLauncher};
use crate::scratch::{find_cpu_time, scratch_file_name};
use crate::{EngineError, EngineResult};

/// One call of an engine executable against a model.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub program: String,
    /// Model configuration file name without extension.
    pub config: String,
    /// Directory holding the configuration file; the process runs here.
    pub work_dir: PathBuf,
    /// Scratch file prefix (variant label or configuration name).
    pub label: String,
    pub operation: String,
    pub input: Vec<u8>,
}

impl Invocation {
    pub fn new(
        program: impl Into<String>,
        config: impl Into<String>,
        work_dir: impl Into<PathBuf>,
        label: impl Into<String>,
        operation: impl Into<String>,
        script: &Script,
    ) -> Self {
        Self {
            program: program.into(),
            config: config.into(),
            work_dir: work_dir.into(),
            label: label.into(),
            operation: operation.into(),
            input: script.to_bytes(),
        }
    }

    /// Command line arguments after the program name.
    pub fn args(&self) -> [String; 4] {
        [
            "-file".to_string(),
            format!("{}.cfg", self.config),
            "-mode".to_string(),
            "text".to_string(),
        ]
    }

    pub fn scratch_path(&self) -> PathBuf {
        self.work_dir
            .join(scratch_file_name(&self.label, &self.operation))
    }
}

/// Outcome of a completed engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRun {
    pub scratch: PathBuf,
    pub exit: EngineExit,
    /// The simulator's CPU-time line, when it printed one.
    pub cpu_time: Option<String>,
}

/// Run the engine to completion and scan its scratch output.
///
/// The scratch file stays on disk whatever the outcome. A missing CPU-time
/// line is not an error; a failing exit status is.
pub fn run_engine<L: EngineLauncher + ?Sized>(
    launcher: &L,
    invocation: &Invocation,
) -> EngineResult<EngineRun> {
    let scratch = invocation.scratch_path();
    let capture = File::create(&scratch).map_err(|source| EngineError::Scratch {
        path: scratch.clone(),
        source,
    })?;

    info!(
        program = %invocation.program,
        config = %invocation.config,
        operation = %invocation.operation,
        "running engine"
    );
    let exit = launcher.launch(invocation, capture)?;

    let cpu_time = find_cpu_time(&scratch).map_err(|source| EngineError::ScanScratch {
        path: scratch.clone(),
        source,
    })?;

    if !exit.success {
        warn!(
            program = %invocation.program,
            code = ?exit.code,
            scratch = %scratch.display(),
            "engine exited with failure"
        );
        return Err(EngineError::ProcessFailed {
            program: invocation.program.clone(),
            code: exit.code,
            scratch,
        });
    }

    match &cpu_time {
        Some(line) => info!("{}", line),
        None => info!(operation = %invocation.operation, "engine reported no CPU time"),
    }

    Ok(EngineRun {
        scratch,
        exit,
        cpu_time,
    })
}
