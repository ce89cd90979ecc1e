//! Process launching seam.

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::runner::Invocation;
use crate::{EngineError, EngineResult};

/// How an engine process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineExit {
    pub success: bool,
    pub code: Option<i32>,
}

/// Starts an engine process for an invocation and waits for it.
///
/// `capture` is the already created scratch file; implementations direct the
/// process output into it.
pub trait EngineLauncher {
    fn launch(&self, invocation: &Invocation, capture: File) -> EngineResult<EngineExit>;
}

/// Launches the real executables found on `PATH` (or at the given program path).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl EngineLauncher for SystemLauncher {
    fn launch(&self, invocation: &Invocation, capture: File) -> EngineResult<EngineExit> {
        let stderr = capture.try_clone().map_err(|source| EngineError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        let mut child = Command::new(&invocation.program)
            .args(invocation.args())
            .current_dir(&invocation.work_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::from(capture))
            .stderr(Stdio::from(stderr))
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            debug!(
                program = %invocation.program,
                bytes = invocation.input.len(),
                "writing script"
            );
            match stdin.write_all(&invocation.input) {
                Ok(()) => {}
                // The engine may quit before consuming the whole script.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    warn!(program = %invocation.program, "engine closed stdin before the script ended");
                }
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(EngineError::Input {
                        program: invocation.program.clone(),
                        source,
                    });
                }
            }
        }

        let status = child.wait().map_err(|source| EngineError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        Ok(EngineExit {
            success: status.success(),
            code: status.code(),
        })
    }
}
