//! One call, end to end: scratch file, toolchain run, cleanup.

use tracing::{debug, warn};

use crate::error::ExecError;
use crate::runner::Runner;
use crate::scratch::ScratchDir;

/// Writes a program to a fresh scratch file and runs it.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    scratch: ScratchDir,
    runner: Runner,
    retain: bool,
}

impl Orchestrator {
    pub fn new(scratch: ScratchDir, runner: Runner) -> Self {
        Self {
            scratch,
            runner,
            retain: false,
        }
    }

    /// Keep generated files after each run instead of deleting them.
    pub fn with_retain(mut self, retain: bool) -> Self {
        self.retain = retain;
        self
    }

    pub fn scratch(&self) -> &ScratchDir {
        &self.scratch
    }

    /// Write `program` to a new scratch file and run it.
    ///
    /// The file is removed when this returns, whether the run succeeded or
    /// not, unless retention is on.
    pub fn execute(&self, program: &str) -> Result<String, ExecError> {
        let mut file = self.scratch.create_file()?;
        file.retain(self.retain);

        file.write_program(program)?;
        debug!("wrote {} bytes to {}", program.len(), file.path().display());

        self.runner.run(file.path())
    }

    /// Remove every scratch file, retained or not. Failures are only logged.
    pub fn purge(&self) {
        if let Err(e) = self.scratch.purge() {
            warn!(
                "failed to purge scratch directory {}: {}",
                self.scratch.path().display(),
                e
            );
        }
    }
}
