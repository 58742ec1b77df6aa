//! Error types for program execution.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while writing or running a generated program.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Scratch directory or file could not be created or written.
    #[error("failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The toolchain failed to start, or exited non-zero.
    ///
    /// Compile errors land here too, with the toolchain's own text.
    #[error("{message}")]
    Execution { message: String },

    /// The program ran past its deadline and was killed.
    #[error("program did not finish within {after:?}")]
    Timeout { after: Duration },
}

impl ExecError {
    pub(crate) fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        ExecError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}
