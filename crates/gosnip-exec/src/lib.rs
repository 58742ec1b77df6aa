//! Execution side of gosnip.
//!
//! Generated programs are written to a managed scratch directory, run with
//! the external toolchain through the host shell, and removed afterwards.
//! Each call works in its own subdirectory, so concurrent calls never see
//! each other's cleanup.

mod error;
mod orchestrator;
mod runner;
mod scratch;

pub use error::ExecError;
pub use orchestrator::Orchestrator;
pub use runner::{Runner, DEFAULT_TOOLCHAIN};
pub use scratch::{ScratchDir, ScratchFile, DIR_MODE, FILE_MODE};
