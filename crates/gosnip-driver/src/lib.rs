//! Evaluate Go snippets.
//!
//! A [`Session`] turns a snippet into a complete program for the chosen
//! [`Mode`], writes it to a scratch file, runs it with the Go toolchain and
//! returns what it printed. Shape problems are reported before anything
//! touches the disk.
//!
//! ```no_run
//! use gosnip_driver::{Mode, Session};
//!
//! let session = Session::new();
//! assert_eq!(session.execute_auto_print("3 + 2")?, "5");
//!
//! let snippet = "func main() {\n\tfmt.Print(\"hi\")\n}";
//! assert_eq!(session.execute(Mode::classify(snippet), snippet)?, "hi");
//! # Ok::<(), gosnip_driver::EvalError>(())
//! ```

mod config;
mod error;
mod invocation;
mod session;

pub use config::{
    parse_timeout, EvalConfig, EvalConfigBuilder, DEFAULT_RETAIN_SCRATCH_FILES,
    DEFAULT_SCRATCH_FOLDER, ENV_KEEP_FILES, ENV_SCRATCH_DIR, ENV_TIMEOUT_SECS, ENV_TOOLCHAIN,
    SCRATCH_SUBDIR,
};
pub use error::EvalError;
pub use invocation::Invocation;
pub use session::Session;

pub use gosnip_exec::ExecError;
pub use gosnip_template::{
    ImportList, Mode, SnippetError, AUTO_PRINT, PROGRAM_BODY, TEMPLATE_VERSION,
};

/// Crate version, reported by `gosnip info`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
