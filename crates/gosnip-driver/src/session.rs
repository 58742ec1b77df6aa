//! Evaluation sessions.

use std::path::Path;

use gosnip_exec::{Orchestrator, Runner, ScratchDir};
use gosnip_template::{materialize, ImportList, Mode};
use tracing::debug;

use crate::config::EvalConfig;
use crate::error::EvalError;

/// One evaluator: its configuration, import list and scratch directory.
///
/// Configuration methods take `&mut self` and evaluation takes `&self`, so a
/// session is configured first and can then be shared between threads.
///
/// ```no_run
/// use gosnip_driver::Session;
///
/// let mut session = Session::new();
/// session.add_libraries(["strings"]);
///
/// let output = session.execute_auto_print(r#"strings.ToUpper("go")"#)?;
/// assert_eq!(output, "GO");
/// # Ok::<(), gosnip_driver::EvalError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    config: EvalConfig,
    imports: ImportList,
    orchestrator: Orchestrator,
}

impl Session {
    /// A session with default configuration.
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    pub fn with_config(config: EvalConfig) -> Self {
        let mut imports = ImportList::new();
        imports.extend(&config.libraries);

        let orchestrator = Orchestrator::new(
            ScratchDir::new(config.scratch_dir()),
            Runner::new(config.toolchain.clone()).with_timeout(config.timeout),
        )
        .with_retain(config.retain_scratch_files);

        Self {
            config,
            imports,
            orchestrator,
        }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    pub fn imports(&self) -> &ImportList {
        &self.imports
    }

    /// Where generated programs are written.
    pub fn scratch_dir(&self) -> &Path {
        self.orchestrator.scratch().path()
    }

    /// Import more packages. Blanks, `fmt` and duplicates are skipped.
    pub fn add_libraries<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().trim();
            if self.imports.add(name) {
                self.config.libraries.push(name.to_string());
            }
        }
        self
    }

    /// Keep generated programs on disk after each run.
    pub fn retain_scratch_files(&mut self, retain: bool) -> &mut Self {
        self.config.retain_scratch_files = retain;
        self.orchestrator = self.orchestrator.clone().with_retain(retain);
        self
    }

    /// Remove the scratch directory and everything in it.
    ///
    /// Safe to call at any time; failures are logged, not returned.
    pub fn purge_scratch(&mut self) -> &mut Self {
        self.orchestrator.purge();
        self
    }

    /// The program that would be run for `snippet`, without running it.
    pub fn materialize(&self, mode: Mode, snippet: &str) -> Result<String, EvalError> {
        let program = materialize(mode, snippet, &self.imports)?;
        debug!("materialized {} bytes in {} mode", program.len(), mode);
        Ok(program)
    }

    /// Materialize `snippet` for `mode`, run it, and return its trimmed output.
    pub fn execute(&self, mode: Mode, snippet: &str) -> Result<String, EvalError> {
        let program = self.materialize(mode, snippet)?;
        Ok(self.orchestrator.execute(&program)?)
    }

    /// Run an expression or statement list and print its value.
    pub fn execute_auto_print(&self, snippet: &str) -> Result<String, EvalError> {
        self.execute(Mode::AutoPrint, snippet)
    }

    /// Run function definitions that include `main`.
    pub fn execute_program_body(&self, snippet: &str) -> Result<String, EvalError> {
        self.execute(Mode::ProgramBody, snippet)
    }

    /// Run a complete program as-is.
    pub fn execute_verbatim(&self, snippet: &str) -> Result<String, EvalError> {
        self.execute(Mode::Verbatim, snippet)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
