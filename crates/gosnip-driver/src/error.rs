//! Errors surfaced by a session.

use std::fmt::Display;

use gosnip_exec::ExecError;
use gosnip_template::SnippetError;
use miette::Diagnostic;
use thiserror::Error;

/// Anything that can go wrong evaluating a snippet.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The snippet does not fit the requested mode. Nothing was written or run.
    #[error(transparent)]
    Snippet(#[from] SnippetError),

    /// Writing the program or running the toolchain failed.
    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl Diagnostic for EvalError {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        let code = match self {
            EvalError::Snippet(SnippetError::MissingInput) => "gosnip::missing_input",
            EvalError::Snippet(SnippetError::WrongModeForFullProgram)
            | EvalError::Snippet(SnippetError::WrongModeForProgramBody) => "gosnip::wrong_mode",
            EvalError::Snippet(SnippetError::PrintNotAllowed { .. }) => "gosnip::print_not_allowed",
            EvalError::Exec(ExecError::Filesystem { .. }) => "gosnip::filesystem",
            EvalError::Exec(ExecError::Execution { .. }) => "gosnip::execution",
            EvalError::Exec(ExecError::Timeout { .. }) => "gosnip::timeout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        let help = match self {
            EvalError::Snippet(SnippetError::MissingInput) => {
                "pass the code with --content or --file"
            }
            EvalError::Snippet(SnippetError::WrongModeForFullProgram) => "use --mode verbatim",
            EvalError::Snippet(SnippetError::WrongModeForProgramBody) => {
                "use --mode program-body"
            }
            EvalError::Snippet(SnippetError::PrintNotAllowed { .. }) => {
                "leave out the print call and let the value be printed, or use --mode program-body"
            }
            EvalError::Exec(ExecError::Filesystem { .. }) => {
                "check that the scratch directory is writable, or point GOSNIP_SCRATCH_DIR elsewhere"
            }
            EvalError::Exec(ExecError::Timeout { .. }) => {
                "raise --timeout, or unset GOSNIP_TIMEOUT_SECS"
            }
            EvalError::Exec(ExecError::Execution { .. }) => return None,
        };
        Some(Box::new(help))
    }
}
