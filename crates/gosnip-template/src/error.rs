//! Snippet shape errors.

use thiserror::Error;

/// A snippet that does not fit the mode it was submitted under.
///
/// All of these are detected before anything touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnippetError {
    #[error("no code to run: the snippet is empty")]
    MissingInput,

    #[error("snippet is a complete program (starts with `package`); run it in verbatim mode")]
    WrongModeForFullProgram,

    #[error("snippet defines functions (starts with `func`); run it in program-body mode")]
    WrongModeForProgramBody,

    #[error("auto-print snippets cannot call `{call}`; the result is printed for you")]
    PrintNotAllowed { call: String },
}
