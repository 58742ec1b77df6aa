//! Snippet materialization: one function per mode.

use crate::error::SnippetError;
use crate::imports::ImportList;
use crate::mode::{starts_with_keyword, Mode};
use crate::template::{
    AUTO_PRINT, CALL_SITE, CMD_MARKER, LIBS_MARKER, MAIN_MARKER, PROGRAM_BODY,
};

/// Print calls that would clash with the auto-print call site.
pub const PRINT_CALLS: [&str; 3] = ["fmt.Println", "fmt.Printf", "fmt.Print"];

/// Materialize a snippet for the given mode.
pub fn materialize(
    mode: Mode,
    snippet: &str,
    imports: &ImportList,
) -> Result<String, SnippetError> {
    match mode {
        Mode::AutoPrint => materialize_auto_print(snippet, imports),
        Mode::ProgramBody => materialize_program_body(snippet, imports),
        Mode::Verbatim => materialize_verbatim(snippet),
    }
}

/// Wrap an expression or statement list so its value gets printed.
///
/// A one-line snippet is treated as an expression and returned implicitly.
/// Multi-line snippets must `return` a value themselves.
pub fn materialize_auto_print(
    snippet: &str,
    imports: &ImportList,
) -> Result<String, SnippetError> {
    let snippet = non_empty(snippet)?;

    if starts_with_keyword(snippet, "package") {
        return Err(SnippetError::WrongModeForFullProgram);
    }
    if starts_with_keyword(snippet, "func") {
        return Err(SnippetError::WrongModeForProgramBody);
    }
    if let Some(call) = PRINT_CALLS.iter().find(|call| snippet.contains(*call)) {
        return Err(SnippetError::PrintNotAllowed {
            call: call.to_string(),
        });
    }

    let body = if snippet.lines().count() == 1 && !starts_with_keyword(snippet, "return") {
        format!("return {}", snippet)
    } else {
        snippet.to_string()
    };

    let libs = imports.render();
    Ok(AUTO_PRINT.render(&[
        (LIBS_MARKER, libs.as_str()),
        (CMD_MARKER, body.as_str()),
        (MAIN_MARKER, CALL_SITE),
    ]))
}

/// Add the package clause and imports to a snippet that defines `main`.
pub fn materialize_program_body(
    snippet: &str,
    imports: &ImportList,
) -> Result<String, SnippetError> {
    let snippet = non_empty(snippet)?;

    if starts_with_keyword(snippet, "package") {
        return Err(SnippetError::WrongModeForFullProgram);
    }

    let libs = imports.render();
    Ok(PROGRAM_BODY.render(&[(LIBS_MARKER, libs.as_str()), (CMD_MARKER, snippet)]))
}

/// A complete program needs nothing added.
pub fn materialize_verbatim(snippet: &str) -> Result<String, SnippetError> {
    non_empty(snippet).map(str::to_string)
}

fn non_empty(snippet: &str) -> Result<&str, SnippetError> {
    let snippet = snippet.trim();
    if snippet.is_empty() {
        Err(SnippetError::MissingInput)
    } else {
        Ok(snippet)
    }
}
