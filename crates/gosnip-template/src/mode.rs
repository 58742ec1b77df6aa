//! Execution modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a snippet is wrapped before it reaches the toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// An expression or statement list; its value is printed.
    AutoPrint,
    /// Function definitions including `main`; only imports are added.
    ProgramBody,
    /// A complete program, run unmodified.
    Verbatim,
}

impl Mode {
    /// All modes, in the order they are documented.
    pub const ALL: [Mode; 3] = [Mode::AutoPrint, Mode::ProgramBody, Mode::Verbatim];

    /// The canonical name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Mode::AutoPrint => "auto-print",
            Mode::ProgramBody => "program-body",
            Mode::Verbatim => "verbatim",
        }
    }

    /// Guess the mode a snippet was written for, from its leading keyword.
    ///
    /// `package` means a full program, `func` means a program body, and
    /// anything else is treated as an auto-print expression.
    pub fn classify(snippet: &str) -> Mode {
        let snippet = snippet.trim();
        if starts_with_keyword(snippet, "package") {
            Mode::Verbatim
        } else if starts_with_keyword(snippet, "func") {
            Mode::ProgramBody
        } else {
            Mode::AutoPrint
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto-print" | "simple" => Ok(Mode::AutoPrint),
            "program-body" | "normal" => Ok(Mode::ProgramBody),
            "verbatim" | "raw" => Ok(Mode::Verbatim),
            other => Err(format!(
                "unknown mode '{}', expected auto-print, program-body or verbatim",
                other
            )),
        }
    }
}

/// True when `source` begins with `keyword` as a whole word.
pub(crate) fn starts_with_keyword(source: &str, keyword: &str) -> bool {
    match source.strip_prefix(keyword) {
        Some(rest) => !rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_'),
        None => false,
    }
}
