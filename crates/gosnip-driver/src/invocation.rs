//! Serializable outcome of one evaluation.

use serde::Serialize;

use crate::error::EvalError;

/// `{output, error}` as reported to machine readers. Exactly one side is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub output: String,
    pub error: Option<String>,
}

impl Invocation {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl From<Result<String, EvalError>> for Invocation {
    fn from(result: Result<String, EvalError>) -> Self {
        match result {
            Ok(output) => Invocation {
                output,
                error: None,
            },
            Err(e) => Invocation {
                output: String::new(),
                error: Some(e.to_string()),
            },
        }
    }
}
