//! # gosnip Template
//!
//! Turns a Go snippet into a complete program the toolchain can run.
//!
//! Each [`Mode`] has its own rules: auto-print snippets are wrapped in a
//! helper function whose result gets printed, program-body snippets only
//! receive the import block, and verbatim snippets pass through untouched.
//!
//! ## Example
//!
//! ```
//! use gosnip_template::{materialize_auto_print, ImportList};
//!
//! let imports = ImportList::new();
//! let program = materialize_auto_print("3 + 2", &imports).unwrap();
//!
//! assert!(program.contains("return 3 + 2"));
//! assert!(program.contains("fmt.Println(doStuff())"));
//! ```

mod error;
mod imports;
mod materialize;
mod mode;
mod template;

pub use error::SnippetError;
pub use imports::{quote_import, render_imports, ImportList, BASELINE_IMPORT};
pub use materialize::{
    materialize, materialize_auto_print, materialize_program_body, materialize_verbatim,
    PRINT_CALLS,
};
pub use mode::Mode;
pub use template::{
    Template, AUTO_PRINT, CALL_SITE, CMD_MARKER, LIBS_MARKER, MAIN_MARKER, PROGRAM_BODY,
    TEMPLATE_VERSION,
};
