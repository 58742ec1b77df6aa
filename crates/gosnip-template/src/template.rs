//! Program templates.
//!
//! The templates are the contract between the materializer and whatever
//! reads the generated files, so their text must not drift. Bump
//! [`TEMPLATE_VERSION`] on any change.

/// Version of the template text below.
pub const TEMPLATE_VERSION: u32 = 1;

/// Replaced with the rendered import block.
pub const LIBS_MARKER: &str = "__LIBS__";
/// Replaced with the snippet.
pub const CMD_MARKER: &str = "__CMD__";
/// Replaced with the auto-print call site.
pub const MAIN_MARKER: &str = "__MAIN__";

/// What `main` does in auto-print mode.
pub const CALL_SITE: &str = "fmt.Println(doStuff())";

/// A fixed program skeleton with substitution markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub source: &'static str,
    pub markers: &'static [&'static str],
}

/// Wraps an expression or statement list in `doStuff()` and prints its result.
pub const AUTO_PRINT: Template = Template {
    name: "auto-print",
    source: "package main\n\
             import (\n\
             \t__LIBS__\n\
             )\n\
             func doStuff() interface{} {\n\
             \t__CMD__\n\
             }\n\
             func main() {\n\
             \t__MAIN__\n\
             }",
    markers: &[LIBS_MARKER, CMD_MARKER, MAIN_MARKER],
};

/// Adds the package clause and import block to user-written functions.
pub const PROGRAM_BODY: Template = Template {
    name: "program-body",
    source: "package main\n\
             import (\n\
             \t__LIBS__\n\
             )\n\
             \n\
             __CMD__",
    markers: &[LIBS_MARKER, CMD_MARKER],
};

impl Template {
    /// Fill in the markers in a single pass over the template text.
    ///
    /// Replacement values are copied out as-is and never scanned again, so a
    /// snippet that happens to contain `__LIBS__` stays intact. Markers with
    /// no value in `slots` are left in place, and empty markers are ignored.
    pub fn render(&self, slots: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(
            self.source.len() + slots.iter().map(|(_, v)| v.len()).sum::<usize>(),
        );
        let mut rest = self.source;

        loop {
            let next = slots
                .iter()
                .filter(|(marker, _)| !marker.is_empty())
                .filter_map(|(marker, value)| rest.find(marker).map(|at| (at, *marker, *value)))
                .min_by_key(|(at, _, _)| *at);

            match next {
                Some((at, marker, value)) => {
                    output.push_str(&rest[..at]);
                    output.push_str(value);
                    rest = &rest[at + marker.len()..];
                }
                None => {
                    output.push_str(rest);
                    return output;
                }
            }
        }
    }
}
