//! The import block of generated programs.

use indexmap::IndexSet;

/// Always imported: the auto-print template calls `fmt.Println`.
pub const BASELINE_IMPORT: &str = "fmt";

/// Ordered, duplicate-free list of packages to import.
///
/// Entries are kept in their quoted form so that `strings` and `"strings"`
/// count as the same package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportList {
    entries: IndexSet<String>,
}

impl ImportList {
    /// A list holding only the baseline import.
    pub fn new() -> Self {
        let mut entries = IndexSet::new();
        entries.insert(quote_import(BASELINE_IMPORT));
        Self { entries }
    }

    /// Add a package. Returns false for blanks, the baseline and duplicates.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.entries.insert(quote_import(name))
    }

    /// Add several packages, keeping their order.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add(name.as_ref());
        }
    }

    /// Whether a package is already imported, quoted or not.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(&quote_import(name))
    }

    /// Quoted import lines, baseline first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The text that replaces `__LIBS__`.
    pub fn render(&self) -> String {
        render_imports(self.iter())
    }
}

impl Default for ImportList {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote an import path as a Go string literal.
///
/// Already-quoted paths are left alone, and the aliased forms
/// (`str strings`, `_ embed`, `. math`) only get their path quoted.
pub fn quote_import(identifier: &str) -> String {
    let identifier = identifier.trim();

    match identifier.rsplit_once(char::is_whitespace) {
        Some((alias, path)) if !alias.trim().is_empty() => {
            format!("{} {}", alias.trim(), quote_path(path))
        }
        _ => quote_path(identifier),
    }
}

fn quote_path(path: &str) -> String {
    let path = path.trim();
    let path = path.strip_prefix('"').unwrap_or(path);
    let path = path.strip_suffix('"').unwrap_or(path);
    format!("\"{}\"", path)
}

/// Quote each import and put one per line.
pub fn render_imports<I, S>(identifiers: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    identifiers
        .into_iter()
        .map(|identifier| quote_import(identifier.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_is_idempotent() {
        let once = quote_import("strings");
        let twice = quote_import(&once);
        assert_eq!(once, "\"strings\"");
        assert_eq!(twice, once);
        assert_eq!(quote_import("\"net/http\""), "\"net/http\"");
    }

    #[test]
    fn test_quote_aliased() {
        assert_eq!(quote_import("str strings"), "str \"strings\"");
        assert_eq!(quote_import("_ \"embed\""), "_ \"embed\"");
        assert_eq!(quote_import(&quote_import(". math")), ". \"math\"");
    }

    #[test]
    fn test_baseline_not_readded() {
        let mut imports = ImportList::new();
        assert!(!imports.add("fmt"));
        assert!(!imports.add("\"fmt\""));
        assert!(!imports.add("  "));
        assert_eq!(imports.len(), 1);
        assert!(imports.contains(BASELINE_IMPORT));
    }

    #[test]
    fn test_order_and_duplicates() {
        let mut imports = ImportList::new();
        imports.extend([" strings", "runtime", "\"strings\"", ""]);
        let lines: Vec<_> = imports.iter().collect();
        assert_eq!(lines, vec!["\"fmt\"", "\"strings\"", "\"runtime\""]);
    }

    #[test]
    fn test_render_block() {
        let mut imports = ImportList::new();
        imports.extend(["strings", "os/exec"]);

        insta::assert_snapshot!(imports.render(), @r##"
        "fmt"
        "strings"
        "os/exec"
        "##);
    }

    #[test]
    fn test_render_free_function() {
        assert_eq!(render_imports(["\"a\"", "b"]), "\"a\"\n\"b\"");
        assert_eq!(render_imports(Vec::<String>::new()), "");
    }
}
