//! Import Alias Table
//!
//! Packages are referenced by import path throughout the IR; the short name a
//! rendered file uses for each path is decided here, the first time a path is
//! needed during rendering.
//!
//! # Alias Rules
//!
//! - Vendoring prefixes are dropped: `a/vendor/github.com/x/y` is `github.com/x/y`.
//! - The alias is the last path segment, or the one before it when the last is
//!   a major-version suffix (`github.com/x/y/v2` is `y`).
//! - `.` and `-` become `_`; a leading digit gets a `_` prefix.
//! - Go keywords and predeclared identifiers get a `_` suffix (`func_`).
//! - Collisions take a numeric suffix: `errors`, `errors1`, `errors2`.
//! - The file's own package is never imported.
//!
//! # Import Block
//!
//! Paths whose first segment has no dot (standard library, local module
//! shorthands) come first, then dotted external paths, separated by a blank
//! line. Each group is sorted by depth (number of `/`) then lexically.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Per-render-pass mapping from import path to alias.
#[derive(Debug, Default, Clone)]
pub struct ImportTable {
    own_path: String,
    aliases: FxHashMap<String, String>,
    taken: FxHashSet<String>,
}

impl ImportTable {
    /// Table for a file in the package with import path `own_path`.
    pub fn new(own_path: impl Into<String>) -> Self {
        ImportTable {
            own_path: clean_path(&own_path.into()).to_owned(),
            ..ImportTable::default()
        }
    }

    /// Whether `path` names the package being rendered.
    pub fn is_own(&self, path: &str) -> bool {
        clean_path(path) == self.own_path
    }

    /// Alias for `path`, registering the import on first use.
    ///
    /// Returns `None` for the empty path and for the file's own package.
    pub fn alias(&mut self, path: &str) -> Option<String> {
        let path = clean_path(path);
        if path.is_empty() || path == self.own_path {
            return None;
        }
        if let Some(alias) = self.aliases.get(path) {
            return Some(alias.clone());
        }

        let base = base_alias(path);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.taken.contains(&candidate) {
            candidate = format!("{base}{suffix}");
            suffix += 1;
        }
        debug!(path, alias = %candidate, "assigned import alias");
        self.taken.insert(candidate.clone());
        self.aliases.insert(path.to_owned(), candidate.clone());
        Some(candidate)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// `(path, alias)` pairs in import-block order.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let (mut local, mut external): (Vec<_>, Vec<_>) = self
            .aliases
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_str()))
            .partition(|(path, _)| !is_external(path));
        local.sort_by(|a, b| import_order(a.0, b.0));
        external.sort_by(|a, b| import_order(a.0, b.0));
        local.extend(external);
        local
    }

    /// The `import ( .. )` block, or an empty string when nothing is imported.
    pub fn render_block(&self) -> String {
        if self.aliases.is_empty() {
            return String::new();
        }
        let mut out = String::from("import (\n");
        let mut previous_external = None;
        for (path, alias) in self.entries() {
            let external = is_external(path);
            if previous_external == Some(false) && external {
                out.push('\n');
            }
            previous_external = Some(external);

            out.push('\t');
            if last_segment(path) != alias {
                out.push_str(alias);
                out.push(' ');
            }
            out.push('"');
            out.push_str(path);
            out.push_str("\"\n");
        }
        out.push_str(")\n");
        out
    }
}

fn clean_path(path: &str) -> &str {
    if let Some(index) = path.rfind("/vendor/") {
        return &path[index + "/vendor/".len()..];
    }
    path.strip_prefix("vendor/").unwrap_or(path)
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn is_version_suffix(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

fn base_alias(path: &str) -> String {
    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let last = segments.next().unwrap_or(path);
    let name = if is_version_suffix(last) {
        segments.next().unwrap_or(last)
    } else {
        last
    };

    let mut alias: String = name
        .chars()
        .map(|c| if c == '.' || c == '-' { '_' } else { c })
        .collect();
    if alias.starts_with(|c: char| c.is_ascii_digit()) {
        alias.insert(0, '_');
    }
    if RESERVED.contains(&alias.as_str()) {
        alias.push('_');
    }
    alias
}

/// Names an import alias must not take.
const RESERVED: &[&str] = &[
    // keywords
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
    // predeclared
    "any", "append", "bool", "byte", "cap", "clear", "close", "comparable", "complex",
    "complex64", "complex128", "copy", "delete", "error", "false", "float32", "float64",
    "imag", "int", "int8", "int16", "int32", "int64", "iota", "len", "make", "max", "min",
    "new", "nil", "panic", "print", "println", "real", "recover", "rune", "string", "true",
    "uint", "uint8", "uint16", "uint32", "uint64", "uintptr",
];

fn is_external(path: &str) -> bool {
    path.split('/').next().is_some_and(|first| first.contains('.'))
}

fn import_order(a: &str, b: &str) -> std::cmp::Ordering {
    let depth = |p: &str| p.matches('/').count();
    depth(a).cmp(&depth(b)).then_with(|| a.cmp(b))
}
