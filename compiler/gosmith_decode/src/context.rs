//! Per-declaration decoding scope.

use rustc_hash::FxHashMap;

use gosmith_parse::ImportSpec;

/// Scope for decoding one declaration: the declaring package, the declaring
/// file's import aliases and the type parameters in scope.
#[derive(Clone, Debug)]
pub struct DecoderContext<'a> {
    pkg: &'a str,
    imports: &'a FxHashMap<String, String>,
    building: &'a str,
    type_params: Vec<String>,
}

impl<'a> DecoderContext<'a> {
    pub fn new(pkg: &'a str, imports: &'a FxHashMap<String, String>, building: &'a str) -> Self {
        DecoderContext {
            pkg,
            imports,
            building,
            type_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type_params(mut self, params: impl IntoIterator<Item = String>) -> Self {
        self.type_params.extend(params);
        self
    }

    /// Import path of the package being decoded.
    pub fn current_pkg(&self) -> &'a str {
        self.pkg
    }

    /// Name of the declaration being built.
    pub fn building(&self) -> &'a str {
        self.building
    }

    /// Import path for a file-local package alias; the alias itself when the
    /// file does not import it.
    pub fn pkg_by_alias<'s>(&self, alias: &'s str) -> &'s str
    where
        'a: 's,
    {
        self.imports.get(alias).map_or(alias, String::as_str)
    }

    pub fn is_type_param(&self, name: &str) -> bool {
        self.type_params.iter().any(|p| p == name)
    }
}

/// Alias table for one file. Blank and dot imports are keyed by the default
/// alias of their path.
pub(crate) fn file_imports(imports: &[ImportSpec]) -> FxHashMap<String, String> {
    imports
        .iter()
        .map(|spec| {
            let alias = match spec.alias.as_deref() {
                Some(alias) if alias != "_" && alias != "." => alias.to_owned(),
                _ => default_alias(&spec.path).to_owned(),
            };
            (alias, spec.path.clone())
        })
        .collect()
}

/// Package name assumed for an import path: the last segment, skipping a
/// major-version suffix (`/v2`) and dropping a `.vN` suffix (`yaml.v3`).
pub fn default_alias(path: &str) -> &str {
    let mut segments = path.rsplit('/').filter(|s| !s.is_empty());
    let last = segments.next().unwrap_or(path);
    let name = if is_version(last) {
        segments.next().unwrap_or(last)
    } else {
        last
    };
    match name.rsplit_once('.') {
        Some((stem, version)) if is_version(version) => stem,
        _ => name,
    }
}

fn is_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_aliases() {
        assert_eq!(default_alias("fmt"), "fmt");
        assert_eq!(default_alias("github.com/google/uuid"), "uuid");
        assert_eq!(default_alias("github.com/jackc/pgx/v5"), "pgx");
        assert_eq!(default_alias("gopkg.in/yaml.v3"), "yaml");
    }

    #[test]
    fn aliases_resolve_through_file_imports() {
        let imports = file_imports(&[
            ImportSpec {
                alias: None,
                path: "example.com/app/model".to_owned(),
            },
            ImportSpec {
                alias: Some("m2".to_owned()),
                path: "example.com/other/model".to_owned(),
            },
            ImportSpec {
                alias: Some("_".to_owned()),
                path: "embed".to_owned(),
            },
        ]);
        let ctx = DecoderContext::new("example.com/app", &imports, "Node")
            .with_type_params(["T".to_owned()]);

        assert_eq!(ctx.pkg_by_alias("model"), "example.com/app/model");
        assert_eq!(ctx.pkg_by_alias("m2"), "example.com/other/model");
        assert_eq!(ctx.pkg_by_alias("embed"), "embed");
        assert_eq!(ctx.pkg_by_alias("time"), "time");
        assert!(ctx.is_type_param("T"));
        assert!(!ctx.is_type_param("Node"));
        assert_eq!(ctx.building(), "Node");
        assert_eq!(ctx.current_pkg(), "example.com/app");
    }
}
