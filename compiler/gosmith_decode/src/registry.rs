//! Package registry.
//!
//! Loading walks the given files and directories, parses every accepted
//! `.go` file once, and groups the files into packages by import path. All
//! I/O and parsing happens here, before any resolution.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use gosmith_parse::{FuncDecl, SourceFile, TypeSpec};

use crate::context::file_imports;
use crate::module::import_path;
use crate::{DecodeError, DecoderOptions};

/// A parsed file with its import alias table.
#[derive(Clone, Debug)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub syntax: SourceFile,
    pub(crate) imports: FxHashMap<String, String>,
}

impl ParsedFile {
    pub fn new(path: impl Into<PathBuf>, syntax: SourceFile) -> Self {
        let imports = file_imports(&syntax.imports);
        ParsedFile {
            path: path.into(),
            syntax,
            imports,
        }
    }
}

/// All files of one package.
#[derive(Clone, Debug)]
pub struct Package {
    /// Name from the `package` clause.
    pub name: String,
    /// Import path; the package name when no module was found.
    pub path: String,
    pub files: Vec<ParsedFile>,
}

impl Package {
    /// Whether `qualifier` names this package, by import path or by name.
    pub fn matches(&self, qualifier: &str) -> bool {
        self.path == qualifier || self.name == qualifier
    }
}

/// A type declaration located in the registry.
#[derive(Copy, Clone, Debug)]
pub(crate) struct FoundType<'r> {
    pub package: &'r Package,
    pub file: &'r ParsedFile,
    pub spec: &'r TypeSpec,
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    packages: Vec<Package>,
    by_path: FxHashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Load every file under `paths`.
    pub fn load<P: AsRef<Path>>(
        paths: &[P],
        options: &DecoderOptions,
    ) -> Result<Self, DecodeError> {
        let mut files = Vec::new();
        for path in paths {
            collect(path.as_ref(), options, &mut files)?;
        }

        let mut registry = Registry::new();
        let mut dir_paths: FxHashMap<PathBuf, Option<String>> = FxHashMap::default();
        for file in files {
            let source = fs::read_to_string(&file).map_err(DecodeError::io(&file))?;
            let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
            let module_path = dir_paths
                .entry(dir)
                .or_insert_with_key(|dir| import_path(dir))
                .clone();
            registry.add_source(module_path, file, &source)?;
        }
        debug!(
            packages = registry.packages.len(),
            files = registry.file_count(),
            "loaded packages"
        );
        Ok(registry)
    }

    /// Parse `source` and add it to its package. `import_path` of `None`
    /// files the source under its package name.
    pub fn add_source(
        &mut self,
        import_path: Option<String>,
        file: impl Into<PathBuf>,
        source: &str,
    ) -> Result<(), DecodeError> {
        let file = file.into();
        let syntax = gosmith_parse::parse_file(source).map_err(|source| DecodeError::Parse {
            path: file.clone(),
            source,
        })?;
        let mut path = import_path.unwrap_or_else(|| syntax.package.clone());
        // External test packages share the directory but not the package.
        if syntax.package.ends_with("_test") && !path.ends_with("_test") {
            path.push_str("_test");
        }
        trace!(file = %file.display(), package = %path, "adding file");
        self.add_file(&path, ParsedFile::new(file, syntax));
        Ok(())
    }

    /// Add an already parsed file; packages with the same path merge.
    pub fn add_file(&mut self, path: &str, file: ParsedFile) {
        if let Some(&index) = self.by_path.get(path) {
            self.packages[index].files.push(file);
            return;
        }
        self.by_path.insert(path.to_owned(), self.packages.len());
        self.packages.push(Package {
            name: file.syntax.package.clone(),
            path: path.to_owned(),
            files: vec![file],
        });
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, path: &str) -> Option<&Package> {
        self.by_path.get(path).map(|&i| &self.packages[i])
    }

    pub fn file_count(&self) -> usize {
        self.packages.iter().map(|p| p.files.len()).sum()
    }

    /// Packages a qualifier selects; all of them without one.
    pub(crate) fn candidates<'r>(
        &'r self,
        qualifier: Option<&'r str>,
    ) -> impl Iterator<Item = &'r Package> + 'r {
        self.packages
            .iter()
            .filter(move |p| qualifier.map_or(true, |q| p.matches(q)))
    }

    /// First type declaration named `name` in the selected packages.
    pub(crate) fn find_type(&self, qualifier: Option<&str>, name: &str) -> Option<FoundType<'_>> {
        let mut candidates = self
            .packages
            .iter()
            .filter(|p| qualifier.map_or(true, |q| p.matches(q)));
        candidates.find_map(|package| {
            package.files.iter().find_map(|file| {
                file.syntax
                    .types
                    .iter()
                    .find(|spec| spec.name == name)
                    .map(|spec| FoundType {
                        package,
                        file,
                        spec,
                    })
            })
        })
    }

    /// Every function declaration with a receiver, with its package and file.
    pub(crate) fn methods<'r>(
        &'r self,
        qualifier: Option<&'r str>,
    ) -> impl Iterator<Item = (&'r Package, &'r ParsedFile, &'r FuncDecl)> + 'r {
        self.candidates(qualifier).flat_map(|package| {
            package.files.iter().flat_map(move |file| {
                file.syntax
                    .funcs
                    .iter()
                    .filter(|func| func.recv.is_some())
                    .map(move |func| (package, file, func))
            })
        })
    }
}

/// Collect the Go files under `path`. A file given directly is always taken;
/// directory walks honour `options`. Entries are visited in name order.
fn collect(path: &Path, options: &DecoderOptions, files: &mut Vec<PathBuf>) -> Result<(), DecodeError> {
    let meta = fs::metadata(path).map_err(DecodeError::io(path))?;
    if meta.is_file() {
        if path.extension().is_some_and(|e| e == "go") {
            files.push(path.to_path_buf());
        }
        return Ok(());
    }

    let mut entries = fs::read_dir(path)
        .map_err(DecodeError::io(path))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(DecodeError::io(path))?;
    entries.sort();

    for entry in entries {
        let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if entry.is_dir() {
            if DecoderOptions::accepts_dir(name) {
                collect(&entry, options, files)?;
            }
        } else if options.accepts_file(name) {
            files.push(entry);
        }
    }
    Ok(())
}
