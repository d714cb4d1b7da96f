//! Source File Assembly and Output
//!
//! A [`SourceFile`] collects declarations for one Go file. Rendering goes
//! through a single [`ImportTable`], so the import block lists exactly the
//! packages the declarations referenced.

use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use gosmith_ir::Decl;
use tracing::{debug, warn};

use crate::context::RenderContext;
use crate::error::WriteError;
use crate::imports::ImportTable;
use crate::render::Renderer;

/// Target package for a render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Name in the `package` clause.
    pub package_name: String,
    /// Import path of the package; references into it are not qualified.
    pub package_path: String,
}

impl RenderOptions {
    pub fn new(package_name: impl Into<String>, package_path: impl Into<String>) -> Self {
        RenderOptions {
            package_name: package_name.into(),
            package_path: package_path.into(),
        }
    }
}

/// How rendered text reaches disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteOptions {
    /// Formatter command line, reading source on stdin and writing the result
    /// to stdout. Empty to skip formatting.
    pub formatter: Vec<String>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            formatter: vec!["gofmt".to_owned()],
        }
    }
}

impl WriteOptions {
    /// Write text exactly as rendered.
    pub fn unformatted() -> Self {
        WriteOptions {
            formatter: Vec::new(),
        }
    }
}

/// Declarations destined for one Go file.
#[derive(Clone, Debug, Default)]
pub struct SourceFile {
    pub options: RenderOptions,
    /// `// ` lines ahead of the package clause, e.g. a generated-code marker.
    pub header: Vec<String>,
    pub decls: Vec<Decl>,
}

impl SourceFile {
    pub fn new(options: RenderOptions) -> Self {
        SourceFile {
            options,
            header: Vec::new(),
            decls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    #[must_use]
    pub fn add(mut self, decl: impl Into<Decl>) -> Self {
        self.decls.push(decl.into());
        self
    }

    pub fn push(&mut self, decl: impl Into<Decl>) {
        self.decls.push(decl.into());
    }

    /// Render the whole file: header, package clause, imports, declarations.
    #[tracing::instrument(level = "debug", skip_all, fields(package = %self.options.package_name, decls = self.decls.len()))]
    pub fn render(&self) -> String {
        let mut imports = ImportTable::new(&self.options.package_path);
        let mut body = Renderer::new(&mut imports);
        for (i, decl) in self.decls.iter().enumerate() {
            if i > 0 {
                body.context().blank_line();
            }
            body.decl(decl);
        }
        let body = body.finish();

        let mut ctx = RenderContext::new();
        for line in &self.header {
            ctx.emit("// ");
            ctx.emit(line);
            ctx.newline();
        }
        if !self.header.is_empty() {
            ctx.newline();
        }
        ctx.emit("package ");
        ctx.emit(&self.options.package_name);
        ctx.newline();

        let block = imports.render_block();
        if !block.is_empty() {
            ctx.newline();
            ctx.emit(block.trim_end_matches('\n'));
            ctx.newline();
        }
        if !body.is_empty() {
            ctx.newline();
            ctx.emit(&body);
        }
        debug!(imports = imports.len(), "rendered source file");
        ctx.finalize()
    }

    /// Render and write to `path`, see [`write_file`].
    pub fn write_to(&self, path: &Path, options: &WriteOptions) -> Result<(), WriteError> {
        write_file(path, &self.render(), options)
    }
}

/// Write `source` to `path`, creating parent directories, after running the
/// configured formatter over it.
///
/// Formatting is best-effort: when the formatter cannot be run or rejects the
/// input, the unformatted text is written and the formatter error returned.
pub fn write_file(path: &Path, source: &str, options: &WriteOptions) -> Result<(), WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let formatted = format_source(source, &options.formatter);
    let text = match &formatted {
        Ok(text) => text.as_str(),
        Err(error) => {
            warn!(path = %path.display(), %error, "writing unformatted source");
            source
        }
    };
    std::fs::write(path, text).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    formatted.map(|_| ())
}

/// Pipe `source` through `command`; the empty command returns it unchanged.
fn format_source(source: &str, command: &[String]) -> Result<String, WriteError> {
    let Some((program, args)) = command.split_first() else {
        return Ok(source.to_owned());
    };
    let spawn_error = |source| WriteError::FormatterSpawn {
        program: program.clone(),
        source,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_error)?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(source.as_bytes()).map_err(spawn_error)?;
    }
    let output = child.wait_with_output().map_err(spawn_error)?;

    if !output.status.success() {
        return Err(WriteError::FormatterFailed {
            program: program.clone(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    String::from_utf8(output.stdout).map_err(|e| WriteError::FormatterFailed {
        program: program.clone(),
        stderr: e.to_string(),
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use gosmith_ir::{Field, Func, Stmt, Struct, Type, Value};
    use pretty_assertions::assert_eq;

    fn model() -> SourceFile {
        let user = Struct::new("User").add_fields([
            Field::new("ID", Type::named("github.com/google/uuid", "UUID")),
            Field::new("Created", Type::time()),
        ]);
        let name = Func::new("Name")
            .result(Type::string())
            .c(Stmt::ret([Value::qualified("strings", "TrimSpace")
                .call([Value::string(" x ")])
                .unwrap()]));
        SourceFile::new(RenderOptions::new("model", "example.com/app/model"))
            .add(user)
            .add(name)
    }

    #[test]
    fn renders_package_imports_and_decls() {
        let expected = "package model\n\
            \n\
            import (\n\
            \t\"strings\"\n\
            \t\"time\"\n\
            \n\
            \t\"github.com/google/uuid\"\n\
            )\n\
            \n\
            type User struct {\n\
            \tID uuid.UUID\n\
            \tCreated time.Time\n\
            }\n\
            \n\
            func Name() string {\n\
            \treturn strings.TrimSpace(\" x \")\n\
            }\n";
        assert_eq!(model().render(), expected);
    }

    #[test]
    fn header_and_empty_file() {
        let file = SourceFile::new(RenderOptions::new("empty", "example.com/empty"))
            .with_header("Code generated by gosmith. DO NOT EDIT.");
        assert_eq!(
            file.render(),
            "// Code generated by gosmith. DO NOT EDIT.\n\npackage empty\n"
        );
    }

    #[test]
    fn writes_unformatted_creating_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/model/model.go");
        model().write_to(&path, &WriteOptions::unformatted()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), model().render());
    }

    #[test]
    fn missing_formatter_still_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.go");
        let options = WriteOptions {
            formatter: vec!["gosmith-no-such-formatter".to_owned()],
        };
        let err = write_file(&path, "package x\n", &options).unwrap_err();
        assert!(matches!(err, WriteError::FormatterSpawn { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "package x\n");
    }

    #[test]
    fn default_formatter_is_gofmt() {
        assert_eq!(WriteOptions::default().formatter, vec!["gofmt".to_owned()]);
    }
}
