//! Module discovery.
//!
//! The import path of a directory is the `module` path of the nearest
//! enclosing `go.mod`, joined with the directory's path relative to that
//! file. Nothing else in `go.mod` is read.

use std::fs;
use std::path::{Component, Path};

/// Import path of the package in `dir`, or `None` outside any module.
pub fn import_path(dir: &Path) -> Option<String> {
    let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    for root in dir.ancestors() {
        let go_mod = root.join("go.mod");
        if !go_mod.is_file() {
            continue;
        }
        let module = fs::read_to_string(&go_mod)
            .ok()
            .and_then(|text| module_directive(&text))?;
        let relative = dir.strip_prefix(root).ok()?;
        let mut path = module;
        for component in relative.components() {
            if let Component::Normal(segment) = component {
                path.push('/');
                path.push_str(&segment.to_string_lossy());
            }
        }
        return Some(path);
    }
    None
}

/// The path named by the `module` directive of a `go.mod` file.
pub fn module_directive(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or(line).trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with([' ', '\t']) {
            return None;
        }
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_owned())
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_module_directive() {
        let go_mod = "// header\nmodule example.com/app // trailing\n\ngo 1.22\n";
        assert_eq!(module_directive(go_mod).as_deref(), Some("example.com/app"));
        assert_eq!(
            module_directive("module \"example.com/quoted\"\n").as_deref(),
            Some("example.com/quoted")
        );
        assert_eq!(module_directive("modules x\n"), None);
        assert_eq!(module_directive("go 1.22\n"), None);
    }

    #[test]
    fn joins_relative_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
        let nested = dir.path().join("internal").join("model");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(import_path(dir.path()).as_deref(), Some("example.com/app"));
        assert_eq!(
            import_path(&nested).as_deref(),
            Some("example.com/app/internal/model")
        );
    }

    #[test]
    fn no_module_outside_go_mod() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("pkg");
        fs::create_dir_all(&nested).unwrap();
        assert_eq!(import_path(&nested), None);
    }
}
