#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test code, panics give clear failure messages"
)]

//! Decode Go declarations from disk and render them back.

use std::fs;
use std::path::Path;

use gosmith::{
    interface_from_source, methods_from_source, render_decl, render_type, render_value,
    type_from_source, Decl, DecodeError, ImportTable, RenderOptions, SourceFile, Type, Value,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const NODE: &str = "package app

type Node struct {
	Value int
	Next *Node
}

func (n *Node) Len() int {
	if n == nil {
		return 0
	}
	return 1 + n.Next.Len()
}

func (n Node) IsLast() bool { return n.Next == nil }
";

const STORE: &str = "package app

type Store interface {
	Get(id string) (*Node, error)
	Close() error
}
";

const BIG: &str = "package app

import \"time\"

// BigStruct carries tags.
type BigStruct struct {
	ID      int64     `json:\"id\"`
	Created time.Time `json:\"created\"`
	cache   map[string]int
}
";

fn module(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
    for (name, source) in files {
        fs::write(dir.path().join(name), source).unwrap();
    }
    dir
}

fn decl(dir: &Path, name: &str) -> Decl {
    let ty = type_from_source(&[dir], name).unwrap().unwrap();
    Decl::from_type(&ty).unwrap()
}

#[test]
fn node_renders_as_declared() {
    let dir = module(&[("node.go", NODE)]);
    let node = decl(dir.path(), "Node");
    assert_eq!(
        render_decl(&node, &mut ImportTable::new("example.com/app")),
        "type Node struct {\n\tValue int\n\tNext *Node\n}"
    );
}

#[test]
fn decoded_struct_renders_into_a_file() {
    let dir = module(&[("big.go", BIG)]);
    let big = decl(dir.path(), "BigStruct");
    let file = SourceFile::new(RenderOptions::new("app", "example.com/app")).add(big);
    let expected = "package app\n\
        \n\
        import (\n\
        \t\"time\"\n\
        )\n\
        \n\
        // BigStruct carries tags.\n\
        type BigStruct struct {\n\
        \tID int64 `json:\"id\"`\n\
        \tCreated time.Time `json:\"created\"`\n\
        }\n";
    assert_eq!(file.render(), expected);
}

#[test]
fn interface_renders_as_declared() {
    let dir = module(&[("node.go", NODE), ("store.go", STORE)]);
    let store = interface_from_source(&[dir.path()], "Store")
        .unwrap()
        .unwrap();
    assert_eq!(
        render_decl(&Decl::Interface(store), &mut ImportTable::new("example.com/app")),
        "type Store interface {\n\tGet(id string) (*Node, error)\n\tClose() error\n}"
    );
}

#[test]
fn methods_from_both_receiver_forms() {
    let dir = module(&[("node.go", NODE)]);
    let methods = methods_from_source(&[dir.path()], "*Node").unwrap();
    let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Len", "IsLast"]);
    assert_eq!(methods[0].receiver.as_ref().unwrap().name, "n");
    assert_eq!(methods[1].results[0].ty, Type::bool());
}

#[test]
fn decoded_types_qualify_from_other_packages() {
    let dir = module(&[("node.go", NODE)]);
    let node = type_from_source(&[dir.path()], "Node").unwrap().unwrap();

    let mut imports = ImportTable::new("example.com/other");
    assert_eq!(render_type(&Type::pointer_to(node), &mut imports), "*app.Node");
    assert_eq!(imports.entries(), vec![("example.com/app", "app")]);
}

#[test]
fn decoded_self_reference_supports_field_paths() {
    let dir = module(&[("node.go", NODE)]);
    let node = type_from_source(&[dir.path()], "Node").unwrap().unwrap();

    let n = Value::typed("n", Type::pointer_to(node));
    let value = n.dot("Next.Value").unwrap();
    assert_eq!(value.ty(), Some(&Type::int()));
    assert_eq!(render_value(&value, &mut ImportTable::new("example.com/app")), "n.Next.Value");

    let len = n.method("Len").unwrap().call(Vec::new()).unwrap();
    assert_eq!(len.ty(), Some(&Type::int()));
}

#[test]
fn misses_and_failures() {
    let dir = module(&[("node.go", NODE)]);
    assert_eq!(type_from_source(&[dir.path()], "Missing").unwrap(), None);
    assert!(methods_from_source(&[dir.path()], "Missing").unwrap().is_empty());

    let err = type_from_source(&[dir.path().join("absent")], "Node").unwrap_err();
    assert!(matches!(err, DecodeError::Io { .. }));
}
