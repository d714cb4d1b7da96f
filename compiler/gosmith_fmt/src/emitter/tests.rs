use super::*;

#[test]
fn string_emitter_basic() {
    let mut emitter = StringEmitter::new();
    emitter.emit("package");
    emitter.emit_space();
    emitter.emit("model");
    assert_eq!(emitter.output(), "package model");
}

#[test]
fn string_emitter_indents_with_tabs() {
    let mut emitter = StringEmitter::new();
    emitter.emit("type T struct {");
    emitter.emit_newline();
    emitter.emit_indent(1);
    emitter.emit("A int");
    emitter.emit_newline();
    emitter.emit_indent(2);
    emitter.emit("nested");
    assert_eq!(emitter.output(), "type T struct {\n\tA int\n\t\tnested");
}

#[test]
fn trailing_newline_collapses_blank_lines() {
    let mut emitter = StringEmitter::new();
    emitter.emit("content");
    emitter.emit_newline();
    emitter.emit_newline();
    emitter.emit_newline();
    emitter.ensure_trailing_newline();
    assert_eq!(emitter.output(), "content\n");
}

#[test]
fn trailing_newline_added_when_missing() {
    let mut emitter = StringEmitter::with_capacity(16);
    emitter.emit("content");
    emitter.ensure_trailing_newline();
    assert_eq!(emitter.as_str(), "content\n");
}

#[test]
fn empty_stays_empty() {
    let mut emitter = StringEmitter::new();
    emitter.ensure_trailing_newline();
    assert!(emitter.is_empty());
}
