//! Statements and blocks.

use gosmith_ir::{ForRange, IfChain, NoteKind, Stmt};
use gosmith_stack::ensure_sufficient_stack;

use super::Renderer;
use crate::emitter::Emitter;

fn is_rendered(stmt: &&Stmt) -> bool {
    !matches!(stmt, Stmt::Note(note) if note.kind == NoteKind::Suppressed)
}

impl<E: Emitter> Renderer<'_, E> {
    /// `{` statements `}`, one per line, or `; `-separated when inline.
    pub(crate) fn body(&mut self, stmts: &[Stmt]) {
        self.ctx.emit("{");
        self.ctx.indent();
        let mut empty = true;
        for (i, stmt) in stmts.iter().filter(is_rendered).enumerate() {
            self.separator(i == 0);
            self.stmt(stmt);
            empty = false;
        }
        self.ctx.dedent();
        if empty && self.ctx.is_inline() {
            self.ctx.emit("}");
        } else {
            self.closing_brace();
        }
    }

    /// `{ a; b }` on the current line.
    pub(crate) fn inline_body(&mut self, stmts: &[Stmt]) {
        let previous = self.ctx.set_inline(true);
        self.body(stmts);
        self.ctx.set_inline(previous);
    }

    pub(crate) fn stmt(&mut self, stmt: &Stmt) {
        ensure_sufficient_stack(|| match stmt {
            Stmt::Expr(value) => self.value(value),
            Stmt::Return(values) => {
                self.ctx.emit("return");
                for (i, value) in values.iter().enumerate() {
                    self.ctx.emit(if i == 0 { " " } else { ", " });
                    self.value(value);
                }
            }
            Stmt::If(chain) => self.if_chain(chain),
            Stmt::ForRange(range) => self.for_range(range),
            Stmt::Block(stmts) => self.body(stmts),
            Stmt::Note(note) => match note.kind {
                NoteKind::Line if !self.ctx.is_inline() => {
                    for (i, line) in note.lines().enumerate() {
                        if i > 0 {
                            self.ctx.newline();
                        }
                        self.ctx.emit("//");
                        if !line.is_empty() {
                            self.ctx.emit_space();
                            self.ctx.emit(line);
                        }
                    }
                }
                NoteKind::Line | NoteKind::Block => {
                    self.ctx.emit("/* ");
                    self.ctx.emit(&note.text);
                    self.ctx.emit(" */");
                }
                NoteKind::Suppressed => {}
            },
        });
    }

    fn if_chain(&mut self, chain: &IfChain) {
        for (i, (cond, body)) in chain.branches.iter().enumerate() {
            if i > 0 {
                self.ctx.emit(" else ");
            }
            self.ctx.emit("if ");
            self.value(cond);
            self.ctx.emit_space();
            self.body(body);
        }
        if let Some(body) = &chain.otherwise {
            self.ctx.emit(" else ");
            self.body(body);
        }
    }

    fn for_range(&mut self, range: &ForRange) {
        self.ctx.emit("for ");
        match (&range.key, &range.value) {
            (None, None) => {}
            (key, value) => {
                match key {
                    Some(key) => self.value(key),
                    None => self.ctx.emit("_"),
                }
                if let Some(value) = value {
                    self.ctx.emit(", ");
                    self.value(value);
                }
                self.ctx.emit(" := ");
            }
        }
        self.ctx.emit("range ");
        self.value(&range.over);
        self.ctx.emit_space();
        self.body(&range.body);
    }
}
