//! Declarations and notes.

use gosmith_ir::{Arg, Decl, Func, Interface, Note, NoteKind, Struct, TypeDecl};

use super::Renderer;
use crate::emitter::Emitter;

impl<E: Emitter> Renderer<'_, E> {
    pub(crate) fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Func(func) => self.func(func),
            Decl::Struct(decl) => self.struct_decl(decl),
            Decl::Interface(decl) => self.interface_decl(decl),
            Decl::Type(decl) => self.type_decl(decl),
        }
    }

    fn struct_decl(&mut self, decl: &Struct) {
        self.line_notes(&decl.notes);
        self.ctx.emit("type ");
        self.ctx.emit(&decl.name);
        self.ctx.emit(" struct");
        self.field_block(&decl.fields);
        self.block_notes(&decl.notes);
    }

    fn interface_decl(&mut self, decl: &Interface) {
        self.line_notes(&decl.notes);
        self.ctx.emit("type ");
        self.ctx.emit(&decl.name);
        self.ctx.emit(" interface");
        self.method_block(&decl.methods);
        self.block_notes(&decl.notes);
    }

    fn type_decl(&mut self, decl: &TypeDecl) {
        self.line_notes(&decl.notes);
        self.ctx.emit("type ");
        self.ctx.emit(&decl.name);
        self.ctx.emit(if decl.alias { " = " } else { " " });
        self.ty(&decl.underlying);
        self.block_notes(&decl.notes);
    }

    /// A function, method or function literal with its body.
    pub(crate) fn func(&mut self, func: &Func) {
        self.line_notes(&func.notes);
        self.ctx.emit("func");
        if let Some(receiver) = &func.receiver {
            self.ctx.emit(" (");
            if !receiver.name.is_empty() {
                self.ctx.emit(&receiver.name);
                self.ctx.emit_space();
            }
            self.ty(&receiver.ty);
            self.ctx.emit(")");
        }
        if !func.is_literal() {
            self.ctx.emit_space();
            self.ctx.emit(&func.name);
        }
        self.params_and_results(func);
        self.ctx.emit_space();
        if func.inline {
            self.inline_body(&func.body);
        } else {
            self.body(&func.body);
        }
    }

    /// `(a int, b ...string) (string, error)`.
    pub(crate) fn params_and_results(&mut self, func: &Func) {
        self.ctx.emit("(");
        self.arg_list(func.args());
        self.ctx.emit(")");
        match func.results.as_slice() {
            [] => {}
            [single] if single.name.is_empty() => {
                self.ctx.emit_space();
                self.ty(&single.ty);
            }
            results => {
                self.ctx.emit(" (");
                self.arg_list(results);
                self.ctx.emit(")");
            }
        }
    }

    fn arg_list(&mut self, args: &[Arg]) {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.ctx.emit(", ");
            }
            self.line_notes(&arg.notes);
            if !arg.name.is_empty() {
                self.ctx.emit(&arg.name);
                self.ctx.emit_space();
            }
            match arg.ty.next() {
                Some(elem) if arg.variadic => {
                    self.ctx.emit("...");
                    self.ty(elem);
                }
                _ => self.ty(&arg.ty),
            }
            self.block_notes(&arg.notes);
        }
    }

    /// `// text` lines ahead of an item; `/* text */ ` when rendering inline.
    pub(crate) fn line_notes(&mut self, notes: &[Note]) {
        for note in notes.iter().filter(|n| n.kind == NoteKind::Line) {
            if self.ctx.is_inline() || !self.ctx.at_line_start() {
                self.ctx.emit("/* ");
                self.ctx.emit(&note.text);
                self.ctx.emit(" */ ");
                continue;
            }
            for line in note.lines() {
                if line.is_empty() {
                    self.ctx.emit("//");
                } else {
                    self.ctx.emit("// ");
                    self.ctx.emit(line);
                }
                self.ctx.newline();
            }
        }
    }

    /// ` /* text */` after an item.
    pub(crate) fn block_notes(&mut self, notes: &[Note]) {
        for note in notes.iter().filter(|n| n.kind == NoteKind::Block) {
            self.ctx.emit(" /* ");
            self.ctx.emit(&note.text);
            self.ctx.emit(" */");
        }
    }
}
