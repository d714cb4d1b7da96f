//! Type expressions.

use gosmith_ir::{Field, Func, Signature, Type, TypeNode};
use gosmith_stack::ensure_sufficient_stack;

use super::Renderer;
use crate::emitter::Emitter;

impl<E: Emitter> Renderer<'_, E> {
    pub(crate) fn ty(&mut self, ty: &Type) {
        ensure_sufficient_stack(|| match ty.node() {
            TypeNode::Basic(basic) => self.ctx.emit(basic.spelling()),
            TypeNode::Any => self.ctx.emit("interface{}"),
            TypeNode::Named(named) => {
                if let Some(alias) = self.qualifier(&named.pkg) {
                    self.ctx.emit(&alias);
                    self.ctx.emit(".");
                }
                self.ctx.emit(&named.name);
            }
            TypeNode::Pointer(inner) => {
                self.ctx.emit("*");
                self.ty(inner);
            }
            TypeNode::Slice(inner) => {
                self.ctx.emit("[]");
                self.ty(inner);
            }
            TypeNode::Array { len, elem } => {
                self.ctx.emit("[");
                self.ctx.emit(len);
                self.ctx.emit("]");
                self.ty(elem);
            }
            TypeNode::Map { key, value } => {
                self.ctx.emit("map[");
                self.ty(key);
                self.ctx.emit("]");
                self.ty(value);
            }
            TypeNode::Chan { dir, elem } => {
                self.ctx.emit(dir.prefix());
                self.ty(elem);
            }
            TypeNode::Func(signature) => {
                self.ctx.emit("func");
                self.signature(signature);
            }
            TypeNode::Struct(fields) => {
                self.ctx.emit("struct");
                self.field_block(fields);
            }
            TypeNode::Interface(methods) => {
                self.ctx.emit("interface");
                self.method_block(methods);
            }
        });
    }

    /// `(int, ...string) (bool, error)` for an unnamed signature.
    pub(crate) fn signature(&mut self, signature: &Signature) {
        self.ctx.emit("(");
        let last = signature.params.len().saturating_sub(1);
        for (i, param) in signature.params.iter().enumerate() {
            if i > 0 {
                self.ctx.emit(", ");
            }
            match param.next() {
                Some(elem) if signature.variadic && i == last => {
                    self.ctx.emit("...");
                    self.ty(elem);
                }
                _ => self.ty(param),
            }
        }
        self.ctx.emit(")");
        match signature.results.as_slice() {
            [] => {}
            [single] => {
                self.ctx.emit_space();
                self.ty(single);
            }
            results => {
                self.ctx.emit(" (");
                for (i, result) in results.iter().enumerate() {
                    if i > 0 {
                        self.ctx.emit(", ");
                    }
                    self.ty(result);
                }
                self.ctx.emit(")");
            }
        }
    }

    /// ` {` fields `}` of a struct body, or `{}` when empty.
    pub(crate) fn field_block(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            self.ctx.emit("{}");
            return;
        }
        self.ctx.emit(" {");
        self.ctx.indent();
        for (i, field) in fields.iter().enumerate() {
            self.separator(i == 0);
            self.field(field);
        }
        self.ctx.dedent();
        self.closing_brace();
    }

    /// ` {` method specs `}` of an interface body, or `{}` when empty.
    pub(crate) fn method_block(&mut self, methods: &[Func]) {
        if methods.is_empty() {
            self.ctx.emit("{}");
            return;
        }
        self.ctx.emit(" {");
        self.ctx.indent();
        for (i, method) in methods.iter().enumerate() {
            self.separator(i == 0);
            self.line_notes(&method.notes);
            self.ctx.emit(&method.name);
            self.params_and_results(method);
        }
        self.ctx.dedent();
        self.closing_brace();
    }

    fn field(&mut self, field: &Field) {
        self.line_notes(&field.notes);
        if !field.is_embedded() {
            self.ctx.emit(&field.name);
            self.ctx.emit_space();
        }
        self.ty(&field.ty);
        if !field.tag.is_empty() {
            self.ctx.emit(" `");
            self.ctx.emit(&field.tag);
            self.ctx.emit("`");
        }
        self.block_notes(&field.notes);
    }

    /// Line break before a member, or `; ` between members on a single line.
    pub(crate) fn separator(&mut self, first: bool) {
        if !self.ctx.is_inline() {
            self.ctx.newline();
        } else if first {
            self.ctx.emit_space();
        } else {
            self.ctx.emit("; ");
        }
    }

    pub(crate) fn closing_brace(&mut self) {
        if self.ctx.is_inline() {
            self.ctx.emit(" }");
        } else {
            self.ctx.newline();
            self.ctx.emit("}");
        }
    }
}
