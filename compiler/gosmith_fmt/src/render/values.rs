//! Expressions and zero values.

use std::fmt::Write;

use gosmith_ir::{BinaryOp, Kind, Literal, Type, TypeNode, Value, ValueKind};
use gosmith_stack::ensure_sufficient_stack;

use super::Renderer;
use crate::emitter::Emitter;

impl<E: Emitter> Renderer<'_, E> {
    pub(crate) fn value(&mut self, value: &Value) {
        self.line_notes(value.notes());
        ensure_sufficient_stack(|| self.expr(value));
        self.block_notes(value.notes());
    }

    fn expr(&mut self, value: &Value) {
        match value.kind() {
            ValueKind::Ident(name) => self.ctx.emit(name),
            ValueKind::Qualified { pkg, name } => {
                if let Some(alias) = self.qualifier(pkg) {
                    self.ctx.emit(&alias);
                    self.ctx.emit(".");
                }
                self.ctx.emit(name);
            }
            ValueKind::Lit(literal) => self.literal(literal),
            ValueKind::Raw(text) => self.ctx.emit(text),
            ValueKind::TypeOnly => {
                if let Some(ty) = value.ty() {
                    self.ty(ty);
                }
            }
            ValueKind::Zero => self.zero(value.ty()),
            ValueKind::Tuple(values) => self.list(values),
            ValueKind::FuncLit(func) => self.func(func),
            ValueKind::Dot { base, name } => {
                self.primary(base);
                self.ctx.emit(".");
                self.ctx.emit(name);
            }
            ValueKind::Index { base, index } => {
                self.primary(base);
                self.ctx.emit("[");
                self.value(index);
                self.ctx.emit("]");
            }
            ValueKind::Call {
                callee,
                args,
                spread,
            } => {
                self.primary(callee);
                self.ctx.emit("(");
                self.list(args);
                if *spread {
                    self.ctx.emit("...");
                }
                self.ctx.emit(")");
            }
            ValueKind::Unary { op, operand } => {
                self.ctx.emit(op.symbol());
                let group = operand.needs_parens()
                    || matches!(
                        operand.kind(),
                        ValueKind::Binary { .. } | ValueKind::Assign { .. }
                    );
                self.grouped(operand, group);
            }
            ValueKind::Binary { op, left, right } => {
                self.operand(left, *op);
                self.ctx.emit_space();
                self.ctx.emit(op.symbol());
                self.ctx.emit_space();
                self.operand(right, *op);
            }
            ValueKind::Assign {
                target,
                value,
                define,
            } => {
                self.value(target);
                self.ctx.emit(if *define { " := " } else { " = " });
                self.value(value);
            }
            ValueKind::Cast { operand } => {
                if let Some(ty) = value.ty() {
                    let wrap = matches!(
                        ty.node(),
                        TypeNode::Pointer(_) | TypeNode::Func(_) | TypeNode::Chan { .. }
                    );
                    if wrap {
                        self.ctx.emit("(");
                    }
                    self.ty(ty);
                    if wrap {
                        self.ctx.emit(")");
                    }
                }
                self.ctx.emit("(");
                self.value(operand);
                self.ctx.emit(")");
            }
            ValueKind::Assert { operand } => {
                self.primary(operand);
                self.ctx.emit(".(");
                if let Some(ty) = value.ty() {
                    self.ty(ty);
                }
                self.ctx.emit(")");
            }
        }
    }

    fn list(&mut self, values: &[Value]) {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.ctx.emit(", ");
            }
            self.value(value);
        }
    }

    fn grouped(&mut self, value: &Value, group: bool) {
        if group {
            self.ctx.emit("(");
        }
        self.value(value);
        if group {
            self.ctx.emit(")");
        }
    }

    /// Operand of the binary operator `parent`. Comparisons stay bare only
    /// directly under `&&` and `||`.
    fn operand(&mut self, value: &Value, parent: BinaryOp) {
        let group = match value.kind() {
            ValueKind::Assign { .. } => true,
            ValueKind::Binary { op, .. } if op.is_comparison() => {
                !matches!(parent, BinaryOp::And | BinaryOp::Or)
            }
            _ => value.needs_parens(),
        };
        self.grouped(value, group);
    }

    /// Base of a selector, index, call or assertion.
    fn primary(&mut self, value: &Value) {
        let group = matches!(
            value.kind(),
            ValueKind::Unary { .. } | ValueKind::Binary { .. } | ValueKind::Assign { .. }
        );
        self.grouped(value, group);
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Int(v) => self.ctx.emit(&v.to_string()),
            Literal::Float(v) if v.is_finite() => self.ctx.emit(&format!("{v:?}")),
            Literal::Float(v) => self.non_finite(*v),
            Literal::Str(s) => self.ctx.emit(&go_quote(s)),
            Literal::Bool(v) => self.ctx.emit(if *v { "true" } else { "false" }),
            Literal::Nil => self.ctx.emit("nil"),
        }
    }

    /// `math.Inf(1)`, `math.Inf(-1)` or `math.NaN()`; Go has no literal
    /// spelling for them.
    fn non_finite(&mut self, v: f64) {
        if let Some(alias) = self.qualifier("math") {
            self.ctx.emit(&alias);
            self.ctx.emit(".");
        }
        self.ctx.emit(match v {
            v if v.is_nan() => "NaN()",
            v if v > 0.0 => "Inf(1)",
            _ => "Inf(-1)",
        });
    }

    /// Zero value of `ty`; `nil` when the type is unknown.
    pub(crate) fn zero(&mut self, ty: Option<&Type>) {
        let Some(ty) = ty else {
            self.ctx.emit("nil");
            return;
        };
        if let TypeNode::Pointer(inner) = ty.node() {
            if inner.is_struct() {
                self.ctx.emit("&");
                self.ty(inner);
                self.ctx.emit("{}");
            } else {
                self.ctx.emit("nil");
            }
            return;
        }
        match ty.kind() {
            Kind::Struct | Kind::Array => {
                self.ty(ty);
                self.ctx.emit("{}");
            }
            Kind::Slice | Kind::Map => {
                self.ctx.emit("(");
                self.ty(ty);
                self.ctx.emit(")(nil)");
            }
            Kind::String => self.ctx.emit("\"\""),
            Kind::Bool => self.ctx.emit("false"),
            kind if kind.is_numeric() => self.ctx.emit("0"),
            _ => self.ctx.emit("nil"),
        }
    }
}

/// Double-quoted Go string literal.
pub(crate) fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
