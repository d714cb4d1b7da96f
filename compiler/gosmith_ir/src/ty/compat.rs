//! Compatibility checks used by casts and calls.
//!
//! These follow Go's assignability and conversion rules closely enough to
//! reject casts that could never compile, without attempting full type
//! checking: constant representability and generic constraints are out of
//! reach of a declaration-level model.

use super::{Kind, Type, TypeNode};

impl Type {
    /// Structural form used for compatibility checks: the underlying type with
    /// notes and struct tags dropped.
    pub fn ref_type(&self) -> Type {
        let mut structural = self.underlying().clone();
        structural.notes.clear();
        structural.kind_override = None;
        if let TypeNode::Struct(fields) = &mut structural.node {
            for field in fields {
                field.tag.clear();
                field.notes.clear();
            }
        }
        structural
    }

    /// Whether every method of `iface` is in this type's method set with a
    /// matching signature. Anything implements the empty interface.
    pub fn implements(&self, iface: &Type) -> bool {
        if !iface.is_interface() {
            return false;
        }
        let required = iface.method_set();
        if required.is_empty() {
            return true;
        }
        if self.is_opaque() {
            return false;
        }
        required.into_iter().all(|wanted| {
            self.method(&wanted.name).is_some_and(|have| {
                have.signature().qualified() == wanted.signature().qualified()
            })
        })
    }

    /// Whether a value of this type may be converted to `target` with a
    /// conversion expression `target(x)`.
    pub fn convertible_to(&self, target: &Type) -> bool {
        if target.is_interface() {
            return self.implements(target);
        }
        let from = self.ref_type();
        let to = target.ref_type();
        if from.qualified() == to.qualified() {
            return true;
        }

        let (fk, tk) = (from.kind(), to.kind());
        if (fk.is_integer() || fk.is_float()) && (tk.is_integer() || tk.is_float()) {
            return true;
        }
        if fk.is_complex() && tk.is_complex() {
            return true;
        }
        if tk == Kind::String && (fk.is_integer() || is_byte_or_rune_slice(&from)) {
            return true;
        }
        if fk == Kind::String && is_byte_or_rune_slice(&to) {
            return true;
        }
        if let (TypeNode::Pointer(a), TypeNode::Pointer(b)) = (&from.node, &to.node) {
            return a.ref_type().qualified() == b.ref_type().qualified();
        }
        false
    }
}

fn is_byte_or_rune_slice(ty: &Type) -> bool {
    match &ty.node {
        TypeNode::Slice(elem) => matches!(elem.kind(), Kind::Uint8 | Kind::Int32),
        _ => false,
    }
}
