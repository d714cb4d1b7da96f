//! String forms of a type.

use std::fmt::{self, Write};

use gosmith_stack::ensure_sufficient_stack;

use super::{ChanDir, Signature, Type, TypeNode};
use crate::decl::Func;

/// Whether named types are prefixed by their package path.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Names {
    Bare,
    Qualified,
}

impl Type {
    /// Go-style type string with bare type names, e.g. `map[string]*Node`.
    ///
    /// Two types with the same identity render identically within one package.
    pub fn identity(&self) -> String {
        let mut out = String::new();
        write_type(&mut out, self, Names::Bare);
        out
    }

    /// Type string with names prefixed by their package path,
    /// e.g. `*example.com/app/model.Node`.
    pub fn qualified(&self) -> String {
        let mut out = String::new();
        write_type(&mut out, self, Names::Qualified);
        out
    }

    /// The token for the outermost level of this type.
    pub fn code_token(&self) -> String {
        match &self.node {
            TypeNode::Basic(basic) => basic.spelling().to_owned(),
            TypeNode::Any => "interface{}".to_owned(),
            TypeNode::Named(named) => named.name.clone(),
            TypeNode::Pointer(_) => "*".to_owned(),
            TypeNode::Slice(_) => "[]".to_owned(),
            TypeNode::Array { len, .. } => format!("[{len}]"),
            TypeNode::Map { .. } => "map".to_owned(),
            TypeNode::Chan { dir, .. } => dir.prefix().trim_end().to_owned(),
            TypeNode::Func(_) => "func".to_owned(),
            TypeNode::Struct(_) => "struct".to_owned(),
            TypeNode::Interface(_) => "interface".to_owned(),
        }
    }
}

impl Signature {
    /// `(int, ...string) (bool, error)`.
    pub fn identity(&self) -> String {
        let mut out = String::new();
        write_signature(&mut out, self, Names::Bare);
        out
    }

    /// Signature string with package-qualified names; used to compare
    /// method signatures.
    pub fn qualified(&self) -> String {
        let mut out = String::new();
        write_signature(&mut out, self, Names::Qualified);
        out
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity())
    }
}

impl ChanDir {
    /// Keyword prefix of a channel type, including the trailing space.
    pub fn prefix(self) -> &'static str {
        match self {
            ChanDir::Both => "chan ",
            ChanDir::Send => "chan<- ",
            ChanDir::Recv => "<-chan ",
        }
    }
}

fn write_type(out: &mut String, ty: &Type, names: Names) {
    ensure_sufficient_stack(|| match &ty.node {
        TypeNode::Basic(basic) => out.push_str(basic.spelling()),
        TypeNode::Any => out.push_str("interface {}"),
        TypeNode::Named(named) => {
            if names == Names::Qualified && !named.pkg.is_empty() {
                out.push_str(&named.pkg);
                out.push('.');
            }
            out.push_str(&named.name);
        }
        TypeNode::Pointer(inner) => {
            out.push('*');
            write_type(out, inner, names);
        }
        TypeNode::Slice(inner) => {
            out.push_str("[]");
            write_type(out, inner, names);
        }
        TypeNode::Array { len, elem } => {
            let _ = write!(out, "[{len}]");
            write_type(out, elem, names);
        }
        TypeNode::Map { key, value } => {
            out.push_str("map[");
            write_type(out, key, names);
            out.push(']');
            write_type(out, value, names);
        }
        TypeNode::Chan { dir, elem } => {
            out.push_str(dir.prefix());
            write_type(out, elem, names);
        }
        TypeNode::Func(signature) => {
            out.push_str("func");
            write_signature(out, signature, names);
        }
        TypeNode::Struct(fields) => {
            if fields.is_empty() {
                out.push_str("struct {}");
                return;
            }
            out.push_str("struct { ");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                if !field.is_embedded() {
                    out.push_str(&field.name);
                    out.push(' ');
                }
                write_type(out, &field.ty, names);
            }
            out.push_str(" }");
        }
        TypeNode::Interface(methods) => {
            if methods.is_empty() {
                out.push_str("interface {}");
                return;
            }
            out.push_str("interface { ");
            for (i, method) in methods.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                write_method(out, method, names);
            }
            out.push_str(" }");
        }
    });
}

fn write_method(out: &mut String, method: &Func, names: Names) {
    out.push_str(&method.name);
    write_signature(out, &method.signature(), names);
}

fn write_signature(out: &mut String, signature: &Signature, names: Names) {
    out.push('(');
    let last = signature.params.len().saturating_sub(1);
    for (i, param) in signature.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match param.next() {
            Some(elem) if signature.variadic && i == last => {
                out.push_str("...");
                write_type(out, elem, names);
            }
            _ => write_type(out, param, names),
        }
    }
    out.push(')');
    match signature.results.as_slice() {
        [] => {}
        [single] => {
            out.push(' ');
            write_type(out, single, names);
        }
        results => {
            out.push_str(" (");
            for (i, result) in results.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(out, result, names);
            }
            out.push(')');
        }
    }
}
