//! Struct fields, interface methods and function signatures.

use gosmith_ir::{Arg, Field, Func, Note, Receiver};
use gosmith_parse::{FieldDecl, FuncDecl, FuncType, InterfaceElem, Param, TypeExpr};
use tracing::{trace, warn};

use super::{is_struct_like, Resolver};
use crate::context::DecoderContext;
use crate::registry::{Package, ParsedFile};

/// Notes for a declaration: its doc comment lines, then the trailing
/// comment as a block note so it stays on the declaration's line.
pub(crate) fn notes(doc: &[String], comment: Option<&str>) -> Vec<Note> {
    let mut notes: Vec<Note> = doc.iter().map(|raw| Note::from_comment(raw)).collect();
    if let Some(raw) = comment {
        notes.push(Note::block(Note::from_comment(raw).text));
    }
    notes
}

/// Whether a field name is visible outside its package.
fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Base type name of a receiver type: `Node` for `*Node` and `Node[T]`.
pub(crate) fn receiver_base(ty: &TypeExpr) -> Option<&str> {
    match ty {
        TypeExpr::Pointer(inner) => receiver_base(inner),
        TypeExpr::Name { pkg: None, name, .. } => Some(name),
        _ => None,
    }
}

/// Type parameter names bound by a generic receiver, `T` in `(l *List[T])`.
fn receiver_params(ty: &TypeExpr) -> Vec<String> {
    match ty {
        TypeExpr::Pointer(inner) => receiver_params(inner),
        TypeExpr::Name { args, .. } => args
            .iter()
            .filter_map(|arg| match arg {
                TypeExpr::Name {
                    pkg: None, name, ..
                } => Some(name.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

impl Resolver<'_> {
    pub(crate) fn struct_fields(
        &mut self,
        ctx: &DecoderContext<'_>,
        decls: &[FieldDecl],
    ) -> Vec<Field> {
        let mut fields = Vec::new();
        for decl in decls {
            let Some(ty) = self.resolve(ctx, &decl.ty) else {
                warn!(
                    building = ctx.building(),
                    fields = ?decl.names,
                    "field type not resolved, field dropped"
                );
                continue;
            };

            if decl.is_embedded() {
                if is_struct_like(&ty) {
                    fields.extend(ty.pointee().fields().iter().cloned());
                } else if ty.pointee().name().is_some_and(is_exported) {
                    fields.push(Field::embedded(ty));
                }
                continue;
            }

            let notes = notes(&decl.doc, decl.comment.as_deref());
            for name in &decl.names {
                if !is_exported(name) {
                    trace!(building = ctx.building(), field = %name, "unexported field skipped");
                    continue;
                }
                let mut field =
                    Field::new(name, ty.clone()).with_tag(decl.tag.clone().unwrap_or_default());
                field.notes.clone_from(&notes);
                fields.push(field);
            }
        }
        fields
    }

    /// Methods promoted from the embedded fields of a struct literal: the
    /// method set of each embedded type, first declaration of a name wins.
    pub(crate) fn promoted_methods(
        &mut self,
        ctx: &DecoderContext<'_>,
        expr: &TypeExpr,
    ) -> Vec<Func> {
        let TypeExpr::Struct(decls) = expr else {
            return Vec::new();
        };
        let mut promoted: Vec<Func> = Vec::new();
        for decl in decls.iter().filter(|decl| decl.is_embedded()) {
            let Some(ty) = self.resolve(ctx, &decl.ty) else {
                continue;
            };
            for method in ty.method_set() {
                if promoted.iter().all(|m| m.name != method.name) {
                    trace!(building = ctx.building(), method = %method.name, "method promoted");
                    promoted.push(method.clone());
                }
            }
        }
        promoted
    }

    pub(crate) fn interface_methods(
        &mut self,
        ctx: &DecoderContext<'_>,
        elems: &[InterfaceElem],
    ) -> Vec<Func> {
        let mut methods = Vec::new();
        for elem in elems {
            match elem {
                InterfaceElem::Method {
                    name,
                    signature,
                    doc,
                    comment,
                } => {
                    if let Some(mut func) = self.func_from_signature(ctx, name, signature) {
                        func.notes = notes(doc, comment.as_deref());
                        methods.push(func);
                    }
                }
                InterfaceElem::Embed(expr) => match self.resolve(ctx, expr) {
                    Some(embedded) => {
                        methods.extend(embedded.method_set().into_iter().cloned());
                    }
                    None => warn!(building = ctx.building(), "embedded interface not resolved"),
                },
                // Type sets constrain instantiation only.
                InterfaceElem::Union(_) => {}
            }
        }
        methods
    }

    /// Build a bodiless function from a signature. Any unresolved parameter
    /// or result type drops the whole function.
    pub(crate) fn func_from_signature(
        &mut self,
        ctx: &DecoderContext<'_>,
        name: &str,
        signature: &FuncType,
    ) -> Option<Func> {
        let mut args = Vec::with_capacity(signature.params.len());
        for param in &signature.params {
            args.push(self.arg(ctx, param)?);
        }

        let mut func = match Func::new(name).with_args(args) {
            Ok(func) => func,
            Err(err) => {
                warn!(building = ctx.building(), func = name, %err, "malformed signature");
                return None;
            }
        };
        for result in &signature.results {
            let ty = self.resolve(ctx, &result.ty)?;
            func = match &result.name {
                Some(name) => func.named_result(name, ty),
                None => func.result(ty),
            };
        }
        Some(func)
    }

    fn arg(&mut self, ctx: &DecoderContext<'_>, param: &Param) -> Option<Arg> {
        let ty = self.resolve(ctx, &param.ty)?;
        let name = param.name.clone().unwrap_or_default();
        Some(if param.variadic {
            Arg::variadic(name, ty)
        } else {
            Arg::new(name, ty)
        })
    }

    /// Methods declared in `package` on `type_name` or `*type_name`.
    pub(crate) fn methods_of(&mut self, package: &Package, type_name: &str) -> Vec<Func> {
        let mut methods = Vec::new();
        for file in &package.files {
            for decl in &file.syntax.funcs {
                let Some(recv) = &decl.recv else { continue };
                if receiver_base(&recv.ty) != Some(type_name) {
                    continue;
                }
                if let Some(func) = self.method_from_decl(&package.path, file, decl) {
                    methods.push(func);
                }
            }
        }
        methods
    }

    /// Decode a method declaration in the scope of its file.
    pub(crate) fn method_from_decl(
        &mut self,
        pkg: &str,
        file: &ParsedFile,
        decl: &FuncDecl,
    ) -> Option<Func> {
        let recv = decl.recv.as_ref()?;
        let building = receiver_base(&recv.ty).unwrap_or(decl.name.as_str());
        let ctx = DecoderContext::new(pkg, &file.imports, building)
            .with_type_params(receiver_params(&recv.ty));

        let recv_ty = self.resolve(&ctx, &recv.ty)?;
        let mut func = self.func_from_signature(&ctx, &decl.name, &decl.signature)?;
        func = func.with_receiver(Receiver::new(
            recv.name.clone().unwrap_or_default(),
            recv_ty,
        ));
        func.notes = notes(&decl.doc, None);
        Some(func)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gosmith_ir::NoteKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn doc_and_trailing_comments() {
        let notes = notes(
            &["// Node is a list cell.".to_owned(), "/* second */".to_owned()],
            Some("// the tail"),
        );
        assert_eq!(
            notes,
            vec![
                Note::line("Node is a list cell."),
                Note::block("second"),
                Note::block("the tail"),
            ]
        );
        assert_eq!(notes[2].kind, NoteKind::Block);
    }

    #[test]
    fn receiver_shapes() {
        let generic = TypeExpr::Pointer(Box::new(TypeExpr::Name {
            pkg: None,
            name: "List".to_owned(),
            args: vec![TypeExpr::ident("T")],
        }));
        assert_eq!(receiver_base(&generic), Some("List"));
        assert_eq!(receiver_params(&generic), vec!["T".to_owned()]);
        assert_eq!(receiver_base(&TypeExpr::qualified("x", "Y")), None);
    }

    #[test]
    fn exported_names() {
        assert!(is_exported("Value"));
        assert!(!is_exported("value"));
        assert!(!is_exported("_Value"));
        assert!(!is_exported(""));
    }
}
