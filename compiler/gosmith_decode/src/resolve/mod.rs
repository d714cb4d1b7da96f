//! Name resolution from syntax to IR types.
//!
//! [`Resolver::get_type`] turns a type name into a [`Type`], decoding its
//! declaration on first use:
//!
//! 1. An empty name resolves to nothing.
//! 2. Predeclared and well-known names (`int`, `error`, `time.Time`) resolve
//!    directly.
//! 3. A cached name returns its entry. A placeholder comes back as an
//!    opaque named type, which is how `Next *Node` inside `Node` terminates.
//! 4. Otherwise the declaration is looked up in the candidate packages, a
//!    placeholder slot is reserved under `pkg.Name`, the declaration is
//!    decoded in a [`DecoderContext`] for its file, and the slot is filled.
//! 5. A name with no declaration is cached as failed and logged.
//!
//! Slots hold types as decoded, with opaque references where a placeholder
//! was hit. Every type handed out has those references replaced by the
//! filled slots, one level deep, so `n.Next.Value` is reachable on a `Node`.

mod members;

pub(crate) use members::receiver_base;

use gosmith_ir::{ChanDir, Named, Type, TypeNode};
use gosmith_parse::{ChanDir as SyntaxChanDir, TypeExpr};
use gosmith_stack::ensure_sufficient_stack;
use tracing::{debug, trace, warn};

use crate::cache::TypeCache;
use crate::context::DecoderContext;
use crate::registry::{FoundType, Registry};

/// Resolution pass over a registry, writing into a cache.
pub(crate) struct Resolver<'d> {
    pub(crate) registry: &'d Registry,
    pub(crate) cache: &'d mut TypeCache,
}

/// Split `path.Name` at the last dot after the last slash.
pub(crate) fn split_qualified(full: &str) -> (Option<&str>, &str) {
    let slash = full.rfind('/').map_or(0, |i| i + 1);
    match full[slash..].rfind('.') {
        Some(dot) if dot > 0 && slash + dot + 1 < full.len() => {
            let dot = slash + dot;
            (Some(&full[..dot]), &full[dot + 1..])
        }
        _ => (None, full),
    }
}

impl<'d> Resolver<'d> {
    pub(crate) fn new(registry: &'d Registry, cache: &'d mut TypeCache) -> Self {
        Resolver { registry, cache }
    }

    pub(crate) fn get_type(&mut self, full_name: &str) -> Option<Type> {
        if full_name.is_empty() {
            return None;
        }
        if let Some(ty) = Type::builtin(full_name) {
            return Some(ty);
        }
        if let Some(hit) = self.cache.get(full_name) {
            trace!(name = full_name, "cache hit");
            return hit.map(|ty| self.link(&ty));
        }

        let (qualifier, name) = split_qualified(full_name);
        let registry = self.registry;
        let Some(found) = registry.find_type(qualifier, name) else {
            warn!(name = full_name, "type declaration not found");
            self.cache.fail(full_name);
            return None;
        };

        let key = format!("{}.{name}", found.package.path);
        if key != full_name {
            if let Some(id) = self.cache.id(&key) {
                self.cache.alias(full_name, id);
                return self.cache.type_at(id).map(|ty| self.link(&ty));
            }
        }
        let id = self.cache.reserve(&key, &found.package.path, name);
        self.cache.alias(full_name, id);

        debug!(name = %key, "decoding type");
        let ty = self.decode_spec(found);
        if ty.is_none() {
            warn!(name = %key, "type declaration could not be decoded");
        }
        self.cache.fill(id, ty.clone());
        ty.map(|ty| self.link(&ty))
    }

    /// Replace opaque references whose slots have been filled.
    fn link(&self, ty: &Type) -> Type {
        let cache = &*self.cache;
        ty.resolve_opaque(&mut |named: &Named| cache.resolved(&named.full_name()).cloned())
    }

    /// Decode a located declaration into its named type.
    fn decode_spec(&mut self, found: FoundType<'d>) -> Option<Type> {
        let spec = found.spec;
        let pkg = found.package.path.as_str();
        let ctx = DecoderContext::new(pkg, &found.file.imports, &spec.name)
            .with_type_params(spec.type_params.iter().cloned());

        let underlying = self.resolve(&ctx, &spec.ty)?;
        if spec.alias {
            return Some(underlying);
        }
        let notes = members::notes(&spec.doc, spec.comment.as_deref());
        let mut methods = self.methods_of(found.package, &spec.name);
        for method in self.promoted_methods(&ctx, &spec.ty) {
            if methods.iter().all(|m| m.name != method.name) {
                methods.push(method);
            }
        }
        Some(
            Type::named_with(pkg, &spec.name, underlying)
                .with_notes(notes)
                .with_methods(methods),
        )
    }

    /// Resolve a type expression in `ctx`.
    ///
    /// Unknown names in the current package resolve to `None`; unknown names
    /// in other packages become opaque references.
    pub(crate) fn resolve(&mut self, ctx: &DecoderContext<'_>, expr: &TypeExpr) -> Option<Type> {
        ensure_sufficient_stack(|| match expr {
            TypeExpr::Name { pkg: None, name, .. } => self.resolve_local(ctx, name),
            TypeExpr::Name {
                pkg: Some(alias),
                name,
                ..
            } => Some(self.resolve_imported(ctx, alias, name)),
            TypeExpr::Pointer(inner) => self.resolve(ctx, inner).map(Type::pointer_to),
            TypeExpr::Slice(elem) => self.resolve(ctx, elem).map(Type::slice_of),
            TypeExpr::Array { len, elem } => {
                self.resolve(ctx, elem).map(|elem| Type::array_of(len, elem))
            }
            TypeExpr::Map { key, value } => {
                let key = self.resolve(ctx, key)?;
                let value = self.resolve(ctx, value)?;
                Some(Type::map_of(key, value))
            }
            TypeExpr::Chan { dir, elem } => {
                let dir = match dir {
                    SyntaxChanDir::Both => ChanDir::Both,
                    SyntaxChanDir::Send => ChanDir::Send,
                    SyntaxChanDir::Recv => ChanDir::Recv,
                };
                self.resolve(ctx, elem).map(|elem| Type::chan_of(dir, elem))
            }
            TypeExpr::Func(signature) => self
                .func_from_signature(ctx, "", signature)
                .map(|func| func.as_type()),
            TypeExpr::Struct(fields) => Some(Type::structure(self.struct_fields(ctx, fields))),
            TypeExpr::Interface(elems) => {
                let methods = self.interface_methods(ctx, elems);
                if methods.is_empty() && elems.is_empty() {
                    Some(Type::any())
                } else {
                    Some(Type::interface(methods))
                }
            }
        })
    }

    fn resolve_local(&mut self, ctx: &DecoderContext<'_>, name: &str) -> Option<Type> {
        if ctx.is_type_param(name) {
            return Some(Type::named_with("", name, Type::any()));
        }
        if let Some(ty) = Type::builtin(name) {
            return Some(ty);
        }
        self.get_type(&format!("{}.{name}", ctx.current_pkg()))
    }

    fn resolve_imported(&mut self, ctx: &DecoderContext<'_>, alias: &str, name: &str) -> Type {
        let path = ctx.pkg_by_alias(alias);
        let full = format!("{path}.{name}");
        if let Some(ty) = Type::builtin(&full) {
            return ty;
        }
        if self.registry.package(path).is_none() {
            trace!(name = %full, "external type kept opaque");
            return Type::named(path, name);
        }
        self.get_type(&full).unwrap_or_else(|| Type::named(path, name))
    }
}

/// Whether a decoded type is a struct whose fields can be spliced into an
/// embedding struct.
pub(crate) fn is_struct_like(ty: &Type) -> bool {
    matches!(ty.pointee().underlying().node(), TypeNode::Struct(_))
}

#[cfg(test)]
mod tests {
    use super::split_qualified;

    #[test]
    fn splits_after_last_slash() {
        assert_eq!(split_qualified("Node"), (None, "Node"));
        assert_eq!(split_qualified("app.Node"), (Some("app"), "Node"));
        assert_eq!(
            split_qualified("github.com/x/model.Node"),
            (Some("github.com/x/model"), "Node")
        );
        assert_eq!(split_qualified("github.com/x"), (None, "github.com/x"));
        assert_eq!(split_qualified("gopkg.in/yaml.v3.Node"), (Some("gopkg.in/yaml.v3"), "Node"));
        assert_eq!(split_qualified("trailing."), (None, "trailing."));
    }
}
