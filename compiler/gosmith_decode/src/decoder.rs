//! The public decoder: a loaded registry plus its resolution cache.

use std::path::Path;

use gosmith_ir::{Decl, Func, Interface, Struct, Type};
use tracing::{trace, warn};

use crate::cache::{Resolution, TypeCache};
use crate::registry::Registry;
use crate::resolve::{receiver_base, split_qualified, Resolver};
use crate::{DecodeError, DecoderOptions};

/// Resolves Go type names from parsed source into IR types.
///
/// Each decoder owns its cache; a name resolves at most once per decoder.
#[derive(Debug)]
pub struct Decoder {
    registry: Registry,
    cache: TypeCache,
}

impl Decoder {
    /// Parse every file under `paths`. Fails on the first unreadable or
    /// unparsable file.
    #[tracing::instrument(level = "debug", skip_all, fields(paths = paths.len()))]
    pub fn load<P: AsRef<Path>>(paths: &[P], options: &DecoderOptions) -> Result<Self, DecodeError> {
        Ok(Decoder::new(Registry::load(paths, options)?))
    }

    pub fn new(registry: Registry) -> Self {
        Decoder {
            registry,
            cache: TypeCache::default(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Cache state of a name, `None` if it was never requested.
    pub fn resolution(&self, name: &str) -> Option<Resolution> {
        self.cache.state(name)
    }

    /// Resolve `Name` or `path.Name`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_type(&mut self, name: &str) -> Option<Type> {
        let ty = Resolver::new(&self.registry, &mut self.cache).get_type(name);
        trace!(cached = self.cache.len(), "cache size");
        ty
    }

    /// The struct declaration of a named struct type.
    pub fn get_struct(&mut self, name: &str) -> Option<Struct> {
        match self.decl_for(name)? {
            Decl::Struct(decl) => Some(decl),
            _ => None,
        }
    }

    /// The interface declaration of a named interface type.
    pub fn get_interface(&mut self, name: &str) -> Option<Interface> {
        match self.decl_for(name)? {
            Decl::Interface(decl) => Some(decl),
            _ => None,
        }
    }

    /// Renderable declaration for a resolved named type.
    pub fn decl_for(&mut self, name: &str) -> Option<Decl> {
        Decl::from_type(&self.get_type(name)?)
    }

    /// Methods whose receiver is `T` or `*T`; `receiver` may be given in
    /// either form and may be qualified.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn get_methods(&mut self, receiver: &str) -> Vec<Func> {
        let (qualifier, name) = split_qualified(receiver.trim_start_matches('*'));
        let registry = &self.registry;
        let mut resolver = Resolver::new(registry, &mut self.cache);

        let methods: Vec<Func> = registry
            .methods(qualifier)
            .filter(|(_, _, decl)| decl.recv.as_ref().and_then(|r| receiver_base(&r.ty)) == Some(name))
            .filter_map(|(package, file, decl)| resolver.method_from_decl(&package.path, file, decl))
            .collect();
        if methods.is_empty() {
            warn!(receiver, "no methods found");
        }
        methods
    }

    /// Qualified names (`path.Name`) of the declared types whose bare name
    /// satisfies `pred`, optionally limited to one package.
    pub fn search_type_names(&self, pkg: Option<&str>, pred: impl Fn(&str) -> bool) -> Vec<String> {
        self.registry
            .packages()
            .iter()
            .filter(|package| pkg.map_or(true, |q| package.matches(q)))
            .flat_map(|package| {
                package.files.iter().flat_map(move |file| {
                    file.syntax
                        .types
                        .iter()
                        .map(move |spec| (package, spec.name.as_str()))
                })
            })
            .filter(|(_, name)| pred(name))
            .map(|(package, name)| format!("{}.{name}", package.path))
            .collect()
    }

    /// Every method whose receiver base name satisfies `receiver_pred` and
    /// whose own name satisfies `method_pred`, paired with the receiver name.
    pub fn search_methods(
        &mut self,
        receiver_pred: impl Fn(&str) -> bool,
        method_pred: impl Fn(&str) -> bool,
    ) -> Vec<(String, Func)> {
        let registry = &self.registry;
        let mut resolver = Resolver::new(registry, &mut self.cache);
        let mut found = Vec::new();
        for (package, file, decl) in registry.methods(None) {
            let Some(base) = decl.recv.as_ref().and_then(|r| receiver_base(&r.ty)) else {
                continue;
            };
            if !receiver_pred(base) || !method_pred(&decl.name) {
                continue;
            }
            if let Some(func) = resolver.method_from_decl(&package.path, file, decl) {
                found.push((base.to_owned(), func));
            }
        }
        found
    }
}
