//! Declaration Wrappers
//!
//! Plain value objects composing [`Type`]s and [`Value`]s into declarations:
//! functions and methods, struct/interface/named type declarations, and the
//! fields, arguments and receivers they are built from.
//!
//! # Design
//!
//! Every declaration is constructed explicitly and owned by its caller; there
//! is no registry. Builders consume `self` and return it (`Func::new("F")
//! .result(..).c(..)`), except where the addition can violate an invariant:
//! [`Func::with_arg`] refuses to add a parameter after a variadic one.

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use crate::error::IrError;
use crate::note::Note;
use crate::stmt::Stmt;
use crate::ty::{Signature, Type, TypeNode};
use crate::value::Value;

/// A struct field. An empty name marks an embedded field.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: Type,
    /// Tag contents without the surrounding quotes.
    pub tag: String,
    pub notes: Vec<Note>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Field {
            name: name.into(),
            ty,
            tag: String::new(),
            notes: Vec::new(),
        }
    }

    pub fn embedded(ty: Type) -> Self {
        Field::new(String::new(), ty)
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn is_embedded(&self) -> bool {
        self.name.is_empty()
    }
}

/// A function parameter or named result.
///
/// A variadic argument stores the slice type it is collected into; it renders
/// as `name ...Elem`.
#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    pub name: String,
    pub ty: Type,
    pub variadic: bool,
    pub notes: Vec<Note>,
}

impl Arg {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Arg {
            name: name.into(),
            ty,
            variadic: false,
            notes: Vec::new(),
        }
    }

    /// An argument with no name, as in `func(int) error`.
    pub fn unnamed(ty: Type) -> Self {
        Arg::new(String::new(), ty)
    }

    /// `name ...elem`.
    pub fn variadic(name: impl Into<String>, elem: Type) -> Self {
        Arg {
            variadic: true,
            ..Arg::new(name, Type::slice_of(elem))
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// The argument as an identifier value of its declared type.
    pub fn value(&self) -> Value {
        Value::typed(&self.name, self.ty.clone())
    }
}

/// Method receiver, e.g. `(n *Node)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Receiver {
    pub name: String,
    pub ty: Type,
}

impl Receiver {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Receiver {
            name: name.into(),
            ty,
        }
    }

    pub fn value(&self) -> Value {
        Value::typed(&self.name, self.ty.clone())
    }
}

/// A function, method, interface method signature or function literal.
#[derive(Clone, Debug, PartialEq)]
pub struct Func {
    /// Empty for function literals.
    pub name: String,
    pub receiver: Option<Receiver>,
    pub(crate) args: Vec<Arg>,
    pub results: Vec<Arg>,
    pub body: Vec<Stmt>,
    pub notes: Vec<Note>,
    /// Render the body on one line, `func() T { a; b }`.
    pub inline: bool,
}

impl Func {
    pub fn new(name: impl Into<String>) -> Self {
        Func {
            name: name.into(),
            receiver: None,
            args: Vec::new(),
            results: Vec::new(),
            body: Vec::new(),
            notes: Vec::new(),
            inline: false,
        }
    }

    /// Function literal.
    pub fn literal() -> Self {
        Func::new(String::new())
    }

    #[must_use]
    pub fn with_receiver(mut self, receiver: Receiver) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Append a parameter. Fails if the current last parameter is variadic.
    pub fn with_arg(mut self, arg: Arg) -> Result<Self, IrError> {
        if let Some(last) = self.args.last() {
            if last.variadic {
                return Err(IrError::VariadicNotLast {
                    func: self.name.clone(),
                    arg: last.name.clone(),
                });
            }
        }
        self.args.push(arg);
        Ok(self)
    }

    pub fn with_args(self, args: impl IntoIterator<Item = Arg>) -> Result<Self, IrError> {
        args.into_iter().try_fold(self, Func::with_arg)
    }

    /// Append an unnamed result type.
    #[must_use]
    pub fn result(mut self, ty: Type) -> Self {
        self.results.push(Arg::unnamed(ty));
        self
    }

    /// Append a named result.
    #[must_use]
    pub fn named_result(mut self, name: impl Into<String>, ty: Type) -> Self {
        self.results.push(Arg::new(name, ty));
        self
    }

    /// Append a body statement.
    #[must_use]
    pub fn c(mut self, stmt: impl Into<Stmt>) -> Self {
        self.body.push(stmt.into());
        self
    }

    pub fn push(&mut self, stmt: impl Into<Stmt>) {
        self.body.push(stmt.into());
    }

    #[must_use]
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn is_literal(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_variadic(&self) -> bool {
        self.args.last().is_some_and(|a| a.variadic)
    }

    pub fn signature(&self) -> Signature {
        Signature {
            params: self.args.iter().map(|a| a.ty.clone()).collect(),
            results: self.results.iter().map(|a| a.ty.clone()).collect(),
            variadic: self.is_variadic(),
        }
    }

    /// The function's type, `func(..) ..`.
    pub fn as_type(&self) -> Type {
        Type::func(self.signature())
    }

    /// A callable reference: the literal itself, or the function's name.
    pub fn value(&self) -> Value {
        if self.is_literal() {
            Value::func(self.clone())
        } else {
            Value::ident(&self.name).with_signature(self.signature())
        }
    }

    /// Call expression with argument checking, see [`Value::call`].
    pub fn call(&self, args: impl IntoIterator<Item = Value>) -> Result<Value, IrError> {
        self.value().call(args)
    }
}

/// `type Name struct { .. }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Struct {
    pub name: String,
    /// Import path of the declaring package.
    pub pkg: String,
    pub fields: Vec<Field>,
    pub notes: Vec<Note>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Struct {
            name: name.into(),
            pkg: String::new(),
            fields: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_package(mut self, pkg: impl Into<String>) -> Self {
        self.pkg = pkg.into();
        self
    }

    #[must_use]
    pub fn add_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// The named struct type this declaration introduces.
    pub fn as_type(&self) -> Type {
        Type::named_with(&self.pkg, &self.name, Type::structure(self.fields.clone()))
            .with_notes(self.notes.clone())
    }
}

/// `type Name interface { .. }`.
#[derive(Clone, Debug, PartialEq)]
pub struct Interface {
    pub name: String,
    pub pkg: String,
    pub methods: Vec<Func>,
    pub notes: Vec<Note>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Interface {
            name: name.into(),
            pkg: String::new(),
            methods: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_package(mut self, pkg: impl Into<String>) -> Self {
        self.pkg = pkg.into();
        self
    }

    #[must_use]
    pub fn add_methods(mut self, methods: impl IntoIterator<Item = Func>) -> Self {
        self.methods.extend(methods);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn as_type(&self) -> Type {
        Type::named_with(&self.pkg, &self.name, Type::interface(self.methods.clone()))
            .with_notes(self.notes.clone())
    }
}

/// `type Name Underlying`, or `type Name = Underlying` when `alias` is set.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub pkg: String,
    pub underlying: Type,
    pub alias: bool,
    pub notes: Vec<Note>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, underlying: Type) -> Self {
        TypeDecl {
            name: name.into(),
            pkg: String::new(),
            underlying,
            alias: false,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn in_package(mut self, pkg: impl Into<String>) -> Self {
        self.pkg = pkg.into();
        self
    }
}

/// Any top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    Func(Func),
    Struct(Struct),
    Interface(Interface),
    Type(TypeDecl),
}

impl Decl {
    /// Declaration introducing a resolved named type.
    ///
    /// Returns `None` for unnamed or opaque types.
    pub fn from_type(ty: &Type) -> Option<Decl> {
        let named = ty.as_named()?;
        let underlying = named.underlying.as_deref()?;
        let notes = ty.notes().to_vec();
        let decl = match underlying.node() {
            TypeNode::Struct(fields) => Decl::Struct(Struct {
                name: named.name.clone(),
                pkg: named.pkg.clone(),
                fields: fields.clone(),
                notes,
            }),
            TypeNode::Interface(methods) => Decl::Interface(Interface {
                name: named.name.clone(),
                pkg: named.pkg.clone(),
                methods: methods.clone(),
                notes,
            }),
            _ => Decl::Type(TypeDecl {
                name: named.name.clone(),
                pkg: named.pkg.clone(),
                underlying: underlying.clone(),
                alias: false,
                notes,
            }),
        };
        Some(decl)
    }

    pub fn name(&self) -> &str {
        match self {
            Decl::Func(func) => &func.name,
            Decl::Struct(decl) => &decl.name,
            Decl::Interface(decl) => &decl.name,
            Decl::Type(decl) => &decl.name,
        }
    }
}

impl From<Func> for Decl {
    fn from(func: Func) -> Self {
        Decl::Func(func)
    }
}

impl From<Struct> for Decl {
    fn from(decl: Struct) -> Self {
        Decl::Struct(decl)
    }
}

impl From<Interface> for Decl {
    fn from(decl: Interface) -> Self {
        Decl::Interface(decl)
    }
}

impl From<TypeDecl> for Decl {
    fn from(decl: TypeDecl) -> Self {
        Decl::Type(decl)
    }
}
