//! Type Model
//!
//! A [`Type`] is a closed sum over the shapes a Go type can take: a
//! predeclared basic type, the empty interface, a named type with an optional
//! underlying form, one of the composite constructors (pointer, slice, array,
//! map, channel, function), or a struct/interface literal.
//!
//! # Decoration Chains
//!
//! Pointer and slice wrappers form a singly linked *decoration chain* around a
//! leaf type. [`Type::chain`] lists the levels innermost first, outermost last:
//! for `*[]*Node` it yields `Node`, `*Node`, `[]*Node`, `*[]*Node`.
//! [`Type::tack_ptr`] and [`Type::slice`] wrap one level and are idempotent when
//! the type already has that kind; [`Type::pointer_to`] and [`Type::slice_of`]
//! always wrap (used when decoding `**T` or `[][]T`).
//!
//! # Unresolved Names
//!
//! A [`Named`] type whose `underlying` is `None` is *opaque*: it names a type
//! whose definition lives elsewhere (a type table still being filled, or an
//! external package nobody parsed). Opaque types render and compare by name
//! but report [`Kind::Invalid`] and never participate in cast checks.
//!
//! # String Forms
//!
//! - [`Type::identity`]: Go-style type string with unqualified names (`*Node`).
//! - [`Type::qualified`]: same shape with every name prefixed by its package path.
//! - [`Type::code_token`]: the single token for the outermost level only; the
//!   renderer recurses through the chain itself.

mod compat;
mod display;


use gosmith_stack::ensure_sufficient_stack;

use crate::decl::{Arg, Field, Func};
use crate::note::Note;
use crate::value::Value;

/// Kind of a type, mirroring Go's `reflect.Kind`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An opaque named type whose definition is unknown.
    Invalid,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Array,
    Chan,
    Func,
    Interface,
    Map,
    Pointer,
    Slice,
    Struct,
}

impl Kind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::Int
                | Kind::Int8
                | Kind::Int16
                | Kind::Int32
                | Kind::Int64
                | Kind::Uint
                | Kind::Uint8
                | Kind::Uint16
                | Kind::Uint32
                | Kind::Uint64
                | Kind::Uintptr
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Kind::Complex64 | Kind::Complex128)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float() || self.is_complex()
    }
}

/// Predeclared basic types.
///
/// `Byte` and `Rune` are kept apart from `Uint8`/`Int32` so that decoded
/// source re-renders with the spelling it was written with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Basic {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Byte,
    Rune,
}

impl Basic {
    pub const ALL: [Basic; 19] = [
        Basic::Bool,
        Basic::Int,
        Basic::Int8,
        Basic::Int16,
        Basic::Int32,
        Basic::Int64,
        Basic::Uint,
        Basic::Uint8,
        Basic::Uint16,
        Basic::Uint32,
        Basic::Uint64,
        Basic::Uintptr,
        Basic::Float32,
        Basic::Float64,
        Basic::Complex64,
        Basic::Complex128,
        Basic::String,
        Basic::Byte,
        Basic::Rune,
    ];

    pub fn spelling(self) -> &'static str {
        match self {
            Basic::Bool => "bool",
            Basic::Int => "int",
            Basic::Int8 => "int8",
            Basic::Int16 => "int16",
            Basic::Int32 => "int32",
            Basic::Int64 => "int64",
            Basic::Uint => "uint",
            Basic::Uint8 => "uint8",
            Basic::Uint16 => "uint16",
            Basic::Uint32 => "uint32",
            Basic::Uint64 => "uint64",
            Basic::Uintptr => "uintptr",
            Basic::Float32 => "float32",
            Basic::Float64 => "float64",
            Basic::Complex64 => "complex64",
            Basic::Complex128 => "complex128",
            Basic::String => "string",
            Basic::Byte => "byte",
            Basic::Rune => "rune",
        }
    }

    pub fn kind(self) -> Kind {
        match self {
            Basic::Bool => Kind::Bool,
            Basic::Int => Kind::Int,
            Basic::Int8 => Kind::Int8,
            Basic::Int16 => Kind::Int16,
            Basic::Int32 | Basic::Rune => Kind::Int32,
            Basic::Int64 => Kind::Int64,
            Basic::Uint => Kind::Uint,
            Basic::Uint8 | Basic::Byte => Kind::Uint8,
            Basic::Uint16 => Kind::Uint16,
            Basic::Uint32 => Kind::Uint32,
            Basic::Uint64 => Kind::Uint64,
            Basic::Uintptr => Kind::Uintptr,
            Basic::Float32 => Kind::Float32,
            Basic::Float64 => Kind::Float64,
            Basic::Complex64 => Kind::Complex64,
            Basic::Complex128 => Kind::Complex128,
            Basic::String => Kind::String,
        }
    }

    pub fn from_spelling(spelling: &str) -> Option<Basic> {
        Basic::ALL.into_iter().find(|b| b.spelling() == spelling)
    }
}

/// Channel direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// Parameter and result types of a function type or callable value.
///
/// When `variadic` is set, the last parameter is the slice type the
/// variadic arguments are collected into.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Signature {
    pub params: Vec<Type>,
    pub results: Vec<Type>,
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Type>, results: Vec<Type>) -> Self {
        Signature {
            params,
            results,
            variadic: false,
        }
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }
}

/// A named type. `underlying: None` marks an opaque reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Named {
    /// Import path of the declaring package; empty for predeclared names.
    pub pkg: String,
    pub name: String,
    pub underlying: Option<Box<Type>>,
    /// Declared methods (value and pointer receivers alike).
    pub methods: Vec<Func>,
}

impl Named {
    /// `pkg.Name`, or just `Name` for predeclared types.
    pub fn full_name(&self) -> String {
        if self.pkg.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.pkg, self.name)
        }
    }
}

/// The shape of a [`Type`].
#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    Basic(Basic),
    /// `interface{}` / `any`.
    Any,
    Named(Named),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array { len: String, elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    Chan { dir: ChanDir, elem: Box<Type> },
    Func(Box<Signature>),
    Struct(Vec<Field>),
    Interface(Vec<Func>),
}

/// A Go type with its attached doc notes.
#[derive(Clone, Debug, PartialEq)]
pub struct Type {
    node: TypeNode,
    kind_override: Option<Kind>,
    notes: Vec<Note>,
}

impl From<TypeNode> for Type {
    fn from(node: TypeNode) -> Self {
        Type {
            node,
            kind_override: None,
            notes: Vec::new(),
        }
    }
}

impl From<Basic> for Type {
    fn from(basic: Basic) -> Self {
        Type::basic(basic)
    }
}

// Construction

impl Type {
    pub fn basic(basic: Basic) -> Self {
        TypeNode::Basic(basic).into()
    }

    pub fn bool() -> Self {
        Type::basic(Basic::Bool)
    }

    pub fn int() -> Self {
        Type::basic(Basic::Int)
    }

    pub fn int64() -> Self {
        Type::basic(Basic::Int64)
    }

    pub fn uint() -> Self {
        Type::basic(Basic::Uint)
    }

    pub fn float64() -> Self {
        Type::basic(Basic::Float64)
    }

    pub fn string() -> Self {
        Type::basic(Basic::String)
    }

    pub fn byte() -> Self {
        Type::basic(Basic::Byte)
    }

    pub fn rune() -> Self {
        Type::basic(Basic::Rune)
    }

    pub fn any() -> Self {
        TypeNode::Any.into()
    }

    /// Opaque reference to `pkg.name`.
    pub fn named(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        TypeNode::Named(Named {
            pkg: pkg.into(),
            name: name.into(),
            underlying: None,
            methods: Vec::new(),
        })
        .into()
    }

    pub fn named_with(pkg: impl Into<String>, name: impl Into<String>, underlying: Type) -> Self {
        TypeNode::Named(Named {
            pkg: pkg.into(),
            name: name.into(),
            underlying: Some(Box::new(underlying)),
            methods: Vec::new(),
        })
        .into()
    }

    /// Anonymous struct type.
    pub fn structure(fields: Vec<Field>) -> Self {
        TypeNode::Struct(fields).into()
    }

    /// Anonymous interface type.
    pub fn interface(methods: Vec<Func>) -> Self {
        TypeNode::Interface(methods).into()
    }

    pub fn pointer_to(inner: Type) -> Self {
        TypeNode::Pointer(Box::new(inner)).into()
    }

    pub fn slice_of(elem: Type) -> Self {
        TypeNode::Slice(Box::new(elem)).into()
    }

    pub fn array_of(len: impl Into<String>, elem: Type) -> Self {
        TypeNode::Array {
            len: len.into(),
            elem: Box::new(elem),
        }
        .into()
    }

    pub fn map_of(key: Type, value: Type) -> Self {
        TypeNode::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
        .into()
    }

    pub fn chan_of(dir: ChanDir, elem: Type) -> Self {
        TypeNode::Chan {
            dir,
            elem: Box::new(elem),
        }
        .into()
    }

    pub fn func(signature: Signature) -> Self {
        TypeNode::Func(Box::new(signature)).into()
    }

    /// The predeclared `error` interface.
    pub fn error() -> Self {
        let method = Func::new("Error").result(Type::string());
        Type::named_with("", "error", Type::interface(vec![method]))
    }

    /// `time.Time`, modelled as a struct with no visible fields.
    pub fn time() -> Self {
        Type::named_with("time", "Time", Type::structure(Vec::new()))
    }

    /// `context.Context` with its four methods.
    pub fn context() -> Self {
        let done = Type::chan_of(ChanDir::Recv, Type::structure(Vec::new()));
        let mut value = Func::new("Value").result(Type::any());
        value.args.push(Arg::new("key", Type::any()));
        let methods = vec![
            Func::new("Deadline")
                .result(Type::time())
                .result(Type::bool()),
            Func::new("Done").result(done),
            Func::new("Err").result(Type::error()),
            value,
        ];
        Type::named_with("context", "Context", Type::interface(methods))
    }

    /// Predeclared and well-known types by their source spelling.
    ///
    /// Recognises every basic type, `any`, `interface{}`, `error`,
    /// `time.Time` and `context.Context`.
    pub fn builtin(name: &str) -> Option<Type> {
        if let Some(basic) = Basic::from_spelling(name) {
            return Some(Type::basic(basic));
        }
        match name {
            "any" | "interface{}" => Some(Type::any()),
            "error" => Some(Type::error()),
            "time.Time" => Some(Type::time()),
            "context.Context" => Some(Type::context()),
            _ => None,
        }
    }

    /// Force [`Type::kind`] to report `kind`.
    #[must_use]
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind_override = Some(kind);
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Vec<Note>) -> Self {
        self.notes = notes;
        self
    }

    /// Attach a method set to a named type; other shapes are returned unchanged.
    #[must_use]
    pub fn with_methods(mut self, methods: Vec<Func>) -> Self {
        if let TypeNode::Named(named) = &mut self.node {
            named.methods = methods;
        }
        self
    }

    /// Zero value of this type.
    pub fn zero(&self) -> Value {
        Value::zero(self.clone())
    }
}

// Accessors

impl Type {
    pub fn node(&self) -> &TypeNode {
        &self.node
    }

    pub fn into_node(self) -> TypeNode {
        self.node
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn as_named(&self) -> Option<&Named> {
        match &self.node {
            TypeNode::Named(named) => Some(named),
            _ => None,
        }
    }

    /// Type name of a named type.
    pub fn name(&self) -> Option<&str> {
        self.as_named().map(|n| n.name.as_str())
    }

    /// Declaring package path of a named type.
    pub fn pkg(&self) -> Option<&str> {
        self.as_named().map(|n| n.pkg.as_str())
    }

    /// Kind, by precedence: explicit override, then the node shape, then the
    /// underlying type of a named type.
    pub fn kind(&self) -> Kind {
        if let Some(kind) = self.kind_override {
            return kind;
        }
        match &self.node {
            TypeNode::Basic(basic) => basic.kind(),
            TypeNode::Any | TypeNode::Interface(_) => Kind::Interface,
            TypeNode::Named(named) => named
                .underlying
                .as_ref()
                .map_or(Kind::Invalid, |u| u.kind()),
            TypeNode::Pointer(_) => Kind::Pointer,
            TypeNode::Slice(_) => Kind::Slice,
            TypeNode::Array { .. } => Kind::Array,
            TypeNode::Map { .. } => Kind::Map,
            TypeNode::Chan { .. } => Kind::Chan,
            TypeNode::Func(_) => Kind::Func,
            TypeNode::Struct(_) => Kind::Struct,
        }
    }

    pub fn is_ptr(&self) -> bool {
        self.kind() == Kind::Pointer
    }

    pub fn is_slice(&self) -> bool {
        self.kind() == Kind::Slice
    }

    pub fn is_struct(&self) -> bool {
        self.kind() == Kind::Struct
    }

    pub fn is_interface(&self) -> bool {
        self.kind() == Kind::Interface
    }

    /// Whether the leaf of the decoration chain is a named type with no
    /// known definition.
    pub fn is_opaque(&self) -> bool {
        matches!(
            &self.leaf().node,
            TypeNode::Named(Named {
                underlying: None,
                ..
            })
        )
    }

    /// Follow named types down to their structural form.
    ///
    /// Stops at an opaque name and returns it.
    pub fn underlying(&self) -> &Type {
        let mut ty = self;
        while let TypeNode::Named(Named {
            underlying: Some(inner),
            ..
        }) = &ty.node
        {
            ty = inner;
        }
        ty
    }

    /// Fields of the struct this type denotes; empty for non-struct types.
    pub fn fields(&self) -> &[Field] {
        match &self.underlying().node {
            TypeNode::Struct(fields) => fields,
            _ => &[],
        }
    }

    /// Look up a field by name or dotted path, dereferencing pointers between
    /// segments.
    pub fn field(&self, path: &str) -> Option<&Field> {
        let mut ty = self;
        let mut found = None;
        for segment in path.split('.') {
            let field = ty
                .pointee()
                .fields()
                .iter()
                .find(|f| f.name == segment)?;
            ty = &field.ty;
            found = Some(field);
        }
        found
    }

    /// Methods declared on this type, including interface methods.
    /// A pointer type reports the method set of its pointee.
    pub fn method_set(&self) -> Vec<&Func> {
        let base = self.pointee();
        let mut methods: Vec<&Func> = Vec::new();
        if let TypeNode::Named(named) = &base.node {
            methods.extend(named.methods.iter());
        }
        if let TypeNode::Interface(declared) = &base.underlying().node {
            methods.extend(declared.iter());
        }
        methods
    }

    pub fn method(&self, name: &str) -> Option<&Func> {
        self.method_set().into_iter().find(|m| m.name == name)
    }

    /// Whether the full method set of this type is known, so that a missing
    /// method is a modelling error rather than missing information.
    pub fn knows_methods(&self) -> bool {
        let base = self.pointee();
        base.is_interface() || base.as_named().is_some_and(|n| !n.methods.is_empty())
    }
}

// Opaque references

impl Type {
    /// Copy of this type with each opaque name that `lookup` can define
    /// replaced by that definition.
    ///
    /// Substituted types are not visited again, so a self-referential type
    /// gains one defined level per call. Receivers are left as they are.
    #[must_use]
    pub fn resolve_opaque(&self, lookup: &mut impl FnMut(&Named) -> Option<Type>) -> Type {
        let mut linked = self.clone();
        linked.link(lookup);
        linked
    }

    fn link(&mut self, lookup: &mut impl FnMut(&Named) -> Option<Type>) {
        if let TypeNode::Named(named @ Named { underlying: None, .. }) = &self.node {
            if let Some(found) = lookup(named) {
                *self = found;
            }
            return;
        }
        ensure_sufficient_stack(|| match &mut self.node {
            TypeNode::Named(named) => {
                if let Some(inner) = &mut named.underlying {
                    inner.link(lookup);
                }
                for method in &mut named.methods {
                    link_func(method, lookup);
                }
            }
            TypeNode::Pointer(inner) | TypeNode::Slice(inner) => inner.link(lookup),
            TypeNode::Array { elem, .. } | TypeNode::Chan { elem, .. } => elem.link(lookup),
            TypeNode::Map { key, value } => {
                key.link(lookup);
                value.link(lookup);
            }
            TypeNode::Func(signature) => {
                for ty in signature.params.iter_mut().chain(&mut signature.results) {
                    ty.link(lookup);
                }
            }
            TypeNode::Struct(fields) => {
                for field in fields {
                    field.ty.link(lookup);
                }
            }
            TypeNode::Interface(methods) => {
                for method in methods {
                    link_func(method, lookup);
                }
            }
            TypeNode::Basic(_) | TypeNode::Any => {}
        });
    }
}

fn link_func(func: &mut Func, lookup: &mut impl FnMut(&Named) -> Option<Type>) {
    for arg in func.args.iter_mut().chain(&mut func.results) {
        arg.ty.link(lookup);
    }
}

// Decoration chain

impl Type {
    /// Pointer to this type; unchanged if it already is a pointer.
    #[must_use]
    pub fn tack_ptr(&self) -> Type {
        if self.is_ptr() {
            self.clone()
        } else {
            Type::pointer_to(self.clone())
        }
    }

    /// Slice of this type; unchanged if it already is a slice.
    #[must_use]
    pub fn slice(&self) -> Type {
        if self.is_slice() {
            self.clone()
        } else {
            Type::slice_of(self.clone())
        }
    }

    /// Strip one pointer level; unchanged if not a pointer.
    #[must_use]
    pub fn un_ptr(&self) -> Type {
        self.pointee().clone()
    }

    /// Borrowing form of [`Type::un_ptr`].
    pub fn pointee(&self) -> &Type {
        match &self.node {
            TypeNode::Pointer(inner) => inner,
            _ => self,
        }
    }

    /// Element type: pointee, slice/array/channel element, or map value.
    /// Named types answer for their underlying form.
    pub fn elem(&self) -> Option<&Type> {
        match &self.node {
            TypeNode::Pointer(inner) | TypeNode::Slice(inner) => Some(inner),
            TypeNode::Array { elem, .. } | TypeNode::Chan { elem, .. } => Some(elem),
            TypeNode::Map { value, .. } => Some(value),
            TypeNode::Named(Named {
                underlying: Some(inner),
                ..
            }) => inner.elem(),
            _ => None,
        }
    }

    /// Key type of a map.
    pub fn key(&self) -> Option<&Type> {
        match &self.underlying().node {
            TypeNode::Map { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The next level of a pointer/slice decoration chain.
    pub fn next(&self) -> Option<&Type> {
        match &self.node {
            TypeNode::Pointer(inner) | TypeNode::Slice(inner) => Some(inner),
            _ => None,
        }
    }

    /// Innermost type of the decoration chain.
    pub fn leaf(&self) -> &Type {
        let mut ty = self;
        while let Some(next) = ty.next() {
            ty = next;
        }
        ty
    }

    /// Every level of the decoration chain, innermost first and this type last.
    pub fn chain(&self) -> Vec<&Type> {
        let mut levels = vec![self];
        let mut ty = self;
        while let Some(next) = ty.next() {
            levels.push(next);
            ty = next;
        }
        levels.reverse();
        levels
    }
}
