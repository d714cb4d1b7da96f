//! Syntax tree for the declaration level of a Go file.
//!
//! Only what the decoder needs survives parsing: the package clause, imports,
//! type declarations and function signatures. Function bodies and `var`/`const`
//! declarations are skipped. Comments are kept as raw source text (markers
//! included) on the nodes they document.

/// One parsed `.go` file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SourceFile {
    pub package: String,
    pub imports: Vec<ImportSpec>,
    pub types: Vec<TypeSpec>,
    pub funcs: Vec<FuncDecl>,
}

/// `import alias "path"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit alias, including `_` and `.`.
    pub alias: Option<String>,
    /// Import path without quotes.
    pub path: String,
}

/// `type Name[P any] T` or `type Name = T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    /// Names of the declared type parameters; constraints are dropped.
    pub type_params: Vec<String>,
    pub alias: bool,
    pub ty: TypeExpr,
    pub doc: Vec<String>,
    pub comment: Option<String>,
}

/// A function or method declaration. The body is not kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub recv: Option<Param>,
    pub signature: FuncType,
    pub doc: Vec<String>,
}

/// Parameters and results of a function type.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FuncType {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
}

/// One parameter. Grouped names (`a, b int`) are split into one `Param` each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    /// Element type for a variadic parameter (`xs ...int` has `ty` = `int`).
    pub ty: TypeExpr,
    pub variadic: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// A type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Name`, `pkg.Name` or an instantiation `Name[A, B]`.
    Name {
        pkg: Option<String>,
        name: String,
        args: Vec<TypeExpr>,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// `[len]T`; the length expression is kept as source text (`...` included).
    Array {
        len: String,
        elem: Box<TypeExpr>,
    },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<TypeExpr>,
    },
    Func(Box<FuncType>),
    Struct(Vec<FieldDecl>),
    Interface(Vec<InterfaceElem>),
}

impl TypeExpr {
    /// A plain unqualified name.
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Name {
            pkg: None,
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// `pkg.Name`.
    pub fn qualified(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        TypeExpr::Name {
            pkg: Some(pkg.into()),
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// A struct field line. `names` is empty for an embedded field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    /// Tag contents with quotes removed and escapes resolved.
    pub tag: Option<String>,
    pub doc: Vec<String>,
    pub comment: Option<String>,
}

impl FieldDecl {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

/// An element of an interface body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InterfaceElem {
    Method {
        name: String,
        signature: FuncType,
        doc: Vec<String>,
        comment: Option<String>,
    },
    /// An embedded interface.
    Embed(TypeExpr),
    /// A type-set element of a constraint (`~int | ~string`).
    Union(Vec<TypeExpr>),
}
