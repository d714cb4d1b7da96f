//! Value / Expression Algebra
//!
//! A [`Value`] is an expression tree node carrying its result type when known.
//! Constructors never mutate their operands: `a.add(b)` returns a new node
//! owning copies of `a` and `b`. The one exception is [`Value::auto_set`],
//! which back-patches the declared variable's inferred type.
//!
//! # Construction-Time Checking
//!
//! Operations whose validity depends on types ([`Value::cast`], [`Value::call`],
//! [`Value::dot`], [`Value::method`], [`Value::index`], [`Value::assertion`])
//! return `Result<Value, IrError>`. A value whose type is unknown (untyped
//! identifiers, `nil`, opaque named types) passes every check unchanged.
//!
//! # Precedence
//!
//! [`Value::depth`] counts nesting (a leaf is 1). [`Value::needs_parens`] is
//! true for grouping operators (`* & !`, arithmetic, `&& ||`) nested below
//! another operator. Dereference always asks for parentheses.

mod cast;
mod ops;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use crate::decl::Func;
use crate::note::Note;
use crate::ty::{Signature, Type};

/// Literal constants.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Nil,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    /// `*x`
    Deref,
    /// `&x`
    AddrOf,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Deref => "*",
            UnaryOp::AddrOf => "&",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::GtEq => ">=",
            BinaryOp::LtEq => "<=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Gt
                | BinaryOp::Lt
                | BinaryOp::GtEq
                | BinaryOp::LtEq
        )
    }

    /// Operators that are parenthesised when nested.
    pub fn is_grouping(self) -> bool {
        !self.is_comparison()
    }
}

/// The shape of a [`Value`].
#[derive(Clone, Debug, PartialEq)]
pub enum ValueKind {
    Ident(String),
    /// `pkg.Name` where `pkg` is an import path; the alias is chosen at render time.
    Qualified { pkg: String, name: String },
    Lit(Literal),
    /// Pre-rendered source text, emitted verbatim.
    Raw(String),
    /// A type used in expression position, e.g. the first argument of `make`.
    TypeOnly,
    /// The zero value of the value's type.
    Zero,
    /// `a, b, c`.
    Tuple(Vec<Value>),
    FuncLit(Box<Func>),
    /// Field or method selection `base.name`.
    Dot { base: Box<Value>, name: String },
    Index { base: Box<Value>, index: Box<Value> },
    /// `callee(args)`; `spread` renders the last argument as `args...`.
    Call {
        callee: Box<Value>,
        args: Vec<Value>,
        spread: bool,
    },
    Unary { op: UnaryOp, operand: Box<Value> },
    Binary { op: BinaryOp, left: Box<Value>, right: Box<Value> },
    /// `target = value`, or `target := value` when `define` is set.
    Assign { target: Box<Value>, value: Box<Value>, define: bool },
    /// `T(operand)` where `T` is the value's type.
    Cast { operand: Box<Value> },
    /// `operand.(T)` where `T` is the value's type.
    Assert { operand: Box<Value> },
}

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Value {
    kind: ValueKind,
    ty: Option<Type>,
    /// Parameter/result types when this value is callable.
    signature: Option<Box<Signature>>,
    notes: Vec<Note>,
}

impl Value {
    fn new(kind: ValueKind, ty: Option<Type>) -> Self {
        Value {
            kind,
            ty,
            signature: None,
            notes: Vec::new(),
        }
    }

    /// Untyped identifier.
    pub fn ident(name: impl Into<String>) -> Self {
        Value::new(ValueKind::Ident(name.into()), None)
    }

    /// Identifier of a known type, e.g. a variable or parameter.
    ///
    /// A function-typed identifier also records the signature for [`Value::call`].
    pub fn typed(name: impl Into<String>, ty: Type) -> Self {
        let signature = match ty.underlying().node() {
            crate::ty::TypeNode::Func(signature) => Some(signature.clone()),
            _ => None,
        };
        Value {
            signature,
            ..Value::new(ValueKind::Ident(name.into()), Some(ty))
        }
    }

    pub fn qualified(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Value::new(
            ValueKind::Qualified {
                pkg: pkg.into(),
                name: name.into(),
            },
            None,
        )
    }

    pub fn int(v: i64) -> Self {
        Value::new(ValueKind::Lit(Literal::Int(v)), Some(Type::int()))
    }

    pub fn float(v: f64) -> Self {
        Value::new(ValueKind::Lit(Literal::Float(v)), Some(Type::float64()))
    }

    pub fn string(v: impl Into<String>) -> Self {
        Value::new(ValueKind::Lit(Literal::Str(v.into())), Some(Type::string()))
    }

    pub fn bool(v: bool) -> Self {
        Value::new(ValueKind::Lit(Literal::Bool(v)), Some(Type::bool()))
    }

    pub fn nil() -> Self {
        Value::new(ValueKind::Lit(Literal::Nil), None)
    }

    /// Verbatim source text, e.g. the output of a template.
    pub fn raw(text: impl Into<String>) -> Self {
        Value::new(ValueKind::Raw(text.into()), None)
    }

    pub fn type_only(ty: Type) -> Self {
        Value::new(ValueKind::TypeOnly, Some(ty))
    }

    pub fn zero(ty: Type) -> Self {
        Value::new(ValueKind::Zero, Some(ty))
    }

    /// `a, b, c`, typed only when it holds a single value.
    pub fn tuple(values: impl IntoIterator<Item = Value>) -> Self {
        let values: Vec<Value> = values.into_iter().collect();
        let ty = match values.as_slice() {
            [single] => single.ty.clone(),
            _ => None,
        };
        Value::new(ValueKind::Tuple(values), ty)
    }

    pub fn func(func: Func) -> Self {
        let signature = func.signature();
        Value {
            signature: Some(Box::new(signature.clone())),
            ..Value::new(ValueKind::FuncLit(Box::new(func)), Some(Type::func(signature)))
        }
    }

    #[must_use]
    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = Some(ty);
        self
    }

    /// Record parameter/result types so that [`Value::call`] can check arguments.
    #[must_use]
    pub fn with_signature(mut self, signature: Signature) -> Self {
        self.signature = Some(Box::new(signature));
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Result type, if known.
    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_deref()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn is_ptr(&self) -> bool {
        self.ty.as_ref().is_some_and(Type::is_ptr)
    }

    /// Whether the type is absent or opaque, so type checks are skipped.
    pub fn is_untyped(&self) -> bool {
        self.ty.as_ref().map_or(true, Type::is_opaque)
    }

    fn operands(&self) -> (Option<&Value>, Option<&Value>) {
        match &self.kind {
            ValueKind::Unary { operand, .. } => (None, Some(operand)),
            ValueKind::Binary { left, right, .. } => (Some(left), Some(right)),
            ValueKind::Assign { target, value, .. } => (Some(target), Some(value)),
            ValueKind::Dot { base, .. } | ValueKind::Index { base, .. } => (Some(base), None),
            ValueKind::Call { callee, .. } => (Some(callee), None),
            ValueKind::Cast { operand } | ValueKind::Assert { operand } => (Some(operand), None),
            ValueKind::Ident(_)
            | ValueKind::Qualified { .. }
            | ValueKind::Lit(_)
            | ValueKind::Raw(_)
            | ValueKind::TypeOnly
            | ValueKind::Zero
            | ValueKind::Tuple(_)
            | ValueKind::FuncLit(_) => (None, None),
        }
    }

    /// 1 + the deeper operand's depth; absent operands count 0.
    pub fn depth(&self) -> usize {
        let (left, right) = self.operands();
        let left = left.map_or(0, Value::depth);
        let right = right.map_or(0, Value::depth);
        1 + left.max(right)
    }

    /// Whether this node must be parenthesised when it appears as an operand.
    pub fn needs_parens(&self) -> bool {
        let grouping = match &self.kind {
            ValueKind::Unary {
                op: UnaryOp::Deref, ..
            } => return true,
            ValueKind::Unary { operand, .. } => {
                // A prefix operator applied to a leaf binds tighter than anything.
                return operand.depth() > 1;
            }
            ValueKind::Binary { op, .. } => op.is_grouping(),
            _ => false,
        };
        grouping && self.depth() > 1
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::string(v)
    }
}
