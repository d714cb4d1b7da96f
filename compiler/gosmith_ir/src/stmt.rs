//! Function body statements.

use crate::note::Note;
use crate::value::Value;

/// A statement in a function body.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    /// An expression or assignment on its own line.
    Expr(Value),
    Return(Vec<Value>),
    If(IfChain),
    ForRange(ForRange),
    /// A nested `{ .. }` block.
    Block(Vec<Stmt>),
    /// A standalone comment line.
    Note(Note),
}

impl Stmt {
    pub fn ret(values: impl IntoIterator<Item = Value>) -> Self {
        Stmt::Return(values.into_iter().collect())
    }
}

impl From<Value> for Stmt {
    fn from(value: Value) -> Self {
        Stmt::Expr(value)
    }
}

impl From<IfChain> for Stmt {
    fn from(chain: IfChain) -> Self {
        Stmt::If(chain)
    }
}

impl From<ForRange> for Stmt {
    fn from(range: ForRange) -> Self {
        Stmt::ForRange(range)
    }
}

impl From<Note> for Stmt {
    fn from(note: Note) -> Self {
        Stmt::Note(note)
    }
}

/// `if c { .. } else if d { .. } else { .. }`.
#[derive(Clone, Debug, PartialEq)]
pub struct IfChain {
    /// Condition and body of the `if` and each `else if`, in order.
    pub branches: Vec<(Value, Vec<Stmt>)>,
    pub otherwise: Option<Vec<Stmt>>,
}

impl IfChain {
    pub fn new(cond: Value, body: impl IntoIterator<Item = Stmt>) -> Self {
        IfChain {
            branches: vec![(cond, body.into_iter().collect())],
            otherwise: None,
        }
    }

    /// `if value == nil { .. }`, or `!= nil` when `want_nil` is false.
    pub fn nil_check(value: &Value, want_nil: bool, body: impl IntoIterator<Item = Stmt>) -> Self {
        let cond = if want_nil {
            value.equal(Value::nil())
        } else {
            value.not_equal(Value::nil())
        };
        IfChain::new(cond, body)
    }

    #[must_use]
    pub fn else_if(mut self, cond: Value, body: impl IntoIterator<Item = Stmt>) -> Self {
        self.branches.push((cond, body.into_iter().collect()));
        self
    }

    #[must_use]
    pub fn otherwise(mut self, body: impl IntoIterator<Item = Stmt>) -> Self {
        self.otherwise = Some(body.into_iter().collect());
        self
    }
}

/// `for key, value := range over { .. }`.
///
/// A missing key with a present value renders as `_`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForRange {
    pub key: Option<Value>,
    pub value: Option<Value>,
    pub over: Value,
    pub body: Vec<Stmt>,
}

impl ForRange {
    pub fn new(over: Value) -> Self {
        ForRange {
            key: None,
            value: None,
            over,
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn key(mut self, key: Value) -> Self {
        self.key = Some(key);
        self
    }

    #[must_use]
    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn c(mut self, stmt: impl Into<Stmt>) -> Self {
        self.body.push(stmt.into());
        self
    }
}
