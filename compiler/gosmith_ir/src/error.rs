//! Construction-time errors.
//!
//! Each variant describes a program that cannot exist: building it is a bug
//! in the caller, reported when the offending node is constructed so that a
//! malformed tree never reaches the renderer.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("`{ty}` does not implement `{interface}`")]
    NotImplemented { ty: String, interface: String },

    #[error("cannot convert `{from}` to `{to}`")]
    NotConvertible { from: String, to: String },

    #[error("`{ty}` has no field `{field}`")]
    UnknownField { ty: String, field: String },

    #[error("`{ty}` has no method `{method}`")]
    UnknownMethod { ty: String, method: String },

    #[error("`{ty}` cannot be indexed")]
    NotIndexable { ty: String },

    #[error("cannot assert `{target}` from `{ty}`")]
    NotAssertable { ty: String, target: String },

    #[error("expected {expected} arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("argument {index}: {source}")]
    Argument {
        index: usize,
        source: Box<IrError>,
    },

    #[error("variadic argument {index}: expected `{expected}`, found `{found}`")]
    VariadicMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("parameter after variadic `{arg}` in `{func}`")]
    VariadicNotLast { func: String, arg: String },
}
