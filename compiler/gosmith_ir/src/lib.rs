//! Intermediate representation for generated Go code.
//!
//! Three layers, each built from the one before:
//!
//! - [`ty`]: the type model (basic, named, pointer/slice chains, composites,
//!   struct and interface literals).
//! - [`value`]: expression trees with type-aware construction and precedence.
//! - [`decl`] and [`stmt`]: functions, type declarations and function bodies.
//!
//! Trees are plain owned values. Build them on one call stack, then hand them
//! read-only to the renderer in `gosmith_fmt`.

pub mod decl;
mod error;
pub mod note;
pub mod stmt;
pub mod ty;
pub mod value;

pub use decl::{Arg, Decl, Field, Func, Interface, Receiver, Struct, TypeDecl};
pub use error::IrError;
pub use note::{Note, NoteKind};
pub use stmt::{ForRange, IfChain, Stmt};
pub use ty::{Basic, ChanDir, Kind, Named, Signature, Type, TypeNode};
pub use value::{BinaryOp, Literal, UnaryOp, Value, ValueKind};
