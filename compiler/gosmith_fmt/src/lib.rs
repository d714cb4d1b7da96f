//! Go Source Renderer
//!
//! Turns `gosmith_ir` trees into Go source text.
//!
//! # Architecture
//!
//! Rendering is a single top-down pass. A [`Renderer`] walks declarations,
//! statements, expressions and types with exhaustive matches, writing through
//! a [`RenderContext`] that tracks indentation and inline mode. Package
//! qualifiers are resolved late through the pass's [`ImportTable`], which is
//! then turned into the file's import block by [`SourceFile::render`].
//!
//! # Modules
//!
//! - [`emitter`]: output abstraction
//! - [`context`]: cursor state (indentation, line start, inline mode)
//! - [`imports`]: per-pass import alias table
//! - [`render`]: the renderer proper
//! - [`file`]: whole-file assembly and writing to disk

pub mod context;
pub mod emitter;
mod error;
pub mod file;
pub mod imports;
pub mod render;

pub use context::RenderContext;
pub use emitter::{Emitter, StringEmitter};
pub use error::WriteError;
pub use file::{write_file, RenderOptions, SourceFile, WriteOptions};
pub use imports::ImportTable;
pub use render::{render_decl, render_stmt, render_type, render_value, Renderer};
