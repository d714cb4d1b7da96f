//! Renderer
//!
//! Single-pass pretty-printer from IR to Go source. Every IR node kind is
//! handled by an exhaustive `match`, so adding a variant to the IR is a compile
//! error here until it is rendered.
//!
//! # Design
//!
//! The renderer owns a [`RenderContext`] for cursor state and borrows the
//! pass's [`ImportTable`]: whenever a named type or qualified identifier from
//! another package is written, its alias is looked up (and the import
//! registered) at that moment.
//!
//! # Modules
//!
//! - `types`: type expressions
//! - `values`: expressions and zero values
//! - `stmts`: statements and blocks
//! - `decls`: functions, struct/interface/type declarations, notes

mod decls;
mod stmts;
mod types;
mod values;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use gosmith_ir::{Decl, Stmt, Type, Value};

use crate::context::RenderContext;
use crate::emitter::{Emitter, StringEmitter};
use crate::imports::ImportTable;

/// Renderer for one pass over one output file.
pub struct Renderer<'a, E: Emitter = StringEmitter> {
    ctx: RenderContext<E>,
    imports: &'a mut ImportTable,
}

impl<'a> Renderer<'a, StringEmitter> {
    pub fn new(imports: &'a mut ImportTable) -> Self {
        Renderer {
            ctx: RenderContext::new(),
            imports,
        }
    }

    /// The rendered text, exactly as emitted.
    pub fn finish(self) -> String {
        self.ctx.into_output()
    }
}

impl<'a, E: Emitter> Renderer<'a, E> {
    pub fn with_emitter(emitter: E, imports: &'a mut ImportTable) -> Self {
        Renderer {
            ctx: RenderContext::with_emitter(emitter),
            imports,
        }
    }

    pub fn context(&mut self) -> &mut RenderContext<E> {
        &mut self.ctx
    }

    /// Package qualifier for a named type or identifier from `pkg`.
    fn qualifier(&mut self, pkg: &str) -> Option<String> {
        self.imports.alias(pkg)
    }
}

/// Render a top-level declaration.
pub fn render_decl(decl: &Decl, imports: &mut ImportTable) -> String {
    let mut renderer = Renderer::new(imports);
    renderer.decl(decl);
    renderer.finish()
}

/// Render an expression.
pub fn render_value(value: &Value, imports: &mut ImportTable) -> String {
    let mut renderer = Renderer::new(imports);
    renderer.value(value);
    renderer.finish()
}

/// Render a type expression.
pub fn render_type(ty: &Type, imports: &mut ImportTable) -> String {
    let mut renderer = Renderer::new(imports);
    renderer.ty(ty);
    renderer.finish()
}

/// Render a statement at indentation level zero.
pub fn render_stmt(stmt: &Stmt, imports: &mut ImportTable) -> String {
    let mut renderer = Renderer::new(imports);
    renderer.stmt(stmt);
    renderer.finish()
}
