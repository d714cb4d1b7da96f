//! Render Context
//!
//! Cursor state for a single render pass: indentation depth, whether the
//! cursor sits at the start of a line, and whether output is currently inline
//! (function literal bodies rendered on one line).
//!
//! Indentation is written lazily: the first [`RenderContext::emit`] on a fresh
//! line emits the tabs, so blank lines never carry trailing whitespace.

use crate::emitter::{Emitter, StringEmitter};

pub struct RenderContext<E: Emitter = StringEmitter> {
    emitter: E,
    indent: usize,
    at_line_start: bool,
    inline: bool,
}

impl RenderContext<StringEmitter> {
    pub fn new() -> Self {
        Self::with_emitter(StringEmitter::new())
    }

    /// Finish the pass, returning the text with a single trailing newline.
    pub fn finalize(mut self) -> String {
        self.emitter.ensure_trailing_newline();
        self.emitter.output()
    }

    /// Finish the pass, returning the text as emitted.
    pub fn into_output(self) -> String {
        self.emitter.output()
    }
}

impl Default for RenderContext<StringEmitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Emitter> RenderContext<E> {
    pub fn with_emitter(emitter: E) -> Self {
        RenderContext {
            emitter,
            indent: 0,
            at_line_start: true,
            inline: false,
        }
    }

    pub fn emit(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            self.emitter.emit_indent(self.indent);
            self.at_line_start = false;
        }
        self.emitter.emit(text);
    }

    pub fn emit_space(&mut self) {
        self.emit(" ");
    }

    /// Line break, or nothing in inline mode.
    pub fn newline(&mut self) {
        if self.inline {
            return;
        }
        self.emitter.emit_newline();
        self.at_line_start = true;
    }

    /// A line with nothing on it.
    pub fn blank_line(&mut self) {
        if !self.at_line_start {
            self.newline();
        }
        self.newline();
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    /// Switch inline mode, returning the previous setting.
    pub fn set_inline(&mut self, inline: bool) -> bool {
        std::mem::replace(&mut self.inline, inline)
    }

    /// Run `f` with inline mode switched on, restoring the previous mode after.
    pub fn inline_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.set_inline(true);
        let result = f(self);
        self.set_inline(previous);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_is_lazy() {
        let mut ctx = RenderContext::new();
        ctx.emit("{");
        ctx.indent();
        ctx.newline();
        ctx.newline();
        ctx.emit("x");
        ctx.dedent();
        ctx.newline();
        ctx.emit("}");
        assert_eq!(ctx.into_output(), "{\n\n\tx\n}");
    }

    #[test]
    fn inline_scope_suppresses_newlines() {
        let mut ctx = RenderContext::new();
        ctx.inline_scope(|ctx| {
            ctx.emit("a");
            ctx.newline();
            ctx.emit("b");
        });
        assert!(!ctx.is_inline());
        ctx.newline();
        assert!(ctx.at_line_start());
        assert_eq!(ctx.into_output(), "ab\n");
    }

    #[test]
    fn blank_line_after_content() {
        let mut ctx = RenderContext::new();
        ctx.emit("package x");
        ctx.blank_line();
        ctx.emit("import ()");
        assert_eq!(ctx.finalize(), "package x\n\nimport ()\n");
    }
}
