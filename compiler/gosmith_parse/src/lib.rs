//! Recursive descent parser for the declaration level of Go source.
//!
//! Produces a [`SourceFile`] holding the package clause, imports, type
//! declarations and function signatures. Everything the decoder has no use
//! for (function bodies, `var` and `const` declarations) is skipped by bracket
//! matching rather than parsed, so any syntactically balanced body is accepted.

pub mod ast;
mod cursor;
mod error;
mod grammar;


pub use ast::{
    ChanDir, FieldDecl, FuncDecl, FuncType, ImportSpec, InterfaceElem, Param, SourceFile,
    TypeExpr, TypeSpec,
};
pub use cursor::Cursor;
pub use error::ParseError;

use gosmith_lexer::TokenList;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }
}

/// Lex and parse one Go file.
#[tracing::instrument(level = "trace", skip_all)]
pub fn parse_file(source: &str) -> Result<SourceFile, ParseError> {
    let tokens = gosmith_lexer::lex(source)?;
    let file = Parser::new(&tokens).parse_file()?;
    tracing::trace!(
        package = %file.package,
        types = file.types.len(),
        funcs = file.funcs.len(),
        "parsed file"
    );
    Ok(file)
}

/// Parse a standalone type expression, e.g. `map[string][]*pkg.T`.
pub fn parse_type(source: &str) -> Result<TypeExpr, ParseError> {
    let tokens = gosmith_lexer::lex(source)?;
    let mut parser = Parser::new(&tokens);
    let ty = parser.parse_type()?;
    parser.cursor.eat(&gosmith_lexer::TokenKind::Semicolon);
    if !parser.cursor.is_at_end() {
        return Err(parser.cursor.error("end of input"));
    }
    Ok(ty)
}
