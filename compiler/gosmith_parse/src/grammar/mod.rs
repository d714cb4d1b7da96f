//! Grammar productions, split by level.
//!
//! - `mod.rs`: the file (package clause, imports, top-level loop)
//! - `item.rs`: type and function declarations
//! - `ty.rs`: type expressions, signatures, struct and interface bodies

mod item;
mod ty;

use gosmith_lexer::TokenKind;

use crate::ast::{ImportSpec, SourceFile};
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub fn parse_file(&mut self) -> Result<SourceFile, ParseError> {
        self.skip_semicolons();
        self.cursor.expect(&TokenKind::Package, "`package`")?;
        let package = self.cursor.expect_ident()?;
        self.cursor.expect_terminator()?;

        let mut file = SourceFile {
            package,
            ..SourceFile::default()
        };
        loop {
            self.skip_semicolons();
            match self.cursor.current_kind() {
                TokenKind::Eof => break,
                TokenKind::Import => self.import_decl(&mut file.imports)?,
                TokenKind::Type => self.type_decl(&mut file.types)?,
                TokenKind::Func => file.funcs.push(self.func_decl()?),
                TokenKind::Var | TokenKind::Const => {
                    self.cursor.advance();
                    self.cursor.skip_statement()?;
                }
                _ => return Err(self.cursor.error("declaration")),
            }
        }
        Ok(file)
    }

    pub(crate) fn skip_semicolons(&mut self) {
        while self.cursor.eat(&TokenKind::Semicolon) {}
    }

    fn import_decl(&mut self, imports: &mut Vec<ImportSpec>) -> Result<(), ParseError> {
        self.cursor.advance();
        if self.cursor.eat(&TokenKind::LParen) {
            loop {
                self.skip_semicolons();
                if self.cursor.eat(&TokenKind::RParen) {
                    break;
                }
                imports.push(self.import_spec()?);
                self.cursor.expect_terminator()?;
            }
        } else {
            imports.push(self.import_spec()?);
        }
        self.cursor.expect_terminator()
    }

    fn import_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let alias = match self.cursor.current_kind() {
            TokenKind::Ident(name) => {
                self.cursor.advance();
                Some(name.clone())
            }
            TokenKind::Dot => {
                self.cursor.advance();
                Some(".".to_owned())
            }
            _ => None,
        };
        match self.cursor.current_kind() {
            TokenKind::String(lit) | TokenKind::RawString(lit) => {
                self.cursor.advance();
                Ok(ImportSpec {
                    alias,
                    path: unquote(lit),
                })
            }
            _ => Err(self.cursor.error("import path")),
        }
    }
}

/// Contents of a string literal. Raw literals are taken verbatim; the common
/// escapes of interpreted literals are resolved and any other escape is kept
/// as written.
pub(crate) fn unquote(lit: &str) -> String {
    if let Some(raw) = lit.strip_prefix('`') {
        return raw.strip_suffix('`').unwrap_or(raw).to_owned();
    }
    let inner = lit.strip_prefix('"').unwrap_or(lit);
    let inner = inner.strip_suffix('"').unwrap_or(inner);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(c @ ('\\' | '"' | '\'')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
