//! Type and function declarations.

use gosmith_lexer::TokenKind;

use super::ty::starts_type;
use crate::ast::{FuncDecl, TypeSpec};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `type Spec` or `type ( Spec; ... )`.
    pub(crate) fn type_decl(&mut self, out: &mut Vec<TypeSpec>) -> Result<(), ParseError> {
        let doc = self.cursor.doc();
        self.cursor.advance();
        if !self.cursor.eat(&TokenKind::LParen) {
            out.push(self.type_spec(doc)?);
            return self.cursor.expect_terminator();
        }
        loop {
            self.skip_semicolons();
            if self.cursor.eat(&TokenKind::RParen) {
                break;
            }
            let doc = self.cursor.doc();
            out.push(self.type_spec(doc)?);
            self.cursor.expect_terminator()?;
        }
        self.cursor.expect_terminator()
    }

    fn type_spec(&mut self, doc: Vec<String>) -> Result<TypeSpec, ParseError> {
        let name = self.cursor.expect_ident()?;
        let type_params = if self.at_type_params() {
            self.type_params()?
        } else {
            Vec::new()
        };
        let alias = self.cursor.eat(&TokenKind::Assign);
        let ty = self.parse_type()?;
        Ok(TypeSpec {
            name,
            type_params,
            alias,
            ty,
            doc,
            comment: self.cursor.trailing_comment(),
        })
    }

    /// `[T any]` after a type name, as opposed to an array length such as
    /// `[N]T`, `[N*2]T` or `[pkg.N]T`. `[P *C]` reads as a type parameter,
    /// as it does in Go.
    fn at_type_params(&self) -> bool {
        if !self.cursor.check(&TokenKind::LBracket)
            || !matches!(self.cursor.peek_kind(1), TokenKind::Ident(_))
        {
            return false;
        }
        match self.cursor.peek_kind(2) {
            TokenKind::Star => matches!(self.cursor.peek_kind(3), TokenKind::Ident(_)),
            TokenKind::Comma | TokenKind::Tilde => true,
            TokenKind::LParen => false,
            kind => starts_type(kind),
        }
    }

    /// Type parameter list; returns the parameter names.
    pub(crate) fn type_params(&mut self) -> Result<Vec<String>, ParseError> {
        self.cursor.expect(&TokenKind::LBracket, "`[`")?;
        let mut names = Vec::new();
        loop {
            names.push(self.cursor.expect_ident()?);
            if self.cursor.eat(&TokenKind::Comma) {
                continue;
            }
            self.union()?;
            if !self.cursor.eat(&TokenKind::Comma) || self.cursor.check(&TokenKind::RBracket) {
                break;
            }
        }
        self.cursor.expect(&TokenKind::RBracket, "`]`")?;
        Ok(names)
    }

    /// `func (recv) Name[T any](params) results { body }`.
    pub(crate) fn func_decl(&mut self) -> Result<FuncDecl, ParseError> {
        let doc = self.cursor.doc();
        self.cursor.advance();

        let recv = if self.cursor.check(&TokenKind::LParen) {
            let line = self.cursor.line();
            let mut params = self.params()?;
            if params.len() != 1 {
                return Err(ParseError::Expected {
                    expected: "a single receiver",
                    found: format!("{} receivers", params.len()),
                    line,
                });
            }
            params.pop()
        } else {
            None
        };

        let name = self.cursor.expect_ident()?;
        if self.cursor.check(&TokenKind::LBracket) {
            self.type_params()?;
        }
        let signature = self.signature()?;
        if self.cursor.check(&TokenKind::LBrace) {
            self.cursor.skip_balanced()?;
        }
        self.cursor.expect_terminator()?;

        Ok(FuncDecl {
            name,
            recv,
            signature,
            doc,
        })
    }
}
