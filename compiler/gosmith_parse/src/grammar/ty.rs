//! Type expressions, signatures, struct and interface bodies.

use gosmith_lexer::TokenKind;
use gosmith_stack::ensure_sufficient_stack;

use super::unquote;
use crate::ast::{ChanDir, FieldDecl, FuncType, InterfaceElem, Param, TypeExpr};
use crate::{ParseError, Parser};

/// A parameter list entry before grouped names are resolved.
struct Entry {
    name: Option<String>,
    ty: Option<TypeExpr>,
    variadic: bool,
}

pub(super) fn starts_type(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident(_)
            | TokenKind::Star
            | TokenKind::LBracket
            | TokenKind::Map
            | TokenKind::Chan
            | TokenKind::Arrow
            | TokenKind::Func
            | TokenKind::Struct
            | TokenKind::Interface
            | TokenKind::LParen
    )
}

impl Parser<'_> {
    pub fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        ensure_sufficient_stack(|| self.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> Result<TypeExpr, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident(_) => self.type_name(),
            TokenKind::Star => {
                self.cursor.advance();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            TokenKind::LBracket => {
                self.cursor.advance();
                if self.cursor.eat(&TokenKind::RBracket) {
                    return Ok(TypeExpr::Slice(Box::new(self.parse_type()?)));
                }
                let len = self.array_len()?;
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Map => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::LBracket, "`[`")?;
                let key = self.parse_type()?;
                self.cursor.expect(&TokenKind::RBracket, "`]`")?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Chan => {
                self.cursor.advance();
                let dir = if self.cursor.eat(&TokenKind::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Arrow => {
                self.cursor.advance();
                self.cursor.expect(&TokenKind::Chan, "`chan`")?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Func => {
                self.cursor.advance();
                Ok(TypeExpr::Func(Box::new(self.signature()?)))
            }
            TokenKind::Struct => {
                self.cursor.advance();
                self.struct_body()
            }
            TokenKind::Interface => {
                self.cursor.advance();
                self.interface_body()
            }
            TokenKind::LParen => {
                self.cursor.advance();
                let ty = self.parse_type()?;
                self.cursor.expect(&TokenKind::RParen, "`)`")?;
                Ok(ty)
            }
            _ => Err(self.cursor.error("type")),
        }
    }

    /// `Name`, `pkg.Name`, optionally followed by type arguments.
    fn type_name(&mut self) -> Result<TypeExpr, ParseError> {
        let first = self.cursor.expect_ident()?;
        let (pkg, name) = if self.cursor.eat(&TokenKind::Dot) {
            (Some(first), self.cursor.expect_ident()?)
        } else {
            (None, first)
        };

        let mut args = Vec::new();
        if self.cursor.check(&TokenKind::LBracket)
            && !matches!(self.cursor.peek_kind(1), TokenKind::RBracket)
        {
            self.cursor.advance();
            loop {
                args.push(self.parse_type()?);
                if !self.cursor.eat(&TokenKind::Comma) || self.cursor.check(&TokenKind::RBracket) {
                    break;
                }
            }
            self.cursor.expect(&TokenKind::RBracket, "`]`")?;
        }
        Ok(TypeExpr::Name { pkg, name, args })
    }

    /// Source text of an array length, consuming the closing `]`.
    fn array_len(&mut self) -> Result<String, ParseError> {
        let line = self.cursor.line();
        let mut len = String::new();
        let mut depth = 0usize;
        loop {
            match self.cursor.current_kind() {
                TokenKind::RBracket if depth == 0 => {
                    self.cursor.advance();
                    return Ok(len);
                }
                TokenKind::Eof => return Err(ParseError::Unclosed { open: "[", line }),
                TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            len.push_str(self.cursor.advance().kind.as_str());
        }
    }

    /// Union of type terms, `~int | ~string | T`. Returns the terms and
    /// whether any carried a `~`.
    pub(crate) fn union(&mut self) -> Result<(Vec<TypeExpr>, bool), ParseError> {
        let mut terms = Vec::new();
        let mut approx = false;
        loop {
            approx |= self.cursor.eat(&TokenKind::Tilde);
            terms.push(self.parse_type()?);
            if !self.cursor.eat(&TokenKind::Pipe) {
                return Ok((terms, approx));
            }
        }
    }

    /// Parameters and optional results.
    pub(crate) fn signature(&mut self) -> Result<FuncType, ParseError> {
        let params = self.params()?;
        let results = if self.cursor.check(&TokenKind::LParen) {
            self.params()?
        } else if starts_type(self.cursor.current_kind()) {
            vec![Param {
                name: None,
                ty: self.parse_type()?,
                variadic: false,
            }]
        } else {
            Vec::new()
        };
        Ok(FuncType { params, results })
    }

    /// A parenthesised parameter list, with grouped names (`a, b int`)
    /// expanded to one [`Param`] each.
    pub(crate) fn params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.cursor.expect(&TokenKind::LParen, "`(`")?;
        let mut entries = Vec::new();
        loop {
            self.skip_semicolons();
            if self.cursor.eat(&TokenKind::RParen) {
                break;
            }
            entries.push(self.param_entry()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                self.skip_semicolons();
                self.cursor.expect(&TokenKind::RParen, "`,` or `)`")?;
                break;
            }
        }
        Ok(resolve_groups(entries))
    }

    fn param_entry(&mut self) -> Result<Entry, ParseError> {
        if self.cursor.check_ident() {
            if self.name_precedes_type() {
                let name = self.cursor.expect_ident()?;
                let (ty, variadic) = self.param_type()?;
                return Ok(Entry {
                    name: Some(name),
                    ty: Some(ty),
                    variadic,
                });
            }
            if matches!(
                self.cursor.peek_kind(1),
                TokenKind::Comma | TokenKind::RParen
            ) {
                let name = self.cursor.expect_ident()?;
                return Ok(Entry {
                    name: Some(name),
                    ty: None,
                    variadic: false,
                });
            }
        }
        let (ty, variadic) = self.param_type()?;
        Ok(Entry {
            name: None,
            ty: Some(ty),
            variadic,
        })
    }

    fn param_type(&mut self) -> Result<(TypeExpr, bool), ParseError> {
        let variadic = self.cursor.eat(&TokenKind::Ellipsis);
        Ok((self.parse_type()?, variadic))
    }

    /// Whether the identifier at the cursor is a name followed by a type,
    /// rather than the start of a type itself.
    fn name_precedes_type(&self) -> bool {
        match self.cursor.peek_kind(1) {
            TokenKind::Ellipsis => true,
            TokenKind::LBracket => self.bracket_then_type(1),
            kind => starts_type(kind),
        }
    }

    /// For a `[` at offset `at`: `[]T` and `[N]T` are types following a
    /// name; `[A, B]` not followed by a type is an instantiation.
    fn bracket_then_type(&self, at: usize) -> bool {
        if matches!(self.cursor.peek_kind(at + 1), TokenKind::RBracket) {
            return true;
        }
        let mut depth = 0usize;
        let mut n = at;
        loop {
            match self.cursor.peek_kind(n) {
                TokenKind::LBracket | TokenKind::LParen | TokenKind::LBrace => depth += 1,
                TokenKind::RBracket | TokenKind::RParen | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return starts_type(self.cursor.peek_kind(n + 1));
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            n += 1;
        }
    }

    fn struct_body(&mut self) -> Result<TypeExpr, ParseError> {
        self.cursor.expect(&TokenKind::LBrace, "`{`")?;
        let mut fields = Vec::new();
        loop {
            self.skip_semicolons();
            if self.cursor.eat(&TokenKind::RBrace) {
                break;
            }
            fields.push(self.field_decl()?);
            self.cursor.expect_terminator()?;
        }
        Ok(TypeExpr::Struct(fields))
    }

    fn field_decl(&mut self) -> Result<FieldDecl, ParseError> {
        let doc = self.cursor.doc();
        let mut names = Vec::new();
        let named = self.cursor.check_ident()
            && (matches!(self.cursor.peek_kind(1), TokenKind::Comma) || self.name_precedes_type());
        if named {
            loop {
                names.push(self.cursor.expect_ident()?);
                if !self.cursor.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        let ty = self.parse_type()?;
        let tag = match self.cursor.current_kind() {
            TokenKind::String(lit) | TokenKind::RawString(lit) => {
                self.cursor.advance();
                Some(unquote(lit))
            }
            _ => None,
        };
        Ok(FieldDecl {
            names,
            ty,
            tag,
            doc,
            comment: self.cursor.trailing_comment(),
        })
    }

    fn interface_body(&mut self) -> Result<TypeExpr, ParseError> {
        self.cursor.expect(&TokenKind::LBrace, "`{`")?;
        let mut elems = Vec::new();
        loop {
            self.skip_semicolons();
            if self.cursor.eat(&TokenKind::RBrace) {
                break;
            }
            let doc = self.cursor.doc();
            let elem = if self.cursor.check_ident()
                && matches!(self.cursor.peek_kind(1), TokenKind::LParen)
            {
                let name = self.cursor.expect_ident()?;
                let signature = self.signature()?;
                InterfaceElem::Method {
                    name,
                    signature,
                    doc,
                    comment: self.cursor.trailing_comment(),
                }
            } else {
                let (mut terms, approx) = self.union()?;
                if terms.len() == 1 && !approx {
                    InterfaceElem::Embed(terms.remove(0))
                } else {
                    InterfaceElem::Union(terms)
                }
            };
            elems.push(elem);
            self.cursor.expect_terminator()?;
        }
        Ok(TypeExpr::Interface(elems))
    }
}

/// Resolve grouped parameter names.
///
/// If any entry has both a name and a type, bare identifiers are names that
/// share the type of the next typed entry (`a, b int`). Otherwise every bare
/// identifier is itself a type (`func(int, string)`).
fn resolve_groups(entries: Vec<Entry>) -> Vec<Param> {
    let named = entries.iter().any(|e| e.name.is_some() && e.ty.is_some());
    if !named {
        return entries
            .into_iter()
            .filter_map(|e| {
                let ty = match (e.name, e.ty) {
                    (_, Some(ty)) => ty,
                    (Some(name), None) => TypeExpr::ident(name),
                    (None, None) => return None,
                };
                Some(Param {
                    name: None,
                    ty,
                    variadic: e.variadic,
                })
            })
            .collect();
    }

    let mut params = Vec::with_capacity(entries.len());
    let mut shared: Option<(TypeExpr, bool)> = None;
    for entry in entries.into_iter().rev() {
        match entry.ty {
            Some(ty) => {
                shared = Some((ty.clone(), entry.variadic));
                params.push(Param {
                    name: entry.name,
                    ty,
                    variadic: entry.variadic,
                });
            }
            None => {
                if let Some((ty, variadic)) = &shared {
                    params.push(Param {
                        name: entry.name,
                        ty: ty.clone(),
                        variadic: *variadic,
                    });
                }
            }
        }
    }
    params.reverse();
    params
}
