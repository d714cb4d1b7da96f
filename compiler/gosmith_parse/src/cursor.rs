//! Token cursor for navigating the token stream.
//!
//! Provides token access, lookahead, consumption and the comment lookups the
//! grammar uses to attach docs.

use gosmith_lexer::{Token, TokenKind, TokenList};

use crate::ParseError;

/// Cursor over a [`TokenList`].
///
/// Invariant: the position is always valid; the last token is `Eof` and the
/// cursor never advances past it.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor { tokens, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        let tokens: &'a TokenList = self.tokens;
        &tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    pub fn line(&self) -> u32 {
        self.current().line
    }

    /// Kind of the token `n` places ahead; `Eof` past the end.
    pub fn peek_kind(&self, n: usize) -> &'a TokenKind {
        static EOF: TokenKind = TokenKind::Eof;
        self.tokens.get(self.pos + n).map_or(&EOF, |t| &t.kind)
    }

    /// Whether the current token is `kind`. Only meaningful for kinds
    /// without a payload.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    pub fn is_at_end(&self) -> bool {
        self.check(&TokenKind::Eof)
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    pub fn expect_ident(&mut self) -> Result<String, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name.clone())
            }
            _ => Err(self.error("identifier")),
        }
    }

    /// Consume a statement terminator. A closing `)` or `}` also terminates
    /// and is left in place.
    pub fn expect_terminator(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon)
            || self.check(&TokenKind::RParen)
            || self.check(&TokenKind::RBrace)
            || self.is_at_end()
        {
            Ok(())
        } else {
            Err(self.error("`;` or newline"))
        }
    }

    /// An "expected X, found <current>" error at the current token.
    pub fn error(&self, expected: &'static str) -> ParseError {
        ParseError::Expected {
            expected,
            found: self.current_kind().to_string(),
            line: self.line(),
        }
    }

    /// Raw text of the doc comment group above the current token.
    pub fn doc(&self) -> Vec<String> {
        self.tokens
            .leading(self.pos)
            .iter()
            .map(|c| c.text.clone())
            .collect()
    }

    /// Same-line comment after the most recently consumed token.
    pub fn trailing_comment(&self) -> Option<String> {
        let prev = self.pos.checked_sub(1)?;
        self.tokens.trailing(prev).map(|c| c.text.clone())
    }

    /// Skip a bracketed region starting at the current opening token, up to
    /// and including its matching close.
    pub fn skip_balanced(&mut self) -> Result<(), ParseError> {
        let line = self.line();
        let open = match self.current_kind() {
            TokenKind::LParen => "(",
            TokenKind::LBracket => "[",
            TokenKind::LBrace => "{",
            _ => return Err(self.error("`(`, `[` or `{`")),
        };
        let mut depth = 0usize;
        loop {
            match self.current_kind() {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return Ok(());
                    }
                }
                TokenKind::Eof => return Err(ParseError::Unclosed { open, line }),
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip to the end of the current statement: the next `;` outside any
    /// brackets, or an unmatched closing bracket (left in place).
    pub fn skip_statement(&mut self) -> Result<(), ParseError> {
        loop {
            match self.current_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.skip_balanced()?;
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace | TokenKind::Eof => {
                    return Ok(());
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}
