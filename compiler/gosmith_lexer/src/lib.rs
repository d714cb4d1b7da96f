//! Go Lexer
//!
//! Tokenizes Go source with logos, then applies the language's automatic
//! semicolon insertion: a newline (or a block comment spanning one) after an
//! identifier, literal, `break`/`continue`/`fallthrough`/`return`, `++`/`--`
//! or a closing bracket ends the statement.
//!
//! # Comments
//!
//! Comments never reach the token stream. They are kept in a side table of the
//! [`TokenList`]; each token records the comment group ending on the line
//! directly above it (its doc comment) and a comment starting on the line it
//! ends on (its trailing comment).

mod keywords;
mod lex_error;
mod raw_token;
mod token;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use logos::Logos;

pub use lex_error::{LexError, LexErrorKind};
pub use token::{Comment, Span, Token, TokenKind, TokenList};

use raw_token::RawToken;

/// Byte offset to 1-based line lookup.
struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        LineIndex {
            newlines: source
                .bytes()
                .enumerate()
                .filter_map(|(i, b)| (b == b'\n').then_some(i))
                .collect(),
        }
    }

    fn line(&self, offset: usize) -> u32 {
        let line = self.newlines.partition_point(|&nl| nl < offset) + 1;
        u32::try_from(line).unwrap_or(u32::MAX)
    }
}

/// Comment group still waiting for the token it documents.
#[derive(Clone, Copy)]
struct PendingGroup {
    start: usize,
    end_line: u32,
}

struct Lexer<'src> {
    lines: LineIndex,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    group: Option<PendingGroup>,
    source: &'src str,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Lexer {
            lines: LineIndex::new(source),
            tokens: Vec::new(),
            comments: Vec::new(),
            group: None,
            source,
        }
    }

    fn run(mut self) -> Result<TokenList, LexError> {
        let mut raw = RawToken::lexer(self.source);
        while let Some(result) = raw.next() {
            let span = raw.span();
            let slice = raw.slice();
            let Ok(token) = result else {
                return Err(LexError {
                    kind: LexErrorKind::classify(slice),
                    line: self.lines.line(span.start),
                    span,
                });
            };
            match token {
                RawToken::Newline => self.end_line(span.start),
                RawToken::LineComment => self.comment(slice, span),
                RawToken::BlockComment => {
                    let end = span.end;
                    self.comment(slice, span);
                    if slice.contains('\n') {
                        self.end_line(end);
                    }
                }
                other => {
                    if let Some(kind) = cook(other, slice) {
                        self.push(kind, span);
                    }
                }
            }
        }

        let end = self.source.len();
        self.end_line(end);
        self.push(TokenKind::Eof, end..end);
        Ok(TokenList::new(self.tokens, self.comments))
    }

    /// Insert a semicolon at `offset` if the previous token ends a statement.
    fn end_line(&mut self, offset: usize) {
        if self.tokens.last().is_some_and(|t| t.kind.ends_statement()) {
            let line = self.lines.line(offset);
            self.tokens
                .push(Token::new(TokenKind::Semicolon, offset..offset, line));
        }
    }

    fn last_token_end_line(&self) -> Option<u32> {
        let last = self.tokens.last()?;
        if last.span.is_empty() {
            return Some(last.line);
        }
        Some(self.lines.line(last.span.end - 1))
    }

    fn comment(&mut self, text: &str, span: Span) {
        let line = self.lines.line(span.start);
        let end_line = self.lines.line(span.end.saturating_sub(1));
        let index = self.comments.len();
        self.comments.push(Comment {
            text: text.to_owned(),
            line,
            end_line,
        });

        let trailing = self.group.is_none()
            && self.last_token_end_line() == Some(line)
            && self.tokens.last().is_some_and(|t| t.trailing.is_none());
        if trailing {
            if let Some(last) = self.tokens.last_mut() {
                last.trailing = Some(index);
            }
            return;
        }

        self.group = match self.group {
            Some(group) if line <= group.end_line + 1 => Some(PendingGroup { end_line, ..group }),
            _ => Some(PendingGroup {
                start: index,
                end_line,
            }),
        };
    }

    fn push(&mut self, kind: TokenKind, span: Span) {
        let line = self.lines.line(span.start);
        let mut token = Token::new(kind, span, line);
        if let Some(group) = self.group.take() {
            if group.end_line + 1 == line {
                token.leading = group.start..self.comments.len();
            }
        }
        self.tokens.push(token);
    }
}

/// Tokenize `source`. Fails on the first character sequence that is not a
/// Go token.
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    Lexer::new(source).run()
}

/// Token kind for a raw token; `None` for trivia.
fn cook(raw: RawToken, slice: &str) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::Ident => {
            keywords::lookup(slice).unwrap_or_else(|| TokenKind::Ident(slice.to_owned()))
        }
        RawToken::Int => TokenKind::Int(slice.to_owned()),
        RawToken::Float => TokenKind::Float(slice.to_owned()),
        RawToken::String => TokenKind::String(slice.to_owned()),
        RawToken::RawString => TokenKind::RawString(slice.to_owned()),
        RawToken::Char => TokenKind::Char(slice.to_owned()),
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::ShlAssign => TokenKind::ShlAssign,
        RawToken::ShrAssign => TokenKind::ShrAssign,
        RawToken::AndNotAssign => TokenKind::AndNotAssign,
        RawToken::AddAssign => TokenKind::AddAssign,
        RawToken::SubAssign => TokenKind::SubAssign,
        RawToken::MulAssign => TokenKind::MulAssign,
        RawToken::DivAssign => TokenKind::DivAssign,
        RawToken::ModAssign => TokenKind::ModAssign,
        RawToken::AndAssign => TokenKind::AndAssign,
        RawToken::OrAssign => TokenKind::OrAssign,
        RawToken::XorAssign => TokenKind::XorAssign,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::AndNot => TokenKind::AndNot,
        RawToken::LAnd => TokenKind::LAnd,
        RawToken::LOr => TokenKind::LOr,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Le => TokenKind::Le,
        RawToken::Ge => TokenKind::Ge,
        RawToken::Inc => TokenKind::Inc,
        RawToken::Dec => TokenKind::Dec,
        RawToken::Define => TokenKind::Define,
        RawToken::Arrow => TokenKind::Arrow,
        RawToken::Assign => TokenKind::Assign,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Newline | RawToken::LineComment | RawToken::BlockComment => return None,
    };
    Some(kind)
}
