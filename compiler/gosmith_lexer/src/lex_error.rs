use std::ops::Range;

/// What went wrong at a lexing error.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid token")]
    InvalidToken,
    #[error("unterminated string or rune literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
}

impl LexErrorKind {
    /// Best guess at the cause from the text where matching failed.
    pub(crate) fn classify(slice: &str) -> Self {
        if slice.starts_with(['"', '`', '\'']) {
            LexErrorKind::UnterminatedString
        } else if slice.starts_with("/*") {
            LexErrorKind::UnterminatedComment
        } else {
            LexErrorKind::InvalidToken
        }
    }
}

/// A lexing failure with its location.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Range<usize>,
    pub line: u32,
}
