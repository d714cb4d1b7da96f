//! Parse error types.

use gosmith_lexer::LexError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token other than the one the grammar requires.
    #[error("line {line}: expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
        line: u32,
    },

    /// Input ended inside a bracketed region being skipped.
    #[error("line {line}: unclosed `{open}`")]
    Unclosed { open: &'static str, line: u32 },
}

impl ParseError {
    /// Source line of the failure.
    pub fn line(&self) -> u32 {
        match self {
            ParseError::Lex(err) => err.line,
            ParseError::Expected { line, .. } | ParseError::Unclosed { line, .. } => *line,
        }
    }
}
