//! Decoder errors.
//!
//! Only loading fails: an unreadable path or a file that does not parse.
//! Resolution misses are reported as `None` or an empty list instead.

use std::io;
use std::path::PathBuf;

use gosmith_parse::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl DecodeError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> DecodeError {
        let path = path.into();
        move |source| DecodeError::Io { path, source }
    }
}
