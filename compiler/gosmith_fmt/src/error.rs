use std::path::PathBuf;

/// Failure while writing a rendered file.
///
/// The formatter variants are reported after the unformatted text has already
/// been written, so the file on disk is always usable.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not run formatter `{program}`: {source}")]
    FormatterSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("formatter `{program}` failed: {stderr}")]
    FormatterFailed { program: String, stderr: String },
}
