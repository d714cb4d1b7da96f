//! Decoder configuration.

/// Which files a directory walk picks up.
///
/// Hidden directories, `testdata` and `vendor` are always skipped. A file
/// named explicitly is always loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Load `_test.go` files found while walking directories.
    pub include_tests: bool,
}

impl DecoderOptions {
    pub fn new() -> Self {
        DecoderOptions::default()
    }

    #[must_use]
    pub fn with_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    pub(crate) fn accepts_file(&self, file_name: &str) -> bool {
        file_name.ends_with(".go") && (self.include_tests || !file_name.ends_with("_test.go"))
    }

    pub(crate) fn accepts_dir(dir_name: &str) -> bool {
        !(dir_name.starts_with('.') || matches!(dir_name, "testdata" | "vendor"))
    }
}
