//! Comments attached to declarations, fields, arguments and values.

/// How a note is rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum NoteKind {
    /// `// text` on its own line before the annotated item.
    #[default]
    Line,
    /// ` /* text */` after the annotated item.
    Block,
    /// Kept in the IR but never rendered.
    Suppressed,
}

/// A comment, stored without its comment markers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Note {
    pub kind: NoteKind,
    pub text: String,
}

impl Note {
    pub fn line(text: impl Into<String>) -> Self {
        Note {
            kind: NoteKind::Line,
            text: text.into(),
        }
    }

    pub fn block(text: impl Into<String>) -> Self {
        Note {
            kind: NoteKind::Block,
            text: text.into(),
        }
    }

    pub fn suppressed(text: impl Into<String>) -> Self {
        Note {
            kind: NoteKind::Suppressed,
            text: text.into(),
        }
    }

    /// Build a note from raw comment source, stripping `//` or `/* */`.
    ///
    /// A `//` comment becomes a line note with one leading space removed;
    /// a block comment keeps its inner text trimmed.
    pub fn from_comment(raw: &str) -> Self {
        if let Some(body) = raw.strip_prefix("//") {
            return Note::line(body.strip_prefix(' ').unwrap_or(body).trim_end());
        }
        if let Some(body) = raw.strip_prefix("/*") {
            let body = body.strip_suffix("*/").unwrap_or(body);
            return Note::block(body.trim());
        }
        Note::line(raw.trim())
    }

    /// Rendered lines of a line note; multi-line text yields one `//` per line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_markers() {
        let note = Note::from_comment("// Node is a list cell.");
        assert_eq!(note, Note::line("Node is a list cell."));
    }

    #[test]
    fn keeps_leading_indentation_past_first_space() {
        let note = Note::from_comment("//   indented");
        assert_eq!(note.text, "  indented");
    }

    #[test]
    fn strips_block_markers() {
        let note = Note::from_comment("/* deprecated */");
        assert_eq!(note, Note::block("deprecated"));
    }

    #[test]
    fn multi_line_text_splits() {
        let note = Note::line("first\nsecond");
        assert_eq!(note.lines().collect::<Vec<_>>(), vec!["first", "second"]);
    }
}
