use std::path::Path;

use crate::core::data::comment_style::{CommentStyleTable, UNKNOWN_LANGUAGE};

/// A loaded source file: identifier, language tag and raw physical lines.
///
/// Immutable once constructed. Line numbers are 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: String,
    language: String,
    lines: Vec<String>,
}

impl SourceFile {
    /// Create a source file with an explicit language tag.
    ///
    /// `text` is split with [`str::lines`], so both `\n` and `\r\n` end a line.
    pub fn new(path: impl Into<String>, language: impl Into<String>, text: &str) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
            lines: text.lines().map(String::from).collect(),
        }
    }

    /// Create a source file whose language tag is derived from its path.
    ///
    /// Paths the table cannot map get [`UNKNOWN_LANGUAGE`].
    pub fn detect(path: impl Into<String>, text: &str, table: &CommentStyleTable) -> Self {
        let path = path.into();
        let language = table
            .language_for_path(Path::new(&path))
            .unwrap_or(UNKNOWN_LANGUAGE)
            .to_string();
        Self::new(path, language, text)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Raw text of a 1-indexed line.
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
