/// A physical line whose first non-whitespace characters open a comment.
///
/// Borrows its text from the [`SourceFile`](super::SourceFile) it was tokenized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentLine<'a> {
    /// Line number (1-indexed).
    pub line: usize,
    /// Comment text with the leader removed and surrounding whitespace trimmed.
    pub text: &'a str,
    /// Byte offset in the raw line where `text` begins.
    pub column: usize,
    /// Length of the matched leader (0 for lines inside a block comment).
    pub leader_len: usize,
}

/// One physical line, tagged by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaggedLine<'a> {
    Comment(CommentLine<'a>),
    Code { line: usize, text: &'a str },
    Blank { line: usize },
}

impl TaggedLine<'_> {
    pub fn line(&self) -> usize {
        match self {
            TaggedLine::Comment(comment) => comment.line,
            TaggedLine::Code { line, .. } | TaggedLine::Blank { line } => *line,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, TaggedLine::Code { .. })
    }
}
