//! Context association.
//!
//! Binds an annotation to the nearest code line that follows it. Blank lines and comment
//! lines are skipped, so several consecutive markers share the same anchor.

use crate::core::data::{AnchorContext, Annotation, TaggedLine};

/// Nearest-following-code lookup over one file's tagged lines.
pub struct ContextAssociator<'a> {
    lines: &'a [TaggedLine<'a>],
    /// `next_code[i]` is the index of the first code line at or after index `i`.
    /// One extra slot so a lookup past the last line yields `None`.
    next_code: Vec<Option<usize>>,
}

impl<'a> ContextAssociator<'a> {
    pub fn new(lines: &'a [TaggedLine<'a>]) -> Self {
        let mut next_code = vec![None; lines.len() + 1];
        for idx in (0..lines.len()).rev() {
            next_code[idx] = if lines[idx].is_code() {
                Some(idx)
            } else {
                next_code[idx + 1]
            };
        }

        Self { lines, next_code }
    }

    /// First code line strictly after `end_line` (1-indexed), or `None` at end of file.
    pub fn anchor_for(&self, end_line: usize) -> Option<AnchorContext> {
        // Line `end_line + 1` lives at index `end_line`.
        let idx = (*self.next_code.get(end_line)?)?;
        match self.lines[idx] {
            TaggedLine::Code { line, text } => Some(AnchorContext {
                line,
                text: text.to_string(),
            }),
            _ => None,
        }
    }

    pub fn associate(&self, annotation: Annotation) -> Annotation {
        let anchor = self.anchor_for(annotation.end_line);
        annotation.with_anchor(anchor)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::{
        data::{CommentStyleTable, SourceFile},
        tokenize::CommentTokenizer,
    };

    fn anchors(source: &str, end_lines: &[usize]) -> Vec<Option<(usize, String)>> {
        let file = SourceFile::new("a.py", "python", source);
        let style = CommentStyleTable::builtin().resolve("python").style;
        let lines = CommentTokenizer::new(style).tokenize(&file);
        let associator = ContextAssociator::new(&lines);

        end_lines
            .iter()
            .map(|&end| associator.anchor_for(end).map(|a| (a.line, a.text)))
            .collect()
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let source = "# TODO: a\n\n# note\n    return x\n";
        assert_eq!(
            anchors(source, &[1]),
            vec![Some((4, "    return x".to_string()))]
        );
    }

    #[test]
    fn test_consecutive_markers_share_anchor() {
        let source = "# TODO: a\n# TODO: b\nend";
        assert_eq!(
            anchors(source, &[1, 2]),
            vec![Some((3, "end".to_string())), Some((3, "end".to_string()))]
        );
    }

    #[test]
    fn test_none_at_eof() {
        let source = "x = 1\n# TODO: last\n\n# trailing";
        assert_eq!(anchors(source, &[2, 4, 10]), vec![None, None, None]);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let file = SourceFile::new("a.py", "python", "# TODO: a\nx = 1");
        let style = CommentStyleTable::builtin().resolve("python").style;
        let lines = CommentTokenizer::new(style).tokenize(&file);
        let associator = ContextAssociator::new(&lines);

        assert_eq!(associator.anchor_for(1), associator.anchor_for(1));
    }
}
