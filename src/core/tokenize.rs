//! Comment tokenizer.
//!
//! Tags every physical line of a [`SourceFile`] as a comment, code, or blank line.
//!
//! A line is a comment when its first non-whitespace characters are a registered leader
//! (tried in priority order) or the opening delimiter of a block comment. Lines inside an
//! open block comment are comment lines too, up to and including the line holding the
//! closing delimiter. A leader appearing after code on the same line does not make the
//! line a comment.
//!
//! When a block comment closes and another opens later on the same line, the block stays
//! open for the following lines. Only the first comment on such a line contributes text.

use crate::core::data::{BlockDelimiters, CommentLine, CommentStyle, SourceFile, TaggedLine};

/// Splits source lines into [`TaggedLine`]s using one language's [`CommentStyle`].
pub struct CommentTokenizer<'s> {
    style: &'s CommentStyle,
}

impl<'s> CommentTokenizer<'s> {
    pub fn new(style: &'s CommentStyle) -> Self {
        Self { style }
    }

    /// Tag every line of `file`, in order.
    pub fn tokenize<'a>(&self, file: &'a SourceFile) -> Vec<TaggedLine<'a>> {
        let mut in_block = false;

        file.lines()
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                let (tagged, still_open) = self.tag_line(idx + 1, raw, in_block);
                in_block = still_open;
                tagged
            })
            .collect()
    }

    /// Tag one line. Returns the tag and whether a block comment is open afterwards.
    fn tag_line<'a>(&self, line: usize, raw: &'a str, in_block: bool) -> (TaggedLine<'a>, bool) {
        if in_block && let Some(block) = &self.style.block {
            return tag_block_interior(line, raw, block);
        }

        let trimmed = raw.trim_start();
        if trimmed.is_empty() {
            return (TaggedLine::Blank { line }, false);
        }
        let indent = raw.len() - trimmed.len();

        if let Some(block) = &self.style.block
            && trimmed.starts_with(block.open.as_str())
        {
            let start = indent + block.open.len();
            return match raw[start..].find(block.close.as_str()) {
                Some(end) => (
                    comment_line(line, raw, start, start + end, block.open.len()),
                    reopens(&raw[start + end + block.close.len()..], block),
                ),
                None => (
                    comment_line(line, raw, start, raw.len(), block.open.len()),
                    true,
                ),
            };
        }

        if let Some(leader) = self.style.match_leader(trimmed) {
            let start = indent + leader.len();
            return (
                comment_line(line, raw, start, raw.len(), leader.len()),
                false,
            );
        }

        (TaggedLine::Code { line, text: raw }, false)
    }
}

/// Tag a line while a block comment is open.
///
/// The comment text ends at the closing delimiter. A single leading `*` decoration
/// (` * text`) is dropped.
fn tag_block_interior<'a>(
    line: usize,
    raw: &'a str,
    block: &BlockDelimiters,
) -> (TaggedLine<'a>, bool) {
    let (end, still_open) = match raw.find(block.close.as_str()) {
        Some(pos) => (pos, reopens(&raw[pos + block.close.len()..], block)),
        None => (raw.len(), true),
    };

    let segment = &raw[..end];
    let mut start = segment.len() - segment.trim_start().len();
    let rest = &segment[start..];
    if let Some(after) = rest.strip_prefix('*')
        && (after.is_empty() || after.starts_with(char::is_whitespace))
    {
        start += 1;
    }

    (comment_line(line, raw, start, end, 0), still_open)
}

/// True if `rest` (the text after a closing delimiter) opens a block comment it does not close.
fn reopens(rest: &str, block: &BlockDelimiters) -> bool {
    rest.rfind(block.open.as_str())
        .is_some_and(|pos| !rest[pos + block.open.len()..].contains(block.close.as_str()))
}

fn comment_line(
    line: usize,
    raw: &str,
    start: usize,
    end: usize,
    leader_len: usize,
) -> TaggedLine<'_> {
    let segment = &raw[start..end];
    let text = segment.trim();
    let column = if text.is_empty() {
        start
    } else {
        start + (segment.len() - segment.trim_start().len())
    };

    TaggedLine::Comment(CommentLine {
        line,
        text,
        column,
        leader_len,
    })
}
