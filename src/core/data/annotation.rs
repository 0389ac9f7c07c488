use std::fmt;

use serde::Serialize;

/// Keyword of a single-line marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkerKeyword {
    Todo,
    Fixme,
    Xxx,
}

impl MarkerKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKeyword::Todo => "TODO",
            MarkerKeyword::Fixme => "FIXME",
            MarkerKeyword::Xxx => "XXX",
        }
    }

    /// Parse an exact, case-sensitive keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "TODO" => Some(MarkerKeyword::Todo),
            "FIXME" => Some(MarkerKeyword::Fixme),
            "XXX" => Some(MarkerKeyword::Xxx),
            _ => None,
        }
    }
}

impl fmt::Display for MarkerKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of annotation was found.
///
/// A closed set: every recognized pattern maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "keyword", rename_all = "snake_case")]
pub enum AnnotationKind {
    /// `TODO: text`, `FIXME: text`, `XXX: text`
    Marker(MarkerKeyword),
    /// `TODO: {` ... `}`
    BraceBlock,
    /// `TODOS.START` ... `TODOS.END`
    CollectionBlock,
}

impl AnnotationKind {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            AnnotationKind::Marker(MarkerKeyword::Todo) => "todo",
            AnnotationKind::Marker(MarkerKeyword::Fixme) => "fixme",
            AnnotationKind::Marker(MarkerKeyword::Xxx) => "xxx",
            AnnotationKind::BraceBlock => "todo block",
            AnnotationKind::CollectionBlock => "todo list",
        }
    }

    pub fn is_block(&self) -> bool {
        !matches!(self, AnnotationKind::Marker(_))
    }
}

/// One line of an annotation's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyLine {
    /// Line number (1-indexed).
    pub line: usize,
    /// Byte offset of `text` in the raw line. `raw[..column]` is the stripped prefix.
    pub column: usize,
    pub text: String,
}

/// The nearest code line following an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnchorContext {
    pub line: usize,
    /// Raw text of the code line.
    pub text: String,
}

/// A work-item annotation extracted from comments.
///
/// `end_line >= start_line` always holds. Block annotations never have an empty body;
/// a marker's body is exactly its inline text (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    #[serde(flatten)]
    pub kind: AnnotationKind,
    pub start_line: usize,
    pub end_line: usize,
    pub body: Vec<BodyLine>,
    pub anchor: Option<AnchorContext>,
}

impl Annotation {
    pub(crate) fn marker(keyword: MarkerKeyword, inline: BodyLine) -> Self {
        Self {
            kind: AnnotationKind::Marker(keyword),
            start_line: inline.line,
            end_line: inline.line,
            body: vec![inline],
            anchor: None,
        }
    }

    pub(crate) fn block(
        kind: AnnotationKind,
        start_line: usize,
        end_line: usize,
        body: Vec<BodyLine>,
    ) -> Self {
        debug_assert!(end_line >= start_line);
        debug_assert!(!body.is_empty());
        Self {
            kind,
            start_line,
            end_line,
            body,
            anchor: None,
        }
    }

    pub(crate) fn with_anchor(self, anchor: Option<AnchorContext>) -> Self {
        Self { anchor, ..self }
    }

    /// Inline text of a marker. `None` for blocks.
    pub fn inline_text(&self) -> Option<&str> {
        match self.kind {
            AnnotationKind::Marker(_) => self.body.first().map(|b| b.text.as_str()),
            _ => None,
        }
    }

    pub fn body_text(&self) -> Vec<&str> {
        self.body.iter().map(|b| b.text.as_str()).collect()
    }

    /// Number of physical lines the annotation spans.
    pub fn line_span(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}
