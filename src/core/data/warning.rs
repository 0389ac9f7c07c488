use std::fmt;

use serde::Serialize;

/// Malformed-input conditions the extractor recovers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A block reached a code line or end of file before its closer.
    /// The partial block is still emitted.
    UnterminatedBlock,
    /// A `}` or `TODOS.END` with no open block.
    StrayCloser,
    /// A block closed with no interior lines. Nothing is emitted.
    EmptyBlock,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnterminatedBlock => write!(f, "unterminated-block"),
            WarningKind::StrayCloser => write!(f, "stray-closer"),
            WarningKind::EmptyBlock => write!(f, "empty-block"),
        }
    }
}

/// Advisory warning produced while extracting one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub file: String,
    /// Line of the stray closer, or the opening line of the malformed block.
    pub line: usize,
}

impl Warning {
    pub fn new(kind: WarningKind, file: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            file: file.into(),
            line,
        }
    }
}
