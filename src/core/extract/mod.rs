//! Annotation extraction for a single source file.
//!
//! Runs the pipeline: tokenize → classify/assemble → associate anchors. Every entry
//! point is pure and total. Malformed input degrades into [`Warning`]s, never errors.

use serde::Serialize;
use tracing::debug;

use crate::core::{
    anchor::ContextAssociator,
    assemble::BlockAssembler,
    data::{Annotation, CommentStyle, CommentStyleTable, SourceFile, Warning},
    tokenize::CommentTokenizer,
};


/// Result of extracting one file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Extraction {
    /// Annotations in source order, each with its anchor resolved.
    pub annotations: Vec<Annotation>,
    pub warnings: Vec<Warning>,
    /// The file's language tag had no comment style; the fallback leaders were used.
    pub style_fallback: bool,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.warnings.is_empty()
    }
}

/// Extract annotations using the built-in language table.
pub fn extract(file: &SourceFile) -> Extraction {
    extract_with_table(file, CommentStyleTable::builtin())
}

/// Extract annotations, resolving the file's language tag against `table`.
pub fn extract_with_table(file: &SourceFile, table: &CommentStyleTable) -> Extraction {
    let resolved = table.resolve(file.language());
    if resolved.fallback {
        debug!(
            file = file.path(),
            language = file.language(),
            "no comment style for language, using fallback leaders"
        );
    }

    Extraction {
        style_fallback: resolved.fallback,
        ..extract_with_style(file, resolved.style)
    }
}

/// Extract annotations with caller-supplied comment leaders.
pub fn extract_with_style(file: &SourceFile, style: &CommentStyle) -> Extraction {
    let lines = CommentTokenizer::new(style).tokenize(file);
    let assembly = BlockAssembler::assemble(file.path(), &lines);
    let associator = ContextAssociator::new(&lines);

    let annotations: Vec<Annotation> = assembly
        .annotations
        .into_iter()
        .map(|annotation| associator.associate(annotation))
        .collect();

    debug!(
        file = file.path(),
        annotations = annotations.len(),
        warnings = assembly.warnings.len(),
        "extracted"
    );

    Extraction {
        annotations,
        warnings: assembly.warnings,
        style_fallback: false,
    }
}
