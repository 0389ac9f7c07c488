//! Annotation extraction engine.
//!
//! ## Module Structure
//!
//! - `data`: Shared types (SourceFile, CommentStyleTable, Annotation, Warning)
//! - `tokenize`: Tags each physical line as comment, code, or blank
//! - `classify`: Classifies one comment line (marker, block opener/closer, prose)
//! - `assemble`: Folds classified lines into annotations (the block state machine)
//! - `anchor`: Binds each annotation to the next code line
//! - `extract`: Per-file pipeline entry points
//! - `file_scanner`: File discovery
//! - `context`: Scan orchestration and the parallel per-file merge

pub mod anchor;
pub mod assemble;
pub mod classify;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod tokenize;

pub use context::{FileExtraction, ScanContext, ScanOutcome};
pub use data::{
    AnchorContext, Annotation, AnnotationKind, CommentStyle, CommentStyleTable, MarkerKeyword,
    SourceFile, Warning, WarningKind,
};
pub use extract::{Extraction, extract, extract_with_style, extract_with_table};
