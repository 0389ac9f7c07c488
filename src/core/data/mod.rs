//! Core data types shared by every extraction stage.
//!
//! ## Module Structure
//!
//! - `comment_style`: CommentStyle and the language table (CommentStyleTable)
//! - `source`: SourceFile, the immutable input of one extraction pass
//! - `line`: Tokenizer output (TaggedLine, CommentLine)
//! - `annotation`: Extracted records (Annotation, AnnotationKind, AnchorContext)
//! - `warning`: Advisory warnings (Warning, WarningKind)

pub mod annotation;
pub mod comment_style;
pub mod line;
pub mod source;
pub mod warning;

pub use annotation::{AnchorContext, Annotation, AnnotationKind, BodyLine, MarkerKeyword};
pub use comment_style::{
    BlockDelimiters, CommentStyle, CommentStyleTable, FALLBACK_LEADERS, ResolvedStyle,
    UNKNOWN_LANGUAGE,
};
pub use line::{CommentLine, TaggedLine};
pub use source::SourceFile;
pub use warning::{Warning, WarningKind};
