//! Block assembler.
//!
//! Folds the tagged line stream of one file into [`Annotation`]s. The fold state is an
//! explicit [`BlockState`] owned by the assembler value, so concurrent per-file passes
//! share nothing.
//!
//! # Transitions
//!
//! ```text
//! Idle          + Marker                -> Idle           emit marker
//! Idle          + TODO: {               -> InBrace(1)
//! Idle          + TODOS.START           -> InCollection
//! Idle          + } / TODOS.END         -> Idle           stray-closer warning
//! InBrace(d)    + TODO: { / `{`         -> InBrace(d + 1) append
//! InBrace(d)    + }                     -> InBrace(d - 1) append, or emit at depth 0
//! InBrace(d)    + other comment         -> InBrace(d)     append
//! InCollection  + TODOS.END             -> Idle           emit
//! InCollection  + other comment         -> InCollection   append verbatim
//! open block    + code line / EOF       -> Idle           emit partial + unterminated warning
//! open block    + blank line            -> unchanged
//! ```
//!
//! A block with no interior lines is never emitted; it produces a warning instead.

use tracing::trace;

use crate::core::{
    classify::{AnnotationClassifier, Classification},
    data::{
        Annotation, AnnotationKind, BodyLine, CommentLine, TaggedLine, Warning, WarningKind,
    },
};

/// A block whose closer has not been seen yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    pub start_line: usize,
    /// Last comment line consumed by the block.
    pub last_line: usize,
    pub body: Vec<BodyLine>,
}

impl OpenBlock {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            last_line: start_line,
            body: Vec::new(),
        }
    }

    fn push(&mut self, comment: &CommentLine<'_>) {
        self.body.push(BodyLine {
            line: comment.line,
            column: comment.column,
            text: comment.text.to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Idle,
    /// Inside `TODO: {`. `depth` counts unmatched opening braces, including the first.
    InBrace { block: OpenBlock, depth: usize },
    InCollection(OpenBlock),
}

/// Output of assembling one file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assembly {
    /// Annotations in source order, without anchors.
    pub annotations: Vec<Annotation>,
    pub warnings: Vec<Warning>,
}

/// Stateful merge pass over one file's tagged lines.
#[derive(Debug)]
pub struct BlockAssembler<'f> {
    file: &'f str,
    state: BlockState,
    annotations: Vec<Annotation>,
    warnings: Vec<Warning>,
}

impl<'f> BlockAssembler<'f> {
    pub fn new(file: &'f str) -> Self {
        Self {
            file,
            state: BlockState::Idle,
            annotations: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Assemble a whole file.
    pub fn assemble(file: &'f str, lines: &[TaggedLine<'_>]) -> Assembly {
        lines
            .iter()
            .fold(Self::new(file), |assembler, line| assembler.step(line))
            .finish()
    }

    pub fn state(&self) -> &BlockState {
        &self.state
    }

    /// Consume one tagged line and return the advanced assembler.
    pub fn step(mut self, tagged: &TaggedLine<'_>) -> Self {
        let state = std::mem::take(&mut self.state);

        self.state = match (state, tagged) {
            (BlockState::Idle, _) => self.step_idle(tagged),
            (open, TaggedLine::Blank { .. }) => open,
            (open, TaggedLine::Code { line, .. }) => {
                trace!(file = self.file, line, "code line reached inside open block");
                self.close_unterminated(open);
                BlockState::Idle
            }
            (BlockState::InBrace { block, depth }, TaggedLine::Comment(comment)) => {
                self.step_brace(block, depth, comment)
            }
            (BlockState::InCollection(block), TaggedLine::Comment(comment)) => {
                self.step_collection(block, comment)
            }
        };

        self
    }

    /// Finish at end of file, closing any open block as unterminated.
    pub fn finish(mut self) -> Assembly {
        let state = std::mem::take(&mut self.state);
        self.close_unterminated(state);

        Assembly {
            annotations: self.annotations,
            warnings: self.warnings,
        }
    }

    fn step_idle(&mut self, tagged: &TaggedLine<'_>) -> BlockState {
        let TaggedLine::Comment(comment) = tagged else {
            return BlockState::Idle;
        };

        match AnnotationClassifier::classify(comment.text) {
            Classification::Marker {
                keyword,
                text,
                offset,
            } => {
                self.annotations.push(Annotation::marker(
                    keyword,
                    BodyLine {
                        line: comment.line,
                        column: comment.column + offset,
                        text: text.to_string(),
                    },
                ));
                BlockState::Idle
            }
            Classification::BraceOpen => {
                trace!(file = self.file, line = comment.line, "brace block opened");
                BlockState::InBrace {
                    block: OpenBlock::new(comment.line),
                    depth: 1,
                }
            }
            Classification::CollectionOpen => {
                trace!(file = self.file, line = comment.line, "collection block opened");
                BlockState::InCollection(OpenBlock::new(comment.line))
            }
            Classification::BraceClose | Classification::CollectionClose => {
                self.warn(WarningKind::StrayCloser, comment.line);
                BlockState::Idle
            }
            Classification::Prose => BlockState::Idle,
        }
    }

    fn step_brace(
        &mut self,
        mut block: OpenBlock,
        depth: usize,
        comment: &CommentLine<'_>,
    ) -> BlockState {
        block.last_line = comment.line;

        let depth = match AnnotationClassifier::classify(comment.text) {
            Classification::BraceClose if depth == 1 => {
                self.emit(AnnotationKind::BraceBlock, block, comment.line);
                return BlockState::Idle;
            }
            Classification::BraceClose => depth - 1,
            Classification::BraceOpen => depth + 1,
            Classification::Prose if opens_nested_brace(comment.text) => depth + 1,
            _ => depth,
        };

        block.push(comment);
        BlockState::InBrace { block, depth }
    }

    fn step_collection(&mut self, mut block: OpenBlock, comment: &CommentLine<'_>) -> BlockState {
        block.last_line = comment.line;

        if AnnotationClassifier::classify(comment.text) == Classification::CollectionClose {
            self.emit(AnnotationKind::CollectionBlock, block, comment.line);
            return BlockState::Idle;
        }

        block.push(comment);
        BlockState::InCollection(block)
    }

    fn emit(&mut self, kind: AnnotationKind, block: OpenBlock, end_line: usize) {
        if block.body.is_empty() {
            self.warn(WarningKind::EmptyBlock, block.start_line);
            return;
        }

        self.annotations.push(Annotation::block(
            kind,
            block.start_line,
            end_line,
            block.body,
        ));
    }

    /// Emit a partially accumulated block, bounded at the last comment line it consumed.
    fn close_unterminated(&mut self, state: BlockState) {
        let (kind, block) = match state {
            BlockState::Idle => return,
            BlockState::InBrace { block, .. } => (AnnotationKind::BraceBlock, block),
            BlockState::InCollection(block) => (AnnotationKind::CollectionBlock, block),
        };

        self.warn(WarningKind::UnterminatedBlock, block.start_line);
        if !block.body.is_empty() {
            let end_line = block.last_line;
            self.annotations.push(Annotation::block(
                kind,
                block.start_line,
                end_line,
                block.body,
            ));
        }
    }

    fn warn(&mut self, kind: WarningKind, line: usize) {
        trace!(file = self.file, line, %kind, "malformed annotation block");
        self.warnings.push(Warning::new(kind, self.file, line));
    }
}

/// A lone `{` opens a nested level inside a brace block. Braces inside prose do not.
fn opens_nested_brace(text: &str) -> bool {
    text == "{"
}
