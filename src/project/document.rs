//! One open buffer: its text, its syntax tree and the records derived from it.

use tracing::trace;

use crate::base::{LineIndex, Span};
use crate::hir::{self, CallbackImplementation, Dependency, FunctionDefinition, Variable, VisibleSymbols};
use crate::parser::{InputEdit, Parse, SourceFile, SyntaxError, SyntaxNode, parse, parse_incremental};

/// One edit sent by the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentChange {
    /// Replaced range; `None` replaces the whole text
    pub range: Option<Span>,
    pub text: String,
}

impl ContentChange {
    /// Replace the whole document.
    pub fn full(text: impl Into<String>) -> Self {
        Self {
            range: None,
            text: text.into(),
        }
    }

    /// Replace `range` with `text`.
    pub fn ranged(range: Span, text: impl Into<String>) -> Self {
        Self {
            range: Some(range),
            text: text.into(),
        }
    }
}

/// A parsed document.
///
/// Only the tree is kept incrementally; functions, variables and includes are
/// recomputed from it on every call.
#[derive(Clone, Debug)]
pub struct Document {
    text: String,
    line_index: LineIndex,
    parse: Parse,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        let text = content.into();
        Self {
            line_index: LineIndex::new(&text),
            parse: parse(&text),
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Root of the current syntax tree.
    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn source_file(&self) -> SourceFile {
        SourceFile(self.parse.syntax())
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    /// Apply edits in order, each against the text left by the previous one.
    ///
    /// Overlapping or out-of-order ranges are not detected.
    pub fn apply_changes(&mut self, changes: &[ContentChange]) {
        for change in changes {
            self.apply_change(change);
        }
    }

    fn apply_change(&mut self, change: &ContentChange) {
        let Some(range) = change.range else {
            trace!(len = change.text.len(), "full text replacement");
            *self = Document::new(change.text.clone());
            return;
        };

        let edit = InputEdit::new(&self.line_index, range, &change.text);
        trace!(
            start = ?edit.start_position,
            old_end = ?edit.old_end_position,
            new_end = ?edit.new_end_position,
            "incremental edit"
        );
        let text = edit.apply(&self.text, &change.text);
        self.parse = parse_incremental(&text, &self.parse, &edit);
        self.line_index = LineIndex::new(&text);
        self.text = text;
    }

    pub fn functions(&self) -> Vec<FunctionDefinition> {
        hir::function_definitions(&self.source_file(), &self.line_index)
    }

    pub fn callbacks(&self) -> Vec<CallbackImplementation> {
        hir::callback_implementations(&self.source_file(), &self.line_index)
    }

    pub fn prototypes(&self) -> Vec<FunctionDefinition> {
        hir::function_prototypes(&self.source_file(), &self.line_index)
    }

    pub fn variables(&self) -> Vec<Variable> {
        hir::global_variables(&self.source_file(), &self.line_index)
    }

    pub fn dependencies(&self) -> Vec<Dependency> {
        hir::dependencies(&self.source_file(), &self.line_index)
    }

    /// Everything this document declares itself.
    pub fn symbols(&self) -> VisibleSymbols {
        VisibleSymbols::of_file(&self.source_file(), &self.line_index)
    }
}
