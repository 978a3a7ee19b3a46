//! Edit descriptions handed to the incremental reparser.

use rowan::{TextRange, TextSize};

use crate::base::{LineIndex, Position, Span};

/// One replacement of a text range, described in both byte offsets and
/// line/character positions.
///
/// `new_end` is derived from the inserted text itself: its byte length for the
/// offset, its line breaks and UTF-16 length of the last line for the
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEdit {
    pub start: TextSize,
    pub old_end: TextSize,
    pub new_end: TextSize,
    pub start_position: Position,
    pub old_end_position: Position,
    pub new_end_position: Position,
}

impl InputEdit {
    /// Describe replacing `span` of the text indexed by `index` with `text`.
    pub fn new(index: &LineIndex, span: Span, text: &str) -> Self {
        let start = index.offset(span.start);
        let old_end = index.offset(span.end).max(start);
        // Clamped positions keep offsets and positions consistent
        let start_position = index.position(start);
        let old_end_position = index.position(old_end);

        Self {
            start,
            old_end,
            new_end: start + TextSize::of(text),
            start_position,
            old_end_position,
            new_end_position: advance(start_position, text),
        }
    }

    /// Byte range replaced in the old text
    pub fn old_range(&self) -> TextRange {
        TextRange::new(self.start, self.old_end)
    }

    /// Byte range of the inserted text in the new text
    pub fn new_range(&self) -> TextRange {
        TextRange::new(self.start, self.new_end)
    }

    /// Apply this edit to `text`, returning the edited text.
    pub fn apply(&self, text: &str, inserted: &str) -> String {
        let mut result = String::with_capacity(text.len() + inserted.len());
        result.push_str(&text[..usize::from(self.start)]);
        result.push_str(inserted);
        result.push_str(&text[usize::from(self.old_end)..]);
        result
    }
}

/// Position reached after writing `text` starting at `start`
fn advance(start: Position, text: &str) -> Position {
    match text.rfind('\n') {
        Some(last_newline) => {
            let lines = text.matches('\n').count() as u32;
            let tail = &text[last_newline + 1..];
            Position::new(start.line + lines, tail.encode_utf16().count() as u32)
        }
        None => Position::new(
            start.line,
            start.character + text.encode_utf16().count() as u32,
        ),
    }
}
