//! Conversion between byte offsets and line/character positions.
//!
//! Characters are counted in UTF-16 code units. Only lines containing
//! non-ASCII characters carry extra bookkeeping.

use rustc_hash::FxHashMap;
use text_size::{TextRange, TextSize};

use super::{Position, Span};

/// A non-ASCII character inside a line, relative to the line start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WideChar {
    start: TextSize,
    len: TextSize,
}

impl WideChar {
    fn wide_len(&self) -> u32 {
        if u32::from(self.len) == 4 { 2 } else { 1 }
    }
}

/// Maps byte offsets of one text to positions and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line
    line_starts: Vec<TextSize>,
    /// Non-ASCII characters per line
    wide_chars: FxHashMap<u32, Vec<WideChar>>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        let mut wide_chars: FxHashMap<u32, Vec<WideChar>> = FxHashMap::default();
        let mut line = 0u32;
        let mut line_start = TextSize::new(0);

        for (offset, c) in text.char_indices() {
            let offset = TextSize::new(offset as u32);
            if c == '\n' {
                line += 1;
                line_start = offset + TextSize::of(c);
                line_starts.push(line_start);
                continue;
            }
            if !c.is_ascii() {
                wide_chars.entry(line).or_default().push(WideChar {
                    start: offset - line_start,
                    len: TextSize::of(c),
                });
            }
        }

        Self {
            line_starts,
            wide_chars,
            len: TextSize::of(text),
        }
    }

    /// Number of lines (a trailing newline opens one more, empty line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let utf8_col = offset - self.line_starts[line];
        let line = line as u32;
        Position::new(line, self.utf8_to_utf16_col(line, utf8_col))
    }

    /// Byte offset of a position.
    ///
    /// A character past the end of its line clamps to the end of that line;
    /// a line past the end of the text clamps to the end of the text.
    pub fn offset(&self, position: Position) -> TextSize {
        let Some(&line_start) = self.line_starts.get(position.line as usize) else {
            return self.len;
        };
        let line_end = self
            .line_starts
            .get(position.line as usize + 1)
            .map(|&next| next - TextSize::of('\n'))
            .unwrap_or(self.len);
        let col = self.utf16_to_utf8_col(position.line, position.character);
        (line_start + col).min(line_end)
    }

    /// Span of a byte range.
    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }

    fn utf8_to_utf16_col(&self, line: u32, col: TextSize) -> u32 {
        let mut res: u32 = col.into();
        if let Some(chars) = self.wide_chars.get(&line) {
            for c in chars {
                if c.start >= col {
                    break;
                }
                res -= u32::from(c.len) - c.wide_len();
            }
        }
        res
    }

    fn utf16_to_utf8_col(&self, line: u32, mut col: u32) -> TextSize {
        if let Some(chars) = self.wide_chars.get(&line) {
            for c in chars {
                if col > u32::from(c.start) {
                    col += u32::from(c.len) - c.wide_len();
                    // A column between the two halves of a surrogate pair
                    // snaps past the character
                    col = col.max(u32::from(c.start + c.len));
                } else {
                    break;
                }
            }
        }
        col.into()
    }
}
