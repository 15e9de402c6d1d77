use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::EditError;
use crate::types::{Position, Range};

/// Read access to the host's text buffer.
///
/// Lines are addressed without their terminator and columns are counted in
/// grapheme clusters. The engine re-reads lines on every motion step, so
/// implementations should not assume results are cached.
pub trait TextOps {
    // Basic queries
    fn line_count(&self) -> u32;
    fn line_text(&self, line: u32) -> Cow<'_, str>; // without the line break

    fn line_len(&self, line: u32) -> u32 {
        grapheme_len(&self.line_text(line))
    }

    fn clamp(&self, pos: Position) -> Position {
        let last_line = self.line_count().saturating_sub(1);
        let line = pos.line.min(last_line);
        let col = pos.col.min(self.line_len(line));
        Position { line, col }
    }

    // Text extraction for the delete register; lines are joined with '\n'
    fn slice_to_string(&self, range: Range) -> String {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end);
        if end <= start {
            return String::new();
        }
        if start.line == end.line {
            return grapheme_slice(&self.line_text(start.line), start.col, end.col).to_owned();
        }

        let mut out = String::new();
        let first = self.line_text(start.line);
        out.push_str(grapheme_slice(&first, start.col, u32::MAX));
        for line in start.line + 1..end.line {
            out.push('\n');
            out.push_str(&self.line_text(line));
        }
        out.push('\n');
        out.push_str(grapheme_slice(&self.line_text(end.line), 0, end.col));
        out
    }
}

/// Mutating access to the host's editor surface.
///
/// The engine positions the cursor explicitly after every edit it makes, so
/// implementations only need to keep the cursor sensible for
/// [`type_native`](TextEdit::type_native) and
/// [`replace_prev_char_native`](TextEdit::replace_prev_char_native).
pub trait TextEdit: TextOps {
    fn cursor(&self) -> Position;
    /// Moves the caret (collapsing any selection) and scrolls it into view.
    fn set_cursor(&mut self, pos: Position);

    /// True when the host has a non-empty selection.
    fn has_selection(&self) -> bool {
        false
    }

    fn delete(&mut self, range: Range) -> Result<(), EditError>;
    fn insert_text(&mut self, at: Position, text: &str) -> Result<(), EditError>;
    fn replace(&mut self, range: Range, text: &str) -> Result<(), EditError>;

    // Insert-mode passthrough to the host's own typing primitives
    fn type_native(&mut self, text: &str) -> Result<(), EditError>;
    fn replace_prev_char_native(&mut self, text: &str, replace_count: u32)
    -> Result<(), EditError>;
}

pub(crate) fn grapheme_len(s: &str) -> u32 {
    u32::try_from(s.graphemes(true).count()).unwrap_or(u32::MAX)
}

/// Sub-slice of `s` between two grapheme columns, clamped to its length.
pub(crate) fn grapheme_slice(s: &str, from: u32, to: u32) -> &str {
    let byte_at = |col: u32| {
        s.grapheme_indices(true)
            .nth(col as usize)
            .map_or(s.len(), |(idx, _)| idx)
    };
    let start = byte_at(from);
    let end = byte_at(to).max(start);
    &s[start..end]
}
