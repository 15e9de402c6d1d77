use std::borrow::Cow;

use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;
use vim_interp::error::EditError;
use vim_interp::traits::{TextEdit, TextOps};
use vim_interp::types::{Position, Range};

/// Rope-backed editor surface with a single caret.
pub struct MockBuffer {
    rope: Rope,
    cursor: Position,
    /// Pretend the host has a non-empty selection.
    pub selection: bool,
    /// Reject every edit with `EditError::ReadOnly`.
    pub read_only: bool,
}

impl MockBuffer {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Position::ZERO,
            selection: false,
            read_only: false,
        }
    }

    pub fn from_lines(lines: &[&str]) -> Self {
        Self::new(&lines.join("\n"))
    }

    pub fn with_cursor(mut self, line: u32, col: u32) -> Self {
        self.cursor = Position { line, col };
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .map(|line| self.line_text(line).into_owned())
            .collect()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    fn char_idx(&self, pos: Position) -> usize {
        let last_line = self.rope.len_lines().saturating_sub(1);
        let line = (pos.line as usize).min(last_line);
        let line_start = self.rope.line_to_char(line);
        let text = self.line_text(line as u32);
        let chars: usize = text
            .graphemes(true)
            .take(pos.col as usize)
            .map(|g| g.chars().count())
            .sum();
        line_start + chars
    }

    fn position_of(&self, char_idx: usize) -> Position {
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let col = self
            .rope
            .slice(line_start..char_idx)
            .to_string()
            .graphemes(true)
            .count();
        Position {
            line: line as u32,
            col: col as u32,
        }
    }

    fn check_writable(&self) -> Result<(), EditError> {
        if self.read_only {
            Err(EditError::ReadOnly)
        } else {
            Ok(())
        }
    }
}

impl TextOps for MockBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_text(&self, line: u32) -> Cow<'_, str> {
        if line as usize >= self.rope.len_lines() {
            return Cow::Borrowed("");
        }
        let mut s = self.rope.line(line as usize).to_string();
        // Remove trailing newline if present
        if s.ends_with('\n') {
            s.pop();
        }
        Cow::Owned(s)
    }
}

impl TextEdit for MockBuffer {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
        self.selection = false;
    }

    fn has_selection(&self) -> bool {
        self.selection
    }

    fn delete(&mut self, range: Range) -> Result<(), EditError> {
        self.check_writable()?;
        let start = self.char_idx(range.start);
        let end = self.char_idx(range.end);
        self.rope.remove(start..end);
        Ok(())
    }

    fn insert_text(&mut self, at: Position, text: &str) -> Result<(), EditError> {
        self.check_writable()?;
        let idx = self.char_idx(at);
        self.rope.insert(idx, text);
        Ok(())
    }

    fn replace(&mut self, range: Range, text: &str) -> Result<(), EditError> {
        self.delete(range)?;
        self.insert_text(range.start, text)
    }

    fn type_native(&mut self, text: &str) -> Result<(), EditError> {
        self.check_writable()?;
        let idx = self.char_idx(self.cursor);
        self.rope.insert(idx, text);
        self.cursor = self.position_of(idx + text.chars().count());
        Ok(())
    }

    fn replace_prev_char_native(
        &mut self,
        text: &str,
        replace_count: u32,
    ) -> Result<(), EditError> {
        self.check_writable()?;
        let end = self.cursor;
        let start = Position {
            line: end.line,
            col: end.col.saturating_sub(replace_count),
        };
        let start_idx = self.char_idx(start);
        let end_idx = self.char_idx(end);
        self.rope.remove(start_idx..end_idx);
        self.rope.insert(start_idx, text);
        self.cursor = self.position_of(start_idx + text.chars().count());
        Ok(())
    }
}
