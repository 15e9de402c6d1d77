//! Cursor motions.
//!
//! Every motion is a pure position transform over the buffer's current text;
//! the only state it touches is the remembered column in [`MotionState`].

use crate::traits::TextOps;
use crate::types::Position;
use crate::word::{WordCharacters, find_next_word};

/// Per-session memory shared by all motions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionState {
    /// Column vertical motions try to return to. `None` until a motion sets
    /// it.
    pub desired_col: Option<u32>,
    pub word_chars: WordCharacters,
}

impl MotionState {
    pub fn new(word_chars: WordCharacters) -> Self {
        Self {
            desired_col: None,
            word_chars,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    StartOfLine,
    EndOfLine,
    NextWordStart,
    NextWordEnd,
}

impl Motion {
    pub fn run<T: TextOps + ?Sized>(
        self,
        text: &T,
        pos: Position,
        state: &mut MotionState,
    ) -> Position {
        match self {
            Motion::Left => {
                if pos.col > 0 {
                    state.desired_col = Some(pos.col - 1);
                    Position::new(pos.line, pos.col - 1)
                } else {
                    pos
                }
            }
            Motion::Right => {
                // one past the last character is allowed, append relies on it
                if pos.col < text.line_len(pos.line) {
                    state.desired_col = Some(pos.col + 1);
                    Position::new(pos.line, pos.col + 1)
                } else {
                    pos
                }
            }
            Motion::Up => {
                let desired = *state.desired_col.get_or_insert(pos.col);
                if pos.line > 0 {
                    let line = pos.line - 1;
                    Position::new(line, desired.min(text.line_len(line)))
                } else {
                    pos
                }
            }
            Motion::Down => {
                let desired = *state.desired_col.get_or_insert(pos.col);
                if pos.line.saturating_add(1) < text.line_count() {
                    let line = pos.line + 1;
                    Position::new(line, desired.min(text.line_len(line)))
                } else {
                    pos
                }
            }
            Motion::StartOfLine => {
                state.desired_col = None;
                Position::new(pos.line, 0)
            }
            Motion::EndOfLine => {
                state.desired_col = None;
                end_of_line(text, pos)
            }
            Motion::NextWordStart => {
                state.desired_col = None;
                next_word_start(text, pos, &state.word_chars)
            }
            Motion::NextWordEnd => {
                state.desired_col = None;
                next_word_end(text, pos, &state.word_chars)
            }
        }
    }

    pub fn repeat(self, count: u32) -> RepeatedMotion {
        RepeatedMotion {
            motion: self,
            count: count.max(1),
        }
    }
}

/// A motion applied `count` times in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatedMotion {
    pub motion: Motion,
    pub count: u32,
}

impl RepeatedMotion {
    pub fn run<T: TextOps + ?Sized>(
        self,
        text: &T,
        mut pos: Position,
        state: &mut MotionState,
    ) -> Position {
        for _ in 0..self.count {
            let next = self.motion.run(text, pos, state);
            // A motion that did not move will not move on the next step either.
            if next == pos {
                break;
            }
            pos = next;
        }
        pos
    }
}

fn end_of_line<T: TextOps + ?Sized>(text: &T, pos: Position) -> Position {
    Position::new(pos.line, text.line_len(pos.line))
}

// At or past the second-to-last character, w and e wrap to the next line.
fn wrap_at_line_end<T: TextOps + ?Sized>(text: &T, pos: Position) -> Option<Position> {
    if pos.col.saturating_add(1) < text.line_len(pos.line) {
        return None;
    }
    if pos.line.saturating_add(1) < text.line_count() {
        Some(Position::new(pos.line + 1, 0))
    } else {
        Some(pos)
    }
}

fn next_word_start<T: TextOps + ?Sized>(
    text: &T,
    pos: Position,
    chars: &WordCharacters,
) -> Position {
    if let Some(wrapped) = wrap_at_line_end(text, pos) {
        return wrapped;
    }
    let line = text.line_text(pos.line);
    let Some(word) = find_next_word(&line, pos.col, chars) else {
        return end_of_line(text, pos);
    };

    if word.start <= pos.col && pos.col < word.end {
        match find_next_word(&line, word.end, chars) {
            Some(next) => Position::new(pos.line, next.start),
            None => end_of_line(text, pos),
        }
    } else {
        Position::new(pos.line, word.start)
    }
}

fn next_word_end<T: TextOps + ?Sized>(text: &T, pos: Position, chars: &WordCharacters) -> Position {
    if let Some(wrapped) = wrap_at_line_end(text, pos) {
        return wrapped;
    }
    let line = text.line_text(pos.line);
    match find_next_word(&line, pos.col, chars) {
        Some(word) => Position::new(pos.line, word.end),
        None => end_of_line(text, pos),
    }
}
