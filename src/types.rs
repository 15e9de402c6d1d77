use serde::{Deserialize, Serialize};

/// A position within a text buffer.
///
/// Positions are zero-indexed and column values are counted in grapheme clusters,
/// not bytes or chars. This ensures correct handling of emoji and combining characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Zero-based line number.
    pub line: u32,
    /// Zero-based column position in grapheme clusters.
    pub col: u32,
}

impl Position {
    /// The origin position (0, 0).
    pub const ZERO: Position = Position { line: 0, col: 0 };

    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// A range of text defined by start and end positions.
///
/// Ranges are half-open intervals [start, end), meaning the start position
/// is included but the end position is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// The start position (inclusive).
    pub start: Position,
    /// The end position (exclusive).
    pub end: Position,
}

impl Range {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Builds a range from two positions in either order.
    pub fn between(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// The current mode of the engine.
///
/// Vim is a modal editor where the same keys perform different
/// actions depending on the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Normal mode - keystrokes are interpreted as commands.
    #[default]
    Normal,
    /// Insert mode - keystrokes are forwarded to the buffer.
    Insert,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
        }
    }

    /// The caret shape the host should draw in this mode.
    pub fn cursor_style(&self) -> CursorStyle {
        match self {
            Mode::Normal => CursorStyle::Block,
            Mode::Insert => CursorStyle::Line,
        }
    }
}

/// Caret shape requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    /// A block covering the character under the cursor (normal mode).
    Block,
    /// A thin line between characters (insert mode).
    Line,
}

bitflags::bitflags! {
    /// Context flags a host can bind keys against.
    ///
    /// For example, a host binds Escape to `clear_input` only while
    /// `HAS_INPUT` is set, and to `go_to_normal_mode` while `NORMAL_MODE`
    /// is clear.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ContextFlags: u8 {
        /// The engine is in normal mode.
        const NORMAL_MODE = 0b01;
        /// A partially typed command is pending.
        const HAS_INPUT   = 0b10;
    }
}

/// Commands emitted by the engine for the host to execute.
///
/// Buffer edits and cursor moves go straight through
/// [`TextEdit`](crate::traits::TextEdit); these cover the presentation
/// side the engine cannot reach on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The mode changed; redraw the caret in this style.
    SetCursorStyle(CursorStyle),
    /// The context flags changed.
    SetContext(ContextFlags),
    /// The pending input was rejected; signal the user.
    Beep,
}
