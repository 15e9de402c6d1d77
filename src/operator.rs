//! Commands that change the buffer, the mode or the delete register.
//!
//! `d` and `c` take a motion argument and report
//! [`Resolution::NeedsMore`] until it is complete; `r` waits for its
//! replacement character. Everything else completes on its trigger key.

use tracing::trace;
use unicode_segmentation::UnicodeSegmentation;

use crate::engine::Engine;
use crate::error::Result;
use crate::keymap::{self, MotionArg, Resolution};
use crate::motion::Motion;
use crate::register::DeleteRegister;
use crate::traits::{TextEdit, grapheme_len};
use crate::types::{Mode, Position, Range};

/// Upper bound on the text a single counted put may insert.
pub const MAX_PUT_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `i`
    Insert,
    /// `a`
    Append,
    /// `A`
    AppendEndOfLine,
    /// `x`
    DeleteCharUnderCursor,
    /// `dd`
    DeleteLine,
    /// `d{motion}`
    DeleteTo,
    /// `c{motion}`
    Change,
    /// `p`
    Put,
    /// `r{char}`
    Replace,
}

impl Operator {
    /// Runs the operator with its repeat `count` and whatever input
    /// followed its trigger key.
    pub fn run<B: TextEdit + ?Sized>(
        self,
        engine: &mut Engine,
        buf: &mut B,
        count: u32,
        args: &str,
    ) -> Result<Resolution> {
        let count = count.max(1);
        match self {
            Operator::Insert => {
                engine.set_mode(Mode::Insert);
                Ok(Resolution::Matched)
            }
            Operator::Append => {
                let pos = Motion::Right.run(&*buf, buf.cursor(), engine.motion_state_mut());
                buf.set_cursor(pos);
                engine.set_mode(Mode::Insert);
                Ok(Resolution::Matched)
            }
            Operator::AppendEndOfLine => {
                let pos = Motion::EndOfLine.run(&*buf, buf.cursor(), engine.motion_state_mut());
                buf.set_cursor(pos);
                engine.set_mode(Mode::Insert);
                Ok(Resolution::Matched)
            }
            Operator::DeleteCharUnderCursor => {
                let from = buf.cursor();
                let to = Motion::Right
                    .repeat(count)
                    .run(&*buf, from, engine.motion_state_mut());
                delete_chars(engine, buf, from, to)?;
                Ok(Resolution::Matched)
            }
            Operator::DeleteLine => delete_lines(engine, buf, count),
            Operator::DeleteTo => delete_or_change(engine, buf, 'd', count, args, false),
            Operator::Change => delete_or_change(engine, buf, 'c', count, args, true),
            Operator::Put => put(engine, buf, count),
            Operator::Replace => replace(buf, count, args),
        }
    }
}

fn delete_or_change<B: TextEdit + ?Sized>(
    engine: &mut Engine,
    buf: &mut B,
    trigger: char,
    count: u32,
    args: &str,
    change: bool,
) -> Result<Resolution> {
    match keymap::resolve_motion_arg(trigger, count, args) {
        MotionArg::NeedsMore => Ok(Resolution::NeedsMore),
        MotionArg::Invalid => Ok(Resolution::Invalid),
        MotionArg::Linewise(lines) if change => change_lines(engine, buf, lines),
        MotionArg::Linewise(lines) => delete_lines(engine, buf, lines),
        MotionArg::Motion(motion) => {
            let from = buf.cursor();
            let to = motion.run(&*buf, from, engine.motion_state_mut());
            delete_chars(engine, buf, from, to)?;
            if change {
                engine.set_mode(Mode::Insert);
            }
            Ok(Resolution::Matched)
        }
    }
}

// Character-wise delete between two positions in either order.
fn delete_chars<B: TextEdit + ?Sized>(
    engine: &mut Engine,
    buf: &mut B,
    from: Position,
    to: Position,
) -> Result<()> {
    let range = Range::between(from, to);
    if range.is_empty() {
        return Ok(());
    }
    let text = buf.slice_to_string(range);
    buf.delete(range)?;
    trace!(target: "vim.edit", op = "delete", line = range.start.line, col = range.start.col, to_line = range.end.line, to_col = range.end.col, "edit");
    engine.set_register(DeleteRegister::charwise(text));
    buf.set_cursor(range.start);
    Ok(())
}

/// Inclusive line span `count` lines long starting at the cursor, clamped to
/// the buffer.
fn line_span<B: TextEdit + ?Sized>(buf: &B, count: u32) -> Option<(u32, u32)> {
    let last_line = buf.line_count().checked_sub(1)?;
    let first = buf.cursor().line.min(last_line);
    let last = first.saturating_add(count - 1).min(last_line);
    Some((first, last))
}

fn delete_lines<B: TextEdit + ?Sized>(
    engine: &mut Engine,
    buf: &mut B,
    count: u32,
) -> Result<Resolution> {
    let Some((first, last)) = line_span(buf, count) else {
        return Ok(Resolution::Invalid);
    };
    let last_end = Position::new(last, buf.line_len(last));
    let lines = buf.slice_to_string(Range::new(Position::new(first, 0), last_end));

    // The break after the last deleted line goes with it, unless there is no
    // line after it. Then the break before the first deleted line goes.
    let (range, cursor) = if last + 1 < buf.line_count() {
        (
            Range::new(Position::new(first, 0), Position::new(last + 1, 0)),
            Position::new(first, 0),
        )
    } else if first > 0 {
        let prev_end = Position::new(first - 1, buf.line_len(first - 1));
        (Range::new(prev_end, last_end), Position::new(first - 1, 0))
    } else {
        (Range::new(Position::ZERO, last_end), Position::ZERO)
    };

    if !range.is_empty() {
        buf.delete(range)?;
    }
    trace!(target: "vim.edit", op = "delete_lines", first, last, "edit");
    engine.set_register(DeleteRegister::linewise(&lines));
    buf.set_cursor(cursor);
    Ok(Resolution::Matched)
}

// `cc`: empties the lines but leaves one blank line to type into.
fn change_lines<B: TextEdit + ?Sized>(
    engine: &mut Engine,
    buf: &mut B,
    count: u32,
) -> Result<Resolution> {
    let Some((first, last)) = line_span(buf, count) else {
        return Ok(Resolution::Invalid);
    };
    let range = Range::new(
        Position::new(first, 0),
        Position::new(last, buf.line_len(last)),
    );
    let lines = buf.slice_to_string(range);
    if !range.is_empty() {
        buf.delete(range)?;
    }
    trace!(target: "vim.edit", op = "change_lines", first, last, "edit");
    engine.set_register(DeleteRegister::linewise(&lines));
    buf.set_cursor(range.start);
    engine.set_mode(Mode::Insert);
    Ok(Resolution::Matched)
}

fn put<B: TextEdit + ?Sized>(engine: &mut Engine, buf: &mut B, count: u32) -> Result<Resolution> {
    let Some(register) = engine.register().filter(|reg| !reg.is_empty()) else {
        return Ok(Resolution::Invalid);
    };
    let too_large = register
        .content
        .len()
        .checked_mul(count as usize)
        .is_none_or(|len| len > MAX_PUT_BYTES);
    if too_large {
        return Ok(Resolution::Invalid);
    }
    let text = register.content.repeat(count as usize);
    let pos = buf.cursor();

    if register.is_whole_line {
        let last_line = buf.line_count().saturating_sub(1);
        let line = pos.line.min(last_line);
        if line < last_line {
            buf.insert_text(Position::new(line + 1, 0), &text)?;
        } else {
            // No line below to insert in front of: start a new one.
            let body = text.strip_suffix('\n').unwrap_or(&text);
            let at = Position::new(line, buf.line_len(line));
            buf.insert_text(at, &format!("\n{body}"))?;
        }
        trace!(target: "vim.edit", op = "put_lines", line, lines = register.line_count(), count, "edit");
        buf.set_cursor(Position::new(line + 1, 0));
    } else {
        let at = Position::new(pos.line, pos.col.saturating_add(1).min(buf.line_len(pos.line)));
        buf.insert_text(at, &text)?;
        trace!(target: "vim.edit", op = "put", line = at.line, col = at.col, count, "edit");
        let cursor = if text.contains('\n') {
            at
        } else {
            Position::new(at.line, at.col + grapheme_len(&text).saturating_sub(1))
        };
        buf.set_cursor(cursor);
    }
    Ok(Resolution::Matched)
}

fn replace<B: TextEdit + ?Sized>(buf: &mut B, count: u32, args: &str) -> Result<Resolution> {
    let Some(replacement) = args.graphemes(true).next() else {
        return Ok(Resolution::NeedsMore);
    };
    let pos = buf.cursor();
    let end = pos.col.saturating_add(count);
    if end > buf.line_len(pos.line) {
        return Ok(Resolution::Invalid);
    }

    let range = Range::new(pos, Position::new(pos.line, end));
    buf.replace(range, &replacement.repeat(count as usize))?;
    trace!(target: "vim.edit", op = "replace", line = pos.line, col = pos.col, count, "edit");
    buf.set_cursor(Position::new(pos.line, end - 1));
    Ok(Resolution::Matched)
}
