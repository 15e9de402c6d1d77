//! Trigger tables and the incremental parser for pending normal-mode input.
//!
//! Input is re-parsed from scratch on every keystroke. Each parse ends in
//! one of three [`Resolution`]s: the command is complete, the input is a
//! valid prefix that needs more keys, or the input can never become a
//! command.

use crate::motion::{Motion, RepeatedMotion};
use crate::operator::Operator;

/// Outcome of interpreting pending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A command ran; the pending input is consumed.
    Matched,
    /// A valid prefix; keep the pending input and wait.
    NeedsMore,
    /// Not a command; discard the pending input and beep.
    Invalid,
}

pub const MOTIONS: &[(char, Motion)] = &[
    ('w', Motion::NextWordStart),
    ('e', Motion::NextWordEnd),
    ('$', Motion::EndOfLine),
    ('0', Motion::StartOfLine),
    ('h', Motion::Left),
    ('j', Motion::Down),
    ('k', Motion::Up),
    ('l', Motion::Right),
];

pub const OPERATORS: &[(char, Operator)] = &[
    ('x', Operator::DeleteCharUnderCursor),
    ('i', Operator::Insert),
    ('a', Operator::Append),
    ('A', Operator::AppendEndOfLine),
    ('d', Operator::DeleteTo),
    ('c', Operator::Change),
    ('p', Operator::Put),
    ('r', Operator::Replace),
];

/// Looks up a motion whose trigger is exactly `key`.
pub fn find_motion(key: &str) -> Option<Motion> {
    let mut chars = key.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return None;
    };
    MOTIONS
        .iter()
        .find(|(trigger, _)| *trigger == ch)
        .map(|(_, motion)| *motion)
}

pub fn find_operator(ch: char) -> Option<Operator> {
    OPERATORS
        .iter()
        .find(|(trigger, _)| *trigger == ch)
        .map(|(_, operator)| *operator)
}

/// Pending input split into its repeat count and the command text after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counted<'a> {
    pub count: u32,
    pub rest: &'a str,
}

/// Strips the longest `[1-9][0-9]*` prefix. A leading `0` never starts a
/// count, so `"0"` stays the start-of-line motion.
pub fn split_count(input: &str) -> Counted<'_> {
    let digits = if input.starts_with(|c: char| matches!(c, '1'..='9')) {
        input
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(input.len())
    } else {
        0
    };

    let count = input[..digits].bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    });
    Counted {
        count: if digits == 0 { 1 } else { count },
        rest: &input[digits..],
    }
}

/// The argument of an operator that takes a motion (`d`, `c`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionArg {
    Motion(RepeatedMotion),
    /// The operator's own trigger repeated (`dd`, `c3c`): act on whole lines.
    Linewise(u32),
    NeedsMore,
    Invalid,
}

/// Resolves `args` for an operator triggered by `trigger` and run with
/// `count`. Counts on both sides multiply, so `2d3w` moves six words.
pub fn resolve_motion_arg(trigger: char, count: u32, args: &str) -> MotionArg {
    let Counted {
        count: inner,
        rest,
    } = split_count(args);
    if rest.is_empty() {
        return MotionArg::NeedsMore;
    }
    let total = count.saturating_mul(inner);

    let mut chars = rest.chars();
    if let (Some(ch), None) = (chars.next(), chars.next())
        && ch == trigger
    {
        return MotionArg::Linewise(total);
    }
    match find_motion(rest) {
        Some(motion) => MotionArg::Motion(motion.repeat(total)),
        None => MotionArg::Invalid,
    }
}
