use tracing::{debug, trace, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::keymap::{self, Counted, Resolution};
use crate::motion::{MotionState, RepeatedMotion};
use crate::register::DeleteRegister;
use crate::traits::TextEdit;
use crate::types::{Command, ContextFlags, CursorStyle, Mode, Position};
use crate::word::WordCharacters;

const STATUS_PREFIX: &str = "VIM:>";

/// The command interpreter for one editing session.
///
/// Holds only state: the mode, the pending normal-mode input, motion memory
/// and the delete register. Motions and operators live in immutable tables
/// in [`keymap`](crate::keymap).
#[derive(Debug, Clone)]
pub struct Engine {
    mode: Mode,
    input: String,
    motion_state: MotionState,
    register: Option<DeleteRegister>,
    reported_context: ContextFlags,
    reported_style: CursorStyle,
    outbox: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub mode: Mode,
    pub desired_col: Option<u32>,
    pub pending_input: String,
    pub register: Option<DeleteRegister>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.initial_mode = mode;
        self
    }

    pub fn word_separators(mut self, separators: impl Into<String>) -> Self {
        self.config.word_separators = separators.into();
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Engine {
        let mode = self.config.initial_mode;
        Engine {
            mode,
            input: String::new(),
            motion_state: MotionState::new(WordCharacters::new(&self.config.word_separators)),
            register: None,
            reported_context: context_for(mode, false),
            reported_style: mode.cursor_style(),
            outbox: Vec::new(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        EngineBuilder::default().build()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            desired_col: self.motion_state.desired_col,
            pending_input: self.input.clone(),
            register: self.register.clone(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.mode.cursor_style()
    }

    pub fn status_text(&self) -> String {
        match self.mode {
            Mode::Normal if !self.input.is_empty() => format!("{STATUS_PREFIX}{}", self.input),
            mode => format!("{STATUS_PREFIX} -- {} --", mode.as_str()),
        }
    }

    pub fn has_pending_input(&self) -> bool {
        !self.input.is_empty()
    }

    pub fn pending_input(&self) -> &str {
        &self.input
    }

    pub fn context_flags(&self) -> ContextFlags {
        context_for(self.mode, self.has_pending_input())
    }

    pub fn register(&self) -> Option<&DeleteRegister> {
        self.register.as_ref()
    }

    pub fn motion_state(&self) -> &MotionState {
        &self.motion_state
    }

    /// Rebuilds the word classifier after the host's separator setting
    /// changed.
    pub fn set_word_separators(&mut self, separators: &str) {
        self.motion_state.word_chars = WordCharacters::new(separators);
    }

    /// Feeds typed text to the engine.
    ///
    /// In normal mode the text is interpreted one grapheme at a time; if a
    /// grapheme switches to insert mode, the rest of the text is typed into
    /// the buffer. In insert mode the text goes straight to the buffer.
    ///
    /// On error the pending input is discarded and no notifications are
    /// returned; a cursor style or context change that already happened is
    /// reported by the next call.
    pub fn type_text<B: TextEdit + ?Sized>(
        &mut self,
        buf: &mut B,
        text: &str,
    ) -> Result<Vec<Command>> {
        let result = self.type_graphemes(buf, text);
        self.complete(buf, result)
    }

    /// IME-style replacement of the characters before the caret. Only
    /// meaningful in insert mode; ignored in normal mode.
    pub fn replace_prev_char<B: TextEdit + ?Sized>(
        &mut self,
        buf: &mut B,
        text: &str,
        replace_count: u32,
    ) -> Result<Vec<Command>> {
        let result = match self.mode {
            Mode::Insert => buf
                .replace_prev_char_native(text, replace_count)
                .map_err(Into::into),
            Mode::Normal => {
                trace!(target: "vim.input", text, replace_count, "replace_prev_char_ignored");
                Ok(())
            }
        };
        self.complete(buf, result)
    }

    pub fn go_to_normal_mode<B: TextEdit + ?Sized>(&mut self, buf: &mut B) -> Vec<Command> {
        self.set_mode(Mode::Normal);
        self.ensure_normal_mode_position(buf);
        self.sync_context();
        std::mem::take(&mut self.outbox)
    }

    pub fn clear_input(&mut self) -> Vec<Command> {
        self.input.clear();
        self.sync_context();
        std::mem::take(&mut self.outbox)
    }

    /// Keeps the caret on a character in normal mode.
    ///
    /// Insert mode allows the caret one past the last character of a line;
    /// normal mode pulls it back onto the last one. Hosts should also call
    /// this when the user moves the caret themselves.
    pub fn ensure_normal_mode_position<B: TextEdit + ?Sized>(&self, buf: &mut B) {
        if self.mode != Mode::Normal || buf.has_selection() {
            return;
        }
        let pos = buf.cursor();
        let len = buf.line_len(pos.line);
        if len > 0 && pos.col > len - 1 {
            buf.set_cursor(Position::new(pos.line, len - 1));
        }
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        debug!(target: "vim.mode", from = self.mode.as_str(), to = mode.as_str(), "mode_change");
        self.mode = mode;
        self.motion_state.desired_col = None;
        self.input.clear();
    }

    pub(crate) fn motion_state_mut(&mut self) -> &mut MotionState {
        &mut self.motion_state
    }

    pub(crate) fn set_register(&mut self, register: DeleteRegister) {
        trace!(target: "vim.edit", whole_line = register.is_whole_line, len = register.content.len(), "register_set");
        self.register = Some(register);
    }

    fn type_graphemes<B: TextEdit + ?Sized>(&mut self, buf: &mut B, text: &str) -> Result<()> {
        for (idx, grapheme) in text.grapheme_indices(true) {
            if self.mode == Mode::Insert {
                buf.type_native(&text[idx..])?;
                return Ok(());
            }
            self.input.push_str(grapheme);
            self.interpret(buf)?;
            self.ensure_normal_mode_position(buf);
        }
        Ok(())
    }

    fn interpret<B: TextEdit + ?Sized>(&mut self, buf: &mut B) -> Result<()> {
        let input = self.input.clone();
        let Counted { count, rest } = keymap::split_count(&input);

        let resolution = match rest.chars().next() {
            None => Resolution::NeedsMore,
            Some(first) => match keymap::find_operator(first) {
                Some(operator) => operator.run(self, buf, count, &rest[first.len_utf8()..])?,
                None => match keymap::find_motion(rest) {
                    Some(motion) => {
                        self.apply_motion(buf, motion.repeat(count));
                        Resolution::Matched
                    }
                    None => Resolution::Invalid,
                },
            },
        };
        trace!(target: "vim.input", input = %input, ?resolution, "interpret");

        match resolution {
            Resolution::Matched => self.input.clear(),
            Resolution::NeedsMore => {}
            Resolution::Invalid => {
                debug!(target: "vim.input", input = %input, "invalid_input");
                self.input.clear();
                self.outbox.push(Command::Beep);
            }
        }
        Ok(())
    }

    fn apply_motion<B: TextEdit + ?Sized>(&mut self, buf: &mut B, motion: RepeatedMotion) {
        let from = buf.cursor();
        let to = motion.run(&*buf, from, &mut self.motion_state);
        buf.set_cursor(to);
    }

    fn complete<B: TextEdit + ?Sized>(
        &mut self,
        buf: &mut B,
        result: Result<()>,
    ) -> Result<Vec<Command>> {
        match result {
            Ok(()) => {
                self.ensure_normal_mode_position(buf);
                self.sync_context();
                Ok(std::mem::take(&mut self.outbox))
            }
            Err(err) => {
                warn!(target: "vim.edit", %err, pending = %self.input, "edit_failed");
                self.input.clear();
                self.outbox.clear();
                Err(err)
            }
        }
    }

    // Reports what the host has not seen yet. Notifications dropped by a
    // failed call are resent on the next one.
    fn sync_context(&mut self) {
        let style = self.mode.cursor_style();
        if style != self.reported_style {
            self.reported_style = style;
            self.outbox.push(Command::SetCursorStyle(style));
        }
        let context = self.context_flags();
        if context != self.reported_context {
            self.reported_context = context;
            self.outbox.push(Command::SetContext(context));
        }
    }
}

fn context_for(mode: Mode, has_input: bool) -> ContextFlags {
    let mut flags = ContextFlags::empty();
    flags.set(ContextFlags::NORMAL_MODE, mode == Mode::Normal);
    flags.set(ContextFlags::HAS_INPUT, has_input);
    flags
}
