//! Terminal UI demo using crossterm and ratatui.
//!
//! Hosts the engine on a rope buffer. Set `RUST_LOG=vim=trace` to write the
//! engine's events to `vim_interp.log`.
//! Run with: cargo run --example tui_crossterm

use crossterm::{
    cursor::SetCursorStyle,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use ropey::Rope;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Write};
use std::sync::Mutex;
use unicode_segmentation::UnicodeSegmentation;
use vim_interp::{
    EditError, Engine,
    traits::{TextEdit, TextOps},
    types::{Command, CursorStyle, Mode, Position, Range},
};

const WELCOME: &str = "Welcome to vim_interp!\n\nPress 'i' to enter insert mode.\nPress 'Esc' to return to normal mode.\nPress Ctrl-C to quit.\n\nTry vim commands like:\n- hjkl, w, e, 0 and $ for movement\n- dd to delete a line, 3dw to delete words\n- p to put what was deleted\n- r to replace a character\n";

/// Text buffer implementation using ropey
struct RopeBuffer {
    rope: Rope,
    cursor: Position,
}

impl RopeBuffer {
    fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Position::ZERO,
        }
    }

    fn char_idx(&self, pos: Position) -> usize {
        let pos = self.clamp(pos);
        let line_start = self.rope.line_to_char(pos.line as usize);
        let chars: usize = self
            .line_text(pos.line)
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
        Position::new(line as u32, col as u32)
    }
}

impl TextOps for RopeBuffer {
    fn line_count(&self) -> u32 {
        self.rope.len_lines() as u32
    }

    fn line_text(&self, line: u32) -> Cow<'_, str> {
        if line >= self.line_count() {
            return Cow::Borrowed("");
        }
        let text = self.rope.line(line as usize).to_string();
        Cow::Owned(text.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl TextEdit for RopeBuffer {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
    }

    fn delete(&mut self, range: Range) -> Result<(), EditError> {
        let start = self.char_idx(range.start);
        let end = self.char_idx(range.end);
        self.rope.remove(start..end);
        Ok(())
    }

    fn insert_text(&mut self, at: Position, text: &str) -> Result<(), EditError> {
        let idx = self.char_idx(at);
        self.rope.insert(idx, text);
        Ok(())
    }

    fn replace(&mut self, range: Range, text: &str) -> Result<(), EditError> {
        self.delete(range)?;
        self.insert_text(range.start, text)
    }

    fn type_native(&mut self, text: &str) -> Result<(), EditError> {
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
        let end = self.char_idx(self.cursor);
        let start = if self.cursor.col == 0 && replace_count > 0 {
            // backspace at the start of a line joins it with the previous one
            end.saturating_sub(1)
        } else {
            self.char_idx(Position::new(
                self.cursor.line,
                self.cursor.col.saturating_sub(replace_count),
            ))
        };
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.cursor = self.position_of(start + text.chars().count());
        Ok(())
    }
}

struct App {
    engine: Engine,
    buffer: RopeBuffer,
    beeped: bool,
    message: Option<String>,
}

impl App {
    fn new() -> Self {
        Self {
            engine: Engine::new(),
            buffer: RopeBuffer::new(WELCOME),
            beeped: false,
            message: None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> io::Result<()> {
        self.beeped = false;
        self.message = None;

        let result = match key.code {
            KeyCode::Esc if self.engine.has_pending_input() => Ok(self.engine.clear_input()),
            KeyCode::Esc => Ok(self.engine.go_to_normal_mode(&mut self.buffer)),
            KeyCode::Char(c) => {
                let mut utf8 = [0; 4];
                self.engine.type_text(&mut self.buffer, c.encode_utf8(&mut utf8))
            }
            KeyCode::Enter if self.engine.mode() == Mode::Insert => {
                self.engine.type_text(&mut self.buffer, "\n")
            }
            KeyCode::Backspace if self.engine.mode() == Mode::Insert => {
                self.engine.replace_prev_char(&mut self.buffer, "", 1)
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                self.move_cursor(key.code);
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        };

        match result {
            Ok(commands) => self.apply(commands),
            Err(err) => {
                self.message = Some(err.to_string());
                Ok(())
            }
        }
    }

    // Host-side caret movement; the engine only keeps it on a character.
    fn move_cursor(&mut self, code: KeyCode) {
        let Position { line, col } = self.buffer.cursor();
        let pos = match code {
            KeyCode::Left => Position::new(line, col.saturating_sub(1)),
            KeyCode::Right => Position::new(line, col + 1),
            KeyCode::Up => Position::new(line.saturating_sub(1), col),
            _ => Position::new(line + 1, col),
        };
        self.buffer.set_cursor(pos);
        self.engine.ensure_normal_mode_position(&mut self.buffer);
    }

    fn apply(&mut self, commands: Vec<Command>) -> io::Result<()> {
        for command in commands {
            match command {
                Command::SetCursorStyle(style) => {
                    let shape = match style {
                        CursorStyle::Block => SetCursorStyle::SteadyBlock,
                        CursorStyle::Line => SetCursorStyle::SteadyBar,
                    };
                    execute!(io::stdout(), shape)?;
                }
                Command::SetContext(_) => {}
                Command::Beep => {
                    self.beeped = true;
                    io::stdout().write_all(b"\x07")?;
                }
            }
        }
        Ok(())
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    let lines: Vec<String> = (0..app.buffer.line_count())
        .map(|line| app.buffer.line_text(line).into_owned())
        .collect();
    let text = Paragraph::new(lines.join("\n")).block(
        Block::default()
            .borders(Borders::ALL)
            .title("vim_interp demo"),
    );
    f.render_widget(text, chunks[0]);

    let status_style = if app.beeped || app.message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let status_text = match &app.message {
        Some(message) => format!("{}  {message}", app.engine.status_text()),
        None => app.engine.status_text(),
    };
    let status = Paragraph::new(status_text)
        .style(status_style.add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    let cursor = app.buffer.cursor();
    f.set_cursor(
        chunks[0].x + 1 + cursor.col as u16,
        chunks[0].y + 1 + cursor.line as u16,
    );
}

fn init_logging() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create("vim_interp.log")?;
    // Already installed is fine; keep running without file logs.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<(), io::Error> {
    init_logging()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetCursorStyle::SteadyBlock)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            app.handle_key(key)?;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetCursorStyle::DefaultUserShape
    )?;
    terminal.show_cursor()?;

    Ok(())
}
