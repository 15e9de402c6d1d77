pub mod config;
pub mod engine;
pub mod error;
pub mod keymap;
pub mod motion;
pub mod operator;
pub mod register;
pub mod traits;
pub mod types;
pub mod word;

pub use crate::config::EngineConfig;
pub use crate::engine::{Engine, EngineBuilder, EngineSnapshot};
pub use crate::error::{EditError, Error, Result};
pub use crate::keymap::Resolution;
pub use crate::motion::{Motion, MotionState, RepeatedMotion};
pub use crate::operator::{MAX_PUT_BYTES, Operator};
pub use crate::register::DeleteRegister;
pub use crate::traits::{TextEdit, TextOps};
pub use crate::types::{Command, ContextFlags, CursorStyle, Mode, Position, Range};
pub use crate::word::{CharClass, DEFAULT_WORD_SEPARATORS, Word, WordCharacters, WordType};
