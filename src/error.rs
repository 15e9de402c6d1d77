use thiserror::Error;

use crate::types::Position;

/// Failure reported by a host buffer when it refuses an edit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("buffer is read-only")]
    ReadOnly,

    #[error("position {}:{} is outside the buffer", .position.line, .position.col)]
    OutOfBounds { position: Position },

    #[error("edit rejected: {0}")]
    Rejected(String),
}

/// Engine error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("buffer edit failed: {0}")]
    Edit(#[from] EditError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
