use serde::{Deserialize, Serialize};

use crate::types::Mode;
use crate::word::DEFAULT_WORD_SEPARATORS;

/// Engine settings a host can embed in its own configuration file.
///
/// Missing fields fall back to their defaults, so an empty table is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Characters that form words of their own, separate from letters and
    /// digits.
    pub word_separators: String,
    /// Mode the engine starts in.
    pub initial_mode: Mode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            word_separators: DEFAULT_WORD_SEPARATORS.to_owned(),
            initial_mode: Mode::Normal,
        }
    }
}
