/// Single-slot storage for the most recently deleted text.
///
/// Whole-line content is kept as newline-terminated lines (`"a\nb\n"`), no
/// matter which line break the deletion itself consumed, so put can insert
/// it without knowing where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRegister {
    pub is_whole_line: bool,
    pub content: String,
}

impl DeleteRegister {
    pub fn charwise(content: impl Into<String>) -> Self {
        Self {
            is_whole_line: false,
            content: content.into(),
        }
    }

    /// Stores deleted lines given their text without the final line break.
    pub fn linewise(lines: &str) -> Self {
        let mut content = String::with_capacity(lines.len() + 1);
        content.push_str(lines);
        content.push('\n');
        Self {
            is_whole_line: true,
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of lines held by a whole-line register.
    pub fn line_count(&self) -> usize {
        self.content.matches('\n').count()
    }
}
