//! Word classification and forward word scanning for `w` and `e`.
//!
//! A line is split into runs of *regular* characters and runs of *word
//! separators*; whitespace ends any run. Which characters count as
//! separators is configurable, so `foo.bar` is three words under the stock
//! separator set and one word if `.` is removed from it.

use unicode_segmentation::UnicodeSegmentation;

/// Separator set used when the host does not configure one.
pub const DEFAULT_WORD_SEPARATORS: &str = "`~!@#$%^&*()-=+[{]}\\|;:'\",.<>/?";

/// Character class for word boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Regular,
    WordSeparator,
    Whitespace,
}

/// Lookup table from characters to [`CharClass`].
///
/// ASCII is resolved through a fixed table; non-ASCII separators are kept in
/// a short list. Rebuild with [`WordCharacters::new`] when the separator
/// configuration changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCharacters {
    ascii: [CharClass; 128],
    extra_separators: Vec<char>,
}

impl WordCharacters {
    pub fn new(separators: &str) -> Self {
        let mut ascii = [CharClass::Regular; 128];
        let mut extra_separators = Vec::new();

        for ch in separators.chars() {
            if ch.is_ascii() {
                ascii[ch as usize] = CharClass::WordSeparator;
            } else if !extra_separators.contains(&ch) {
                extra_separators.push(ch);
            }
        }
        ascii[' ' as usize] = CharClass::Whitespace;
        ascii['\t' as usize] = CharClass::Whitespace;

        Self {
            ascii,
            extra_separators,
        }
    }

    pub fn classify(&self, ch: char) -> CharClass {
        if ch.is_ascii() {
            self.ascii[ch as usize]
        } else if self.extra_separators.contains(&ch) {
            CharClass::WordSeparator
        } else {
            CharClass::Regular
        }
    }

    /// Classifies a grapheme cluster by its first scalar value.
    pub fn classify_grapheme(&self, grapheme: &str) -> CharClass {
        grapheme
            .chars()
            .next()
            .map_or(CharClass::Whitespace, |ch| self.classify(ch))
    }
}

impl Default for WordCharacters {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_SEPARATORS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordType {
    Separator,
    Regular,
}

/// A run of same-class characters on one line, `[start, end)` in grapheme
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    pub start: u32,
    pub end: u32,
    pub word_type: WordType,
}

/// Finds the first word that ends after `col`.
///
/// The returned word may start before `col` when the scan begins inside a
/// run. Returns `None` if only whitespace remains on the line.
pub fn find_next_word(line: &str, col: u32, chars: &WordCharacters) -> Option<Word> {
    let classes: Vec<CharClass> = line
        .graphemes(true)
        .map(|g| chars.classify_grapheme(g))
        .collect();
    let len = classes.len();
    let mut run: Option<WordType> = None;

    for idx in (col as usize).min(len)..len {
        if let Some(word_type) = run {
            let closes = matches!(
                (classes[idx], word_type),
                (CharClass::Regular, WordType::Separator)
                    | (CharClass::WordSeparator, WordType::Regular)
                    | (CharClass::Whitespace, _)
            );
            if closes {
                return Some(make_word(&classes, word_type, idx));
            }
        }
        run = match classes[idx] {
            CharClass::Regular => Some(WordType::Regular),
            CharClass::WordSeparator => Some(WordType::Separator),
            CharClass::Whitespace => run,
        };
    }

    run.map(|word_type| make_word(&classes, word_type, len))
}

fn make_word(classes: &[CharClass], word_type: WordType, end: usize) -> Word {
    let start = start_of_word(classes, word_type, end);
    Word {
        start: to_col(start),
        end: to_col(end),
        word_type,
    }
}

// Walks back from the last character of the run to the first one.
fn start_of_word(classes: &[CharClass], word_type: WordType, end: usize) -> usize {
    let wanted = match word_type {
        WordType::Regular => CharClass::Regular,
        WordType::Separator => CharClass::WordSeparator,
    };
    classes[..end]
        .iter()
        .rposition(|&class| class != wanted)
        .map_or(0, |idx| idx + 1)
}

fn to_col(idx: usize) -> u32 {
    u32::try_from(idx).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(start: u32, end: u32, word_type: WordType) -> Option<Word> {
        Some(Word {
            start,
            end,
            word_type,
        })
    }

    #[test]
    fn classifies_separators_and_whitespace() {
        let chars = WordCharacters::default();
        assert_eq!(chars.classify('a'), CharClass::Regular);
        assert_eq!(chars.classify('_'), CharClass::Regular);
        assert_eq!(chars.classify('.'), CharClass::WordSeparator);
        assert_eq!(chars.classify(' '), CharClass::Whitespace);
        assert_eq!(chars.classify('\t'), CharClass::Whitespace);
        assert_eq!(chars.classify('é'), CharClass::Regular);
    }

    #[test]
    fn custom_separators_replace_the_table() {
        let chars = WordCharacters::new("-§");
        assert_eq!(chars.classify('-'), CharClass::WordSeparator);
        assert_eq!(chars.classify('.'), CharClass::Regular);
        assert_eq!(chars.classify('§'), CharClass::WordSeparator);
    }

    #[test]
    fn whitespace_is_never_a_separator() {
        let chars = WordCharacters::new(" .");
        assert_eq!(chars.classify(' '), CharClass::Whitespace);
    }

    #[test]
    fn finds_word_containing_column() {
        let chars = WordCharacters::default();
        assert_eq!(
            find_next_word("hello world", 2, &chars),
            word(0, 5, WordType::Regular)
        );
    }

    #[test]
    fn skips_leading_whitespace() {
        let chars = WordCharacters::default();
        assert_eq!(
            find_next_word("hello world", 5, &chars),
            word(6, 11, WordType::Regular)
        );
    }

    #[test]
    fn separator_runs_are_words() {
        let chars = WordCharacters::default();
        assert_eq!(
            find_next_word("foo.bar", 0, &chars),
            word(0, 3, WordType::Regular)
        );
        assert_eq!(
            find_next_word("foo.bar", 3, &chars),
            word(3, 4, WordType::Separator)
        );
        assert_eq!(
            find_next_word("a::b", 1, &chars),
            word(1, 3, WordType::Separator)
        );
    }

    #[test]
    fn no_word_on_trailing_whitespace() {
        let chars = WordCharacters::default();
        assert_eq!(find_next_word("abc   ", 3, &chars), None);
        assert_eq!(find_next_word("", 0, &chars), None);
    }
}
