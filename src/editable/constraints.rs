//! What a field's text input accepts.

/// Predicate over single characters; `true` keeps the character
pub type CharFilter = fn(char) -> bool;

fn numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// Per-kind limits applied to every insertion into a [`TextInput`](super::TextInput).
#[derive(Debug, Clone)]
pub struct EditConstraints {
    /// Newlines are kept; Enter inserts one instead of submitting
    pub allow_multiline: bool,
    pub allow_selection: bool,
    /// In characters
    pub max_length: Option<usize>,
    pub char_filter: Option<CharFilter>,
}

impl Default for EditConstraints {
    fn default() -> Self {
        Self::single_line()
    }
}

impl EditConstraints {
    /// Text, title, email, url and tel inputs
    pub fn single_line() -> Self {
        Self {
            allow_multiline: false,
            allow_selection: true,
            max_length: None,
            char_filter: None,
        }
    }

    /// Textarea input
    pub fn multiline() -> Self {
        Self {
            allow_multiline: true,
            ..Self::single_line()
        }
    }

    /// Number, currency and percent inputs: the characters of a float literal
    pub fn numeric() -> Self {
        Self {
            char_filter: Some(numeric_char),
            ..Self::single_line()
        }
    }

    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn is_char_allowed(&self, ch: char) -> bool {
        (ch != '\n' || self.allow_multiline) && self.char_filter.map_or(true, |keep| keep(ch))
    }

    /// Keep the allowed characters of `text`, cut to what still fits after
    /// `current_len` characters.
    pub fn accept(&self, current_len: usize, text: &str) -> String {
        let room = match self.max_length {
            Some(max) => max.saturating_sub(current_len),
            None => usize::MAX,
        };
        text.chars()
            .filter(|&c| self.is_char_allowed(c))
            .take(room)
            .collect()
    }
}
