//! Character classification and char-index helpers for the text inputs

/// Symbols that end a word for Ctrl+Arrow / Ctrl+Backspace
const WORD_SEPARATORS: &str = "/:,.-(){}[];\"'<>=+*&|!@#$%^~`\\?";

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    WORD_SEPARATORS.contains(ch)
}

/// How a character behaves under word-wise cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    /// Letters, digits and `_`
    WordChar,
    Punctuation,
}

pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Byte offset of the `char_idx`-th character (clamped to the end of the string)
pub fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Number of characters in `text`
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Prefix every line of `text` with `prefix`
pub fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_type() {
        assert_eq!(char_type('a'), CharType::WordChar);
        assert_eq!(char_type(' '), CharType::Whitespace);
        assert_eq!(char_type('.'), CharType::Punctuation);
    }

    #[test]
    fn test_byte_offset_multibyte() {
        let text = "€12";
        assert_eq!(byte_offset(text, 0), 0);
        assert_eq!(byte_offset(text, 1), 3);
        assert_eq!(byte_offset(text, 10), text.len());
    }

    #[test]
    fn test_indent() {
        assert_eq!(indent("a\nb", "  "), "  a\n  b");
    }
}
