//! TextInput - the local text buffer behind every text-like edit surface.
//!
//! Positions are character indices, never byte offsets.

use crate::messages::{Key, KeyPress};
use crate::util::{byte_offset, char_len, char_type, CharType};

use super::constraints::EditConstraints;

/// Result of feeding a key press to a [`TextInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The text changed
    Edited,
    /// Only the cursor or selection moved
    Moved,
    /// The key is not an editing key for this input
    Ignored,
}

/// Single- or multi-line text with a cursor and an optional selection anchor.
#[derive(Debug, Clone)]
pub struct TextInput {
    text: String,
    /// Cursor position (char index)
    cursor: usize,
    /// Fixed end of the selection, if any
    anchor: Option<usize>,
    constraints: EditConstraints,
}

impl TextInput {
    /// Create an input holding `text` with the cursor at the end.
    ///
    /// The initial text is not checked against the constraints.
    pub fn new(text: &str, constraints: EditConstraints) -> Self {
        Self {
            text: text.to_string(),
            cursor: char_len(text),
            anchor: None,
            constraints,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn constraints(&self) -> &EditConstraints {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Selected range as `(start, end)` char indices, if non-empty
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    pub fn selected_text(&self) -> &str {
        match self.selection() {
            Some((start, end)) => {
                &self.text[byte_offset(&self.text, start)..byte_offset(&self.text, end)]
            }
            None => "",
        }
    }

    /// Replace the whole value, as a change event from the host would.
    ///
    /// Filtered characters are dropped and the result is truncated to the
    /// maximum length.
    pub fn set_text(&mut self, text: &str) {
        self.text = self.constraints.accept(0, text);
        self.cursor = char_len(&self.text);
        self.anchor = None;
    }

    pub fn select_all(&mut self) {
        if !self.constraints.allow_selection {
            return;
        }
        self.anchor = Some(0);
        self.cursor = self.len();
    }

    fn collapse(&mut self) {
        self.anchor = None;
    }

    fn move_to(&mut self, pos: usize, extend_selection: bool) {
        if extend_selection && self.constraints.allow_selection {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.collapse();
        }
        self.cursor = pos.min(self.len());
    }

    // ========================================================================
    // Movement
    // ========================================================================

    pub fn move_left(&mut self, extend_selection: bool) {
        if !extend_selection {
            if let Some((start, _)) = self.selection() {
                self.move_to(start, false);
                return;
            }
        }
        self.move_to(self.cursor.saturating_sub(1), extend_selection);
    }

    pub fn move_right(&mut self, extend_selection: bool) {
        if !extend_selection {
            if let Some((_, end)) = self.selection() {
                self.move_to(end, false);
                return;
            }
        }
        self.move_to(self.cursor + 1, extend_selection);
    }

    pub fn move_word_left(&mut self, extend_selection: bool) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor.min(chars.len());

        // Skip whitespace/punctuation, then the word itself
        while pos > 0 && char_type(chars[pos - 1]) != CharType::WordChar {
            pos -= 1;
        }
        while pos > 0 && char_type(chars[pos - 1]) == CharType::WordChar {
            pos -= 1;
        }
        self.move_to(pos, extend_selection);
    }

    pub fn move_word_right(&mut self, extend_selection: bool) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor.min(chars.len());

        while pos < chars.len() && char_type(chars[pos]) != CharType::WordChar {
            pos += 1;
        }
        while pos < chars.len() && char_type(chars[pos]) == CharType::WordChar {
            pos += 1;
        }
        self.move_to(pos, extend_selection);
    }

    fn line_start(&self, pos: usize) -> usize {
        self.text
            .chars()
            .take(pos)
            .collect::<Vec<_>>()
            .iter()
            .rposition(|&c| c == '\n')
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.text
            .chars()
            .skip(pos)
            .position(|c| c == '\n')
            .map(|offset| pos + offset)
            .unwrap_or_else(|| self.len())
    }

    pub fn move_home(&mut self, extend_selection: bool) {
        let target = if self.constraints.allow_multiline {
            self.line_start(self.cursor)
        } else {
            0
        };
        self.move_to(target, extend_selection);
    }

    pub fn move_end(&mut self, extend_selection: bool) {
        let target = if self.constraints.allow_multiline {
            self.line_end(self.cursor)
        } else {
            self.len()
        };
        self.move_to(target, extend_selection);
    }

    pub fn move_up(&mut self, extend_selection: bool) -> bool {
        if !self.constraints.allow_multiline {
            return false;
        }
        let start = self.line_start(self.cursor);
        if start == 0 {
            return false;
        }
        let column = self.cursor - start;
        let prev_start = self.line_start(start - 1);
        let prev_len = (start - 1) - prev_start;
        self.move_to(prev_start + column.min(prev_len), extend_selection);
        true
    }

    pub fn move_down(&mut self, extend_selection: bool) -> bool {
        if !self.constraints.allow_multiline {
            return false;
        }
        let end = self.line_end(self.cursor);
        if end >= self.len() {
            return false;
        }
        let column = self.cursor - self.line_start(self.cursor);
        let next_start = end + 1;
        let next_len = self.line_end(next_start) - next_start;
        self.move_to(next_start + column.min(next_len), extend_selection);
        true
    }

    // ========================================================================
    // Editing
    // ========================================================================

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            return false;
        };
        let range = byte_offset(&self.text, start)..byte_offset(&self.text, end);
        self.text.replace_range(range, "");
        self.cursor = start;
        self.collapse();
        true
    }

    /// Insert text at the cursor, replacing any selection.
    ///
    /// Returns true if anything changed.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let selected = self.selection().map(|(s, e)| e - s).unwrap_or(0);
        let accepted = self.constraints.accept(self.len() - selected, text);
        if accepted.is_empty() {
            return false;
        }
        self.delete_selection();
        let at = byte_offset(&self.text, self.cursor);
        self.text.insert_str(at, &accepted);
        self.cursor += char_len(&accepted);
        true
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf))
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let range = byte_offset(&self.text, self.cursor - 1)..byte_offset(&self.text, self.cursor);
        self.text.replace_range(range, "");
        self.cursor -= 1;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor >= self.len() {
            return false;
        }
        let range = byte_offset(&self.text, self.cursor)..byte_offset(&self.text, self.cursor + 1);
        self.text.replace_range(range, "");
        true
    }

    pub fn delete_word_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let end = self.cursor;
        self.move_word_left(false);
        let start = self.cursor;
        if start == end {
            return false;
        }
        let range = byte_offset(&self.text, start)..byte_offset(&self.text, end);
        self.text.replace_range(range, "");
        true
    }

    /// Apply a key press.
    ///
    /// Enter only inserts a newline in multi-line inputs; Escape and Tab are
    /// never consumed.
    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        let edited = |changed: bool| {
            if changed {
                KeyOutcome::Edited
            } else {
                KeyOutcome::Ignored
            }
        };

        match press.key {
            Key::Char('a') | Key::Char('A') if press.command => {
                self.select_all();
                KeyOutcome::Moved
            }
            Key::Char(_) if press.command => KeyOutcome::Ignored,
            Key::Char(ch) => edited(self.insert_char(ch)),
            Key::Space if !press.command => edited(self.insert_char(' ')),
            Key::Enter if self.constraints.allow_multiline && !press.command => {
                edited(self.insert_char('\n'))
            }
            Key::Backspace if press.command => edited(self.delete_word_backward()),
            Key::Backspace => edited(self.delete_backward()),
            Key::Delete => edited(self.delete_forward()),
            Key::Left if press.command => {
                self.move_word_left(press.shift);
                KeyOutcome::Moved
            }
            Key::Right if press.command => {
                self.move_word_right(press.shift);
                KeyOutcome::Moved
            }
            Key::Left => {
                self.move_left(press.shift);
                KeyOutcome::Moved
            }
            Key::Right => {
                self.move_right(press.shift);
                KeyOutcome::Moved
            }
            Key::Home => {
                self.move_home(press.shift);
                KeyOutcome::Moved
            }
            Key::End => {
                self.move_end(press.shift);
                KeyOutcome::Moved
            }
            Key::Up if self.move_up(press.shift) => KeyOutcome::Moved,
            Key::Down if self.move_down(press.shift) => KeyOutcome::Moved,
            _ => KeyOutcome::Ignored,
        }
    }
}
