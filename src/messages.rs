//! Message types for the Elm-style architecture
//!
//! All field interactions flow through these message types.

use chrono::NaiveDate;

use crate::model::{FieldId, FieldValue};

/// Keys the fields and edit surfaces react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    /// A printable character
    Char(char),
}

impl Key {
    /// Parse a key name ("Enter", "escape", "PageUp", "a")
    pub fn parse(name: &str) -> Option<Key> {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Some(if ch == ' ' { Key::Space } else { Key::Char(ch) });
        }

        let key = match name.to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "space" => Key::Space,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            _ => return None,
        };
        Some(key)
    }
}

/// A key press with the modifiers the fields care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    /// Ctrl on Linux/Windows, Cmd on macOS
    pub command: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            command: false,
            shift: false,
        }
    }

    pub fn with_command(key: Key) -> Self {
        Self {
            command: true,
            ..Self::new(key)
        }
    }

    pub fn with_shift(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::new(key)
        }
    }

    /// Parse a chord such as `Enter`, `Ctrl+Enter`, `Cmd+a` or `Shift+Tab`
    pub fn parse(chord: &str) -> Option<KeyPress> {
        let mut press = KeyPress::new(Key::Enter);
        let mut parts: Vec<&str> = chord.split('+').collect();

        // A trailing "+" is the plus key itself
        let key_name = if chord.ends_with("++") || chord == "+" {
            parts.retain(|p| !p.is_empty());
            "+"
        } else {
            parts.pop()?
        };

        for modifier in parts {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "cmd" | "meta" | "super" => press.command = true,
                "shift" => press.shift = true,
                _ => return None,
            }
        }
        press.key = Key::parse(key_name)?;
        Some(press)
    }

    /// True for a key press without modifiers
    pub fn is_plain(&self, key: Key) -> bool {
        self.key == key && !self.command && !self.shift
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        KeyPress::new(key)
    }
}

/// Messages delivered to an open edit surface
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    /// Key pressed while the edit surface has focus
    Key(KeyPress),
    /// Text typed at the cursor
    Type(String),
    /// Whole input value replaced (paste over all, autofill)
    SetText(String),
    /// Save control activated
    ClickSave,
    /// Cancel control activated
    ClickCancel,
    /// Option picked from a dropdown (by option value)
    SelectOption(String),
    /// Day picked from a calendar
    SelectDay(NaiveDate),
    /// Popover/dropdown open state changed by the host (false = dismissed)
    OpenChange(bool),
}

/// Messages for a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMsg {
    /// Pointer entered the display region
    PointerEnter,
    /// Pointer left the display region
    PointerLeave,
    /// Display region gained focus
    Focus,
    /// Focus left an element of the field; `within` is true when it moved
    /// to another element inside the same field
    Blur { within: bool },
    /// Display region clicked
    Click,
    /// Key pressed on the field
    Key(KeyPress),
    /// Interaction with the open edit surface
    Edit(EditMsg),
    /// Cancel editing from outside the edit surface
    Cancel,
    /// Clear the inline error
    ClearError,
    /// Save finished (async result)
    SaveCompleted(Result<(), String>),
    /// The committed value changed externally
    ValueChanged(FieldValue),
    /// Controlled mode: the consumer reflects its editing flag
    SetEditing(bool),
}

/// Form-level messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMsg {
    /// Tab: focus the next interactive field
    FocusNext,
    /// Shift+Tab: focus the previous interactive field
    FocusPrev,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A message addressed to one field
    Field { id: FieldId, msg: FieldMsg },
    /// Form navigation
    Form(FormMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Address a message to a field
    pub fn field(id: impl Into<FieldId>, msg: FieldMsg) -> Self {
        Msg::Field { id: id.into(), msg }
    }

    /// Create a key press message for a field
    pub fn key(id: impl Into<FieldId>, key: Key) -> Self {
        Msg::field(id, FieldMsg::Key(KeyPress::new(key)))
    }

    /// Create an edit surface message for a field
    pub fn edit(id: impl Into<FieldId>, msg: EditMsg) -> Self {
        Msg::field(id, FieldMsg::Edit(msg))
    }

    /// The field this message is addressed to, if any
    pub fn field_id(&self) -> Option<&FieldId> {
        match self {
            Msg::Field { id, .. } => Some(id),
            Msg::Form(_) => None,
        }
    }
}
