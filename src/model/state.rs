//! Field state - the four-state lifecycle, per-field options and the input ref

use std::fmt;

/// The visible state of an inline-edit field. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditableState {
    /// Showing the formatted value, no interaction chrome
    #[default]
    Rest,
    /// Hover/focus highlight; value unchanged
    Interest,
    /// The edit surface is open
    Edit,
    /// Save in flight; read-only value + spinner
    Saving,
}

impl EditableState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditableState::Rest => "rest",
            EditableState::Interest => "interest",
            EditableState::Edit => "edit",
            EditableState::Saving => "saving",
        }
    }

    /// Rest or interest: the display region is shown
    pub fn is_display(&self) -> bool {
        matches!(self, EditableState::Rest | EditableState::Interest)
    }
}

impl fmt::Display for EditableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who owns the rest/edit toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The field toggles edit mode itself
    Uncontrolled,
    /// The consumer owns the flag; the field only asks for changes
    Controlled { is_editing: bool },
}

impl Control {
    pub fn is_controlled(&self) -> bool {
        matches!(self, Control::Controlled { .. })
    }
}

/// Behaviour switches set by the adapters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOptions {
    /// Cancel when focus leaves the field while editing
    pub exit_on_blur: bool,
    /// Show the saving state while a save is in flight
    pub show_saving_state: bool,
    /// Highlight on hover/focus
    pub interest_enabled: bool,
    /// Treat a save of the committed value as a cancel
    pub skip_unchanged: bool,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            exit_on_blur: true,
            show_saving_state: true,
            interest_enabled: true,
            skip_unchanged: false,
        }
    }
}

/// Focus target handed to the edit surface for one edit session.
///
/// The core never reads the surface's content through it; it only requests
/// focus when an edit session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputRef {
    session: u64,
    focused: bool,
}

impl InputRef {
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub(crate) fn request_focus(&mut self, session: u64) {
        self.session = session;
        self.focused = true;
    }

    pub(crate) fn release(&mut self) {
        self.focused = false;
    }
}
