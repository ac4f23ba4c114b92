//! Button primitives
//!
//! Provides a simple, pure-function API for building the save/cancel
//! controls of edit surfaces. No widget state is stored; callers pass the
//! visual state in.

use super::ViewNode;

/// Visual state of a button, determined by the caller from interaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Default idle state
    #[default]
    Normal,
    /// Pointer is hovering over the button
    Hovered,
    /// Pointer is pressed on the button
    Pressed,
}

/// How a button presents itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonStyle {
    /// Icon-only button; its accessible label carries the meaning
    #[default]
    Icon,
    /// Button with visible text
    Text,
}

/// Icon button with an accessible label
pub fn icon_button(icon: &str, aria_label: &str) -> ViewNode {
    ViewNode::Button {
        text: icon.to_string(),
        aria_label: aria_label.to_string(),
        enabled: true,
        state: ButtonState::Normal,
        style: ButtonStyle::Icon,
    }
}

/// Button with visible text that doubles as its accessible label
pub fn text_button(text: &str) -> ViewNode {
    ViewNode::Button {
        text: text.to_string(),
        aria_label: text.to_string(),
        enabled: true,
        state: ButtonState::Normal,
        style: ButtonStyle::Text,
    }
}

/// Check/cross icon pair used by single-line surfaces
pub fn edit_controls(save_label: &str, cancel_label: &str) -> ViewNode {
    ViewNode::Row(vec![
        icon_button("check", save_label),
        icon_button("x", cancel_label),
    ])
}

/// Text "Save" / "Cancel" pair used by multi-line surfaces
pub fn text_controls() -> ViewNode {
    ViewNode::Row(vec![text_button("Save"), text_button("Cancel")])
}
