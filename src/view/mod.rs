//! View module - headless view tree for fields and edit surfaces
//!
//! Fields and edit surfaces describe what they show as a [`ViewNode`] tree.
//! Hosts can paint it however they like; [`render_text`] produces a plain-text
//! rendering and the query helpers support accessibility-style lookups
//! (alerts, aria labels) in tests.

pub mod button;
pub mod render;

pub use button::{edit_controls, icon_button, text_button, text_controls, ButtonState, ButtonStyle};
pub use render::render_text;

use chrono::NaiveDate;

use crate::model::EditableState;

/// Typography of a display value or input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presentation {
    #[default]
    Body,
    /// Large heading (titles)
    Heading,
}

/// Kind of a rendered input control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    Url,
    Tel,
    Number,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Email => "email",
            InputKind::Url => "url",
            InputKind::Tel => "tel",
            InputKind::Number => "number",
        }
    }
}

/// Text input control
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputView {
    pub kind: InputKind,
    pub value: String,
    /// Cursor position (char index)
    pub cursor: usize,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    /// Bound to the field's input ref for this session
    pub focused: bool,
    pub multiline: bool,
    pub max_length: Option<usize>,
    /// Glyph rendered before the input (currency symbol)
    pub prefix: Option<String>,
    /// Glyph rendered after the input (percent sign)
    pub suffix: Option<String>,
    pub presentation: Presentation,
}

/// One option in a dropdown list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub highlighted: bool,
    pub disabled: bool,
}

/// A node of the headless view tree
#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    /// A whole field: its label above the state-dependent content
    Field {
        label: String,
        state: EditableState,
        children: Vec<ViewNode>,
    },
    /// The rest/interest display region
    Display {
        text: String,
        /// Placeholder styling (muted, italic)
        muted: bool,
        aria_label: String,
        focusable: bool,
        readonly: bool,
        /// Interest highlight
        highlighted: bool,
        presentation: Presentation,
    },
    Input(InputView),
    Button {
        /// Visible text, or the icon name for icon buttons
        text: String,
        aria_label: String,
        enabled: bool,
        state: ButtonState,
        style: ButtonStyle,
    },
    Row(Vec<ViewNode>),
    Column(Vec<ViewNode>),
    /// Assertive error region
    Alert(String),
    /// Busy indicator
    Spinner { aria_label: String },
    Text { text: String, muted: bool },
    /// Anchored popover (dropdown, calendar)
    Popover { open: bool, children: Vec<ViewNode> },
    OptionList(Vec<OptionView>),
    Calendar {
        /// First day of the visible month
        month: NaiveDate,
        selected: Option<NaiveDate>,
        focused: NaiveDate,
    },
}

impl ViewNode {
    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Text {
            text: text.into(),
            muted: false,
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        ViewNode::Text {
            text: text.into(),
            muted: true,
        }
    }

    /// Direct children of this node
    pub fn children(&self) -> &[ViewNode] {
        match self {
            ViewNode::Field { children, .. }
            | ViewNode::Row(children)
            | ViewNode::Column(children)
            | ViewNode::Popover { children, .. } => children,
            _ => &[],
        }
    }

    /// This node and all descendants, depth first
    pub fn descendants(&self) -> Vec<&ViewNode> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }

    /// Text of the first alert region
    pub fn find_alert(&self) -> Option<&str> {
        self.descendants().into_iter().find_map(|node| match node {
            ViewNode::Alert(message) => Some(message.as_str()),
            _ => None,
        })
    }

    /// First node carrying this accessible label
    pub fn find_by_aria_label(&self, label: &str) -> Option<&ViewNode> {
        self.descendants()
            .into_iter()
            .find(|node| node.aria_label() == Some(label))
    }

    pub fn aria_label(&self) -> Option<&str> {
        match self {
            ViewNode::Display { aria_label, .. }
            | ViewNode::Button { aria_label, .. }
            | ViewNode::Spinner { aria_label } => Some(aria_label),
            ViewNode::Input(input) => input.aria_label.as_deref(),
            _ => None,
        }
    }

    /// The first input control
    pub fn find_input(&self) -> Option<&InputView> {
        self.descendants().into_iter().find_map(|node| match node {
            ViewNode::Input(input) => Some(input),
            _ => None,
        })
    }

    /// Visible text, space-joined, excluding the field label
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, parts: &mut Vec<String>) {
        match self {
            ViewNode::Display { text, .. } | ViewNode::Text { text, .. } => {
                if !text.is_empty() {
                    parts.push(text.clone());
                }
            }
            ViewNode::Input(input) => {
                if !input.value.is_empty() {
                    parts.push(input.value.clone());
                }
            }
            ViewNode::Alert(message) => parts.push(message.clone()),
            ViewNode::OptionList(options) => {
                parts.extend(options.iter().map(|o| o.label.clone()));
            }
            _ => {
                for child in self.children() {
                    child.collect_text(parts);
                }
            }
        }
    }

    /// True if any descendant is a spinner
    pub fn is_busy(&self) -> bool {
        self.descendants()
            .iter()
            .any(|node| matches!(node, ViewNode::Spinner { .. }))
    }
}
