//! Text adapter - single-line text with an optional max length and input type
//!
//! Also home of [`TextSurface`], the text input surface shared by the title
//! and textarea adapters.

use crate::editable::{EditConstraints, KeyOutcome, TextInput};
use crate::messages::{EditMsg, Key};
use crate::view::{edit_controls, text_controls, InputKind, InputView, Presentation, ViewNode};

use super::{clear_error_on_edit, DisplayText, EditAction, EditProps, EditSurface, FieldAdapter};

/// How a [`TextSurface`] submits and presents itself
#[derive(Debug, Clone)]
pub struct TextSurfaceConfig {
    pub kind: InputKind,
    pub placeholder: Option<String>,
    pub presentation: Presentation,
    /// Accessible label of the input (defaults to the field label)
    pub aria_label: Option<String>,
    pub constraints: EditConstraints,
    pub save_label: &'static str,
    pub cancel_label: &'static str,
    /// Visible "Save" / "Cancel" text buttons instead of icons
    pub text_buttons: bool,
    /// Start the session with the whole text selected
    pub select_on_open: bool,
}

impl Default for TextSurfaceConfig {
    fn default() -> Self {
        Self {
            kind: InputKind::Text,
            placeholder: None,
            presentation: Presentation::Body,
            aria_label: None,
            constraints: EditConstraints::single_line(),
            save_label: "Save",
            cancel_label: "Cancel",
            text_buttons: false,
            select_on_open: false,
        }
    }
}

/// Edit surface holding a local text input.
///
/// Single-line: Enter saves. Multi-line: Ctrl/Cmd+Enter saves and Enter
/// inserts a newline. Escape cancels in both.
pub struct TextSurface {
    input: TextInput,
    config: TextSurfaceConfig,
}

impl TextSurface {
    pub fn new(initial: &str, config: TextSurfaceConfig) -> Self {
        let mut input = TextInput::new(initial, config.constraints.clone());
        if config.select_on_open {
            input.select_all();
        }
        Self { input, config }
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    fn is_submit(&self, msg: &EditMsg) -> bool {
        let EditMsg::Key(press) = msg else {
            return false;
        };
        if press.key != Key::Enter {
            return false;
        }
        if self.config.constraints.allow_multiline {
            press.command
        } else {
            !press.shift
        }
    }
}

impl EditSurface<String> for TextSurface {
    fn handle(&mut self, msg: EditMsg, props: &EditProps<'_, String>) -> Option<EditAction<String>> {
        if self.is_submit(&msg) {
            return Some(EditAction::Save(self.input.text().to_string()));
        }

        match msg {
            EditMsg::Key(press) if press.key == Key::Escape => Some(EditAction::Cancel),
            EditMsg::Key(press) => {
                let outcome = self.input.handle_key(press);
                clear_error_on_edit(outcome == KeyOutcome::Edited, props)
            }
            EditMsg::Type(text) => {
                let changed = self.input.insert_text(&text);
                clear_error_on_edit(changed, props)
            }
            EditMsg::SetText(text) => {
                self.input.set_text(&text);
                clear_error_on_edit(true, props)
            }
            EditMsg::ClickSave => Some(EditAction::Save(self.input.text().to_string())),
            EditMsg::ClickCancel => Some(EditAction::Cancel),
            _ => None,
        }
    }

    fn view(&self, props: &EditProps<'_, String>) -> ViewNode {
        let input = ViewNode::Input(InputView {
            kind: self.config.kind,
            value: self.input.text().to_string(),
            cursor: self.input.cursor(),
            placeholder: self.config.placeholder.clone(),
            aria_label: Some(
                self.config
                    .aria_label
                    .clone()
                    .unwrap_or_else(|| props.label.to_string()),
            ),
            focused: props.input_ref.is_focused(),
            multiline: self.config.constraints.allow_multiline,
            max_length: self.config.constraints.max_length,
            prefix: None,
            suffix: None,
            presentation: self.config.presentation,
        });
        let controls = if self.config.text_buttons {
            text_controls()
        } else {
            edit_controls(self.config.save_label, self.config.cancel_label)
        };

        if self.config.constraints.allow_multiline {
            ViewNode::Column(vec![input, controls])
        } else {
            ViewNode::Row(vec![input, controls])
        }
    }
}

/// Single-line text field
#[derive(Debug, Clone, Default)]
pub struct TextAdapter {
    placeholder: Option<String>,
    max_length: Option<usize>,
    input_kind: InputKind,
}

impl TextAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Input type: text, email, url or tel
    pub fn input_kind(mut self, kind: InputKind) -> Self {
        self.input_kind = kind;
        self
    }
}

impl FieldAdapter for TextAdapter {
    type Value = String;

    fn kind(&self) -> &'static str {
        "text"
    }

    fn display(&self, value: &String) -> DisplayText {
        if value.is_empty() {
            DisplayText::empty(self.placeholder.as_deref())
        } else {
            DisplayText::value(value.clone())
        }
    }

    fn format(&self, value: &String) -> String {
        value.clone()
    }

    fn open(&self, props: &EditProps<'_, String>) -> Box<dyn EditSurface<String>> {
        Box::new(TextSurface::new(
            props.value,
            TextSurfaceConfig {
                kind: self.input_kind,
                placeholder: self.placeholder.clone(),
                constraints: EditConstraints::single_line().with_max_length(self.max_length),
                ..TextSurfaceConfig::default()
            },
        ))
    }
}
