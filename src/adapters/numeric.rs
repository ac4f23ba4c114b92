//! Shared edit surface and constraints of the number, currency and percent adapters

use crate::editable::{EditConstraints, KeyOutcome, TextInput};
use crate::messages::{EditMsg, Key};
use crate::model::NumberValue;
use crate::util::parse_float_prefix;
use crate::validation::Validator;
use crate::view::{edit_controls, InputKind, InputView, Presentation, ViewNode};

use super::{clear_error_on_edit, DisplayText, EditAction, EditProps, EditSurface};

/// Parse numeric input: empty and unparseable input both mean "not set"
pub fn parse_numeric(input: &str) -> NumberValue {
    if input.is_empty() {
        return None;
    }
    parse_float_prefix(input)
}

/// Rest display of an unset value: the placeholder, or "Not set" when it is blank
pub fn empty_display(placeholder: &str) -> DisplayText {
    DisplayText::empty(Some(placeholder).filter(|p| !p.trim().is_empty()))
}

/// Text shown in the input when a session starts
pub fn initial_text(value: &NumberValue) -> String {
    value.map(|n| n.to_string()).unwrap_or_default()
}

/// Inclusive min/max check with unit-aware messages.
///
/// `unit` renders a bound for the message (`10` → `$10`, `10%`). Unset
/// values always pass.
pub fn bounds_validator(
    min: Option<f64>,
    max: Option<f64>,
    unit: impl Fn(f64) -> String + Send + Sync + 'static,
) -> Validator<NumberValue> {
    if min.is_none() && max.is_none() {
        return Validator::None;
    }
    Validator::check(move |value: &NumberValue| {
        let n = (*value)?;
        if let Some(min) = min {
            if n < min {
                return Some(format!("Value must be at least {}", unit(min)));
            }
        }
        if let Some(max) = max {
            if n > max {
                return Some(format!("Value must be at most {}", unit(max)));
            }
        }
        None
    })
}

/// Numeric input with an optional leading or trailing glyph
pub struct NumericSurface {
    input: TextInput,
    placeholder: Option<String>,
    prefix: Option<String>,
    suffix: Option<String>,
}

impl NumericSurface {
    pub fn new(value: &NumberValue, placeholder: &str) -> Self {
        Self {
            input: TextInput::new(&initial_text(value), EditConstraints::numeric()),
            placeholder: Some(placeholder.to_string()),
            prefix: None,
            suffix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    fn submit(&self) -> Option<EditAction<NumberValue>> {
        Some(EditAction::Save(parse_numeric(self.input.text())))
    }
}

impl EditSurface<NumberValue> for NumericSurface {
    fn handle(
        &mut self,
        msg: EditMsg,
        props: &EditProps<'_, NumberValue>,
    ) -> Option<EditAction<NumberValue>> {
        match msg {
            EditMsg::Key(press) if press.key == Key::Enter => self.submit(),
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
            EditMsg::ClickSave => self.submit(),
            EditMsg::ClickCancel => Some(EditAction::Cancel),
            _ => None,
        }
    }

    fn view(&self, props: &EditProps<'_, NumberValue>) -> ViewNode {
        ViewNode::Row(vec![
            ViewNode::Input(InputView {
                kind: InputKind::Number,
                value: self.input.text().to_string(),
                cursor: self.input.cursor(),
                placeholder: self.placeholder.clone(),
                aria_label: Some(props.label.to_string()),
                focused: props.input_ref.is_focused(),
                multiline: false,
                max_length: None,
                prefix: self.prefix.clone(),
                suffix: self.suffix.clone(),
                presentation: Presentation::Body,
            }),
            edit_controls("Save", "Cancel"),
        ])
    }
}
