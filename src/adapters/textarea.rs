//! Textarea adapter - multi-line text without a hover state

use crate::editable::EditConstraints;
use crate::model::FieldOptions;
use crate::view::InputKind;

use super::text::{TextSurface, TextSurfaceConfig};
use super::{DisplayText, EditProps, EditSurface, FieldAdapter};

#[derive(Debug, Clone, Default)]
pub struct TextareaAdapter {
    placeholder: Option<String>,
    max_length: Option<usize>,
}

impl TextareaAdapter {
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
}

impl FieldAdapter for TextareaAdapter {
    type Value = String;

    fn kind(&self) -> &'static str {
        "textarea"
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

    fn options(&self) -> FieldOptions {
        FieldOptions {
            exit_on_blur: false,
            interest_enabled: false,
            ..FieldOptions::default()
        }
    }

    fn open(&self, props: &EditProps<'_, String>) -> Box<dyn EditSurface<String>> {
        Box::new(TextSurface::new(
            props.value,
            TextSurfaceConfig {
                kind: InputKind::Text,
                placeholder: self.placeholder.clone(),
                constraints: EditConstraints::multiline().with_max_length(self.max_length),
                text_buttons: true,
                ..TextSurfaceConfig::default()
            },
        ))
    }
}
