//! Title adapter - heading text that only saves when it actually changed

use crate::editable::EditConstraints;
use crate::model::FieldOptions;
use crate::view::{InputKind, Presentation};

use super::text::{TextSurface, TextSurfaceConfig};
use super::{DisplayText, EditProps, EditSurface, FieldAdapter};

pub const TITLE_PLACEHOLDER: &str = "Enter title...";

#[derive(Debug, Clone)]
pub struct TitleAdapter {
    placeholder: String,
}

impl Default for TitleAdapter {
    fn default() -> Self {
        Self {
            placeholder: TITLE_PLACEHOLDER.to_string(),
        }
    }
}

impl TitleAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

impl FieldAdapter for TitleAdapter {
    type Value = String;

    fn kind(&self) -> &'static str {
        "title"
    }

    fn display(&self, value: &String) -> DisplayText {
        if value.is_empty() {
            DisplayText::placeholder(self.placeholder.clone())
        } else {
            DisplayText::value(value.clone())
        }
    }

    fn format(&self, value: &String) -> String {
        if value.is_empty() {
            self.placeholder.clone()
        } else {
            value.clone()
        }
    }

    fn options(&self) -> FieldOptions {
        // Leaving the input keeps the session; the user saves or cancels explicitly
        FieldOptions {
            exit_on_blur: false,
            skip_unchanged: true,
            ..FieldOptions::default()
        }
    }

    fn presentation(&self) -> Presentation {
        Presentation::Heading
    }

    fn display_aria_label(&self, _label: &str, value: &String) -> String {
        format!("Click to edit: {}", self.format(value))
    }

    fn open(&self, props: &EditProps<'_, String>) -> Box<dyn EditSurface<String>> {
        Box::new(TextSurface::new(
            props.value,
            TextSurfaceConfig {
                kind: InputKind::Text,
                placeholder: Some(self.placeholder.clone()),
                presentation: Presentation::Heading,
                aria_label: Some("Edit title".to_string()),
                constraints: EditConstraints::single_line(),
                save_label: "Save title",
                cancel_label: "Cancel editing",
                text_buttons: false,
                select_on_open: true,
            },
        ))
    }
}
