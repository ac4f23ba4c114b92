//! Typed field adapters
//!
//! An adapter is a strategy object for one value type. It supplies display
//! formatting, built-in constraints, behaviour switches and the edit surface
//! that is opened for every edit session. None of them add state machine
//! behaviour; that all lives in [`FieldCore`](crate::model::FieldCore).

pub mod currency;
pub mod date;
pub mod field;
pub mod number;
pub mod numeric;
pub mod percent;
pub mod select;
pub mod text;
pub mod textarea;
pub mod title;

pub use currency::CurrencyAdapter;
pub use date::DateAdapter;
pub use field::{EditableField, FieldWidget};
pub use number::NumberAdapter;
pub use percent::PercentAdapter;
pub use select::{SelectAdapter, SelectOption};
pub use text::TextAdapter;
pub use textarea::TextareaAdapter;
pub use title::TitleAdapter;

use crate::messages::EditMsg;
use crate::model::{FieldData, FieldOptions, InputRef};
use crate::validation::Validator;
use crate::view::{Presentation, ViewNode};

/// Shown in rest state when a value is empty and no placeholder is set
pub const NOT_SET: &str = "Not set";

/// Accessible label of the saving indicator
pub const SAVING_LABEL: &str = "Saving...";

/// Text of the display region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayText {
    pub text: String,
    /// Placeholder styling
    pub muted: bool,
}

impl DisplayText {
    pub fn value(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            muted: false,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            muted: true,
        }
    }

    /// `placeholder`, or "Not set"
    pub fn empty(placeholder: Option<&str>) -> Self {
        Self::placeholder(placeholder.unwrap_or(NOT_SET))
    }
}

/// What the core hands to the edit surface each time it is driven or drawn
#[derive(Debug, Clone, Copy)]
pub struct EditProps<'a, T> {
    pub label: &'a str,
    /// Pending value of this session
    pub value: &'a T,
    pub error: Option<&'a str>,
    pub input_ref: &'a InputRef,
}

/// What an edit surface asks the core to do
#[derive(Debug, Clone, PartialEq)]
pub enum EditAction<T> {
    Save(T),
    Cancel,
    ClearError,
}

/// Per-session edit UI state of an adapter.
pub trait EditSurface<T> {
    /// React to an interaction with the surface
    fn handle(&mut self, msg: EditMsg, props: &EditProps<'_, T>) -> Option<EditAction<T>>;

    /// Describe the surface
    fn view(&self, props: &EditProps<'_, T>) -> ViewNode;
}

/// Strategy object for one field type.
pub trait FieldAdapter: 'static {
    type Value: FieldData;

    /// Short kind name ("text", "currency", ...)
    fn kind(&self) -> &'static str;

    /// Rest/interest display of the committed value
    fn display(&self, value: &Self::Value) -> DisplayText;

    /// Plain formatting, used for the saving view
    fn format(&self, value: &Self::Value) -> String;

    /// Built-in constraints, run after the caller's validator
    fn constraints(&self) -> Validator<Self::Value> {
        Validator::None
    }

    fn options(&self) -> FieldOptions {
        FieldOptions::default()
    }

    fn presentation(&self) -> Presentation {
        Presentation::Body
    }

    /// Accessible label of the display region
    fn display_aria_label(&self, label: &str, _value: &Self::Value) -> String {
        format!("Edit {}", label)
    }

    /// Create the edit surface for a new session
    fn open(&self, props: &EditProps<'_, Self::Value>) -> Box<dyn EditSurface<Self::Value>>;
}

/// Map a changed-text outcome to the conventional error reset
pub(crate) fn clear_error_on_edit<T>(changed: bool, props: &EditProps<'_, T>) -> Option<EditAction<T>> {
    if changed && props.error.is_some() {
        Some(EditAction::ClearError)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_empty() {
        assert_eq!(DisplayText::empty(None), DisplayText::placeholder("Not set"));
        assert_eq!(
            DisplayText::empty(Some("Add a note")).text,
            "Add a note".to_string()
        );
        assert!(!DisplayText::value("x").muted);
    }

    #[test]
    fn test_clear_error_only_when_error_shown() {
        let input_ref = InputRef::default();
        let value = String::new();
        let with_error = EditProps {
            label: "Name",
            value: &value,
            error: Some("Required"),
            input_ref: &input_ref,
        };
        assert_eq!(clear_error_on_edit(true, &with_error), Some(EditAction::ClearError));
        assert_eq!(clear_error_on_edit(false, &with_error), None);

        let clean = EditProps { error: None, ..with_error };
        assert_eq!(clear_error_on_edit(true, &clean), None);
    }
}
