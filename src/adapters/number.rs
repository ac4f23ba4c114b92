//! Number adapter - locale-formatted numbers with min/max bounds

use crate::model::NumberValue;
use crate::util::format_number;
use crate::validation::Validator;

use super::numeric::{bounds_validator, empty_display, NumericSurface};
use super::{DisplayText, EditProps, EditSurface, FieldAdapter};

pub const NUMBER_PLACEHOLDER: &str = "Enter number...";

#[derive(Debug, Clone)]
pub struct NumberAdapter {
    min: Option<f64>,
    max: Option<f64>,
    /// Fixed fraction digits (None = up to three, trailing zeros dropped)
    decimal_places: Option<usize>,
    use_grouping: bool,
    placeholder: String,
}

impl Default for NumberAdapter {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            decimal_places: None,
            use_grouping: true,
            placeholder: NUMBER_PLACEHOLDER.to_string(),
        }
    }
}

impl NumberAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn decimal_places(mut self, places: usize) -> Self {
        self.decimal_places = Some(places);
        self
    }

    pub fn use_grouping(mut self, grouping: bool) -> Self {
        self.use_grouping = grouping;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

impl FieldAdapter for NumberAdapter {
    type Value = NumberValue;

    fn kind(&self) -> &'static str {
        "number"
    }

    fn display(&self, value: &NumberValue) -> DisplayText {
        match value {
            Some(_) => DisplayText::value(self.format(value)),
            None => empty_display(&self.placeholder),
        }
    }

    fn format(&self, value: &NumberValue) -> String {
        value
            .map(|n| format_number(n, self.decimal_places, self.use_grouping))
            .unwrap_or_default()
    }

    fn constraints(&self) -> Validator<NumberValue> {
        bounds_validator(self.min, self.max, |bound| bound.to_string())
    }

    fn open(&self, props: &EditProps<'_, NumberValue>) -> Box<dyn EditSurface<NumberValue>> {
        Box::new(NumericSurface::new(props.value, &self.placeholder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::EditableField;
    use crate::messages::{EditMsg, FieldMsg};
    use crate::model::Effect;

    #[test]
    fn test_display_formats_with_grouping() {
        let adapter = NumberAdapter::new();
        assert_eq!(adapter.display(&Some(1234567.0)).text, "1,234,567");
        assert_eq!(adapter.display(&None), DisplayText::placeholder(NUMBER_PLACEHOLDER));

        let fixed = NumberAdapter::new().decimal_places(2).use_grouping(false);
        assert_eq!(fixed.format(&Some(1234.5)), "1234.50");
    }

    #[test]
    fn test_null_shows_placeholder() {
        let zip = NumberAdapter::new().placeholder("Enter zip code...");
        assert_eq!(zip.display(&None), DisplayText::placeholder("Enter zip code..."));

        let blank = NumberAdapter::new().placeholder("");
        assert_eq!(blank.display(&None), DisplayText::placeholder("Not set"));
    }

    #[test]
    fn test_bounds_message_plain() {
        let adapter = NumberAdapter::new().min(1.0).max(5.0);
        assert_eq!(
            adapter.constraints().validate(&Some(0.0)),
            Some("Value must be at least 1".to_string())
        );
        assert_eq!(
            adapter.constraints().validate(&Some(6.0)),
            Some("Value must be at most 5".to_string())
        );
    }

    #[test]
    fn test_empty_input_saves_null() {
        let mut field = EditableField::new("Count", Some(3.0), NumberAdapter::new());
        field.update(FieldMsg::Click);
        field.update(FieldMsg::Edit(EditMsg::SetText(String::new())));
        let effect = field.update(FieldMsg::Edit(EditMsg::ClickSave));
        assert_eq!(effect, Some(Effect::Save(None)));
    }

    #[test]
    fn test_input_placeholder() {
        let mut field = EditableField::new("Count", None, NumberAdapter::new());
        field.update(FieldMsg::Click);
        let view = field.view();
        let input = view.find_input().cloned().unwrap_or_default();
        assert_eq!(input.placeholder.as_deref(), Some(NUMBER_PLACEHOLDER));
        assert_eq!(input.value, "");
    }
}
