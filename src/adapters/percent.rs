//! Percent adapter - `{grouped value}%` with fixed decimals

use crate::model::NumberValue;
use crate::util::format_percent;
use crate::validation::Validator;

use super::numeric::{bounds_validator, empty_display, NumericSurface};
use super::{DisplayText, EditProps, EditSurface, FieldAdapter};

pub const PERCENT_PLACEHOLDER: &str = "Enter percentage...";

#[derive(Debug, Clone)]
pub struct PercentAdapter {
    decimal_places: usize,
    min: Option<f64>,
    max: Option<f64>,
    placeholder: String,
}

impl Default for PercentAdapter {
    fn default() -> Self {
        Self {
            decimal_places: 0,
            min: None,
            max: None,
            placeholder: PERCENT_PLACEHOLDER.to_string(),
        }
    }
}

impl PercentAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decimal_places(mut self, places: usize) -> Self {
        self.decimal_places = places;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }
}

impl FieldAdapter for PercentAdapter {
    type Value = NumberValue;

    fn kind(&self) -> &'static str {
        "percent"
    }

    fn display(&self, value: &NumberValue) -> DisplayText {
        match value {
            Some(_) => DisplayText::value(self.format(value)),
            None => empty_display(&self.placeholder),
        }
    }

    fn format(&self, value: &NumberValue) -> String {
        value
            .map(|n| format_percent(n, self.decimal_places))
            .unwrap_or_default()
    }

    fn constraints(&self) -> Validator<NumberValue> {
        bounds_validator(self.min, self.max, |bound| format!("{}%", bound))
    }

    fn open(&self, props: &EditProps<'_, NumberValue>) -> Box<dyn EditSurface<NumberValue>> {
        Box::new(NumericSurface::new(props.value, &self.placeholder).with_suffix("%"))
    }
}
