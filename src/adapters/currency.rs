//! Currency adapter - `{symbol}{grouped amount}` with fixed decimals

use crate::model::NumberValue;
use crate::util::format_currency;
use crate::validation::Validator;

use super::numeric::{bounds_validator, empty_display, NumericSurface};
use super::{DisplayText, EditProps, EditSurface, FieldAdapter};

pub const CURRENCY_PLACEHOLDER: &str = "Enter amount...";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_CURRENCY_DECIMALS: usize = 2;

#[derive(Debug, Clone)]
pub struct CurrencyAdapter {
    symbol: String,
    decimal_places: usize,
    min: Option<f64>,
    max: Option<f64>,
    placeholder: String,
}

impl Default for CurrencyAdapter {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            decimal_places: DEFAULT_CURRENCY_DECIMALS,
            min: None,
            max: None,
            placeholder: CURRENCY_PLACEHOLDER.to_string(),
        }
    }
}

impl CurrencyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
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

impl FieldAdapter for CurrencyAdapter {
    type Value = NumberValue;

    fn kind(&self) -> &'static str {
        "currency"
    }

    fn display(&self, value: &NumberValue) -> DisplayText {
        match value {
            Some(_) => DisplayText::value(self.format(value)),
            None => empty_display(&self.placeholder),
        }
    }

    fn format(&self, value: &NumberValue) -> String {
        value
            .map(|n| format_currency(n, &self.symbol, self.decimal_places))
            .unwrap_or_default()
    }

    fn constraints(&self) -> Validator<NumberValue> {
        let symbol = self.symbol.clone();
        bounds_validator(self.min, self.max, move |bound| format!("{}{}", symbol, bound))
    }

    fn open(&self, props: &EditProps<'_, NumberValue>) -> Box<dyn EditSurface<NumberValue>> {
        Box::new(NumericSurface::new(props.value, &self.placeholder).with_prefix(&self.symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::EditableField;
    use crate::messages::{EditMsg, FieldMsg};
    use crate::model::EditableState;

    #[test]
    fn test_display() {
        let adapter = CurrencyAdapter::new();
        assert_eq!(adapter.display(&Some(1234567.89)).text, "$1,234,567.89");
        assert_eq!(adapter.display(&Some(5.0)).text, "$5.00");
        assert_eq!(
            CurrencyAdapter::new().symbol("€").decimal_places(0).format(&Some(12.4)),
            "€12"
        );
    }

    #[test]
    fn test_null_shows_placeholder() {
        assert_eq!(
            CurrencyAdapter::new().display(&None),
            DisplayText::placeholder(CURRENCY_PLACEHOLDER)
        );
        let custom = CurrencyAdapter::new().placeholder("Enter budget...");
        assert_eq!(custom.display(&None).text, "Enter budget...");
        assert_eq!(CurrencyAdapter::new().placeholder(" ").display(&None).text, "Not set");
    }

    #[test]
    fn test_min_message_carries_symbol() {
        let mut field = EditableField::new("Amount", Some(99.99), CurrencyAdapter::new().min(10.0));
        field.update(FieldMsg::Click);
        field.update(FieldMsg::Edit(EditMsg::SetText(String::new())));
        field.update(FieldMsg::Edit(EditMsg::Type("5".into())));
        let effect = field.update(FieldMsg::Edit(EditMsg::ClickSave));

        assert_eq!(effect, None);
        assert_eq!(field.state(), EditableState::Edit);
        assert_eq!(field.view().find_alert(), Some("Value must be at least $10"));
    }

    #[test]
    fn test_input_has_currency_prefix() {
        let mut field = EditableField::new("Amount", Some(1.5), CurrencyAdapter::new());
        field.update(FieldMsg::Click);
        let view = field.view();
        let input = view.find_input().cloned().unwrap_or_default();
        assert_eq!(input.prefix.as_deref(), Some("$"));
        assert_eq!(input.value, "1.5");
        assert_eq!(input.placeholder.as_deref(), Some(CURRENCY_PLACEHOLDER));
    }
}
