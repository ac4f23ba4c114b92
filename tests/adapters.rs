//! Typed adapter behaviour through the full field
//!
//! Numeric parsing and bounds, formatting, auto-saving date/select surfaces,
//! and the title's unchanged-value shortcut.

mod common;

use chrono::NaiveDate;
use common::Harness;
use inline_edit::adapters::{
    CurrencyAdapter, DateAdapter, EditableField, NumberAdapter, PercentAdapter, SelectAdapter,
    SelectOption, TextareaAdapter, TitleAdapter,
};
use inline_edit::messages::{EditMsg, FieldMsg, Key, KeyPress};
use inline_edit::model::EditableState;
use inline_edit::util::{format_currency, format_number, format_percent};
use inline_edit::view::ViewNode;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ========================================================================
// Formatting
// ========================================================================

#[test]
fn test_formatting_is_deterministic() {
    assert_eq!(format_currency(1234567.89, "$", 2), "$1,234,567.89");
    assert_eq!(format_percent(15.0, 0), "15%");
    assert_eq!(format_number(1234567.0, None, true), "1,234,567");
    assert_eq!(format_number(1234567.0, None, false), "1234567");
}

#[test]
fn test_rest_displays_use_adapter_formats() {
    let number = EditableField::new("Hours", Some(1234567.0), NumberAdapter::new());
    assert_eq!(number.view().text_content(), "1,234,567");

    let currency = EditableField::new("Budget", Some(1234567.89), CurrencyAdapter::new());
    assert_eq!(currency.view().text_content(), "$1,234,567.89");

    let percent = EditableField::new("Discount", Some(15.0), PercentAdapter::new());
    assert_eq!(percent.view().text_content(), "15%");

    let empty = EditableField::new("Budget", None, CurrencyAdapter::new());
    assert_eq!(empty.view().text_content(), "Enter amount...");

    let unlabelled = EditableField::new("Hours", None, NumberAdapter::new().placeholder(""));
    assert_eq!(unlabelled.view().text_content(), "Not set");
}

// ========================================================================
// Numeric adapters
// ========================================================================

#[test]
fn test_numeric_empty_input_saves_null() {
    let mut number = Harness::new(EditableField::new("N", Some(3.0), NumberAdapter::new()));
    number.click();
    number.set_text("");
    number.key(Key::Enter);
    assert_eq!(number.saves, vec![None]);

    let mut currency = Harness::new(EditableField::new("C", Some(3.0), CurrencyAdapter::new()));
    currency.click();
    currency.set_text("");
    currency.edit(EditMsg::ClickSave);
    assert_eq!(currency.saves, vec![None]);

    let mut percent = Harness::new(EditableField::new("P", Some(3.0), PercentAdapter::new()));
    percent.click();
    percent.set_text("   ");
    percent.key(Key::Enter);
    assert_eq!(percent.saves, vec![None]);
}

#[test]
fn test_numeric_parses_leading_number() {
    let mut h = Harness::new(EditableField::new("N", None, NumberAdapter::new()));
    h.click();
    h.set_text("42.5");
    h.key(Key::Enter);
    assert_eq!(h.saves, vec![Some(42.5)]);
}

#[test]
fn test_bound_messages_carry_units() {
    let mut percent = Harness::new(EditableField::new(
        "Discount",
        Some(15.0),
        PercentAdapter::new().max(100.0),
    ));
    percent.click();
    percent.set_text("150");
    percent.key(Key::Enter);
    assert_eq!(percent.alert().as_deref(), Some("Value must be at most 100%"));

    let mut number = Harness::new(EditableField::new(
        "Hours",
        Some(1.0),
        NumberAdapter::new().min(0.0),
    ));
    number.click();
    number.set_text("-1");
    number.key(Key::Enter);
    assert_eq!(number.alert().as_deref(), Some("Value must be at least 0"));
    assert!(number.saves.is_empty());
}

#[test]
fn test_scenario_currency_below_minimum() {
    let mut h = Harness::new(EditableField::new(
        "Budget",
        Some(99.99),
        CurrencyAdapter::new().min(10.0),
    ));
    h.click();
    h.set_text("");
    h.type_text("5");
    h.edit(EditMsg::ClickSave);

    assert_eq!(h.alert().as_deref(), Some("Value must be at least $10"));
    assert_eq!(h.state(), EditableState::Edit);
    assert!(h.view().find_input().is_some());
    assert!(h.saves.is_empty());
}

#[test]
fn test_currency_input_has_symbol_prefix() {
    let mut h = Harness::new(EditableField::new(
        "Budget",
        Some(12.0),
        CurrencyAdapter::new().symbol("€"),
    ));
    h.click();
    let input = h.view().find_input().cloned().unwrap();
    assert_eq!(input.prefix.as_deref(), Some("€"));
    assert_eq!(input.value, "12");
}

// ========================================================================
// Auto-saving adapters
// ========================================================================

#[test]
fn test_date_selection_saves_immediately() {
    let mut h = Harness::new(EditableField::new(
        "Due Date",
        Some("2025-01-20".to_string()),
        DateAdapter::new(),
    ));
    assert_eq!(h.view().text_content(), "Jan 20, 2025");

    h.click();
    h.edit(EditMsg::SelectDay(day(2025, 2, 14)));
    assert_eq!(h.saves, vec![Some("2025-02-14".to_string())]);
    assert_eq!(h.state(), EditableState::Saving);

    h.edit(EditMsg::OpenChange(false));
    h.resolve(Ok(()));
    assert_eq!(h.state(), EditableState::Rest);
    assert_eq!(h.view().text_content(), "Feb 14, 2025");
}

#[test]
fn test_date_dismiss_cancels_once() {
    let mut h = Harness::new(
        EditableField::controlled("Due Date", None, false, DateAdapter::new()),
    );
    h.click();
    h.reflect();
    assert_eq!(h.state(), EditableState::Edit);

    h.edit(EditMsg::OpenChange(false));
    h.edit(EditMsg::OpenChange(false));
    assert_eq!(h.editing_requests, vec![true, false]);
    assert!(h.saves.is_empty());
}

#[test]
fn test_date_close_after_selection_is_not_a_cancel() {
    let mut h = Harness::new(
        EditableField::new("Due Date", None, DateAdapter::new().today(day(2025, 1, 1)))
            .with_show_saving_state(false),
    );
    h.click();
    h.edit(EditMsg::SelectDay(day(2025, 1, 2)));
    h.edit(EditMsg::OpenChange(false));
    assert_eq!(h.state(), EditableState::Edit);
    assert_eq!(h.saves.len(), 1);
}

#[test]
fn test_date_stays_open_on_blur() {
    let mut h = Harness::new(EditableField::new("Due Date", None, DateAdapter::new()));
    h.click();
    h.send(FieldMsg::Blur { within: false });
    assert_eq!(h.state(), EditableState::Edit);
}

#[test]
fn test_select_option_saves_immediately() {
    let options = vec![
        SelectOption::new("open", "Open"),
        SelectOption::new("closed", "Closed"),
    ];
    let mut h = Harness::new(EditableField::new(
        "Status",
        "open".to_string(),
        SelectAdapter::new(options),
    ));
    assert_eq!(h.view().text_content(), "Open");

    h.click();
    h.edit(EditMsg::SelectOption("closed".to_string()));
    assert_eq!(h.saves, vec!["closed".to_string()]);

    h.resolve(Ok(()));
    assert_eq!(h.view().text_content(), "Closed");
}

#[test]
fn test_select_keyboard_skips_disabled_options() {
    let options = vec![
        SelectOption::new("open", "Open"),
        SelectOption::new("archived", "Archived").disabled(),
        SelectOption::new("closed", "Closed"),
    ];
    let mut h = Harness::new(EditableField::new(
        "Status",
        "open".to_string(),
        SelectAdapter::new(options),
    ));
    h.click();
    h.key(Key::Down);
    h.key(Key::Enter);
    assert_eq!(h.saves, vec!["closed".to_string()]);
}

#[test]
fn test_select_dismiss_cancels() {
    let mut h = Harness::new(EditableField::new(
        "Status",
        String::new(),
        SelectAdapter::new(vec![SelectOption::new("open", "Open")]),
    ));
    assert_eq!(h.view().text_content(), "Not selected");
    h.click();
    h.edit(EditMsg::OpenChange(false));
    assert_eq!(h.state(), EditableState::Rest);
    assert!(h.saves.is_empty());
}

// ========================================================================
// Title and textarea
// ========================================================================

#[test]
fn test_title_unchanged_skips_save() {
    let mut h = Harness::new(EditableField::new(
        "Title",
        "Quarterly review".to_string(),
        TitleAdapter::new(),
    ));
    h.click();
    h.key(Key::Enter);
    assert!(h.saves.is_empty());
    assert_eq!(h.state(), EditableState::Rest);

    h.click();
    h.type_text("Annual review");
    h.key(Key::Enter);
    assert_eq!(h.saves, vec!["Annual review".to_string()]);
}

#[test]
fn test_title_renders_as_heading() {
    let h = Harness::new(EditableField::new(
        "Title",
        "Quarterly review".to_string(),
        TitleAdapter::new(),
    ));
    assert!(h
        .view()
        .find_by_aria_label("Click to edit: Quarterly review")
        .is_some());
}

#[test]
fn test_text_always_saves_even_if_unchanged() {
    let mut h = Harness::new(EditableField::new(
        "Name",
        "John".to_string(),
        inline_edit::adapters::TextAdapter::new(),
    ));
    h.click();
    h.key(Key::Enter);
    assert_eq!(h.saves, vec!["John".to_string()]);
}

#[test]
fn test_textarea_multiline_flow() {
    let mut h = Harness::new(EditableField::new(
        "Notes",
        String::new(),
        TextareaAdapter::new(),
    ));
    h.send(FieldMsg::PointerEnter);
    assert_eq!(h.state(), EditableState::Rest);

    h.click();
    h.type_text("line one");
    h.key(Key::Enter);
    h.type_text("line two");
    assert!(h.saves.is_empty());

    h.send(FieldMsg::Key(KeyPress::with_command(Key::Enter)));
    assert_eq!(h.saves, vec!["line one\nline two".to_string()]);
    assert!(matches!(
        h.view().children()[0],
        ViewNode::Row(_)
    ));
}
