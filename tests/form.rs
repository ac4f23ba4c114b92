//! Form-level routing: message dispatch, focus movement and exclusive editing

mod common;

use common::{state_of, value_of, SAMPLE_FORM};
use inline_edit::commands::Cmd;
use inline_edit::config::{FormConfig, InlineEditConfig};
use inline_edit::messages::{EditMsg, FieldMsg, FormMsg, Key, Msg};
use inline_edit::model::{EditableState, FieldId, FieldValue, FormModel};
use inline_edit::update::update;

fn sample(exclusive: bool) -> FormModel {
    FormConfig::from_yaml(SAMPLE_FORM)
        .unwrap()
        .build(&InlineEditConfig::default())
        .unwrap()
        .with_exclusive_editing(exclusive)
}

// ========================================================================
// Dispatch
// ========================================================================

#[test]
fn test_save_produces_command_for_field() {
    let mut form = sample(false);
    update(&mut form, Msg::field("client", FieldMsg::Click));
    update(
        &mut form,
        Msg::edit("client", EditMsg::SetText("Jane Doe".to_string())),
    );
    let cmd = update(&mut form, Msg::key("client", Key::Enter));

    assert!(cmd.as_ref().is_some_and(Cmd::has_save));
    assert!(cmd.unwrap().into_vec().contains(&Cmd::Save {
        field: FieldId::from("client"),
        value: FieldValue::Text("Jane Doe".to_string()),
    }));
    assert_eq!(state_of(&form, "client"), EditableState::Saving);
    assert!(form.is_saving());
}

#[test]
fn test_required_validation_blocks_command() {
    let mut form = sample(false);
    update(&mut form, Msg::field("client", FieldMsg::Click));
    update(&mut form, Msg::edit("client", EditMsg::SetText(String::new())));
    let cmd = update(&mut form, Msg::key("client", Key::Enter));

    assert!(!cmd.as_ref().is_some_and(Cmd::has_save));
    let client = form.field(&FieldId::from("client")).unwrap();
    assert_eq!(client.error(), Some("Client is required"));
}

#[test]
fn test_unknown_field_is_ignored() {
    let mut form = sample(false);
    assert_eq!(update(&mut form, Msg::field("missing", FieldMsg::Click)), None);
}

#[test]
fn test_commit_then_settle_updates_value() {
    let mut form = sample(false);
    update(&mut form, Msg::field("budget", FieldMsg::Click));
    update(&mut form, Msg::edit("budget", EditMsg::SetText("250".to_string())));
    update(&mut form, Msg::edit("budget", EditMsg::ClickSave));

    update(
        &mut form,
        Msg::field("budget", FieldMsg::ValueChanged(FieldValue::Number(Some(250.0)))),
    );
    update(&mut form, Msg::field("budget", FieldMsg::SaveCompleted(Ok(()))));

    assert_eq!(value_of(&form, "budget"), FieldValue::Number(Some(250.0)));
    assert_eq!(state_of(&form, "budget"), EditableState::Rest);
    assert_eq!(form.to_json()["budget"], serde_json::json!(250.0));
}

// ========================================================================
// Focus movement
// ========================================================================

#[test]
fn test_tab_walks_fields_in_order() {
    let mut form = sample(false);
    let mut visited = Vec::new();
    for _ in 0..9 {
        update(&mut form, Msg::Form(FormMsg::FocusNext));
        visited.push(form.focused().map(|id| id.to_string()).unwrap_or_default());
    }
    // The readonly reference field is skipped and the order wraps
    assert_eq!(
        visited,
        vec![
            "title", "client", "hours", "budget", "discount", "due", "status", "notes", "title"
        ]
    );
}

#[test]
fn test_shift_tab_goes_backwards() {
    let mut form = sample(false);
    update(&mut form, Msg::Form(FormMsg::FocusNext));
    update(&mut form, Msg::Form(FormMsg::FocusNext));
    update(&mut form, Msg::Form(FormMsg::FocusPrev));
    assert_eq!(form.focused(), Some(&FieldId::from("title")));
    assert_eq!(state_of(&form, "title"), EditableState::Interest);
    assert_eq!(state_of(&form, "client"), EditableState::Rest);
}

// ========================================================================
// Exclusive editing
// ========================================================================

#[test]
fn test_exclusive_editing_keeps_one_session() {
    let mut form = sample(true);
    update(&mut form, Msg::field("client", FieldMsg::Click));
    update(&mut form, Msg::field("hours", FieldMsg::Click));
    update(&mut form, Msg::field("status", FieldMsg::Click));

    assert_eq!(form.editing(), vec![FieldId::from("status")]);
    assert_eq!(state_of(&form, "client"), EditableState::Rest);
    assert_eq!(state_of(&form, "hours"), EditableState::Rest);
}

#[test]
fn test_exclusive_editing_leaves_saving_fields_alone() {
    let mut form = sample(true);
    update(&mut form, Msg::field("client", FieldMsg::Click));
    update(&mut form, Msg::key("client", Key::Enter));
    assert_eq!(state_of(&form, "client"), EditableState::Saving);

    update(&mut form, Msg::field("hours", FieldMsg::Click));
    assert_eq!(state_of(&form, "client"), EditableState::Saving);
    assert_eq!(state_of(&form, "hours"), EditableState::Edit);
}

#[test]
fn test_sessions_coexist_without_exclusive_editing() {
    let mut form = sample(false);
    update(&mut form, Msg::field("client", FieldMsg::Click));
    update(&mut form, Msg::field("hours", FieldMsg::Click));
    assert_eq!(form.editing().len(), 2);
}

// ========================================================================
// Rendering
// ========================================================================

#[test]
fn test_form_view_lists_every_field() {
    let form = sample(false);
    let text = form.view().text_content();
    for expected in [
        "Quarterly review",
        "John Doe",
        "1,234,567",
        "$99.99",
        "15%",
        "Jan 20, 2025",
        "Open",
        "Not set",
        "CASE-42",
    ] {
        assert!(text.contains(expected), "missing {:?} in {:?}", expected, text);
    }
}
