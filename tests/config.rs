//! Configuration system tests
//!
//! Tests for config paths, user defaults persistence and form definitions.

mod common;

use common::SAMPLE_FORM;
use inline_edit::config::{FormConfig, InlineEditConfig};
use inline_edit::config_paths;
use inline_edit::model::{EditableState, FieldId, FieldValue};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("inline-edit"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(file) = config_paths::config_file() {
        assert!(file.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_inside_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(config));
    }
}

// ========================================================================
// User Defaults Tests
// ========================================================================

#[test]
fn test_defaults_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = InlineEditConfig {
        currency_symbol: "£".to_string(),
        show_saving_state: false,
        exclusive_editing: true,
        ..InlineEditConfig::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(InlineEditConfig::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = InlineEditConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(loaded, InlineEditConfig::default());
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "currency_symbol: [unclosed").unwrap();
    assert_eq!(InlineEditConfig::load_from(&path), InlineEditConfig::default());
}

// ========================================================================
// Form Definition Tests
// ========================================================================

#[test]
fn test_form_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.yaml");
    std::fs::write(&path, SAMPLE_FORM).unwrap();

    let form = FormConfig::load(&path)
        .unwrap()
        .build(&InlineEditConfig::default())
        .unwrap();
    assert_eq!(form.len(), 9);
    let kinds: Vec<&str> = form.fields().iter().map(|f| f.widget.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "title", "text", "number", "currency", "percent", "date", "select", "textarea",
            "text"
        ]
    );
}

#[test]
fn test_missing_form_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FormConfig::load(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.starts_with("Failed to read form"), "{}", err);
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let yaml = "fields:\n  - { id: a, label: A, kind: text }\n  - { id: a, label: B, kind: title }\n";
    let err = FormConfig::from_yaml(yaml)
        .unwrap()
        .build(&InlineEditConfig::default())
        .unwrap_err();
    assert!(err.contains("Duplicate field id 'a'"), "{}", err);
}

#[test]
fn test_user_default_hides_saving_state() {
    let defaults = InlineEditConfig {
        show_saving_state: false,
        ..InlineEditConfig::default()
    };
    let mut form = FormConfig::from_yaml(SAMPLE_FORM).unwrap().build(&defaults).unwrap();
    let id = FieldId::from("client");
    let field = form.field_mut(&id).unwrap();
    field.update(inline_edit::messages::FieldMsg::Click);
    field.update(inline_edit::messages::FieldMsg::Key(
        inline_edit::messages::KeyPress::new(inline_edit::messages::Key::Enter),
    ));
    assert_eq!(field.state(), EditableState::Edit);
}

#[test]
fn test_controlled_and_readonly_flags() {
    let yaml = r#"
fields:
  - id: owner
    label: Owner
    kind: text
    controlled: true
  - id: created
    label: Created
    kind: date
    value: 2024-12-01
    readonly: true
"#;
    let form = FormConfig::from_yaml(yaml)
        .unwrap()
        .build(&InlineEditConfig::default())
        .unwrap();
    let owner = form.field(&FieldId::from("owner")).unwrap();
    assert!(owner.is_controlled());
    let created = form.field(&FieldId::from("created")).unwrap();
    assert!(created.readonly());
    assert_eq!(created.value(), FieldValue::Date(Some("2024-12-01".to_string())));
}

#[test]
fn test_validation_rules_apply() {
    let yaml = r#"
fields:
  - id: email
    label: Email
    kind: text
    input_type: email
    value: a@b.co
    validate:
      email: true
"#;
    let mut form = FormConfig::from_yaml(yaml)
        .unwrap()
        .build(&InlineEditConfig::default())
        .unwrap();
    let id = FieldId::from("email");
    let field = form.field_mut(&id).unwrap();
    field.update(inline_edit::messages::FieldMsg::Click);
    field.update(inline_edit::messages::FieldMsg::Edit(
        inline_edit::messages::EditMsg::SetText("not-an-email".to_string()),
    ));
    let effect = field.update(inline_edit::messages::FieldMsg::Key(
        inline_edit::messages::KeyPress::new(inline_edit::messages::Key::Enter),
    ));
    assert_eq!(effect, None);
    assert_eq!(field.error(), Some("Invalid email"));
}
