//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use inline_edit::adapters::{EditableField, FieldAdapter};
use inline_edit::messages::{EditMsg, FieldMsg, Key, KeyPress};
use inline_edit::model::{Effect, EditableState, FieldData, FieldId, FieldValue, FormModel};
use inline_edit::view::ViewNode;

/// Drives one field the way a host would, recording what it asks for
pub struct Harness<A: FieldAdapter> {
    pub field: EditableField<A>,
    /// Every value handed to the save callback, in order
    pub saves: Vec<A::Value>,
    /// Every controlled-mode editing request, in order
    pub editing_requests: Vec<bool>,
    /// States observed after each message
    pub trail: Vec<EditableState>,
}

impl<A: FieldAdapter> Harness<A> {
    pub fn new(field: EditableField<A>) -> Self {
        Self {
            field,
            saves: Vec::new(),
            editing_requests: Vec::new(),
            trail: Vec::new(),
        }
    }

    pub fn send(&mut self, msg: FieldMsg) {
        if let Some(effect) = self.field.update(msg) {
            for leaf in effect.flatten() {
                match leaf {
                    Effect::Save(value) => self.saves.push(value.clone()),
                    Effect::EditingChanged(editing) => self.editing_requests.push(*editing),
                    _ => {}
                }
            }
        }
        self.trail.push(self.field.state());
    }

    pub fn click(&mut self) {
        self.send(FieldMsg::Click);
    }

    pub fn key(&mut self, key: Key) {
        self.send(FieldMsg::Key(KeyPress::new(key)));
    }

    pub fn edit(&mut self, msg: EditMsg) {
        self.send(FieldMsg::Edit(msg));
    }

    /// Replace the surface text
    pub fn set_text(&mut self, text: &str) {
        self.edit(EditMsg::SetText(text.to_string()));
    }

    pub fn type_text(&mut self, text: &str) {
        self.edit(EditMsg::Type(text.to_string()));
    }

    /// Resolve the in-flight save; on success the host commits the value first
    pub fn resolve(&mut self, result: Result<(), &str>) {
        match result {
            Ok(()) => {
                if let Some(saved) = self.saves.last().cloned() {
                    self.send(FieldMsg::ValueChanged(saved.into_field_value()));
                }
                self.send(FieldMsg::SaveCompleted(Ok(())));
            }
            Err(message) => self.send(FieldMsg::SaveCompleted(Err(message.to_string()))),
        }
    }

    /// Reflect the last editing request back, as a controlled host would
    pub fn reflect(&mut self) {
        if let Some(editing) = self.editing_requests.last().copied() {
            self.send(FieldMsg::SetEditing(editing));
        }
    }

    pub fn state(&self) -> EditableState {
        self.field.state()
    }

    pub fn view(&self) -> ViewNode {
        self.field.view()
    }

    pub fn alert(&self) -> Option<String> {
        self.view().find_alert().map(str::to_string)
    }

    pub fn input_text(&self) -> Option<String> {
        self.view().find_input().map(|input| input.value.clone())
    }
}

/// Value of a form field, panicking if the id is unknown
pub fn value_of(form: &FormModel, id: &str) -> FieldValue {
    form.field(&FieldId::from(id))
        .map(|field| field.value())
        .unwrap_or_else(|| panic!("no field '{}'", id))
}

pub fn state_of(form: &FormModel, id: &str) -> EditableState {
    form.field(&FieldId::from(id))
        .map(|field| field.state())
        .unwrap_or_else(|| panic!("no field '{}'", id))
}

/// A small form covering every adapter
pub const SAMPLE_FORM: &str = r#"
exclusive_editing: false
fields:
  - id: title
    label: Title
    kind: title
    value: Quarterly review
  - id: client
    label: Client
    kind: text
    value: John Doe
    validate:
      required: Client is required
  - id: hours
    label: Hours
    kind: number
    value: 1234567
  - id: budget
    label: Budget
    kind: currency
    value: 99.99
    min: 10
  - id: discount
    label: Discount
    kind: percent
    value: 15
    max: 100
  - id: due
    label: Due Date
    kind: date
    value: "2025-01-20"
  - id: status
    label: Status
    kind: select
    value: open
    options:
      - { value: open, label: Open }
      - { value: closed, label: Closed }
      - { value: archived, label: Archived, disabled: true }
  - id: notes
    label: Notes
    kind: textarea
  - id: reference
    label: Reference
    kind: text
    value: CASE-42
    readonly: true
"#;
