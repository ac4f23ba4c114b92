//! FormModel - an ordered set of heterogeneous fields
//!
//! Each field stays independent; the form only routes messages, tracks
//! keyboard focus and, when asked to, keeps at most one field editing.

use std::fmt;

use crate::adapters::FieldWidget;
use crate::view::ViewNode;

use super::state::EditableState;
use super::value::{FieldId, FieldValue};

/// A field and the id it is addressed by
pub struct FormField {
    pub id: FieldId,
    pub widget: Box<dyn FieldWidget>,
}

impl fmt::Debug for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormField")
            .field("id", &self.id)
            .field("kind", &self.widget.kind())
            .field("state", &self.widget.state())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct FormModel {
    fields: Vec<FormField>,
    /// Index of the field holding keyboard focus
    focused: Option<usize>,
    /// Opening one field cancels every other edit session
    exclusive_editing: bool,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclusive_editing(mut self, exclusive: bool) -> Self {
        self.exclusive_editing = exclusive;
        self
    }

    pub fn exclusive_editing(&self) -> bool {
        self.exclusive_editing
    }

    /// Add a field; ids must be unique
    pub fn push(&mut self, id: impl Into<FieldId>, widget: impl FieldWidget + 'static) -> Result<(), String> {
        self.push_boxed(id.into(), Box::new(widget))
    }

    pub fn push_boxed(&mut self, id: FieldId, widget: Box<dyn FieldWidget>) -> Result<(), String> {
        if self.index_of(&id).is_some() {
            return Err(format!("Duplicate field id '{}'", id));
        }
        self.fields.push(FormField { id, widget });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn ids(&self) -> impl Iterator<Item = &FieldId> {
        self.fields.iter().map(|f| &f.id)
    }

    pub fn index_of(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }

    pub fn field(&self, id: &FieldId) -> Option<&dyn FieldWidget> {
        self.fields
            .iter()
            .find(|f| &f.id == id)
            .map(|f| f.widget.as_ref())
    }

    pub fn field_mut(&mut self, id: &FieldId) -> Option<&mut (dyn FieldWidget + 'static)> {
        self.fields
            .iter_mut()
            .find(|f| &f.id == id)
            .map(|f| f.widget.as_mut())
    }

    // ========================================================================
    // Focus
    // ========================================================================

    pub fn focused(&self) -> Option<&FieldId> {
        self.focused.and_then(|idx| self.fields.get(idx)).map(|f| &f.id)
    }

    pub(crate) fn set_focused(&mut self, id: Option<&FieldId>) {
        self.focused = id.and_then(|id| self.index_of(id));
    }

    /// Next field in tab order, wrapping around. Readonly fields are skipped.
    pub fn next_focusable(&self, forward: bool) -> Option<&FieldId> {
        let len = self.fields.len();
        if len == 0 {
            return None;
        }
        let start = match (self.focused, forward) {
            (Some(idx), _) => idx,
            (None, true) => len - 1,
            (None, false) => 0,
        };
        (1..=len)
            .map(|step| {
                if forward {
                    (start + step) % len
                } else {
                    (start + len - step) % len
                }
            })
            .map(|idx| &self.fields[idx])
            .find(|f| !f.widget.readonly())
            .map(|f| &f.id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Ids of fields currently in `Edit`
    pub fn editing(&self) -> Vec<FieldId> {
        self.fields
            .iter()
            .filter(|f| f.widget.state() == EditableState::Edit)
            .map(|f| f.id.clone())
            .collect()
    }

    /// True while any field has a save in flight
    pub fn is_saving(&self) -> bool {
        self.fields
            .iter()
            .any(|f| f.widget.state() == EditableState::Saving)
    }

    /// Committed values in field order
    pub fn values(&self) -> Vec<(FieldId, FieldValue)> {
        self.fields
            .iter()
            .map(|f| (f.id.clone(), f.widget.value()))
            .collect()
    }

    /// Committed values as a JSON object keyed by field id
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|f| (f.id.to_string(), f.widget.value().to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    pub fn view(&self) -> ViewNode {
        ViewNode::Column(self.fields.iter().map(|f| f.widget.view()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{CurrencyAdapter, EditableField, TextAdapter};

    fn form() -> FormModel {
        let mut form = FormModel::new();
        form.push("name", EditableField::new("Name", "Ada".to_string(), TextAdapter::new()))
            .unwrap();
        form.push(
            "budget",
            EditableField::new("Budget", Some(1200.0), CurrencyAdapter::new()).with_readonly(true),
        )
        .unwrap();
        form.push("email", EditableField::new("Email", String::new(), TextAdapter::new()))
            .unwrap();
        form
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut form = form();
        let err = form
            .push("name", EditableField::new("Name", String::new(), TextAdapter::new()))
            .unwrap_err();
        assert!(err.contains("name"));
        assert_eq!(form.len(), 3);
    }

    #[test]
    fn test_next_focusable_skips_readonly_and_wraps() {
        let mut form = form();
        assert_eq!(form.next_focusable(true), Some(&FieldId::from("name")));
        form.set_focused(Some(&FieldId::from("name")));
        assert_eq!(form.next_focusable(true), Some(&FieldId::from("email")));
        form.set_focused(Some(&FieldId::from("email")));
        assert_eq!(form.next_focusable(true), Some(&FieldId::from("name")));
        assert_eq!(form.next_focusable(false), Some(&FieldId::from("name")));
    }

    #[test]
    fn test_values_to_json() {
        let json = form().to_json();
        assert_eq!(json["name"], serde_json::json!("Ada"));
        assert_eq!(json["budget"], serde_json::json!(1200.0));
        assert_eq!(json["email"], serde_json::json!(""));
    }
}
