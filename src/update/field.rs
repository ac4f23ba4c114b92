//! Field message routing and the exclusive-editing policy

use tracing::{debug, warn};

use crate::commands::Cmd;
use crate::messages::FieldMsg;
use crate::model::{EditableState, FieldId, FormModel};

/// Deliver a message to one field and collect its commands
pub fn update_field(model: &mut FormModel, id: &FieldId, msg: FieldMsg) -> Option<Cmd> {
    let focus_change = match &msg {
        FieldMsg::Focus => Some(true),
        FieldMsg::Blur { within: false } => Some(false),
        _ => None,
    };

    let Some(widget) = model.field_mut(id) else {
        warn!("Ignoring message for unknown field '{}'", id);
        return None;
    };
    let before = widget.state();
    let effect = widget.update(msg);
    let after = widget.state();
    let cmd = effect.map(|effect| Cmd::from_effect(id, effect));

    match focus_change {
        Some(true) => model.set_focused(Some(id)),
        Some(false) if model.focused() == Some(id) => model.set_focused(None),
        _ => {}
    }

    let opened = (before != EditableState::Edit && after == EditableState::Edit)
        || cmd.as_ref().is_some_and(|cmd| cmd.requests_edit(id));
    if opened && model.exclusive_editing() {
        let closed = close_other_sessions(model, id);
        return Cmd::batch([cmd, closed]);
    }
    cmd
}

/// Cancel every edit session except `keep`'s. Saving fields are left alone.
fn close_other_sessions(model: &mut FormModel, keep: &FieldId) -> Option<Cmd> {
    let others: Vec<FieldId> = model
        .editing()
        .into_iter()
        .filter(|other| other != keep)
        .collect();

    Cmd::batch(others.iter().map(|other| {
        debug!(target: "field", field = %other, opened = %keep, "closing edit session");
        model
            .field_mut(other)
            .and_then(|widget| widget.update(FieldMsg::Cancel))
            .map(|effect| Cmd::from_effect(other, effect))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{EditableField, FieldWidget, TextAdapter};

    fn text(label: &str) -> EditableField<TextAdapter> {
        EditableField::new(label, String::new(), TextAdapter::new())
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut form = FormModel::new();
        assert_eq!(update_field(&mut form, &FieldId::from("nope"), FieldMsg::Click), None);
    }

    #[test]
    fn test_focus_tracking() {
        let mut form = FormModel::new();
        form.push("a", text("A")).unwrap();
        let id = FieldId::from("a");

        update_field(&mut form, &id, FieldMsg::Focus);
        assert_eq!(form.focused(), Some(&id));
        update_field(&mut form, &id, FieldMsg::Blur { within: true });
        assert_eq!(form.focused(), Some(&id));
        update_field(&mut form, &id, FieldMsg::Blur { within: false });
        assert_eq!(form.focused(), None);
    }

    #[test]
    fn test_exclusive_editing_cancels_other_sessions() {
        let mut form = FormModel::new().with_exclusive_editing(true);
        form.push("a", text("A")).unwrap();
        form.push("b", text("B")).unwrap();
        let (a, b) = (FieldId::from("a"), FieldId::from("b"));

        update_field(&mut form, &a, FieldMsg::Click);
        update_field(&mut form, &b, FieldMsg::Click);

        assert_eq!(form.editing(), vec![b.clone()]);
        assert_eq!(form.field(&a).map(|f| f.state()), Some(EditableState::Rest));
    }

    #[test]
    fn test_without_exclusive_editing_sessions_coexist() {
        let mut form = FormModel::new();
        form.push("a", text("A")).unwrap();
        form.push("b", text("B")).unwrap();

        update_field(&mut form, &FieldId::from("a"), FieldMsg::Click);
        update_field(&mut form, &FieldId::from("b"), FieldMsg::Click);
        assert_eq!(form.editing().len(), 2);
    }

    #[test]
    fn test_exclusive_editing_with_controlled_field_requests_release() {
        let mut form = FormModel::new().with_exclusive_editing(true);
        form.push(
            "a",
            EditableField::controlled("A", String::new(), true, TextAdapter::new()),
        )
        .unwrap();
        form.push(
            "b",
            EditableField::controlled("B", String::new(), false, TextAdapter::new()),
        )
        .unwrap();
        let (a, b) = (FieldId::from("a"), FieldId::from("b"));

        let cmd = update_field(&mut form, &b, FieldMsg::Click).map(Cmd::into_vec);
        assert_eq!(
            cmd,
            Some(vec![
                Cmd::EditingChanged {
                    field: b.clone(),
                    editing: true,
                },
                Cmd::EditingChanged {
                    field: a.clone(),
                    editing: false,
                },
            ])
        );
        // Nothing changes until the consumer reflects the flags
        assert!(form.field(&a).is_some_and(|f| f.is_controlled()));
        assert_eq!(form.field(&a).map(|f| f.state()), Some(EditableState::Edit));
    }
}
