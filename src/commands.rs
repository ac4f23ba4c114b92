//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! Fields produce [`Effect`]s about themselves; the form tags them with the
//! field id and hands them to the runtime as [`Cmd`]s.

use crate::model::{Effect, FieldId, FieldValue};

#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Run the save callback; answer with `FieldMsg::SaveCompleted`
    Save { field: FieldId, value: FieldValue },
    /// Controlled field asks its consumer to change the editing flag
    EditingChanged { field: FieldId, editing: bool },
    /// Move keyboard focus into the field's edit surface
    Focus { field: FieldId },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine optional commands, flattening nested batches
    pub fn batch(cmds: impl IntoIterator<Item = Option<Cmd>>) -> Option<Cmd> {
        let mut flat = Vec::new();
        for cmd in cmds.into_iter().flatten() {
            match cmd {
                Cmd::Batch(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(Cmd::Batch(flat)),
        }
    }

    /// Tag a field effect with its field id
    pub fn from_effect(field: &FieldId, effect: Effect<FieldValue>) -> Cmd {
        match effect {
            Effect::Save(value) => Cmd::Save {
                field: field.clone(),
                value,
            },
            Effect::EditingChanged(editing) => Cmd::EditingChanged {
                field: field.clone(),
                editing,
            },
            Effect::Focus => Cmd::Focus {
                field: field.clone(),
            },
            Effect::Batch(effects) => Cmd::Batch(
                effects
                    .into_iter()
                    .map(|effect| Cmd::from_effect(field, effect))
                    .collect(),
            ),
        }
    }

    /// Leaf commands in execution order
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            other => vec![other],
        }
    }

    /// Check if this command starts a save
    pub fn has_save(&self) -> bool {
        match self {
            Cmd::Save { .. } => true,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::has_save),
            _ => false,
        }
    }

    /// True if this command asks for edit mode on `field`
    pub fn requests_edit(&self, field: &FieldId) -> bool {
        match self {
            Cmd::EditingChanged {
                field: target,
                editing: true,
            } => target == field,
            Cmd::Batch(cmds) => cmds.iter().any(|cmd| cmd.requests_edit(field)),
            _ => false,
        }
    }
}
