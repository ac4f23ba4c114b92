//! Form-level navigation

use crate::commands::Cmd;
use crate::messages::{FieldMsg, FormMsg};
use crate::model::FormModel;

use super::field::update_field;

/// Move keyboard focus between fields (Tab / Shift+Tab)
pub fn update_form(model: &mut FormModel, msg: FormMsg) -> Option<Cmd> {
    let forward = matches!(msg, FormMsg::FocusNext);
    let next = model.next_focusable(forward)?.clone();
    let previous = model.focused().cloned();
    if previous.as_ref() == Some(&next) {
        return None;
    }

    let blurred = previous.and_then(|prev| update_field(model, &prev, FieldMsg::Blur { within: false }));
    let focused = update_field(model, &next, FieldMsg::Focus);
    Cmd::batch([blurred, focused])
}
