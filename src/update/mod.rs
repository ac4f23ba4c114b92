//! Message routing: every change to a [`FormModel`] goes through [`update`].

mod field;
mod form;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::FormModel;

#[cfg(debug_assertions)]
use crate::tracing::FieldSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use field::update_field;
pub use form::update_form;

/// Apply one message, returning the side effect the host must run (if any).
///
/// Debug builds log the message and the addressed field's state diff.
#[inline]
pub fn update(model: &mut FormModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

fn update_inner(model: &mut FormModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Field { id, msg } => field::update_field(model, &id, msg),
        Msg::Form(m) => form::update_form(model, m),
    }
}

#[cfg(debug_assertions)]
fn update_traced(model: &mut FormModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let target = msg.field_id().cloned();
    let before = target
        .as_ref()
        .and_then(|id| model.field(id))
        .map(FieldSnapshot::from_widget);

    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    if let (Some(before), Some(widget)) = (&before, target.as_ref().and_then(|id| model.field(id))) {
        let after = FieldSnapshot::from_widget(widget);
        if let Some(diff) = before.diff(&after) {
            debug!(target: "field", %diff, "state changed");
        }
    }

    result
}

/// e.g.
/// - `Field[name]::Click`
/// - `Field[amount]::Edit(Type("5"))`
/// - `Form::FocusNext`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Field { id, msg } => format!("Field[{}]::{:?}", id, msg),
        Msg::Form(m) => format!("Form::{:?}", m),
    }
}
