//! Scripted interaction sessions
//!
//! One step per line, `#` starts a comment:
//!
//! ```text
//! click name
//! type name  Jane
//! key name Enter
//! wait
//! ```

use std::time::Duration;

use chrono::NaiveDate;

use crate::messages::{EditMsg, FieldMsg, FormMsg, KeyPress, Msg};
use crate::model::FieldId;

use super::app::Runtime;

/// A single scripted step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Send(Msg),
    /// Commit a raw value, parsed by the field's own value type
    Set { id: FieldId, raw: String },
    /// Block until every running save has settled
    Wait,
}

impl Step {
    /// Run this step against a runtime
    pub fn apply(&self, runtime: &mut Runtime, timeout: Duration) -> Result<(), String> {
        match self {
            Step::Send(msg) => {
                if let Some(id) = msg.field_id() {
                    if runtime.model().field(id).is_none() {
                        return Err(format!("Unknown field '{}'", id));
                    }
                }
                runtime.dispatch(msg.clone());
                runtime.pump();
                Ok(())
            }
            Step::Set { id, raw } => {
                let value = runtime
                    .model()
                    .field(id)
                    .ok_or_else(|| format!("Unknown field '{}'", id))?
                    .parse_value(raw)?;
                runtime.dispatch(Msg::field(id.clone(), FieldMsg::ValueChanged(value)));
                Ok(())
            }
            Step::Wait => runtime.wait_idle(timeout),
        }
    }
}

/// Parse a whole script, reporting the first bad line
pub fn parse_script(source: &str) -> Result<Vec<Step>, String> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.split('#').next().unwrap_or_default().trim();
            (!line.is_empty()).then_some((index + 1, line))
        })
        .map(|(number, line)| parse_step(line).map_err(|e| format!("line {}: {}", number, e)))
        .collect()
}

fn parse_step(line: &str) -> Result<Step, String> {
    let (command, rest) = split_word(line);
    match command {
        "wait" => return Ok(Step::Wait),
        "tab" => return Ok(Step::Send(Msg::Form(FormMsg::FocusNext))),
        "shift-tab" => return Ok(Step::Send(Msg::Form(FormMsg::FocusPrev))),
        _ => {}
    }

    let (id, arg) = split_word(rest);
    if id.is_empty() {
        return Err(format!("'{}' needs a field id", command));
    }
    let field = |msg: FieldMsg| Ok(Step::Send(Msg::field(id, msg)));
    let edit = |msg: EditMsg| Ok(Step::Send(Msg::edit(id, msg)));

    match command {
        "click" => field(FieldMsg::Click),
        "hover" => field(FieldMsg::PointerEnter),
        "leave" => field(FieldMsg::PointerLeave),
        "focus" => field(FieldMsg::Focus),
        "blur" => field(FieldMsg::Blur { within: false }),
        "key" => {
            let press = KeyPress::parse(arg).ok_or_else(|| format!("unknown key '{}'", arg))?;
            field(FieldMsg::Key(press))
        }
        "type" => edit(EditMsg::Type(arg.to_string())),
        "select" => edit(EditMsg::SelectOption(arg.to_string())),
        "day" => {
            let day = NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map_err(|_| format!("expected yyyy-mm-dd, got '{}'", arg))?;
            edit(EditMsg::SelectDay(day))
        }
        "dismiss" => edit(EditMsg::OpenChange(false)),
        "save" => edit(EditMsg::ClickSave),
        "cancel" => edit(EditMsg::ClickCancel),
        "set" => Ok(Step::Set {
            id: FieldId::from(id),
            raw: arg.to_string(),
        }),
        other => Err(format!("unknown command '{}'", other)),
    }
}

/// Split off the first whitespace-delimited word
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}
