//! Model - field state machines and the form that hosts them
//!
//! Follows the Elm Architecture: every field is plain state, changed only
//! through messages, and side effects leave as values.

pub mod field;
pub mod form;
pub mod state;
pub mod value;

pub use field::{Effect, FieldCore, SAVE_FAILED};
pub use form::{FormField, FormModel};
pub use state::{Control, EditableState, FieldOptions, InputRef};
pub use value::{DateValue, FieldData, FieldId, FieldValue, NumberValue};
