//! Text input editing for the inline edit surfaces.
//!
//! Every text-like edit surface (text, title, textarea, number, currency,
//! percent) keeps its local, unsaved text in a [`TextInput`]:
//! - [`TextInput`]: char-indexed text with a cursor and selection anchor
//! - [`EditConstraints`]: per-kind restrictions (multi-line, max length, char filter)
//! - [`KeyOutcome`]: what a key press did to the input
//!
//! # Example
//!
//! ```
//! use inline_edit::editable::{EditConstraints, TextInput};
//!
//! let mut input = TextInput::new("John Doe", EditConstraints::single_line());
//! input.select_all();
//! input.insert_text("Jane Doe");
//!
//! assert_eq!(input.text(), "Jane Doe");
//! ```

mod constraints;
mod input;

pub use constraints::{CharFilter, EditConstraints};
pub use input::{KeyOutcome, TextInput};
