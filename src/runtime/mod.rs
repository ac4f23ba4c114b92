//! Runtime module - command execution for a form
//!
//! - `app` - executes `Cmd`s, runs saves on worker threads
//! - `script` - scripted interaction sessions replayed against a runtime

pub mod app;
pub mod script;

pub use app::{Notice, Runtime, SaveHandler};
pub use script::{parse_script, Step};
