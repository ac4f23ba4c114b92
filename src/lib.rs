//! inline-edit - Elm-style inline editable fields
//!
//! This crate provides a headless rest/interest/edit/saving state machine for
//! inline-editable values, typed adapters for common value kinds, and a small
//! runtime that executes the saves the fields ask for.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod messages;
pub mod model;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod util;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::InlineEditConfig;
pub use messages::Msg;
pub use model::FormModel;
