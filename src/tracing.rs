//! Logging setup and the field-state diffing used by traced updates
//!
//! Two sinks are installed by [`init`]:
//!
//! * stderr, filtered by `RUST_LOG` (default `warn`). Targets worth knowing:
//!   `message` (every dispatched message), `field` (state diffs),
//!   `inline_edit::runtime` (save threads and notices).
//! * a daily rolling file under `config_paths::logs_dir()`, always at `debug`.
//!
//! e.g. `RUST_LOG=field=debug,inline_edit::runtime=info inline-edit form.yaml`

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::adapters::FieldWidget;
use crate::config_paths::{self, LOG_FILE_PREFIX};
use crate::model::EditableState;

/// Install the console and file subscribers. Safe to call more than once;
/// later calls keep whatever subscriber is already in place.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries rendered forms and JSON, so the console log goes to stderr
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(env_filter);

    let file_layer = config_paths::ensure_logs_dir()
        .map_err(|e| eprintln!("Warning: file logging disabled: {}", e))
        .ok()
        .map(|dir| {
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"))
        });

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of one field's state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub state: EditableState,
    pub pending: Option<String>,
    pub error: Option<String>,
    pub value: String,
}

impl FieldSnapshot {
    pub fn from_widget(widget: &dyn FieldWidget) -> Self {
        Self {
            state: widget.state(),
            pending: widget.pending().map(|value| value.to_string()),
            error: widget.error().map(str::to_string),
            value: widget.value().to_string(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &FieldSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.state != other.state {
            changes.push(format!("state: {} → {}", self.state, other.state));
        }
        if self.pending != other.pending {
            changes.push(format!(
                "pending: {} → {}",
                describe(&self.pending),
                describe(&other.pending)
            ));
        }
        if self.error != other.error {
            changes.push(format!(
                "error: {} → {}",
                describe(&self.error),
                describe(&other.error)
            ));
        }
        if self.value != other.value {
            changes.push(format!("value: {:?} → {:?}", self.value, other.value));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn describe(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("{:?}", v),
        None => "none".to_string(),
    }
}
