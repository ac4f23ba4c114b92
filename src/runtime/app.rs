use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::commands::Cmd;
use crate::messages::{FieldMsg, Msg};
use crate::model::{FieldId, FieldValue, FormModel};
use crate::update::update;

/// Performs the actual write for a field. Runs on a worker thread.
pub trait SaveHandler: Send + Sync {
    fn save(&self, field: &FieldId, value: &FieldValue) -> anyhow::Result<()>;
}

impl<F> SaveHandler for F
where
    F: Fn(&FieldId, &FieldValue) -> anyhow::Result<()> + Send + Sync,
{
    fn save(&self, field: &FieldId, value: &FieldValue) -> anyhow::Result<()> {
        self(field, value)
    }
}

/// Outcome of a save, for a host-level notification surface
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Saved { field: FieldId, label: String },
    Failed { field: FieldId, message: String },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Saved { label, .. } => write!(f, "{} updated", label),
            Notice::Failed { field, message } => write!(f, "{}: {}", field, message),
        }
    }
}

type Notifier = Box<dyn FnMut(&Notice)>;
type Invalidate = Box<dyn FnMut(&FieldId)>;

/// Completion of a worker-thread save
struct SaveReport {
    field: FieldId,
    value: FieldValue,
    result: Result<(), String>,
}

/// Executes commands produced by `update` and feeds results back in
///
/// Saves run on their own thread; their completions arrive over a channel and
/// are applied by [`Runtime::pump`] or [`Runtime::wait_idle`]. A successful
/// save commits the new value (`ValueChanged`) before settling the field.
pub struct Runtime {
    model: FormModel,
    saver: Arc<dyn SaveHandler>,
    notifier: Option<Notifier>,
    on_saved: Option<Invalidate>,
    report_tx: Sender<SaveReport>,
    report_rx: Receiver<SaveReport>,
    in_flight: usize,
}

impl Runtime {
    pub fn new(model: FormModel, saver: impl SaveHandler + 'static) -> Self {
        let (report_tx, report_rx) = mpsc::channel();
        Self {
            model,
            saver: Arc::new(saver),
            notifier: None,
            on_saved: None,
            report_tx,
            report_rx,
            in_flight: 0,
        }
    }

    /// Receive a notice after every save attempt that reached the handler
    pub fn with_notifier(mut self, notifier: impl FnMut(&Notice) + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Called with the field id after each successful save
    pub fn with_invalidation(mut self, on_saved: impl FnMut(&FieldId) + 'static) -> Self {
        self.on_saved = Some(Box::new(on_saved));
        self
    }

    pub fn model(&self) -> &FormModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut FormModel {
        &mut self.model
    }

    pub fn into_model(self) -> FormModel {
        self.model
    }

    /// Number of saves still running
    pub fn pending_saves(&self) -> usize {
        self.in_flight
    }

    /// Run one message through `update` and execute what it asks for
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::Save { field, value } => {
                debug!(target: "field", %field, %value, "save started");
                self.in_flight += 1;
                let tx = self.report_tx.clone();
                let saver = Arc::clone(&self.saver);
                std::thread::spawn(move || {
                    let result = saver.save(&field, &value).map_err(|e| e.to_string());
                    let _ = tx.send(SaveReport {
                        field,
                        value,
                        result,
                    });
                });
            }
            Cmd::EditingChanged { field, editing } => {
                // Controlled fields follow the host; this host always agrees
                self.dispatch(Msg::field(field, FieldMsg::SetEditing(editing)));
            }
            Cmd::Focus { field } => {
                debug!(target: "field", %field, "focus requested");
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn apply_report(&mut self, report: SaveReport) {
        let SaveReport {
            field,
            value,
            result,
        } = report;
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(()) => {
                info!(target: "field", %field, "save succeeded");
                self.dispatch(Msg::field(field.clone(), FieldMsg::ValueChanged(value)));
                self.dispatch(Msg::field(field.clone(), FieldMsg::SaveCompleted(Ok(()))));
                if let Some(on_saved) = self.on_saved.as_mut() {
                    on_saved(&field);
                }
                let label = self
                    .model
                    .field(&field)
                    .map(|widget| widget.label().to_string())
                    .unwrap_or_else(|| field.to_string());
                self.notify(Notice::Saved { field, label });
            }
            Err(message) => {
                warn!(target: "field", %field, "save failed: {}", message);
                self.dispatch(Msg::field(
                    field.clone(),
                    FieldMsg::SaveCompleted(Err(message.clone())),
                ));
                self.notify(Notice::Failed { field, message });
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        if let Some(notifier) = self.notifier.as_mut() {
            notifier(&notice);
        }
    }

    /// Apply every save completion that has already arrived.
    ///
    /// Returns true if anything was applied.
    pub fn pump(&mut self) -> bool {
        let mut applied = false;
        while let Ok(report) = self.report_rx.try_recv() {
            self.apply_report(report);
            applied = true;
        }
        applied
    }

    /// Block until every running save has completed, or `timeout` passes
    /// without a completion.
    pub fn wait_idle(&mut self, timeout: Duration) -> Result<(), String> {
        while self.in_flight > 0 {
            match self.report_rx.recv_timeout(timeout) {
                Ok(report) => self.apply_report(report),
                Err(_) => {
                    return Err(format!(
                        "Timed out waiting for {} save(s) to complete",
                        self.in_flight
                    ))
                }
            }
        }
        Ok(())
    }
}
