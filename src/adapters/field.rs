//! EditableField - a FieldCore bound to an adapter and its live edit surface

use std::sync::Arc;

use tracing::warn;

use crate::messages::{EditMsg, FieldMsg, Key};
use crate::model::{EditableState, Effect, FieldCore, FieldData, FieldValue};
use crate::validation::Validator;
use crate::view::ViewNode;

use super::{DisplayText, EditAction, EditProps, EditSurface, FieldAdapter, SAVING_LABEL};

type FormatFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A complete inline-edit field: state machine + adapter + edit surface.
pub struct EditableField<A: FieldAdapter> {
    core: FieldCore<A::Value>,
    adapter: A,
    /// Surface of the current edit session, tagged with its session id
    surface: Option<(u64, Box<dyn EditSurface<A::Value>>)>,
    display_override: Option<String>,
    format_override: Option<FormatFn<A::Value>>,
}

impl<A: FieldAdapter> EditableField<A> {
    /// Create an uncontrolled field
    pub fn new(label: impl Into<String>, value: A::Value, adapter: A) -> Self {
        let core = FieldCore::new(label, value)
            .with_options(adapter.options())
            .with_validator(adapter.constraints());
        Self::from_core(core, adapter)
    }

    /// Create a controlled field
    pub fn controlled(label: impl Into<String>, value: A::Value, is_editing: bool, adapter: A) -> Self {
        let core = FieldCore::controlled(label, value, is_editing)
            .with_options(adapter.options())
            .with_validator(adapter.constraints());
        Self::from_core(core, adapter)
    }

    fn from_core(core: FieldCore<A::Value>, adapter: A) -> Self {
        let mut field = Self {
            core,
            adapter,
            surface: None,
            display_override: None,
            format_override: None,
        };
        field.sync_surface();
        field
    }

    /// Caller validator; runs before the adapter's own constraints
    pub fn with_validator(mut self, validator: Validator<A::Value>) -> Self {
        let combined = validator.then(self.adapter.constraints());
        self.core = self.core.with_validator(combined);
        self
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.core = self.core.with_readonly(readonly);
        self
    }

    /// Custom display text for rest/interest
    pub fn with_display_value(mut self, display: impl Into<String>) -> Self {
        self.display_override = Some(display.into());
        self
    }

    /// Custom formatter for the saving view
    pub fn with_format_value<F>(mut self, format: F) -> Self
    where
        F: Fn(&A::Value) -> String + Send + Sync + 'static,
    {
        self.format_override = Some(Arc::new(format));
        self
    }

    /// Override the save-state display switch
    pub fn with_show_saving_state(mut self, show: bool) -> Self {
        self.core.options_mut().show_saving_state = show;
        self
    }

    pub fn core(&self) -> &FieldCore<A::Value> {
        &self.core
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn state(&self) -> EditableState {
        self.core.state()
    }

    /// Open or drop the surface to match the core's edit session
    fn sync_surface(&mut self) {
        if self.core.state() != EditableState::Edit {
            self.surface = None;
            return;
        }

        let session = self.core.session();
        if matches!(&self.surface, Some((open, _)) if *open == session) {
            return;
        }

        let props = EditProps {
            label: self.core.label(),
            value: self.core.edit_value(),
            error: self.core.error(),
            input_ref: self.core.input_ref(),
        };
        self.surface = Some((session, self.adapter.open(&props)));
    }

    fn handle_edit(&mut self, msg: EditMsg) -> Option<Effect<A::Value>> {
        if self.core.state() != EditableState::Edit {
            return None;
        }
        self.sync_surface();

        let Self { core, surface, .. } = self;
        let (_, surface) = surface.as_mut()?;
        let props = EditProps {
            label: core.label(),
            value: core.edit_value(),
            error: core.error(),
            input_ref: core.input_ref(),
        };

        let escape = matches!(&msg, EditMsg::Key(press) if press.key == Key::Escape);
        match surface.handle(msg, &props) {
            Some(EditAction::Save(value)) => core.handle_save(value),
            Some(EditAction::Cancel) => core.exit_edit_mode(),
            Some(EditAction::ClearError) => {
                core.clear_error();
                None
            }
            None if escape => core.exit_edit_mode(),
            None => None,
        }
    }

    /// Process a field message
    pub fn update(&mut self, msg: FieldMsg) -> Option<Effect<A::Value>> {
        let effect = match msg {
            FieldMsg::PointerEnter => self.core.pointer_enter(),
            FieldMsg::PointerLeave => self.core.pointer_leave(),
            FieldMsg::Focus => self.core.focus(),
            FieldMsg::Blur { within } => self.core.blur(within),
            FieldMsg::Click => self.core.click(),
            FieldMsg::Key(press) if self.core.state() == EditableState::Edit => {
                self.handle_edit(EditMsg::Key(press))
            }
            FieldMsg::Key(press) => self.core.key(press),
            FieldMsg::Edit(edit) => self.handle_edit(edit),
            FieldMsg::Cancel => self.core.exit_edit_mode(),
            FieldMsg::ClearError => {
                self.core.clear_error();
                None
            }
            FieldMsg::SaveCompleted(result) => self.core.save_completed(result),
            FieldMsg::ValueChanged(value) => match A::Value::from_field_value(value) {
                Ok(value) => self.core.set_value(value),
                Err(err) => {
                    warn!(label = %self.core.label(), "Ignoring value change: {}", err);
                    None
                }
            },
            FieldMsg::SetEditing(editing) => self.core.set_editing(editing),
        };
        self.sync_surface();
        effect
    }

    fn display(&self) -> DisplayText {
        match &self.display_override {
            Some(text) => DisplayText::value(text.clone()),
            None => self.adapter.display(self.core.value()),
        }
    }

    fn format(&self, value: &A::Value) -> String {
        match &self.format_override {
            Some(format) => format(value),
            None => self.adapter.format(value),
        }
    }

    /// Describe the field in its current state
    pub fn view(&self) -> ViewNode {
        let state = self.core.state();
        let children = match state {
            EditableState::Rest | EditableState::Interest => {
                let display = self.display();
                let readonly = self.core.readonly();
                vec![ViewNode::Display {
                    text: display.text,
                    muted: display.muted,
                    aria_label: self
                        .adapter
                        .display_aria_label(self.core.label(), self.core.value()),
                    focusable: !readonly,
                    readonly,
                    highlighted: state == EditableState::Interest,
                    presentation: self.adapter.presentation(),
                }]
            }
            EditableState::Edit => {
                let props = EditProps {
                    label: self.core.label(),
                    value: self.core.edit_value(),
                    error: self.core.error(),
                    input_ref: self.core.input_ref(),
                };
                let surface_view = match &self.surface {
                    Some((_, surface)) => surface.view(&props),
                    None => self.adapter.open(&props).view(&props),
                };
                let mut children = vec![surface_view];
                if let Some(error) = self.core.error() {
                    children.push(ViewNode::Alert(error.to_string()));
                }
                children
            }
            EditableState::Saving => {
                let pending = self.core.pending().unwrap_or(self.core.value());
                vec![ViewNode::Row(vec![
                    ViewNode::text(self.format(pending)),
                    ViewNode::Spinner {
                        aria_label: SAVING_LABEL.to_string(),
                    },
                ])]
            }
        };

        ViewNode::Field {
            label: self.core.label().to_string(),
            state,
            children,
        }
    }
}

/// Object-safe view of any [`EditableField`], with values type-erased.
pub trait FieldWidget {
    fn label(&self) -> &str;
    fn kind(&self) -> &'static str;
    fn state(&self) -> EditableState;
    fn error(&self) -> Option<&str>;
    fn value(&self) -> FieldValue;
    fn pending(&self) -> Option<FieldValue>;
    fn readonly(&self) -> bool;
    fn is_controlled(&self) -> bool;
    fn update(&mut self, msg: FieldMsg) -> Option<Effect<FieldValue>>;
    fn view(&self) -> ViewNode;
    /// Parse a raw textual value into this field's value type
    fn parse_value(&self, raw: &str) -> Result<FieldValue, String>;
}

impl<A: FieldAdapter> FieldWidget for EditableField<A> {
    fn label(&self) -> &str {
        self.core.label()
    }

    fn kind(&self) -> &'static str {
        self.adapter.kind()
    }

    fn state(&self) -> EditableState {
        self.core.state()
    }

    fn error(&self) -> Option<&str> {
        self.core.error()
    }

    fn value(&self) -> FieldValue {
        self.core.value().clone().into_field_value()
    }

    fn pending(&self) -> Option<FieldValue> {
        self.core.pending().cloned().map(|value| value.into_field_value())
    }

    fn readonly(&self) -> bool {
        self.core.readonly()
    }

    fn is_controlled(&self) -> bool {
        self.core.is_controlled()
    }

    fn update(&mut self, msg: FieldMsg) -> Option<Effect<FieldValue>> {
        EditableField::update(self, msg)
            .map(|effect| effect.map(&|value: A::Value| value.into_field_value()))
    }

    fn view(&self) -> ViewNode {
        EditableField::view(self)
    }

    fn parse_value(&self, raw: &str) -> Result<FieldValue, String> {
        A::Value::parse_raw(raw).map(|value| value.into_field_value())
    }
}
