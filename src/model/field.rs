//! FieldCore - the inline-edit state machine, generic over the value type.
//!
//! The core never performs a save itself. `handle_save` validates, enters
//! `Saving` and returns [`Effect::Save`]; the host runs the save and feeds the
//! outcome back through [`FieldCore::save_completed`].

use tracing::debug;

use crate::messages::{Key, KeyPress};
use crate::validation::Validator;

use super::state::{Control, EditableState, FieldOptions, InputRef};

/// Fallback message for a save rejected without a message
pub const SAVE_FAILED: &str = "Save failed";

/// Side effect requested by a field
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<T> {
    /// Persist this value; answer with `save_completed`
    Save(T),
    /// Controlled mode: ask the consumer to change its editing flag
    EditingChanged(bool),
    /// Move focus into the edit surface's input
    Focus,
    /// Several effects, in order
    Batch(Vec<Effect<T>>),
}

impl<T> Effect<T> {
    /// Combine optional effects, flattening nested batches
    pub fn batch(effects: impl IntoIterator<Item = Option<Effect<T>>>) -> Option<Effect<T>> {
        let mut flat = Vec::new();
        for effect in effects.into_iter().flatten() {
            match effect {
                Effect::Batch(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(Effect::Batch(flat)),
        }
    }

    pub fn map<U>(self, f: &impl Fn(T) -> U) -> Effect<U> {
        match self {
            Effect::Save(value) => Effect::Save(f(value)),
            Effect::EditingChanged(editing) => Effect::EditingChanged(editing),
            Effect::Focus => Effect::Focus,
            Effect::Batch(effects) => Effect::Batch(effects.into_iter().map(|e| e.map(f)).collect()),
        }
    }

    /// Iterate over the leaf effects
    pub fn flatten(&self) -> Vec<&Effect<T>> {
        match self {
            Effect::Batch(effects) => effects.iter().flat_map(|e| e.flatten()).collect(),
            other => vec![other],
        }
    }
}

/// State machine for one inline-edit field.
#[derive(Debug, Clone)]
pub struct FieldCore<T> {
    label: String,
    /// Committed value, owned by the consumer
    value: T,
    readonly: bool,
    options: FieldOptions,
    validator: Validator<T>,
    control: Control,
    /// Internal state; never `Edit` in controlled mode
    internal: EditableState,
    pending: Option<T>,
    error: Option<String>,
    input_ref: InputRef,
    /// A save was handed out and has not completed
    in_flight: bool,
    /// Incremented every time an edit session starts
    session: u64,
}

impl<T> FieldCore<T>
where
    T: Clone + PartialEq + std::fmt::Debug,
{
    /// Create an uncontrolled field
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
            readonly: false,
            options: FieldOptions::default(),
            validator: Validator::None,
            control: Control::Uncontrolled,
            internal: EditableState::Rest,
            pending: None,
            error: None,
            input_ref: InputRef::default(),
            in_flight: false,
            session: 0,
        }
    }

    /// Create a controlled field; `is_editing` is the consumer's current flag
    pub fn controlled(label: impl Into<String>, value: T, is_editing: bool) -> Self {
        let mut core = Self::new(label, value);
        core.control = Control::Controlled { is_editing: false };
        if is_editing {
            core.set_editing(true);
        }
        core
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn with_options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_validator(mut self, validator: Validator<T>) -> Self {
        self.validator = validator;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn readonly(&self) -> bool {
        self.readonly
    }

    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut FieldOptions {
        &mut self.options
    }

    pub fn validator(&self) -> &Validator<T> {
        &self.validator
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn input_ref(&self) -> &InputRef {
        &self.input_ref
    }

    pub fn control(&self) -> Control {
        self.control
    }

    pub fn is_controlled(&self) -> bool {
        self.control.is_controlled()
    }

    /// A save was started and has not completed yet
    pub fn is_save_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Identifier of the current (or last) edit session
    pub fn session(&self) -> u64 {
        self.session
    }

    /// The derived visible state
    pub fn state(&self) -> EditableState {
        if self.internal == EditableState::Saving {
            return EditableState::Saving;
        }
        match self.control {
            Control::Controlled { is_editing: true } => EditableState::Edit,
            _ => self.internal,
        }
    }

    /// Value handed to the edit surface: the pending value, else the committed one
    pub fn edit_value(&self) -> &T {
        self.pending.as_ref().unwrap_or(&self.value)
    }

    /// Run the validator without changing state
    pub fn validate(&self, value: &T) -> Option<String> {
        self.validator.validate(value)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    fn transition(&mut self, next: EditableState) -> Option<Effect<T>> {
        let before = self.state();
        self.internal = next;
        self.settle(before)
    }

    /// Bookkeeping after anything that may have changed the derived state
    fn settle(&mut self, before: EditableState) -> Option<Effect<T>> {
        let after = self.state();
        if after == before {
            return None;
        }

        debug!(target: "field", label = %self.label, from = %before, to = %after, "state transition");

        if after == EditableState::Edit {
            self.session += 1;
            self.input_ref.request_focus(self.session);
            Some(Effect::Focus)
        } else {
            if before == EditableState::Edit {
                self.input_ref.release();
            }
            None
        }
    }

    /// Open the edit surface. No-op when readonly, editing or saving.
    pub fn enter_edit_mode(&mut self) -> Option<Effect<T>> {
        if self.readonly || !self.state().is_display() {
            return None;
        }

        self.error = None;
        match self.control {
            Control::Controlled { .. } => Some(Effect::EditingChanged(true)),
            Control::Uncontrolled => {
                self.pending = Some(self.value.clone());
                self.transition(EditableState::Edit)
            }
        }
    }

    /// Cancel editing: discard the pending value and error. Never saves.
    pub fn exit_edit_mode(&mut self) -> Option<Effect<T>> {
        if self.state() != EditableState::Edit {
            return None;
        }

        self.pending = None;
        self.error = None;
        match self.control {
            Control::Controlled { .. } => Some(Effect::EditingChanged(false)),
            Control::Uncontrolled => self.transition(EditableState::Rest),
        }
    }

    /// Validate and start a save.
    ///
    /// Invalid values set the error and keep the field in `Edit`; they never
    /// produce [`Effect::Save`].
    pub fn handle_save(&mut self, new_value: T) -> Option<Effect<T>> {
        if self.state() != EditableState::Edit || self.in_flight {
            return None;
        }

        if let Some(message) = self.validator.validate(&new_value) {
            debug!(target: "field", label = %self.label, %message, "validation failed");
            self.error = Some(message);
            return None;
        }

        if self.options.skip_unchanged && new_value == self.value {
            debug!(target: "field", label = %self.label, "value unchanged, skipping save");
            return self.exit_edit_mode();
        }

        self.pending = Some(new_value.clone());
        self.in_flight = true;

        let transition = if self.options.show_saving_state {
            self.transition(EditableState::Saving)
        } else {
            None
        };
        Effect::batch([transition, Some(Effect::Save(new_value))])
    }

    /// Settle an in-flight save. Ignored when no save is in flight.
    pub fn save_completed(&mut self, result: Result<(), String>) -> Option<Effect<T>> {
        if !self.in_flight {
            debug!(target: "field", label = %self.label, "ignoring stale save result");
            return None;
        }
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.pending = None;
                self.error = None;
                match self.control {
                    Control::Controlled { .. } => {
                        let settled = self.transition(EditableState::Rest);
                        Effect::batch([settled, Some(Effect::EditingChanged(false))])
                    }
                    Control::Uncontrolled => self.transition(EditableState::Rest),
                }
            }
            Err(message) => {
                let message = if message.trim().is_empty() {
                    SAVE_FAILED.to_string()
                } else {
                    message
                };
                self.error = Some(message);
                match self.control {
                    Control::Controlled { .. } => {
                        let settled = self.transition(EditableState::Rest);
                        Effect::batch([settled, Some(Effect::EditingChanged(true))])
                    }
                    Control::Uncontrolled => self.transition(EditableState::Edit),
                }
            }
        }
    }

    /// Validate, save through `save` and settle, in one call
    pub fn commit_with<F>(&mut self, new_value: T, save: F) -> Option<Effect<T>>
    where
        F: FnOnce(&T) -> anyhow::Result<()>,
    {
        let effect = self.handle_save(new_value)?;
        let mut rest = Vec::new();
        let mut saved = None;
        for leaf in effect.flatten() {
            match leaf {
                Effect::Save(value) => saved = Some(value.clone()),
                other => rest.push(Some(other.clone())),
            }
        }

        let Some(value) = saved else {
            return Effect::batch(rest);
        };
        let result = save(&value).map_err(|err| err.to_string());
        rest.push(self.save_completed(result));
        Effect::batch(rest)
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Set the inline error without a transition
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    pub fn pointer_enter(&mut self) -> Option<Effect<T>> {
        self.show_interest()
    }

    pub fn focus(&mut self) -> Option<Effect<T>> {
        self.show_interest()
    }

    fn show_interest(&mut self) -> Option<Effect<T>> {
        if self.readonly || !self.options.interest_enabled || self.state() != EditableState::Rest {
            return None;
        }
        self.transition(EditableState::Interest)
    }

    pub fn pointer_leave(&mut self) -> Option<Effect<T>> {
        if self.state() != EditableState::Interest {
            return None;
        }
        self.transition(EditableState::Rest)
    }

    /// Focus left an element of the field.
    ///
    /// Moving to another element inside the field is not a blur.
    pub fn blur(&mut self, within: bool) -> Option<Effect<T>> {
        if within {
            return None;
        }
        match self.state() {
            EditableState::Interest => self.transition(EditableState::Rest),
            EditableState::Edit if self.options.exit_on_blur => self.exit_edit_mode(),
            _ => None,
        }
    }

    pub fn click(&mut self) -> Option<Effect<T>> {
        if self.readonly || !self.state().is_display() {
            return None;
        }
        self.enter_edit_mode()
    }

    /// Keyboard contract of the display region and the edit fallback.
    pub fn key(&mut self, press: KeyPress) -> Option<Effect<T>> {
        match self.state() {
            EditableState::Rest | EditableState::Interest
                if press.is_plain(Key::Enter) || press.is_plain(Key::Space) =>
            {
                self.enter_edit_mode()
            }
            EditableState::Edit if press.key == Key::Escape => self.exit_edit_mode(),
            _ => None,
        }
    }

    // ========================================================================
    // Consumer updates
    // ========================================================================

    /// The consumer's committed value changed.
    ///
    /// Outside an edit session the field returns to `Rest`; mid-edit the
    /// pending value is left alone.
    pub fn set_value(&mut self, value: T) -> Option<Effect<T>> {
        self.value = value;
        if self.state().is_display() {
            return self.transition(EditableState::Rest);
        }
        None
    }

    /// Controlled mode: the consumer reflects its editing flag.
    pub fn set_editing(&mut self, is_editing: bool) -> Option<Effect<T>> {
        let Control::Controlled { is_editing: was } = self.control else {
            debug!(target: "field", label = %self.label, "set_editing on an uncontrolled field");
            return None;
        };
        if was == is_editing {
            return None;
        }

        let before = self.state();
        self.control = Control::Controlled { is_editing };
        if self.internal != EditableState::Saving {
            if is_editing {
                self.pending = Some(self.value.clone());
                self.error = None;
                self.internal = EditableState::Rest;
            } else {
                self.pending = None;
                self.error = None;
            }
        }
        self.settle(before)
    }
}
