//! Select adapter - dropdown of options that saves on selection

use serde::Deserialize;

use crate::messages::{EditMsg, Key};
use crate::model::FieldOptions;
use crate::view::{icon_button, OptionView, ViewNode};

use super::{DisplayText, EditAction, EditProps, EditSurface, FieldAdapter};

/// Shown in rest state when no option matches and no placeholder is set
pub const NOT_SELECTED: &str = "Not selected";

/// Trigger text of an open dropdown with nothing selected
pub const SELECT_PROMPT: &str = "Select...";

/// One choice of a select field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct SelectAdapter {
    options: Vec<SelectOption>,
    placeholder: Option<String>,
    show_saving_state: bool,
}

impl SelectAdapter {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            placeholder: None,
            show_saving_state: true,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn show_saving_state(mut self, show: bool) -> Self {
        self.show_saving_state = show;
        self
    }

    pub fn option_list(&self) -> &[SelectOption] {
        &self.options
    }

    fn find(&self, value: &str) -> Option<&SelectOption> {
        self.options.iter().find(|option| option.value == value)
    }
}

impl FieldAdapter for SelectAdapter {
    type Value = String;

    fn kind(&self) -> &'static str {
        "select"
    }

    fn display(&self, value: &String) -> DisplayText {
        match self.find(value) {
            Some(option) => DisplayText::value(option.label.clone()),
            None => DisplayText::placeholder(self.placeholder.as_deref().unwrap_or(NOT_SELECTED)),
        }
    }

    /// Option label, or the raw value when no option matches
    fn format(&self, value: &String) -> String {
        self.find(value)
            .map(|option| option.label.clone())
            .unwrap_or_else(|| value.clone())
    }

    fn options(&self) -> FieldOptions {
        // The dropdown list is rendered outside the field
        FieldOptions {
            exit_on_blur: false,
            show_saving_state: self.show_saving_state,
            ..FieldOptions::default()
        }
    }

    fn open(&self, props: &EditProps<'_, String>) -> Box<dyn EditSurface<String>> {
        Box::new(SelectSurface::new(
            self.options.clone(),
            props.value.clone(),
            self.placeholder.clone(),
        ))
    }
}

/// Open dropdown of one edit session
pub struct SelectSurface {
    options: Vec<SelectOption>,
    local_value: String,
    open: bool,
    has_selected: bool,
    dismissed: bool,
    /// Keyboard highlight (index into `options`, never a disabled option)
    highlighted: Option<usize>,
    placeholder: Option<String>,
}

impl SelectSurface {
    pub fn new(options: Vec<SelectOption>, value: String, placeholder: Option<String>) -> Self {
        let highlighted = options
            .iter()
            .position(|option| option.value == value && !option.disabled)
            .or_else(|| options.iter().position(|option| !option.disabled));
        Self {
            options,
            local_value: value,
            open: true,
            has_selected: false,
            dismissed: false,
            highlighted,
            placeholder,
        }
    }

    pub fn highlighted(&self) -> Option<&SelectOption> {
        self.highlighted.and_then(|idx| self.options.get(idx))
    }

    fn select(&mut self, value: &str) -> Option<EditAction<String>> {
        let option = self.options.iter().find(|option| option.value == value)?;
        if option.disabled {
            return None;
        }
        self.has_selected = true;
        self.open = false;
        self.local_value = option.value.clone();
        Some(EditAction::Save(self.local_value.clone()))
    }

    fn dismiss(&mut self) -> Option<EditAction<String>> {
        self.open = false;
        if self.has_selected || self.dismissed {
            return None;
        }
        self.dismissed = true;
        Some(EditAction::Cancel)
    }

    /// Move the highlight by one enabled option, stopping at the ends
    fn move_highlight(&mut self, forward: bool) {
        let len = self.options.len();
        let enabled = |idx: &usize| !self.options[*idx].disabled;
        let next = match (self.highlighted, forward) {
            (None, true) => (0..len).find(enabled),
            (None, false) => (0..len).rev().find(enabled),
            (Some(current), true) => (current + 1..len).find(enabled),
            (Some(current), false) => (0..current).rev().find(enabled),
        };
        if next.is_some() {
            self.highlighted = next;
        }
    }
}

impl EditSurface<String> for SelectSurface {
    fn handle(&mut self, msg: EditMsg, _props: &EditProps<'_, String>) -> Option<EditAction<String>> {
        match msg {
            EditMsg::SelectOption(value) => self.select(&value),
            EditMsg::OpenChange(true) => {
                self.open = true;
                self.has_selected = false;
                self.dismissed = false;
                None
            }
            EditMsg::OpenChange(false) | EditMsg::ClickCancel => self.dismiss(),
            EditMsg::Key(press) => match press.key {
                Key::Escape => Some(EditAction::Cancel),
                Key::Up if self.open => {
                    self.move_highlight(false);
                    None
                }
                Key::Down if self.open => {
                    self.move_highlight(true);
                    None
                }
                Key::Enter | Key::Space if self.open => {
                    let value = self.highlighted()?.value.clone();
                    self.select(&value)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn view(&self, props: &EditProps<'_, String>) -> ViewNode {
        let current = self
            .options
            .iter()
            .find(|option| option.value == self.local_value);
        let value = match current {
            Some(option) => ViewNode::text(option.label.clone()),
            None => ViewNode::muted(self.placeholder.as_deref().unwrap_or(SELECT_PROMPT)),
        };

        let options = self
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| OptionView {
                value: option.value.clone(),
                label: option.label.clone(),
                selected: option.value == self.local_value,
                highlighted: self.highlighted == Some(idx),
                disabled: option.disabled,
            })
            .collect();

        ViewNode::Column(vec![
            ViewNode::Row(vec![value, icon_button("chevron-down", props.label)]),
            ViewNode::Popover {
                open: self.open,
                children: vec![ViewNode::OptionList(options)],
            },
        ])
    }
}
