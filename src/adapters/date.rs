//! Date adapter - calendar popover that saves as soon as a day is picked

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::messages::{EditMsg, Key};
use crate::model::{DateValue, FieldOptions};
use crate::util::{format_date, iso_date, parse_date, DEFAULT_DATE_FORMAT};
use crate::view::{icon_button, ViewNode};

use super::{DisplayText, EditAction, EditProps, EditSurface, FieldAdapter};

pub const DATE_PLACEHOLDER: &str = "Select date";

/// Accessible label of the popover trigger
pub const SELECT_DATE_LABEL: &str = "Select date";

#[derive(Debug, Clone)]
pub struct DateAdapter {
    /// chrono strftime pattern of the display
    display_format: String,
    placeholder: String,
    /// Day the calendar opens on when no value is set (defaults to the local date)
    today: Option<NaiveDate>,
}

impl Default for DateAdapter {
    fn default() -> Self {
        Self {
            display_format: DEFAULT_DATE_FORMAT.to_string(),
            placeholder: DATE_PLACEHOLDER.to_string(),
            today: None,
        }
    }
}

impl DateAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_format(mut self, pattern: impl Into<String>) -> Self {
        self.display_format = pattern.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today_or_local(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    fn formatted(&self, value: &DateValue) -> Option<String> {
        let date = parse_date(value.as_deref()?)?;
        Some(format_date(date, &self.display_format))
    }
}

impl FieldAdapter for DateAdapter {
    type Value = DateValue;

    fn kind(&self) -> &'static str {
        "date"
    }

    fn display(&self, value: &DateValue) -> DisplayText {
        match self.formatted(value) {
            Some(text) => DisplayText::value(text),
            None => DisplayText::empty(Some(&self.placeholder)),
        }
    }

    /// Unparseable values are shown as-is
    fn format(&self, value: &DateValue) -> String {
        self.formatted(value)
            .or_else(|| value.clone())
            .unwrap_or_default()
    }

    fn options(&self) -> FieldOptions {
        // Picking a day moves focus into the popover
        FieldOptions {
            exit_on_blur: false,
            ..FieldOptions::default()
        }
    }

    fn open(&self, props: &EditProps<'_, DateValue>) -> Box<dyn EditSurface<DateValue>> {
        let selected = props.value.as_deref().and_then(parse_date);
        Box::new(DateSurface {
            open: true,
            has_selected: false,
            dismissed: false,
            selected,
            focused: selected.unwrap_or_else(|| self.today_or_local()),
            trigger_text: self.formatted(props.value),
            placeholder: self.placeholder.clone(),
        })
    }
}

/// Calendar popover of one edit session
pub struct DateSurface {
    open: bool,
    /// The popover closed because a day was picked
    has_selected: bool,
    /// Cancel was already requested by a dismiss
    dismissed: bool,
    selected: Option<NaiveDate>,
    /// Keyboard focus inside the grid
    focused: NaiveDate,
    trigger_text: Option<String>,
    placeholder: String,
}

impl DateSurface {
    pub fn focused(&self) -> NaiveDate {
        self.focused
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    fn select(&mut self, day: NaiveDate) -> Option<EditAction<DateValue>> {
        self.has_selected = true;
        self.open = false;
        self.selected = Some(day);
        Some(EditAction::Save(Some(iso_date(day))))
    }

    fn dismiss(&mut self) -> Option<EditAction<DateValue>> {
        self.open = false;
        if self.has_selected || self.dismissed {
            return None;
        }
        self.dismissed = true;
        Some(EditAction::Cancel)
    }

    fn move_focus(&mut self, key: Key) -> bool {
        let moved = match key {
            Key::Left => self.focused.checked_sub_days(Days::new(1)),
            Key::Right => self.focused.checked_add_days(Days::new(1)),
            Key::Up => self.focused.checked_sub_days(Days::new(7)),
            Key::Down => self.focused.checked_add_days(Days::new(7)),
            Key::PageUp => self.focused.checked_sub_months(Months::new(1)),
            Key::PageDown => self.focused.checked_add_months(Months::new(1)),
            _ => None,
        };
        match moved {
            Some(day) => {
                self.focused = day;
                true
            }
            None => false,
        }
    }

    fn visible_month(&self) -> NaiveDate {
        self.focused.with_day(1).unwrap_or(self.focused)
    }
}

impl EditSurface<DateValue> for DateSurface {
    fn handle(&mut self, msg: EditMsg, _props: &EditProps<'_, DateValue>) -> Option<EditAction<DateValue>> {
        match msg {
            EditMsg::SelectDay(day) => self.select(day),
            EditMsg::OpenChange(true) => {
                self.open = true;
                self.has_selected = false;
                self.dismissed = false;
                None
            }
            EditMsg::OpenChange(false) => self.dismiss(),
            EditMsg::ClickCancel => self.dismiss(),
            EditMsg::Key(press) => match press.key {
                Key::Escape => Some(EditAction::Cancel),
                Key::Enter | Key::Space if self.open => {
                    let day = self.focused;
                    self.select(day)
                }
                key => {
                    if self.open {
                        self.move_focus(key);
                    }
                    None
                }
            },
            _ => None,
        }
    }

    fn view(&self, _props: &EditProps<'_, DateValue>) -> ViewNode {
        let value = match &self.trigger_text {
            Some(text) => ViewNode::text(text.clone()),
            None => ViewNode::muted(self.placeholder.clone()),
        };
        let trigger = ViewNode::Row(vec![icon_button("calendar", SELECT_DATE_LABEL), value]);

        ViewNode::Column(vec![
            trigger,
            ViewNode::Popover {
                open: self.open,
                children: vec![ViewNode::Calendar {
                    month: self.visible_month(),
                    selected: self.selected,
                    focused: self.focused,
                }],
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::EditableField;
    use crate::messages::{FieldMsg, KeyPress};
    use crate::model::{EditableState, Effect};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn due_date(value: Option<&str>) -> EditableField<DateAdapter> {
        EditableField::new(
            "Due Date",
            value.map(String::from),
            DateAdapter::new().today(day(2025, 3, 10)),
        )
    }

    #[test]
    fn test_display() {
        let adapter = DateAdapter::new();
        assert_eq!(adapter.display(&Some("2025-01-20".into())).text, "Jan 20, 2025");
        assert_eq!(adapter.display(&None), DisplayText::placeholder("Select date"));
        assert_eq!(
            adapter.display(&Some("garbage".into())),
            DisplayText::placeholder("Select date")
        );
        assert_eq!(adapter.format(&Some("garbage".into())), "garbage");
        assert_eq!(
            DateAdapter::new()
                .display_format("%Y/%m/%d")
                .format(&Some("01/20/2025".into())),
            "2025/01/20"
        );
    }

    #[test]
    fn test_time_only_display_format_falls_back() {
        let adapter = DateAdapter::new().display_format("%H:%M");
        assert_eq!(adapter.display(&Some("2025-01-20".into())).text, "Jan 20, 2025");

        let field = EditableField::new("Due", Some("2025-01-20".to_string()), adapter);
        assert_eq!(field.view().text_content(), "Jan 20, 2025");
    }

    #[test]
    fn test_selecting_a_day_saves_immediately() {
        let mut field = due_date(Some("2025-01-20"));
        field.update(FieldMsg::Click);
        let effect = field.update(FieldMsg::Edit(EditMsg::SelectDay(day(2025, 2, 3))));
        assert_eq!(effect, Some(Effect::Save(Some("2025-02-03".into()))));
        assert_eq!(field.state(), EditableState::Saving);
    }

    #[test]
    fn test_dismiss_without_selection_cancels_once() {
        let mut field = due_date(None);
        field.update(FieldMsg::Click);
        assert_eq!(field.state(), EditableState::Edit);
        field.update(FieldMsg::Edit(EditMsg::OpenChange(false)));
        assert_eq!(field.state(), EditableState::Rest);
        assert_eq!(field.update(FieldMsg::Edit(EditMsg::OpenChange(false))), None);
    }

    #[test]
    fn test_dismiss_after_selection_does_not_cancel() {
        let mut field = due_date(None).with_show_saving_state(false);
        field.update(FieldMsg::Click);
        let effect = field.update(FieldMsg::Edit(EditMsg::SelectDay(day(2025, 3, 12))));
        assert!(matches!(effect, Some(Effect::Save(_))));
        assert_eq!(field.state(), EditableState::Edit);

        let effect = field.update(FieldMsg::Edit(EditMsg::OpenChange(false)));
        assert_eq!(effect, None);
        assert_eq!(field.state(), EditableState::Edit);
        assert!(field.core().is_save_in_flight());
    }

    #[test]
    fn test_blur_does_not_exit() {
        let mut field = due_date(None);
        field.update(FieldMsg::Click);
        field.update(FieldMsg::Blur { within: false });
        assert_eq!(field.state(), EditableState::Edit);
    }

    #[test]
    fn test_keyboard_navigation_and_enter() {
        let mut field = due_date(Some("2025-01-31"));
        field.update(FieldMsg::Click);
        field.update(FieldMsg::Key(KeyPress::new(Key::Right)));
        field.update(FieldMsg::Key(KeyPress::new(Key::Down)));
        field.update(FieldMsg::Key(KeyPress::new(Key::PageUp)));
        let effect = field.update(FieldMsg::Key(KeyPress::new(Key::Enter)));
        // Jan 31 +1 = Feb 1, +7 = Feb 8, -1 month = Jan 8
        assert_eq!(effect, Some(Effect::Save(Some("2025-01-08".into()))));
    }

    #[test]
    fn test_escape_cancels() {
        let mut field = due_date(Some("2025-01-20"));
        field.update(FieldMsg::Click);
        let effect = field.update(FieldMsg::Key(KeyPress::new(Key::Escape)));
        assert_eq!(effect, None);
        assert_eq!(field.state(), EditableState::Rest);
    }

    #[test]
    fn test_calendar_opens_on_today_without_value() {
        let mut field = due_date(None);
        field.update(FieldMsg::Click);
        let view = field.view();
        let calendar = view
            .descendants()
            .into_iter()
            .find(|node| matches!(node, ViewNode::Calendar { .. }))
            .cloned();
        assert_eq!(
            calendar,
            Some(ViewNode::Calendar {
                month: day(2025, 3, 1),
                selected: None,
                focused: day(2025, 3, 10),
            })
        );
        assert!(view.find_by_aria_label(SELECT_DATE_LABEL).is_some());
    }
}
