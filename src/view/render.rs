//! Plain-text rendering of the view tree
//!
//! Used by the CLI to show the form after every scripted step.

use chrono::{Datelike, Duration, NaiveDate};

use crate::util::indent;

use super::{ButtonStyle, InputView, OptionView, Presentation, ViewNode};

/// Render a view tree as indented plain text
pub fn render_text(node: &ViewNode) -> String {
    render_lines(node).join("\n")
}

fn render_lines(node: &ViewNode) -> Vec<String> {
    match node {
        ViewNode::Field {
            label,
            state,
            children,
        } => {
            let mut lines = vec![format!("{} [{}]", label, state)];
            for child in children {
                let body = render_lines(child).join("\n");
                if !body.is_empty() {
                    lines.push(indent(&body, "  "));
                }
            }
            lines
        }
        ViewNode::Display {
            text,
            muted,
            readonly,
            highlighted,
            presentation,
            ..
        } => {
            let mut line = styled(text, *muted);
            if *presentation == Presentation::Heading {
                line = format!("# {}", line);
            }
            if *highlighted {
                line = format!("» {}", line);
            }
            if *readonly {
                line.push_str(" (read-only)");
            }
            vec![line]
        }
        ViewNode::Input(input) => vec![render_input(input)],
        ViewNode::Button { text, aria_label, style, enabled, .. } => {
            let shown = match style {
                ButtonStyle::Icon => aria_label,
                ButtonStyle::Text => text,
            };
            let disabled = if *enabled { "" } else { " disabled" };
            vec![format!("({}{})", shown, disabled)]
        }
        ViewNode::Row(children) => {
            let parts: Vec<String> = children
                .iter()
                .map(|child| render_lines(child).join(" "))
                .filter(|part| !part.is_empty())
                .collect();
            if parts.is_empty() {
                Vec::new()
            } else {
                vec![parts.join(" ")]
            }
        }
        ViewNode::Column(children) => children.iter().flat_map(render_lines).collect(),
        ViewNode::Alert(message) => vec![format!("! {}", message)],
        ViewNode::Spinner { aria_label } => vec![format!("({})", aria_label)],
        ViewNode::Text { text, muted } => vec![styled(text, *muted)],
        ViewNode::Popover { open, children } => {
            if !*open {
                return Vec::new();
            }
            children
                .iter()
                .flat_map(render_lines)
                .map(|line| format!("┆ {}", line))
                .collect()
        }
        ViewNode::OptionList(options) => options.iter().map(render_option).collect(),
        ViewNode::Calendar {
            month,
            selected,
            focused,
        } => render_calendar(*month, *selected, *focused),
    }
}

fn styled(text: &str, muted: bool) -> String {
    if muted {
        format!("_{}_", text)
    } else {
        text.to_string()
    }
}

fn render_input(input: &InputView) -> String {
    let mut body = String::new();
    if let Some(prefix) = &input.prefix {
        body.push_str(prefix);
    }

    if input.value.is_empty() {
        if input.focused {
            body.push('|');
        }
        if let Some(placeholder) = &input.placeholder {
            body.push_str(&styled(placeholder, true));
        }
    } else if input.focused {
        let split = crate::util::byte_offset(&input.value, input.cursor);
        body.push_str(&input.value[..split]);
        body.push('|');
        body.push_str(&input.value[split..]);
    } else {
        body.push_str(&input.value);
    }

    if let Some(suffix) = &input.suffix {
        body.push_str(suffix);
    }

    let body = body.replace('\n', "⏎");
    match input.presentation {
        Presentation::Heading => format!("# [{}]", body),
        Presentation::Body => format!("[{}]", body),
    }
}

fn render_option(option: &OptionView) -> String {
    let marker = if option.highlighted { ">" } else { " " };
    let check = if option.selected { "●" } else { "○" };
    let disabled = if option.disabled { " (disabled)" } else { "" };
    format!("{} {} {}{}", marker, check, option.label, disabled)
}

fn render_calendar(month: NaiveDate, selected: Option<NaiveDate>, focused: NaiveDate) -> Vec<String> {
    let mut lines = vec![month.format("%B %Y").to_string(), "Su Mo Tu We Th Fr Sa".to_string()];

    let lead = month.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<String> = vec!["  ".to_string(); lead];
    let mut day = month;
    while day.month() == month.month() {
        let cell = if Some(day) == selected {
            format!("{:>2}*", day.day())
        } else if day == focused {
            format!("{:>2}<", day.day())
        } else {
            format!("{:>2}", day.day())
        };
        cells.push(cell);
        day += Duration::days(1);
    }

    for week in cells.chunks(7) {
        let line = week
            .iter()
            .map(|cell| format!("{:<3}", cell))
            .collect::<String>();
        lines.push(line.trim_end().to_string());
    }
    lines
}
