//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with the bindings of every screen, read
//! from the active [`KeyBindings`]. Toggled by '?' (F1 on the search form),
//! dismissed by Esc.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::helpers::empty_line;
use super::styles::Palette;
use crate::config::keybindings::{format_key, KeyBindings};
use crate::model::KeyAction;
use crate::state::KeyContext;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Sections of the overlay: heading, context, and the actions listed.
const SECTIONS: [(&str, KeyContext, &[(KeyAction, &str)]); 3] = [
    (
        "Search",
        KeyContext::Form,
        &[
            (KeyAction::SubmitSearch, "Search by place name or postcode"),
            (KeyAction::SearchByLocation, "Search near your location"),
            (KeyAction::DeleteBack, "Delete character"),
            (KeyAction::CursorHome, "Cursor to start"),
            (KeyAction::CursorEnd, "Cursor to end"),
        ],
    ),
    (
        "Results",
        KeyContext::List,
        &[
            (KeyAction::SelectNext, "Next property"),
            (KeyAction::SelectPrev, "Previous property"),
            (KeyAction::SelectFirst, "First property"),
            (KeyAction::SelectLast, "Last property"),
            (KeyAction::OpenSelected, "Open property"),
            (KeyAction::Back, "Back to search"),
        ],
    ),
    (
        "Application",
        KeyContext::List,
        &[
            (KeyAction::Help, "Toggle this help"),
            (KeyAction::Quit, "Quit"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, bindings: &KeyBindings, palette: &Palette) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(bindings, palette))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(palette.border),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };

    let hint = Paragraph::new(Line::from(vec![Span::styled(
        " Press Esc to close ",
        palette.muted.add_modifier(Modifier::DIM),
    )]))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Calculate the centered rect for the help overlay.
///
/// Returns a Rect that is centered on the screen with the specified
/// percentage of width and height.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content(bindings: &KeyBindings, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, (heading, context, actions)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(empty_line());
        }
        lines.push(Line::from(Span::styled(*heading, palette.accent)));

        for (action, description) in actions.iter() {
            let keys = bindings
                .keys_for(*context, *action)
                .into_iter()
                .map(format_key)
                .collect::<Vec<_>>()
                .join("/");
            if keys.is_empty() {
                continue;
            }
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<16}"), palette.key_hint),
                Span::raw(*description),
            ]));
        }
    }

    lines
}
