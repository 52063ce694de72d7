//! Screen layout: title bar, current screen, footer.
//!
//! Pure rendering from [`AppState`]; the event loop owns everything else.

use super::constants::{FOOTER_HEIGHT, TITLE_BAR_HEIGHT};
use super::help::render_help_overlay;
use super::property_detail::PropertyDetail;
use super::result_list::ResultList;
use super::search_page::SearchPage;
use super::styles::Palette;
use crate::config::keybindings::{format_key, KeyBindings};
use crate::model::KeyAction;
use crate::state::{AppState, KeyContext, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Separator between breadcrumb titles.
const BREADCRUMB_SEPARATOR: &str = " › ";

/// Separator between footer hints.
const HINT_SEPARATOR: &str = "  ";

/// Render the whole frame for the current state.
pub fn render_layout(
    frame: &mut Frame,
    state: &AppState,
    bindings: &KeyBindings,
    palette: &Palette,
    spinner_frame: usize,
) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let title_area = vertical_chunks[0];
    let content_area = inset(vertical_chunks[1]);
    let footer_area = vertical_chunks[2];

    render_title_bar(frame, title_area, state, palette);

    match state.screen() {
        Screen::Search => frame.render_widget(
            SearchPage::new(&state.form, bindings, palette).spinner_frame(spinner_frame),
            content_area,
        ),
        Screen::Results(list) => frame.render_widget(ResultList::new(list, palette), content_area),
        Screen::Detail(listing) => {
            frame.render_widget(PropertyDetail::new(listing, palette), content_area)
        }
    }

    render_footer(frame, footer_area, state, bindings, palette);

    if state.help_visible {
        render_help_overlay(frame, bindings, palette);
    }
}

/// One column of padding on each side.
fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        width: area.width.saturating_sub(2),
        ..area
    }
}

/// Breadcrumb of route titles, root first. The current screen is highlighted.
fn render_title_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let titles: Vec<&str> = state.navigator.titles().collect();
    let last = titles.len().saturating_sub(1);

    let mut spans = vec![Span::raw(" ")];
    for (i, title) in titles.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(BREADCRUMB_SEPARATOR, palette.muted));
        }
        let style = if i == last {
            palette.accent
        } else {
            palette.muted
        };
        spans.push(Span::styled(title.to_string(), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    bindings: &KeyBindings,
    palette: &Palette,
) {
    let hints = build_keyboard_hints(state.context(), state.help_visible, bindings);

    let mut spans = vec![Span::raw(" ")];
    for (i, (keys, label)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(HINT_SEPARATOR));
        }
        spans.push(Span::styled(keys, palette.key_hint));
        spans.push(Span::styled(format!(" {label}"), palette.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Context-sensitive footer hints as `(keys, label)` pairs.
///
/// At most two keys are shown per action so the footer fits on one line.
pub fn build_keyboard_hints(
    context: KeyContext,
    help_visible: bool,
    bindings: &KeyBindings,
) -> Vec<(String, &'static str)> {
    if help_visible {
        return vec![("Esc".to_string(), "Close help")];
    }

    let actions: &[KeyAction] = match context {
        KeyContext::Form => &[
            KeyAction::SubmitSearch,
            KeyAction::SearchByLocation,
            KeyAction::Help,
            KeyAction::Quit,
        ],
        KeyContext::List => &[
            KeyAction::SelectNext,
            KeyAction::SelectPrev,
            KeyAction::OpenSelected,
            KeyAction::Back,
            KeyAction::Help,
            KeyAction::Quit,
        ],
        KeyContext::Detail => &[KeyAction::Back, KeyAction::Help, KeyAction::Quit],
    };

    actions
        .iter()
        .filter_map(|&action| {
            let keys: Vec<String> = bindings
                .keys_for(context, action)
                .into_iter()
                .take(2)
                .map(format_key)
                .collect();
            (!keys.is_empty()).then(|| (keys.join("/"), action.label()))
        })
        .collect()
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
