//! Search form screen.

use super::constants::{SEARCH_INPUT_HEIGHT, SEARCH_INPUT_WIDTH, SPINNER_FRAMES};
use super::styles::Palette;
use crate::config::keybindings::{format_key, KeyBindings};
use crate::model::KeyAction;
use crate::state::{KeyContext, SearchForm, TextInput};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub const HEADLINE: &str = "Search for houses to buy!";
pub const SUBHEADING: &str = "Search by place-name, postcode or search near your location.";

/// Search form: headline, text box, action buttons, spinner and message.
pub struct SearchPage<'a> {
    form: &'a SearchForm,
    bindings: &'a KeyBindings,
    palette: &'a Palette,
    spinner_frame: usize,
}

impl<'a> SearchPage<'a> {
    pub fn new(form: &'a SearchForm, bindings: &'a KeyBindings, palette: &'a Palette) -> Self {
        Self {
            form,
            bindings,
            palette,
            spinner_frame: 0,
        }
    }

    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    fn button(&self, action: KeyAction) -> Vec<Span<'a>> {
        let keys = self
            .bindings
            .keys_for(KeyContext::Form, action)
            .into_iter()
            .map(format_key)
            .collect::<Vec<_>>()
            .join("/");
        vec![
            Span::styled(format!("[ {} ]", action.label()), self.palette.accent),
            Span::styled(format!(" {keys}"), self.palette.muted),
        ]
    }
}

impl Widget for SearchPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, headline, subheading, _, input, _, buttons, _, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(SEARCH_INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        Paragraph::new(HEADLINE)
            .style(self.palette.muted)
            .alignment(Alignment::Center)
            .render(headline, buf);
        Paragraph::new(SUBHEADING)
            .style(self.palette.muted)
            .alignment(Alignment::Center)
            .render(subheading, buf);

        let input_width = SEARCH_INPUT_WIDTH.min(input.width);
        let input_area = Rect {
            x: input.x + (input.width - input_width) / 2,
            width: input_width,
            ..input
        };
        TextBox::new(self.form.input(), self.palette).render(input_area, buf);

        let mut button_spans = self.button(KeyAction::SubmitSearch);
        button_spans.push(Span::raw("    "));
        button_spans.extend(self.button(KeyAction::SearchByLocation));
        Paragraph::new(Line::from(button_spans))
            .alignment(Alignment::Center)
            .render(buttons, buf);

        let mut lines = Vec::new();
        if self.form.is_loading() {
            let spinner = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            lines.push(Line::from(vec![
                Span::styled(spinner, self.palette.accent),
                Span::styled(" Searching…", self.palette.muted),
            ]));
        }
        if !self.form.message().is_empty() {
            lines.push(Line::from(Span::styled(
                self.form.message().to_string(),
                self.palette.message,
            )));
        }
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(status, buf);
    }
}

/// Bordered single-line text box with a block cursor.
///
/// Scrolls horizontally so the cursor stays visible.
struct TextBox<'a> {
    input: &'a TextInput,
    palette: &'a Palette,
}

impl<'a> TextBox<'a> {
    fn new(input: &'a TextInput, palette: &'a Palette) -> Self {
        Self { input, palette }
    }
}

impl Widget for TextBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_width = usize::from(area.width.saturating_sub(2)).max(1);
        let chars: Vec<char> = self.input.text().chars().collect();
        let cursor = self.input.cursor();

        // Keep the cursor cell inside the box
        let start = (cursor + 1).saturating_sub(inner_width);
        let before: String = chars[start..cursor].iter().collect();
        let (under_cursor, after) = match chars.get(cursor) {
            Some(ch) => (ch.to_string(), chars[cursor + 1..].iter().collect()),
            None => (" ".to_string(), String::new()),
        };

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(under_cursor, self.palette.cursor),
            Span::raw(after),
        ]);

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.palette.border)
                    .title(" Search ")
                    .style(Style::default()),
            )
            .render(area, buf);
    }
}
