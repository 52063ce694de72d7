//! Result list screen.
//!
//! One row per listing: the price up to its first space, the title cut to a
//! single line, and the thumbnail link.

use super::helpers::{single_line, truncate_to_width};
use super::styles::Palette;
use crate::model::Listing;
use crate::state::ResultListState;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

pub const EMPTY_RESULTS_TEXT: &str = "No properties found.";

pub struct ResultList<'a> {
    state: &'a ResultListState,
    palette: &'a Palette,
}

impl<'a> ResultList<'a> {
    pub fn new(state: &'a ResultListState, palette: &'a Palette) -> Self {
        Self { state, palette }
    }
}

/// "Showing 20 of 1234 properties", or just the count when the total is unknown.
pub fn summary_line(state: &ResultListState) -> String {
    match state.total_results() {
        Some(total) => format!("Showing {} of {} properties", state.len(), total),
        None => format!("Showing {} properties", state.len()),
    }
}

fn row<'a>(listing: &Listing, width: usize, palette: &Palette) -> ListItem<'a> {
    let title = truncate_to_width(&single_line(&listing.title), width);
    let thumb = truncate_to_width(listing.thumbnail(), width);
    ListItem::new(vec![
        Line::from(Span::styled(listing.display_price().to_string(), palette.price)),
        Line::from(Span::styled(title, palette.title)),
        Line::from(Span::styled(thumb, palette.muted)),
    ])
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.state.is_empty() {
            Paragraph::new(EMPTY_RESULTS_TEXT)
                .style(self.palette.muted)
                .render(area, buf);
            return;
        }

        let [summary, rows] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        Paragraph::new(summary_line(self.state))
            .style(self.palette.muted)
            .render(summary, buf);

        // Two columns go to the highlight symbol
        let text_width = usize::from(rows.width.saturating_sub(2));
        let items: Vec<ListItem> = self
            .state
            .listings()
            .iter()
            .map(|listing| row(listing, text_width, self.palette))
            .collect();

        let list = List::new(items)
            .highlight_style(self.palette.selected)
            .highlight_symbol("▌ ");
        let mut list_state = ListState::default().with_selected(self.state.selected());
        StatefulWidget::render(list, rows, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::buffer_to_string;
    use crate::view::styles::ColorConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn listing(price: &str, title: &str) -> Listing {
        Listing {
            title: title.to_string(),
            price_formatted: price.to_string(),
            img_url: format!("http://img.example/{price}.jpg"),
            thumb_url: Some(format!("http://img.example/{price}_thumb.jpg")),
            ..Listing::default()
        }
    }

    fn render(state: &ResultListState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let palette = Palette::with_color_config(ColorConfig::disabled());
        terminal
            .draw(|frame| frame.render_widget(ResultList::new(state, &palette), frame.area()))
            .unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn rows_show_price_prefix_and_title() {
        let state = ResultListState::new(
            vec![
                listing("£350,000 Guide Price", "2 bed flat, Camden"),
                listing("£1,250,000", "5 bed house, Richmond"),
            ],
            Some(240),
        );
        let out = render(&state, 50, 10);

        assert!(out.contains("Showing 2 of 240 properties"));
        assert!(out.contains("£350,000"));
        assert!(!out.contains("Guide Price"));
        assert!(out.contains("2 bed flat, Camden"));
        assert!(out.contains("£1,250,000"));
    }

    #[test]
    fn long_titles_are_cut_to_one_line() {
        let title = "An exceptionally long description of a very grand property";
        let state = ResultListState::new(vec![listing("£1", title)], None);
        let out = render(&state, 30, 6);

        assert!(out.contains("Showing 1 properties"));
        assert!(out.contains('…'));
        assert!(!out.contains("grand property"));
    }

    #[test]
    fn selected_row_has_marker() {
        let state = ResultListState::new(vec![listing("£1", "first")], None);
        let out = render(&state, 30, 6);
        assert!(out.contains("▌ £1"));
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let state = ResultListState::new(Vec::new(), Some(0));
        let out = render(&state, 40, 4);
        assert!(out.contains(EMPTY_RESULTS_TEXT));
    }
}
