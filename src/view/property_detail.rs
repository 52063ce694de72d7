//! Property detail screen.

use super::helpers::empty_line;
use super::styles::Palette;
use crate::model::Listing;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

pub struct PropertyDetail<'a> {
    listing: &'a Listing,
    palette: &'a Palette,
}

impl<'a> PropertyDetail<'a> {
    pub fn new(listing: &'a Listing, palette: &'a Palette) -> Self {
        Self { listing, palette }
    }

    fn labelled(&self, label: &'static str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:<10}"), self.palette.muted),
            Span::raw(value),
        ])
    }
}

/// "3 bed flat, 2 bathrooms". `None` when the listing has none of the parts.
pub fn stats_line(listing: &Listing) -> Option<String> {
    let mut parts = Vec::new();

    let kind = listing.property_type.as_deref().filter(|t| !t.is_empty());
    match (listing.bedroom_number, kind) {
        (Some(beds), Some(kind)) => parts.push(format!("{beds} bed {kind}")),
        (Some(beds), None) => parts.push(format!("{beds} bed")),
        (None, Some(kind)) => parts.push(kind.to_string()),
        (None, None) => {}
    }

    match listing.bathroom_number {
        Some(1) => parts.push("1 bathroom".to_string()),
        Some(n) if n > 1 => parts.push(format!("{n} bathrooms")),
        _ => {}
    }

    (!parts.is_empty()).then(|| parts.join(", "))
}

impl Widget for PropertyDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let listing = self.listing;
        let mut lines = vec![
            Line::from(Span::styled(
                listing.display_price().to_string(),
                self.palette.price,
            )),
            Line::from(Span::styled(listing.title.clone(), self.palette.title)),
        ];

        if let Some(stats) = stats_line(listing) {
            lines.push(Line::from(stats));
        }

        if let Some(summary) = listing.summary.as_deref().filter(|s| !s.is_empty()) {
            lines.push(empty_line());
            lines.push(Line::from(summary.to_string()));
        }

        let keywords = listing.keyword_list();
        if !keywords.is_empty() {
            lines.push(empty_line());
            lines.push(self.labelled("Features", keywords.join(" · ")));
        }

        lines.push(empty_line());
        if listing.price_formatted != listing.display_price() {
            lines.push(self.labelled("Price", listing.price_formatted.clone()));
        }
        if let (Some(lat), Some(lon)) = (listing.latitude, listing.longitude) {
            lines.push(self.labelled("Location", format!("{lat},{lon}")));
        }
        if !listing.img_url.is_empty() {
            lines.push(self.labelled("Image", listing.img_url.clone()));
        }
        if let Some(url) = listing.lister_url.as_deref() {
            lines.push(self.labelled("Listing", url.to_string()));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
