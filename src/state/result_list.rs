//! Result list state: the listings of one search plus a row selection.
//!
//! Rows are rendered exactly in the order the API returned them; nothing
//! here sorts, filters or pages.

use crate::model::Listing;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultListState {
    listings: Vec<Listing>,
    selected: usize,
    total_results: Option<u32>,
}

impl ResultListState {
    /// Take ownership of a search's listings. The first row starts selected.
    pub fn new(listings: Vec<Listing>, total_results: Option<u32>) -> Self {
        Self {
            listings,
            selected: 0,
            total_results,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Total matches reported by the API, which may exceed `len()`.
    pub fn total_results(&self) -> Option<u32> {
        self.total_results
    }

    /// Selected row, `None` for an empty list.
    pub fn selected(&self) -> Option<usize> {
        (!self.listings.is_empty()).then_some(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.listings.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.listings.len().saturating_sub(1);
    }

    /// Select row `index`. Returns false (selection unchanged) if out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.listings.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// The listing for row `index`.
    pub fn listing_at(&self, index: usize) -> Option<&Listing> {
        self.listings.get(index)
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.selected().and_then(|i| self.listing_at(i))
    }

    /// A copy of the selected record, for handing to the detail screen.
    pub fn open_selected(&self) -> Option<Listing> {
        self.selected_listing().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings(n: usize) -> Vec<Listing> {
        (0..n)
            .map(|i| Listing {
                title: format!("Listing {i}"),
                ..Listing::default()
            })
            .collect()
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut state = ResultListState::new(vec![], None);
        state.select_next();
        state.select_last();
        assert_eq!(state.selected(), None);
        assert_eq!(state.selected_listing(), None);
    }

    #[test]
    fn first_row_selected_initially() {
        let state = ResultListState::new(listings(3), Some(40));
        assert_eq!(state.selected(), Some(0));
        assert_eq!(state.total_results(), Some(40));
    }

    #[test]
    fn next_and_prev_saturate() {
        let mut state = ResultListState::new(listings(2), None);
        state.select_prev();
        assert_eq!(state.selected(), Some(0));
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn first_and_last() {
        let mut state = ResultListState::new(listings(5), None);
        state.select_last();
        assert_eq!(state.selected(), Some(4));
        state.select_first();
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut state = ResultListState::new(listings(2), None);
        assert!(state.select(1));
        assert!(!state.select(2));
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn listing_at_maps_index_to_record() {
        let state = ResultListState::new(listings(3), None);
        assert_eq!(state.listing_at(2).unwrap().title, "Listing 2");
        assert_eq!(state.listing_at(3), None);
    }

    #[test]
    fn open_selected_follows_selection() {
        let mut state = ResultListState::new(listings(3), None);
        state.select_next();
        assert_eq!(state.open_selected().unwrap().title, "Listing 1");
        assert_eq!(ResultListState::new(vec![], None).open_selected(), None);
    }

    #[test]
    fn order_is_preserved() {
        let input = listings(4);
        let state = ResultListState::new(input.clone(), None);
        assert_eq!(state.listings(), input.as_slice());
    }
}
