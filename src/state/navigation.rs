//! Push-based screen stack.
//!
//! The root is always the search form; results and detail screens are pushed
//! on top and popped with Back. Each route carries its own input payload.

use super::result_list::ResultListState;
use crate::model::Listing;

pub const SEARCH_TITLE: &str = "Property Finder";
pub const RESULTS_TITLE: &str = "Results";
pub const DETAIL_TITLE: &str = "Property";

/// Which screen a route shows, with the data it was pushed with.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Search,
    Results(ResultListState),
    Detail(Box<Listing>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub title: String,
    pub screen: Screen,
}

impl Route {
    pub fn new(title: impl Into<String>, screen: Screen) -> Self {
        Self {
            title: title.into(),
            screen,
        }
    }
}

/// Screen stack. Invariant: never empty; the bottom route is `Screen::Search`.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::new(SEARCH_TITLE, Screen::Search)],
        }
    }

    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Pop the top route. The root cannot be popped; returns `None` there.
    pub fn pop(&mut self) -> Option<Route> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Drop everything above the root.
    pub fn pop_to_root(&mut self) {
        self.stack.truncate(1);
    }

    pub fn current(&self) -> &Route {
        // Non-empty by construction.
        &self.stack[self.stack.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Route {
        let top = self.stack.len() - 1;
        &mut self.stack[top]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Route titles from root to top, for breadcrumbs.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(|r| r.title.as_str())
    }

    /// Show a fresh result list on top of the search form.
    ///
    /// The listings are moved into the new route.
    pub fn show_results(&mut self, listings: Vec<Listing>, total_results: Option<u32>) {
        self.pop_to_root();
        self.push(Route::new(
            RESULTS_TITLE,
            Screen::Results(ResultListState::new(listings, total_results)),
        ));
    }

    pub fn show_detail(&mut self, listing: Listing) {
        self.push(Route::new(DETAIL_TITLE, Screen::Detail(Box::new(listing))));
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
