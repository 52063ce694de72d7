//! Search form state and its event handlers.
//!
//! The form owns the search text, the loading flag and the status message.
//! Handlers never perform I/O: submitting returns a [`FetchRequest`] for the
//! shell to run, and the shell feeds the outcome back in.
//!
//! # State Machine
//!
//! `Idle → Loading → (ResultsReady | Error)`; a new submission from either
//! settled state goes back to `Loading`.
//!
//! Every submission gets a new generation number. Outcomes for an older
//! generation are discarded, so a slow response to an abandoned search can
//! never overwrite the state produced by a newer one.

use crate::api::{
    FetchOutcome, FetchRequest, QueryDefaults, ResponseClass, SearchQuery, SearchResponse,
};
use crate::location::LocationProvider;
use crate::model::{FetchError, Listing};
use crate::state::text_input::{self, TextInput};
use tracing::{debug, info, warn};

/// Search text the form starts with.
pub const DEFAULT_SEARCH_TEXT: &str = "london";

/// Shown when the API answers with a non-success response code.
pub const NOT_RECOGNIZED_MESSAGE: &str = "Location not recognized; please try again";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    ResultsReady,
    Error,
}

/// Listings handed to the result screen after a successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub listings: Vec<Listing>,
    pub total_results: Option<u32>,
}

/// Search form state.
#[derive(Debug, Clone)]
pub struct SearchForm {
    input: TextInput,
    is_loading: bool,
    message: String,
    phase: SearchPhase,
    generation: u64,
    defaults: QueryDefaults,
}

impl SearchForm {
    /// New form with the default search text and no message.
    pub fn new(defaults: QueryDefaults) -> Self {
        Self {
            input: TextInput::new(DEFAULT_SEARCH_TEXT),
            is_loading: false,
            message: String::new(),
            phase: SearchPhase::Idle,
            generation: 0,
            defaults,
        }
    }

    /// Replace the initial search text.
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.input = TextInput::new(text);
        self
    }

    pub fn search_text(&self) -> &str {
        self.input.text()
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Generation of the most recent request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the search text. Legal in every phase.
    ///
    /// A settled search (results shown or error reported) returns to `Idle`;
    /// a request in flight is unaffected.
    pub fn on_text_changed(&mut self, text: impl Into<String>) {
        self.input = TextInput::new(text);
        self.reopen();
    }

    pub fn insert_char(&mut self, ch: char) {
        self.edit(|input| text_input::insert_char(input, ch));
    }

    pub fn backspace(&mut self) {
        self.edit(text_input::backspace);
    }

    pub fn cursor_left(&mut self) {
        self.edit(text_input::cursor_left);
    }

    pub fn cursor_right(&mut self) {
        self.edit(text_input::cursor_right);
    }

    pub fn cursor_home(&mut self) {
        self.edit(text_input::cursor_home);
    }

    pub fn cursor_end(&mut self) {
        self.edit(text_input::cursor_end);
    }

    fn edit(&mut self, f: impl FnOnce(TextInput) -> TextInput) {
        let input = std::mem::take(&mut self.input);
        self.input = f(input);
        self.reopen();
    }

    fn reopen(&mut self) {
        if matches!(self.phase, SearchPhase::ResultsReady | SearchPhase::Error) {
            self.phase = SearchPhase::Idle;
        }
    }

    /// Search by the current text as a place name, page 1.
    pub fn on_search_submitted(&mut self) -> FetchRequest {
        let query = SearchQuery::place_name(self.input.text());
        self.begin(query)
    }

    /// Search around the current device position.
    ///
    /// On success the coordinates become the search text and a
    /// `centre_point` request is returned. On failure the form moves to
    /// `Error` and no request is issued; any request still in flight is
    /// abandoned.
    pub fn on_location_requested(
        &mut self,
        provider: &dyn LocationProvider,
    ) -> Option<FetchRequest> {
        match provider.current_position() {
            Ok(coordinates) => {
                let search = coordinates.to_string();
                info!(location = %search, "Searching by current location");
                self.on_text_changed(search.clone());
                Some(self.begin(SearchQuery::centre_point(search)))
            }
            Err(e) => {
                warn!(error = %e, "Could not obtain location");
                self.generation += 1;
                self.is_loading = false;
                self.phase = SearchPhase::Error;
                self.message = format!("There was a problem with obtaining your location: {e}");
                None
            }
        }
    }

    fn begin(&mut self, query: SearchQuery) -> FetchRequest {
        self.generation += 1;
        self.is_loading = true;
        self.message.clear();
        self.phase = SearchPhase::Loading;

        FetchRequest {
            generation: self.generation,
            url: query.to_url(&self.defaults),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "Discarding outcome of superseded request"
            );
            return false;
        }
        true
    }

    /// Apply a decoded response.
    ///
    /// Returns the listings to show when the response code is in the
    /// success class, `None` otherwise (including for stale generations).
    pub fn on_response_received(
        &mut self,
        generation: u64,
        response: SearchResponse,
    ) -> Option<SearchResults> {
        if !self.is_current(generation) {
            return None;
        }

        self.is_loading = false;
        self.message.clear();

        match response.classify() {
            ResponseClass::Success => {
                info!(listings = response.listings.len(), "Properties found");
                self.phase = SearchPhase::ResultsReady;
                Some(SearchResults {
                    listings: response.listings,
                    total_results: response.total_results,
                })
            }
            ResponseClass::Failure { code } => {
                info!(code = ?code, text = ?response.application_response_text, "Search not recognized");
                self.phase = SearchPhase::Error;
                self.message = NOT_RECOGNIZED_MESSAGE.to_string();
                None
            }
        }
    }

    /// Apply a transport or decode failure.
    pub fn on_request_failed(&mut self, generation: u64, error: &FetchError) {
        if !self.is_current(generation) {
            return;
        }

        self.is_loading = false;
        self.phase = SearchPhase::Error;
        self.message = format!("Something bad happened: {error}");
    }

    /// Apply a completed request of either kind.
    pub fn on_outcome(&mut self, outcome: FetchOutcome) -> Option<SearchResults> {
        match outcome.result {
            Ok(response) => self.on_response_received(outcome.generation, response),
            Err(e) => {
                self.on_request_failed(outcome.generation, &e);
                None
            }
        }
    }
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::new(QueryDefaults::default())
    }
}

#[cfg(test)]
#[path = "search_form_tests.rs"]
mod tests;
