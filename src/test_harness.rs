//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with a scripted listings API and convenient methods
//! for simulating user interactions.

use crate::api::{ListingsApi, SearchResponse};
use crate::location::{Coordinates, FixedLocation, NoLocation};
use crate::model::{FetchError, Listing};
use crate::state::AppState;
use crate::view::TuiApp;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty lines are removed to keep snapshots clean.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// A successful response with one listing per `(price, title)` pair.
pub(crate) fn success_response(rows: &[(&str, &str)]) -> SearchResponse {
    SearchResponse {
        application_response_code: Some(json!("100")),
        application_response_text: Some("one unambiguous location".to_string()),
        listings: rows
            .iter()
            .enumerate()
            .map(|(i, (price, title))| Listing {
                title: title.to_string(),
                price_formatted: price.to_string(),
                img_url: format!("http://img.example/{i}.jpg"),
                guid: Some(format!("guid-{i}")),
                ..Listing::default()
            })
            .collect(),
        total_results: Some(rows.len() as u32),
        ..SearchResponse::default()
    }
}

/// Listings API that answers by the searched value (`place_name` or
/// `centre_point`) and records every URL it was asked for.
///
/// Unknown values get an "ambiguous location" response (code 200).
#[derive(Default)]
pub(crate) struct ScriptedApi {
    responses: HashMap<String, Result<SearchResponse, FetchError>>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, value: &str, result: Result<SearchResponse, FetchError>) -> Self {
        self.responses.insert(value.to_string(), result);
        self
    }

    pub(crate) fn delay(mut self, value: &str, delay: Duration) -> Self {
        self.delays.insert(value.to_string(), delay);
        self
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn searched_value(url: &str) -> Option<String> {
        let parsed = url::Url::parse(url).ok()?;
        parsed
            .query_pairs()
            .find(|(k, _)| k == "place_name" || k == "centre_point")
            .map(|(_, v)| v.into_owned())
    }
}

impl ListingsApi for ScriptedApi {
    fn fetch(&self, url: &str) -> Result<SearchResponse, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let value = Self::searched_value(url).unwrap_or_default();
        if let Some(delay) = self.delays.get(&value) {
            std::thread::sleep(*delay);
        }

        self.responses.get(&value).cloned().unwrap_or_else(|| {
            Ok(SearchResponse {
                application_response_code: Some(json!("200")),
                application_response_text: Some("ambiguous location".to_string()),
                ..SearchResponse::default()
            })
        })
    }
}

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    api: Arc<ScriptedApi>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Harness with default terminal size (80x24) and no location services.
    pub(crate) fn new(api: ScriptedApi) -> Self {
        Self::build(api, None, 80, 24)
    }

    /// Harness whose location provider reports `coordinates`.
    pub(crate) fn with_location(api: ScriptedApi, coordinates: Coordinates) -> Self {
        Self::build(api, Some(coordinates), 80, 24)
    }

    pub(crate) fn with_size(api: ScriptedApi, width: u16, height: u16) -> Self {
        Self::build(api, None, width, height)
    }

    fn build(api: ScriptedApi, location: Option<Coordinates>, width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");
        let api = Arc::new(api);
        let location: Box<dyn crate::location::LocationProvider + Send> = match location {
            Some(c) => Box::new(FixedLocation(c)),
            None => Box::new(NoLocation),
        };
        let app = TuiApp::new_for_test(
            terminal,
            AppState::default(),
            Arc::clone(&api) as Arc<dyn ListingsApi>,
            location,
        );

        Self {
            app,
            api,
            running: true,
        }
    }

    /// Send a single key event
    ///
    /// Returns true if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+L)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys, stopping early if the app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Type text one character at a time.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Erase the whole search text with End + Backspace.
    pub fn clear_text(&mut self) {
        self.send_key(KeyCode::End);
        let len = self.state().form.search_text().chars().count();
        for _ in 0..len {
            self.send_key(KeyCode::Backspace);
        }
    }

    /// Wait for all in-flight requests and apply their outcomes.
    pub fn settle(&mut self) {
        self.app.settle_fetches_test();
    }

    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    pub fn in_flight(&self) -> usize {
        self.app.in_flight_count()
    }

    /// URLs the API has been asked for so far.
    pub fn requests(&self) -> Vec<String> {
        self.api.requests()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}

#[cfg(test)]
#[path = "acceptance_tests.rs"]
mod acceptance_tests;
