//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod helpers;
mod layout;
pub mod property_detail;
pub mod result_list;
pub mod search_page;
pub mod styles;

pub use help::render_help_overlay;
pub use layout::{build_keyboard_hints, render_layout};
pub use property_detail::PropertyDetail;
pub use result_list::ResultList;
pub use search_page::SearchPage;
pub use styles::{ColorConfig, Palette};

use crate::api::{spawn_fetch, FetchOutcome, FetchRequest, HttpListingsApi, ListingsApi};
use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::location::{self, LocationProvider};
use crate::model::{AppError, FetchError, KeyAction};
use crate::state::{AppState, SearchForm};
use constants::TICK_INTERVAL_MS;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// A request handed to a worker thread, awaiting its outcome.
struct InFlight {
    generation: u64,
    receiver: Receiver<FetchOutcome>,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    api: Arc<dyn ListingsApi>,
    location: Box<dyn LocationProvider + Send>,
    in_flight: Vec<InFlight>,
    palette: Palette,
    spinner_frame: usize,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(config: &ResolvedConfig, colors: ColorConfig) -> Result<Self, TuiError> {
        let api = HttpListingsApi::new(config.request_timeout).map_err(AppError::from)?;
        let form = SearchForm::new(config.query_defaults())
            .with_search_text(config.default_search.clone());

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_parts(
            terminal,
            AppState::new(form),
            Arc::new(api),
            location::provider_for(config.location),
            KeyBindings::default(),
            Palette::with_color_config(colors),
        ))
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_parts(
        terminal: Terminal<B>,
        app_state: AppState,
        api: Arc<dyn ListingsApi>,
        location: Box<dyn LocationProvider + Send>,
        key_bindings: KeyBindings,
        palette: Palette,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            api,
            location,
            in_flight: Vec::new(),
            palette,
            spinner_frame: 0,
        }
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Redraws after every input event, when a
    /// request completes, and on each tick while a search is loading.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let tick = Duration::from_millis(TICK_INTERVAL_MS);

        self.draw()?;

        loop {
            let mut dirty = false;

            if event::poll(tick)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        dirty = true;
                    }
                    Event::Resize(..) => dirty = true,
                    _ => {}
                }
            }

            if self.poll_fetches() {
                dirty = true;
            }

            if self.app_state.form.is_loading() {
                self.spinner_frame = self.spinner_frame.wrapping_add(1);
                dirty = true;
            }

            if dirty {
                self.draw()?;
            }
        }
    }

    /// Submit the current search text, as if Enter was pressed on the form.
    pub fn submit_initial_search(&mut self) {
        if let Some(request) = self
            .app_state
            .handle_action(KeyAction::SubmitSearch, &*self.location)
        {
            self.start_fetch(request);
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        let context = self.app_state.context();
        match self.key_bindings.get(context, key) {
            Some(action) => {
                debug!(?action, ?context, "Key action");
                self.dispatch(action);
            }
            None => {
                // Unbound printable keys type into the search form
                if let KeyCode::Char(ch) = key.code {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        self.app_state.handle_char(ch);
                    }
                }
            }
        }

        self.app_state.should_quit()
    }

    /// Wheel scrolling moves the result selection.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => KeyAction::SelectNext,
            MouseEventKind::ScrollUp => KeyAction::SelectPrev,
            _ => return,
        };
        self.dispatch(action);
    }

    fn dispatch(&mut self, action: KeyAction) {
        if let Some(request) = self.app_state.handle_action(action, &*self.location) {
            self.start_fetch(request);
        }
    }

    fn start_fetch(&mut self, request: FetchRequest) {
        info!(generation = request.generation, url = %request.url, "Starting search");
        let generation = request.generation;
        let receiver = spawn_fetch(Arc::clone(&self.api), request);
        self.in_flight.push(InFlight {
            generation,
            receiver,
        });
    }

    /// Apply every completed request. Returns true if any completed.
    fn poll_fetches(&mut self) -> bool {
        let mut outcomes = Vec::new();

        self.in_flight
            .retain(|pending| match pending.receiver.try_recv() {
                Ok(outcome) => {
                    outcomes.push(outcome);
                    false
                }
                Err(TryRecvError::Empty) => true,
                Err(TryRecvError::Disconnected) => {
                    warn!(
                        generation = pending.generation,
                        "Request worker exited without a result"
                    );
                    outcomes.push(FetchOutcome {
                        generation: pending.generation,
                        result: Err(FetchError::Transport(
                            "request worker stopped unexpectedly".to_string(),
                        )),
                    });
                    false
                }
            });

        let completed = !outcomes.is_empty();
        for outcome in outcomes {
            self.app_state.apply_outcome(outcome);
        }
        completed
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let bindings = &self.key_bindings;
        let palette = &self.palette;
        let spinner_frame = self.spinner_frame;
        self.terminal
            .draw(|frame| render_layout(frame, state, bindings, palette, spinner_frame))?;
        Ok(())
    }

    // ===== Test Accessors =====

    /// Create TuiApp with injected collaborators (test-only constructor)
    #[cfg(test)]
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        api: Arc<dyn ListingsApi>,
        location: Box<dyn LocationProvider + Send>,
    ) -> Self {
        Self::with_parts(
            terminal,
            app_state,
            api,
            location,
            KeyBindings::default(),
            Palette::with_color_config(ColorConfig::disabled()),
        )
    }

    #[cfg(test)]
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    #[cfg(test)]
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    #[cfg(test)]
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Block until every in-flight request has completed, then apply them.
    #[cfg(test)]
    pub(crate) fn settle_fetches_test(&mut self) {
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while !self.in_flight.is_empty() && std::time::Instant::now() < deadline {
            self.poll_fetches();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[cfg(test)]
    pub(crate) fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    #[cfg(test)]
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    #[cfg(test)]
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Startup options that come from the command line rather than config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Submit the initial search text immediately.
    pub search_on_start: bool,
    pub colors_disabled: bool,
}

/// Initialize and run the TUI application
///
/// Restores the terminal even when the event loop fails.
pub fn run(config: &ResolvedConfig, options: LaunchOptions) -> Result<(), TuiError> {
    let colors = ColorConfig::from_env_and_args(options.colors_disabled);
    let mut app = TuiApp::new(config, colors)?;

    if options.search_on_start {
        app.submit_initial_search();
    }

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SearchResponse;
    use crate::location::{Coordinates, FixedLocation, NoLocation};
    use crate::model::Listing;
    use crate::state::{Screen, SearchPhase};
    use ratatui::backend::TestBackend;
    use serde_json::json;

    /// Answers every request with the same canned result.
    struct CannedApi(Result<SearchResponse, FetchError>);

    impl ListingsApi for CannedApi {
        fn fetch(&self, _url: &str) -> Result<SearchResponse, FetchError> {
            self.0.clone()
        }
    }

    fn success(count: usize) -> SearchResponse {
        SearchResponse {
            application_response_code: Some(json!("100")),
            listings: (0..count)
                .map(|i| Listing {
                    title: format!("Listing {i}"),
                    price_formatted: format!("£{i}00,000 GBP"),
                    img_url: format!("http://img.example/{i}.jpg"),
                    ..Listing::default()
                })
                .collect(),
            ..SearchResponse::default()
        }
    }

    fn create_test_app(result: Result<SearchResponse, FetchError>) -> TuiApp<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        TuiApp::new_for_test(
            terminal,
            AppState::default(),
            Arc::new(CannedApi(result)),
            Box::new(NoLocation),
        )
    }

    fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
        app.handle_key_test(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn draw_renders_without_error() {
        let mut app = create_test_app(Ok(success(1)));
        assert!(app.render_test().is_ok(), "Drawing should succeed");
    }

    #[test]
    fn typing_edits_search_text() {
        let mut app = create_test_app(Ok(success(1)));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.app_state().form.search_text(), "londons");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.app_state().form.search_text(), "london");
    }

    #[test]
    fn q_types_on_form_but_quits_on_list() {
        let mut app = create_test_app(Ok(success(2)));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.app_state().form.search_text(), "londonq");

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        app.settle_fetches_test();
        assert!(matches!(app.app_state().screen(), Screen::Results(_)));

        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn enter_starts_one_request_and_shows_results() {
        let mut app = create_test_app(Ok(success(3)));
        press(&mut app, KeyCode::Enter);
        assert!(app.app_state().form.is_loading());
        assert_eq!(app.in_flight_count(), 1);

        app.settle_fetches_test();

        assert_eq!(app.in_flight_count(), 0);
        assert!(!app.app_state().form.is_loading());
        match app.app_state().screen() {
            Screen::Results(list) => assert_eq!(list.len(), 3),
            other => panic!("Expected results screen, got {other:?}"),
        }
    }

    #[test]
    fn transport_error_stays_on_form_with_message() {
        let mut app = create_test_app(Err(FetchError::Status(503)));
        press(&mut app, KeyCode::Enter);
        app.settle_fetches_test();

        assert!(matches!(app.app_state().screen(), Screen::Search));
        assert_eq!(app.app_state().form.phase(), SearchPhase::Error);
        assert_eq!(
            app.app_state().form.message(),
            "Something bad happened: HTTP status 503"
        );
    }

    #[test]
    fn ctrl_l_without_location_reports_problem() {
        let mut app = create_test_app(Ok(success(1)));
        app.handle_key_test(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));

        assert_eq!(app.in_flight_count(), 0);
        assert!(app
            .app_state()
            .form
            .message()
            .starts_with("There was a problem with obtaining your location"));
    }

    #[test]
    fn ctrl_l_with_location_searches_centre_point() {
        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = TuiApp::new_for_test(
            terminal,
            AppState::default(),
            Arc::new(CannedApi(Ok(success(1)))),
            Box::new(FixedLocation(Coordinates::new(51.5, -0.12).unwrap())),
        );

        app.handle_key_test(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));

        assert_eq!(app.app_state().form.search_text(), "51.5,-0.12");
        assert_eq!(app.in_flight_count(), 1);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = create_test_app(Ok(success(1)));
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key_test(key);
        assert_eq!(app.app_state().form.search_text(), "london");
    }

    #[test]
    fn mouse_wheel_moves_selection() {
        let mut app = create_test_app(Ok(success(3)));
        press(&mut app, KeyCode::Enter);
        app.settle_fetches_test();

        app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });

        match app.app_state().screen() {
            Screen::Results(list) => assert_eq!(list.selected(), Some(1)),
            other => panic!("Expected results screen, got {other:?}"),
        }
    }

    #[test]
    fn mouse_wheel_on_search_form_changes_nothing() {
        let mut app = create_test_app(Ok(success(3)));

        app.handle_mouse_test(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });

        assert!(matches!(app.app_state().screen(), Screen::Search));
        assert_eq!(app.in_flight_count(), 0);
        assert_eq!(app.app_state().form.search_text(), "london");
    }

    #[test]
    fn launch_options_default_is_interactive() {
        let options = LaunchOptions::default();
        assert!(!options.search_on_start);
        assert!(!options.colors_disabled);
    }
}
