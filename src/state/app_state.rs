//! Application state and transitions.
//!
//! AppState is the root state type containing all UI state. Transitions are
//! plain methods with no I/O, following the Elm architecture: the shell turns
//! terminal events into actions, applies them here, and performs whatever
//! [`FetchRequest`] comes back.

use crate::api::{FetchOutcome, FetchRequest};
use crate::location::LocationProvider;
use crate::model::KeyAction;
use crate::state::navigation::{Navigator, Screen};
use crate::state::search_form::SearchForm;
use tracing::debug;

/// Which key map applies, derived from the top screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Search form: printable keys edit the search text.
    Form,
    /// Result list.
    List,
    /// Property detail.
    Detail,
}

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// - **Screen**: Search ⇄ Results ⇄ Detail via the navigation stack
/// - **Search**: Idle → Loading → ResultsReady | Error (see [`SearchForm`])
/// - **Help**: overlay toggled on top of any screen
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search form; owned here for the whole session and never reset by navigation.
    pub form: SearchForm,

    /// Screen stack. The root is always the search form.
    pub navigator: Navigator,

    /// Whether the help overlay is shown.
    pub help_visible: bool,

    should_quit: bool,
}

impl AppState {
    pub fn new(form: SearchForm) -> Self {
        Self {
            form,
            navigator: Navigator::new(),
            help_visible: false,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.navigator.current().screen
    }

    pub fn context(&self) -> KeyContext {
        match self.screen() {
            Screen::Search => KeyContext::Form,
            Screen::Results(_) => KeyContext::List,
            Screen::Detail(_) => KeyContext::Detail,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply a key action.
    ///
    /// Returns a request for the shell to issue when the action starts a
    /// search.
    pub fn handle_action(
        &mut self,
        action: KeyAction,
        location: &dyn LocationProvider,
    ) -> Option<FetchRequest> {
        if self.help_visible {
            match action {
                KeyAction::Help | KeyAction::Back => self.help_visible = false,
                KeyAction::Quit => self.should_quit = true,
                _ => {}
            }
            return None;
        }

        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Help => self.help_visible = true,
            KeyAction::Back => {
                if self.navigator.pop().is_none() {
                    self.should_quit = true;
                }
            }
            KeyAction::SubmitSearch => {
                if self.context() == KeyContext::Form {
                    return Some(self.form.on_search_submitted());
                }
            }
            KeyAction::SearchByLocation => {
                if self.context() == KeyContext::Form {
                    return self.form.on_location_requested(location);
                }
            }
            KeyAction::DeleteBack
            | KeyAction::CursorLeft
            | KeyAction::CursorRight
            | KeyAction::CursorHome
            | KeyAction::CursorEnd => self.edit_text(action),
            KeyAction::SelectPrev
            | KeyAction::SelectNext
            | KeyAction::SelectFirst
            | KeyAction::SelectLast => self.move_selection(action),
            KeyAction::OpenSelected => self.open_selected(),
        }

        None
    }

    /// Type a character into the search text. Ignored off the search form.
    pub fn handle_char(&mut self, ch: char) {
        if self.context() == KeyContext::Form && !self.help_visible {
            self.form.insert_char(ch);
        }
    }

    fn edit_text(&mut self, action: KeyAction) {
        if self.context() != KeyContext::Form {
            return;
        }
        match action {
            KeyAction::DeleteBack => self.form.backspace(),
            KeyAction::CursorLeft => self.form.cursor_left(),
            KeyAction::CursorRight => self.form.cursor_right(),
            KeyAction::CursorHome => self.form.cursor_home(),
            KeyAction::CursorEnd => self.form.cursor_end(),
            _ => {}
        }
    }

    fn move_selection(&mut self, action: KeyAction) {
        if let Screen::Results(list) = &mut self.navigator.current_mut().screen {
            match action {
                KeyAction::SelectPrev => list.select_prev(),
                KeyAction::SelectNext => list.select_next(),
                KeyAction::SelectFirst => list.select_first(),
                KeyAction::SelectLast => list.select_last(),
                _ => {}
            }
        }
    }

    fn open_selected(&mut self) {
        let selected = match self.screen() {
            Screen::Results(list) => list.selected(),
            _ => None,
        };
        if let Some(index) = selected {
            self.open_row(index);
        }
    }

    /// Open row `index` of the current result list in the detail screen.
    ///
    /// Returns false when not on a result list or the index is out of range.
    pub fn open_row(&mut self, index: usize) -> bool {
        let listing = match &mut self.navigator.current_mut().screen {
            Screen::Results(list) => {
                if !list.select(index) {
                    return false;
                }
                list.open_selected()
            }
            _ => None,
        };

        match listing {
            Some(listing) => {
                debug!(row = index, key = listing.row_key(), "Opening listing");
                self.navigator.show_detail(listing);
                true
            }
            None => false,
        }
    }

    /// Apply a finished request; pushes the result list on success.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if let Some(results) = self.form.on_outcome(outcome) {
            self.navigator
                .show_results(results.listings, results.total_results);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchForm::default())
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
