//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod navigation;
pub mod result_list;
pub mod search_form;
pub mod text_input;

// Re-export for convenience
pub use app_state::{AppState, KeyContext};
pub use navigation::{Navigator, Route, Screen};
pub use result_list::ResultListState;
pub use search_form::{SearchForm, SearchPhase, SearchResults};
pub use text_input::TextInput;
