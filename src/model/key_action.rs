//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
///
/// Text entry on the search form is not an action: printable characters are
/// routed straight into the form's text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Search form
    /// Submit the current search text as a place-name search. Default: Enter
    SubmitSearch,
    /// Search around the current device location. Default: Ctrl+l
    SearchByLocation,
    /// Delete the character before the cursor. Default: Backspace
    DeleteBack,
    /// Move the text cursor left. Default: ←
    CursorLeft,
    /// Move the text cursor right. Default: →
    CursorRight,
    /// Move the text cursor to the start of the input. Default: Home/Ctrl+a
    CursorHome,
    /// Move the text cursor to the end of the input. Default: End/Ctrl+e
    CursorEnd,

    // Result list
    /// Select the previous row. Default: k/↑
    SelectPrev,
    /// Select the next row. Default: j/↓
    SelectNext,
    /// Select the first row. Default: g/Home
    SelectFirst,
    /// Select the last row. Default: G/End
    SelectLast,
    /// Open the selected row in the detail view. Default: Enter/l/→
    OpenSelected,

    // Navigation
    /// Pop the current screen. Default: Esc/Backspace/h/←
    Back,

    // Application
    /// Toggle the help overlay. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Short label used in the footer hint bar.
    pub fn label(self) -> &'static str {
        match self {
            KeyAction::SubmitSearch => "Go",
            KeyAction::SearchByLocation => "Location",
            KeyAction::DeleteBack => "Delete",
            KeyAction::CursorLeft => "Left",
            KeyAction::CursorRight => "Right",
            KeyAction::CursorHome => "Home",
            KeyAction::CursorEnd => "End",
            KeyAction::SelectPrev => "Up",
            KeyAction::SelectNext => "Down",
            KeyAction::SelectFirst => "Top",
            KeyAction::SelectLast => "Bottom",
            KeyAction::OpenSelected => "Open",
            KeyAction::Back => "Back",
            KeyAction::Help => "Help",
            KeyAction::Quit => "Quit",
        }
    }
}
