//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for all layout-related numeric values to enable
//! consistent tuning across the application.

/// Height of the title bar in lines.
///
/// Shows the breadcrumb of screen titles from the navigation stack.
pub const TITLE_BAR_HEIGHT: u16 = 1;

/// Height of the footer in lines.
///
/// Single line of keyboard hints for the current screen.
pub const FOOTER_HEIGHT: u16 = 1;

/// Height of the search text box (border + content).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Width of the search text box including its border.
///
/// The box shrinks to the available width on narrow terminals.
pub const SEARCH_INPUT_WIDTH: u16 = 48;

/// Poll interval for terminal events. Also drives the spinner.
pub const TICK_INTERVAL_MS: u64 = 100;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Braille spinner frames shown while a search is in flight.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
