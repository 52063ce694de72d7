//! Color palette for the property screens.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Accent blue used for buttons, prices and borders.
const ACCENT: Color = Color::Rgb(0x48, 0xBB, 0xEC);

/// Grey used for descriptive text.
const MUTED: Color = Color::Rgb(0x65, 0x65, 0x65);

/// Styles shared by every screen.
///
/// With colors disabled every style keeps only its modifiers, so the layout
/// stays readable on monochrome terminals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub accent: Style,
    pub muted: Style,
    pub price: Style,
    pub title: Style,
    pub selected: Style,
    pub message: Style,
    pub key_hint: Style,
    pub border: Style,
    pub cursor: Style,
}

impl Palette {
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                accent: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                muted: Style::default().fg(MUTED),
                price: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                title: Style::default().fg(Color::White),
                selected: Style::default().bg(Color::DarkGray),
                message: Style::default().fg(Color::Red),
                key_hint: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                border: Style::default().fg(ACCENT),
                cursor: Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            }
        } else {
            Self {
                accent: Style::default().add_modifier(Modifier::BOLD),
                muted: Style::default(),
                price: Style::default().add_modifier(Modifier::BOLD),
                title: Style::default(),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                message: Style::default(),
                key_hint: Style::default().add_modifier(Modifier::BOLD),
                border: Style::default(),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
