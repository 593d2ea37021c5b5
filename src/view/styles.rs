//! Card styling configuration.
//!
//! Provides distinct styles for the parts of a timeline card (time label,
//! title, location, participants, body, gutter).

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

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== CardStyles =====

/// Styles for every visual part of a card.
///
/// With colors disabled, only modifiers (bold, underline, dim) remain so
/// cards stay distinguishable from raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyles {
    /// `NN:NN` label.
    pub time: Style,
    /// Card title.
    pub title: Style,
    /// Location text after the title.
    pub location: Style,
    /// Each participant name.
    pub participant: Style,
    /// Body lines.
    pub body: Style,
    /// Left gutter of an unfocused card.
    pub gutter: Style,
    /// Left gutter of the focused card.
    pub focused_gutter: Style,
    /// Empty-note prompt.
    pub placeholder: Style,
}

impl CardStyles {
    /// Create styles with the default color scheme.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Create styles with specified color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                time: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                location: Style::default().fg(Color::Gray),
                participant: Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::UNDERLINED),
                body: Style::default(),
                gutter: Style::default().fg(Color::DarkGray),
                focused_gutter: Style::default().fg(Color::Magenta),
                placeholder: Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            }
        } else {
            Self {
                time: Style::default().add_modifier(Modifier::BOLD),
                title: Style::default().add_modifier(Modifier::BOLD),
                location: Style::default(),
                participant: Style::default().add_modifier(Modifier::UNDERLINED),
                body: Style::default(),
                gutter: Style::default(),
                focused_gutter: Style::default().add_modifier(Modifier::REVERSED),
                placeholder: Style::default().add_modifier(Modifier::DIM),
            }
        }
    }
}

impl Default for CardStyles {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====
