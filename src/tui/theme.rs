//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::scoring::Tier;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Footprint tiers (traffic light pattern)
    pub tier_eco: Color,
    pub tier_moderate: Color,
    pub tier_high: Color,

    // Charts
    pub rain_bar: Color,
    pub air_bar: Color,
    pub bar_value: Color,

    // Panels
    pub border: Color,
    pub border_focused: Color,
    pub title_style: Style,
    pub option_cursor: Style,
    pub option_selected: Color,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub highlight: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            tier_eco: Color::Green,
            tier_moderate: Color::Yellow,
            tier_high: Color::Red,
            rain_bar: Color::Rgb(0, 86, 179),
            air_bar: Color::Rgb(220, 53, 69),
            bar_value: Color::White,
            border: Color::Indexed(238),
            border_focused: Color::Cyan,
            title_style: Style::new().fg(Color::Cyan).bold(),
            option_cursor: Style::new().reversed(),
            option_selected: Color::Green,
            muted: Color::Gray,
            title_color: Color::Cyan,
            highlight: Color::White,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_bg: Color::Indexed(234),
        }
    }

    pub fn light() -> Self {
        Self {
            tier_eco: Color::Rgb(40, 167, 69),
            tier_moderate: Color::Rgb(211, 158, 0),
            tier_high: Color::Rgb(220, 53, 69),
            rain_bar: Color::Rgb(0, 86, 179),
            air_bar: Color::Rgb(220, 53, 69),
            bar_value: Color::Black,
            border: Color::Indexed(250),
            border_focused: Color::Blue,
            title_style: Style::new().fg(Color::Blue).bold(),
            option_cursor: Style::new().reversed(),
            option_selected: Color::Rgb(40, 167, 69),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            highlight: Color::Black,
            status_bar_bg: Color::Indexed(254),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(40, 167, 69),
            flash_error: Color::Red,
            popup_border: Color::Blue,
            popup_bg: Color::Indexed(255),
        }
    }

    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Eco => self.tier_eco,
            Tier::Moderate => self.tier_moderate,
            Tier::High => self.tier_high,
        }
    }
}

/// Pick a palette. `Auto` asks the terminal for its background luma and
/// falls back to dark when the terminal does not answer.
///
/// Must run before the TUI takes over the terminal.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!("Could not detect terminal background: {}", e);
                ThemeColors::dark()
            }
        },
    }
}
