//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── chart ──────────────────────────────────────────────────
    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn year_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn country_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn population_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    // ── navigation ─────────────────────────────────────────────
    pub fn button_style() -> Style {
        Style::default()
            .bg(Color::Rgb(0x3b, 0x82, 0xf6))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_disabled_style() -> Style {
        Style::default()
            .bg(Color::Rgb(0xd1, 0xd5, 0xdb))
            .fg(Color::Rgb(0x6b, 0x72, 0x80))
    }

    pub fn nav_year_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn error_style() -> Style {
        Style::default().bg(Color::Red).fg(Color::White)
    }
}
