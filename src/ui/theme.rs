//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::hero::HeroStage;

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page blocks ────────────────────────────────────────────
    pub fn banner_style() -> Style {
        Style::default().bg(Color::Green).fg(Color::Black)
    }

    pub fn hero_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::DarkGray)
    }

    /// Parallax glyph colour per layer, far to near.
    pub fn layer_style(layer: usize) -> Style {
        let fg = match layer {
            0 => Color::DarkGray,
            1 => Color::Blue,
            2 => Color::Cyan,
            _ => Color::White,
        };
        Style::default().bg(Color::Black).fg(fg)
    }

    pub fn headline_style(stage: HeroStage) -> Style {
        let fg = match stage {
            HeroStage::Intro => Color::White,
            HeroStage::Pitch => Color::Yellow,
            HeroStage::Success => Color::Green,
        };
        Style::default()
            .bg(Color::Black)
            .fg(fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn discover_style() -> Style {
        Style::default()
            .bg(Color::Black)
            .fg(Color::Green)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn intro_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn section_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_style() -> Style {
        Style::default().fg(Color::Magenta)
    }

    pub fn card_hidden_style() -> Style {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }

    pub fn footer_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::Gray)
    }

    // ── tab bar ────────────────────────────────────────────────
    pub fn tab_bar_style(docked: bool) -> Style {
        if docked {
            Style::default().bg(Color::White).fg(Color::Black)
        } else {
            Style::default().bg(Color::Reset).fg(Color::White)
        }
    }

    pub fn tab_active_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn indicator_style() -> Style {
        Style::default().fg(Color::Green)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn value_style() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn locked_style() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
