//! Color theme and glyphs for the CTF terminal.
//!
//! A green-on-black terminal palette by default, with an optional
//! high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use ctf_types::ui::UiOptions;

mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(13, 17, 13);
    pub const BG_BORDER: Color = Color::Rgb(46, 74, 46);

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(190, 230, 190);
    pub const TEXT_SECONDARY: Color = Color::Rgb(140, 180, 140);
    pub const TEXT_MUTED: Color = Color::Rgb(90, 115, 90);

    // === Accents ===
    pub const PROMPT: Color = Color::Rgb(80, 250, 123);
    pub const CYAN: Color = Color::Rgb(139, 233, 253);
    pub const YELLOW: Color = Color::Rgb(241, 250, 140);
    pub const RED: Color = Color::Rgb(255, 85, 85);
    pub const MAGENTA: Color = Color::Rgb(255, 121, 198);

    // === Semantic Aliases ===
    pub const ACCENT: Color = CYAN;
    pub const SUCCESS: Color = PROMPT;
    pub const WARNING: Color = YELLOW;
    pub const ERROR: Color = RED;
    pub const FLAG: Color = MAGENTA;
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub prompt: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub flag: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            prompt: colors::PROMPT,
            accent: colors::ACCENT,
            success: colors::SUCCESS,
            warning: colors::WARNING,
            error: colors::ERROR,
            flag: colors::FLAG,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::Gray,
            prompt: Color::Green,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            flag: Color::Magenta,
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for prompts, separators and the scrollbar.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub prompt: &'static str,
    pub separator: &'static str,
    pub solved: &'static str,
    pub locked: &'static str,
    pub arrow_up: &'static str,
    pub arrow_down: &'static str,
    pub track: &'static str,
    pub thumb: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            prompt: ">",
            separator: "|",
            solved: "+",
            locked: "-",
            arrow_up: "^",
            arrow_down: "v",
            track: "|",
            thumb: "#",
        }
    } else {
        Glyphs {
            prompt: "❯",
            separator: "│",
            solved: "■",
            locked: "□",
            arrow_up: "↑",
            arrow_down: "↓",
            track: "│",
            thumb: "█",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn prompt(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.prompt)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn input_echo(palette: &Palette) -> Style {
        Style::default().fg(palette.text_primary)
    }

    #[must_use]
    pub fn border(palette: &Palette) -> Style {
        Style::default().fg(palette.bg_border)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn flag(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.flag)
            .add_modifier(Modifier::BOLD)
    }
}
