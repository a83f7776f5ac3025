use crate::color::Color;
use crate::config::types::Theme;

/// Detected terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

impl Background {
    /// Detect whether the terminal has a dark or light background.
    ///
    /// Heuristic: check `COLORFGBG` (format "fg;bg"), fall back to dark.
    pub fn detect() -> Self {
        std::env::var("COLORFGBG")
            .ok()
            .map_or(Background::Dark, |v| Self::from_colorfgbg(&v))
    }

    fn from_colorfgbg(val: &str) -> Self {
        if let Some(bg) = val.rsplit(';').next()
            && let Ok(n) = bg.parse::<u8>()
            // ANSI colors 0-6 and 8 are dark.
            && n > 6
            && n != 8
        {
            return Background::Light;
        }
        Background::Dark
    }
}

/// A fully resolved theme: every color slot has a concrete `Color` value
/// (either from user config or from defaults for the detected background).
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_inverted: Color,
    pub text_faint: Color,
    pub text_warning: Color,
    pub text_success: Color,
    pub text_error: Color,
    pub text_link: Color,
    pub bg_selected: Color,
    pub border_primary: Color,
    pub border_faint: Color,
}

impl ResolvedTheme {
    /// Build a resolved theme from user config and detected background.
    pub fn resolve(theme: &Theme, bg: Background) -> Self {
        let d = Self::for_background(bg);
        let text = &theme.colors.text;
        Self {
            text_primary: text.primary.unwrap_or(d.text_primary),
            text_secondary: text.secondary.unwrap_or(d.text_secondary),
            text_inverted: text.inverted.unwrap_or(d.text_inverted),
            text_faint: text.faint.unwrap_or(d.text_faint),
            text_warning: text.warning.unwrap_or(d.text_warning),
            text_success: text.success.unwrap_or(d.text_success),
            text_error: text.error.unwrap_or(d.text_error),
            text_link: text.link.unwrap_or(d.text_link),
            bg_selected: theme.colors.background.selected.unwrap_or(d.bg_selected),
            border_primary: theme.colors.border.primary.unwrap_or(d.border_primary),
            border_faint: theme.colors.border.faint.unwrap_or(d.border_faint),
        }
    }

    fn for_background(bg: Background) -> Self {
        match bg {
            Background::Dark => Self {
                text_primary: Color::Ansi256(7),
                text_secondary: Color::Ansi256(245),
                text_inverted: Color::Ansi256(0),
                text_faint: Color::Ansi256(243),
                text_warning: Color::Ansi256(11),
                text_success: Color::Ansi256(10),
                text_error: Color::Ansi256(1),
                text_link: Color::Ansi256(12),
                bg_selected: Color::Ansi256(237),
                border_primary: Color::Ansi256(244),
                border_faint: Color::Ansi256(241),
            },
            Background::Light => Self {
                text_primary: Color::Ansi256(0),
                text_secondary: Color::Ansi256(240),
                text_inverted: Color::Ansi256(15),
                text_faint: Color::Ansi256(248),
                text_warning: Color::Ansi256(3),
                text_success: Color::Ansi256(2),
                text_error: Color::Ansi256(1),
                text_link: Color::Ansi256(4),
                bg_selected: Color::Ansi256(254),
                border_primary: Color::Ansi256(240),
                border_faint: Color::Ansi256(252),
            },
        }
    }
}
