//! Claro theme and color utilities.

use crate::notifications::NotificationLevel;
use demtrack_core::color::{contrast_foreground, parse_hex_color, Foreground};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct ClaroTheme {
    pub bg: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl ClaroTheme {
    pub fn claro() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 24),
            bg_secondary: Color::Rgb(30, 30, 38),
            bg_highlight: Color::Rgb(48, 48, 60),
            primary: Color::Rgb(63, 81, 181),
            primary_dim: Color::Rgb(40, 53, 147),
            accent: Color::Rgb(255, 64, 129),
            success: Color::Rgb(76, 175, 80),
            warning: Color::Rgb(255, 152, 0),
            error: Color::Rgb(244, 67, 54),
            info: Color::Rgb(33, 150, 243),
            text: Color::Rgb(238, 238, 238),
            text_dim: Color::Rgb(158, 158, 158),
            text_muted: Color::Rgb(97, 97, 97),
            border: Color::Rgb(66, 66, 66),
            border_focus: Color::Rgb(63, 81, 181),
        }
    }
}

/// Background color for a status badge, from the stored hex value.
pub fn status_badge_bg(cor: &str, theme: &ClaroTheme) -> Color {
    match parse_hex_color(cor) {
        Ok((r, g, b)) => Color::Rgb(r, g, b),
        Err(_) => theme.bg_highlight,
    }
}

/// Foreground color for a status badge, chosen for contrast against `cor`.
pub fn status_badge_fg(cor: &str) -> Color {
    match contrast_foreground(cor) {
        Foreground::Black => Color::Rgb(0, 0, 0),
        Foreground::White => Color::Rgb(255, 255, 255),
    }
}

pub fn notification_color(level: NotificationLevel, theme: &ClaroTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.info,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
        NotificationLevel::Success => theme.success,
    }
}

/// Color for a solução's progress percentage.
pub fn andamento_color(percent: u8, theme: &ClaroTheme) -> Color {
    if percent >= 100 {
        theme.success
    } else if percent >= 50 {
        theme.info
    } else {
        theme.warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_bg_parses_hex() {
        let theme = ClaroTheme::claro();
        assert_eq!(
            status_badge_bg("#FF0000", &theme),
            Color::Rgb(255, 0, 0)
        );
    }

    #[test]
    fn badge_bg_falls_back_on_garbage() {
        let theme = ClaroTheme::claro();
        assert_eq!(status_badge_bg("vermelho", &theme), theme.bg_highlight);
    }

    #[test]
    fn badge_fg_contrasts() {
        assert_eq!(status_badge_fg("#FFFFFF"), Color::Rgb(0, 0, 0));
        assert_eq!(status_badge_fg("#000000"), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn andamento_thresholds() {
        let theme = ClaroTheme::claro();
        assert_eq!(andamento_color(100, &theme), theme.success);
        assert_eq!(andamento_color(50, &theme), theme.info);
        assert_eq!(andamento_color(10, &theme), theme.warning);
    }
}
