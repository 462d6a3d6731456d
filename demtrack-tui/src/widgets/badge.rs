//! Colored status badge.

use crate::theme::{status_badge_bg, status_badge_fg, ClaroTheme};
use ratatui::style::Style;
use ratatui::text::Span;

/// A status name over its configured background color, with the
/// foreground picked for contrast.
pub fn status_badge(nome: &str, cor: &str, theme: &ClaroTheme) -> Span<'static> {
    Span::styled(
        format!(" {} ", nome),
        Style::default()
            .bg(status_badge_bg(cor, theme))
            .fg(status_badge_fg(cor)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn badge_pads_the_label() {
        let theme = ClaroTheme::claro();
        let span = status_badge("Aberto", "#4CAF50", &theme);
        assert_eq!(span.content.as_ref(), " Aberto ");
    }

    #[test]
    fn badge_uses_configured_background() {
        let theme = ClaroTheme::claro();
        let span = status_badge("Aberto", "#FF0000", &theme);
        assert_eq!(span.style.bg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(span.style.fg, Some(Color::Rgb(255, 255, 255)));
    }
}
