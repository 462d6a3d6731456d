//! Badge color utilities.
//!
//! Status badges use a server-supplied background color; the foreground
//! is picked by relative luminance so the label stays readable on any
//! background.

use crate::error::CoreError;

/// Foreground color choice for text rendered over a colored badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foreground {
    Black,
    White,
}

/// Parse a `#RRGGBB` or `#RGB` hex color into RGB components.
pub fn parse_hex_color(value: &str) -> Result<(u8, u8, u8), CoreError> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    // Byte-index slicing below requires single-byte chars.
    if !digits.is_ascii() {
        return Err(CoreError::InvalidColor {
            value: value.to_string(),
            reason: "non-ASCII characters".to_string(),
        });
    }
    let expand = |c: u8| (c << 4) | c;
    match digits.len() {
        6 => {
            let parse_pair = |s: &str| {
                u8::from_str_radix(s, 16).map_err(|e| CoreError::InvalidColor {
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            };
            Ok((
                parse_pair(&digits[0..2])?,
                parse_pair(&digits[2..4])?,
                parse_pair(&digits[4..6])?,
            ))
        }
        3 => {
            let parse_one = |s: &str| {
                u8::from_str_radix(s, 16).map_err(|e| CoreError::InvalidColor {
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            };
            Ok((
                expand(parse_one(&digits[0..1])?),
                expand(parse_one(&digits[1..2])?),
                expand(parse_one(&digits[2..3])?),
            ))
        }
        len => Err(CoreError::InvalidColor {
            value: value.to_string(),
            reason: format!("expected 3 or 6 hex digits, got {}", len),
        }),
    }
}

/// WCAG relative luminance of an sRGB color, in `[0.0, 1.0]`.
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn linearize(channel: u8) -> f64 {
        let c = channel as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

/// Pick black or white text for the given badge background color.
///
/// Unparseable colors fall back to white text; the badge renderer must
/// never fail over a bad server value.
pub fn contrast_foreground(cor: &str) -> Foreground {
    match parse_hex_color(cor) {
        Ok((r, g, b)) => {
            if relative_luminance(r, g, b) > 0.5 {
                Foreground::Black
            } else {
                Foreground::White
            }
        }
        Err(_) => Foreground::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_contrast_is_total(s in ".*") {
            let _ = contrast_foreground(&s);
        }
    }

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(parse_hex_color("#FFB300").unwrap(), (255, 179, 0));
        assert_eq!(parse_hex_color("ffb300").unwrap(), (255, 179, 0));
        assert_eq!(parse_hex_color("#fff").unwrap(), (255, 255, 255));
        assert_eq!(parse_hex_color("#000").unwrap(), (0, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn luminance_bounds() {
        assert!(relative_luminance(0, 0, 0) < 1e-9);
        assert!((relative_luminance(255, 255, 255) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn light_backgrounds_get_black_text() {
        assert_eq!(contrast_foreground("#FFFFFF"), Foreground::Black);
        assert_eq!(contrast_foreground("#FFEB3B"), Foreground::Black);
    }

    #[test]
    fn dark_backgrounds_get_white_text() {
        assert_eq!(contrast_foreground("#000000"), Foreground::White);
        assert_eq!(contrast_foreground("#1A237E"), Foreground::White);
    }

    #[test]
    fn bad_color_falls_back_to_white() {
        assert_eq!(contrast_foreground("azul"), Foreground::White);
    }

    #[test]
    fn non_ascii_color_is_rejected_without_panicking() {
        // "€€" is 6 bytes, "€" is 3: both hit the length arms.
        assert!(parse_hex_color("€€").is_err());
        assert!(parse_hex_color("#€").is_err());
        assert_eq!(contrast_foreground("€€"), Foreground::White);
    }
}
