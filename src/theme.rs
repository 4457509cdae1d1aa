//! Banner colors, resolved from the `[theme]` config table

use ratatui::style::Color;

use crate::config::ThemeColors;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,    // Name, badge dot, key hints
    pub text: Color,      // Typed role line
    pub text_dim: Color,  // Tagline, footer
    pub caret: Color,     // Caret after the typed text
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired fallback
        Self {
            accent: Color::Rgb(250, 179, 135),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            caret: Color::Rgb(245, 194, 231),
        }
    }
}

impl Theme {
    /// Build a theme from config overrides; unset or malformed entries keep defaults
    pub fn from_config(colors: &ThemeColors) -> Self {
        let defaults = Self::default();
        let pick = |value: &Option<String>, fallback: Color| {
            match value.as_deref() {
                Some(hex) => Self::parse_hex_color(hex).unwrap_or_else(|| {
                    tracing::warn!("Ignoring invalid theme color: {}", hex);
                    fallback
                }),
                None => fallback,
            }
        };

        Self {
            accent: pick(&colors.accent, defaults.accent),
            text: pick(&colors.text, defaults.text),
            text_dim: pick(&colors.text_dim, defaults.text_dim),
            caret: pick(&colors.caret, defaults.caret),
        }
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12345"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
        assert_eq!(Theme::parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_from_config_keeps_defaults_for_bad_values() {
        let colors = ThemeColors {
            accent: Some("#000".to_string()),
            caret: Some("not-a-color".to_string()),
            ..Default::default()
        };
        let theme = Theme::from_config(&colors);

        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.caret, Theme::default().caret);
        assert_eq!(theme.text, Theme::default().text);
    }
}
