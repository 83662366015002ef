pub mod colors;

pub use colors::Color;

use crossterm::style::Stylize;
use powerbar_config::ThemeConfig;
use powerbar_core::ColorResolver;
use std::collections::HashMap;

/// Compiled theme derived from [`ThemeConfig`].
///
/// Maps symbolic color tags to parsed colors.  Calling
/// [`Theme::from_config`] is infallible: invalid color strings fall back to
/// the built-in palette.  Tags the theme doesn't know are drawn unstyled.
#[derive(Debug, Clone)]
pub struct Theme {
    enabled: bool,
    colors:  HashMap<String, Color>,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let defaults = ThemeConfig::default();
        let builtin = [
            ("text",    &cfg.text,    &defaults.text),
            ("accent",  &cfg.accent,  &defaults.accent),
            ("muted",   &cfg.muted,   &defaults.muted),
            ("dim",     &cfg.dim,     &defaults.dim),
            ("success", &cfg.success, &defaults.success),
            ("warning", &cfg.warning, &defaults.warning),
            ("error",   &cfg.error,   &defaults.error),
        ];

        let mut colors = HashMap::new();
        for (tag, value, fallback) in builtin {
            let color = Color::from_hex(value)
                .or_else(|| Color::from_hex(fallback))
                .unwrap_or(Color::TEXT);
            colors.insert(tag.to_string(), color);
        }
        for (tag, value) in &cfg.palette {
            match Color::from_hex(value) {
                Some(color) => {
                    colors.insert(tag.clone(), color);
                }
                None => tracing::warn!("ignoring invalid color '{value}' for tag '{tag}'"),
            }
        }

        Self {
            enabled: cfg.enabled,
            colors,
        }
    }

    /// Theme that never emits escape sequences.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            colors:  HashMap::new(),
        }
    }

    /// Turn styling off while keeping the palette.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn color(&self, tag: &str) -> Option<Color> {
        self.colors.get(tag).copied()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl ColorResolver for Theme {
    fn fg(&self, tag: &str, text: &str) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        match self.color(tag) {
            Some(color) => text.with(color.to_term()).to_string(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerbar_renderer::width::visible_width;

    #[test]
    fn known_tags_are_colored() {
        let theme = Theme::default();
        let styled = theme.fg("accent", "gpt-5");
        assert!(styled.contains("38;2;203;166;247"));
        assert!(styled.contains("gpt-5"));
        assert_eq!(visible_width(&styled), 5);
    }

    #[test]
    fn unknown_tags_pass_through() {
        assert_eq!(Theme::default().fg("chartreuse", "x"), "x");
    }

    #[test]
    fn disabled_theme_is_plain() {
        let theme = Theme::default().disabled();
        assert!(!theme.is_enabled());
        assert_eq!(theme.fg("error", "95%"), "95%");
        assert_eq!(Theme::plain().fg("error", "95%"), "95%");
    }

    #[test]
    fn invalid_colors_fall_back() {
        let mut cfg = ThemeConfig::default();
        cfg.muted = "not-a-color".into();
        cfg.palette.insert("git".into(), "#f00".into());
        cfg.palette.insert("broken".into(), "#xyz".into());

        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.color("muted"), Some(Color::MUTED));
        assert_eq!(theme.color("git"), Some(Color { r: 255, g: 0, b: 0 }));
        assert_eq!(theme.color("broken"), None);
    }
}
