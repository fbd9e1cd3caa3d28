//! Color palettes and ANSI escape sequence generation.
//!
//! Two built-in palettes, `light` and `dark`, are compiled into the plugin from
//! `themes/*.toml`. Either one can be replaced by a TOML file of the same
//! shape through the `light_theme_file` / `dark_theme_file` options.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-dark"
//!
//! [colors]
//! header_fg = "#ecf0f1"
//! header_bg = "#2d2d2d"        # optional
//! selection_fg = "#1a1a1a"
//! selection_bg = "#3498db"
//! text_normal = "#ecf0f1"
//! text_dim = "#bdc3c7"
//! text_faint = "#95a5a6"
//! border = "#3d3d3d"
//! accent = "#3498db"
//! search_bar_border = "#3498db"
//! match_highlight_fg = "#1a1a1a"
//! match_highlight_bg = "#f39c12"
//! empty_state_fg = "#3498db"
//! badge_fg = "#ffffff"
//! error_fg = "#e74c3c"
//! success_fg = "#2ecc71"
//! warning_fg = "#f39c12"
//! ```
//!
//! Tier badge colors are not part of the palette; they come from
//! [`color_for_tier`](crate::domain::classifier::color_for_tier) in both modes.

use crate::domain::error::{Result, TierdexError};
use crate::repository::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`"#rrggbb"`) for every UI element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text: anime names, footer, counters.
    pub text_dim: String,
    /// Tertiary text: placeholders, timestamps.
    pub text_faint: String,

    pub border: String,
    /// Focused field, active page, spinner.
    pub accent: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Text drawn on top of a tier color.
    pub badge_fg: String,

    pub error_fg: String,
    pub success_fg: String,
    pub warning_fg: String,
}

impl Theme {
    /// Loads a built-in palette by name (`light` or `dark`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use tierdex::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::from_name("dark").map(|t| t.name), Some("dark".to_string()));
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "light" => include_str!("../../themes/light.toml"),
            "dark" => include_str!("../../themes/dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TierdexError::Theme`] if the file cannot be read or is not a
    /// complete palette.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TierdexError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| TierdexError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground escape for a hex color.
    ///
    /// ```rust
    /// use tierdex::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#3498db"), "\u{1b}[38;2;52;152;219m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The built-in light palette.
    ///
    /// # Panics
    ///
    /// Panics if the built-in palette fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("light").expect("Built-in light theme should always parse")
    }
}

/// The light and dark palettes the toggle switches between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palettes {
    light: Theme,
    dark: Theme,
}

impl Palettes {
    /// Built-in palettes, each optionally replaced by a TOML file. A file
    /// that fails to load is logged and the built-in palette is kept.
    #[must_use]
    pub fn load(light_file: Option<&str>, dark_file: Option<&str>) -> Self {
        let pick = |file: Option<&str>, builtin: &str| {
            let fallback = || Theme::from_name(builtin).unwrap_or_default();
            file.map_or_else(fallback, |path| {
                Theme::from_file(path).unwrap_or_else(|e| {
                    tracing::warn!(theme_file = %path, error = %e, "failed to load theme file, using built-in");
                    fallback()
                })
            })
        };

        Self {
            light: pick(light_file, "light"),
            dark: pick(dark_file, "dark"),
        }
    }

    #[must_use]
    pub const fn get(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self::load(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_palettes_parse() {
        let palettes = Palettes::default();
        assert_eq!(palettes.get(ThemeMode::Light).name, "light");
        assert_eq!(palettes.get(ThemeMode::Dark).name, "dark");
        assert!(palettes.get(ThemeMode::Dark).colors.header_bg.is_some());
    }

    #[test]
    fn bad_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("#zz"), "\u{1b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("not-a-color"), "\u{1b}[48;2;255;255;255m");
    }

    #[test]
    fn file_overrides_one_mode() {
        let mut dark = Theme::from_name("dark").unwrap();
        dark.name = "midnight".into();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml::to_string(&dark).unwrap().as_bytes()).unwrap();

        let path = file.path().to_string_lossy().to_string();
        let palettes = Palettes::load(None, Some(&path));
        assert_eq!(palettes.get(ThemeMode::Dark).name, "midnight");
        assert_eq!(palettes.get(ThemeMode::Light).name, "light");
    }

    #[test]
    fn unreadable_file_keeps_builtin() {
        let palettes = Palettes::load(Some("/nonexistent/theme.toml"), None);
        assert_eq!(palettes.get(ThemeMode::Light).name, "light");
        assert!(Theme::from_file("/nonexistent/theme.toml").is_err());
    }
}
