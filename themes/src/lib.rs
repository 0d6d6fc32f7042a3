//! # Themes
//!
//! Color palettes shared by the kernel and every application.
//!
//! A palette is a plain value selected once at boot; components receive a
//! reference to it rather than reaching for a global.

use core_types::Rgb565;

/// Named color slots used by all drawing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Screen background
    pub bg: Rgb565,
    /// Key/tile surface
    pub panel_bg: Rgb565,
    /// Shadow under panels and keys
    pub panel_shadow: Rgb565,
    /// Primary text
    pub text_main: Rgb565,
    /// Secondary text
    pub text_muted: Rgb565,
    /// Active/confirm accent
    pub accent_primary: Rgb565,
    /// Attention accent
    pub accent_warn: Rgb565,
    /// Destructive/error accent
    pub accent_alert: Rgb565,
    /// Subtle outline
    pub border: Rgb565,
    /// Status/header strip background
    pub header_bg: Rgb565,
}

/// The built-in slate palette.
pub const SLATE_THEME: ThemePalette = ThemePalette {
    bg: Rgb565::new(0x1082),            // deep dark slate
    panel_bg: Rgb565::new(0x2124),      // lighter slate
    panel_shadow: Rgb565::new(0x0841),  // dark shadow
    text_main: Rgb565::new(0xFFFF),     // white
    text_muted: Rgb565::new(0x9492),    // gray
    accent_primary: Rgb565::new(0x04F9), // neon blue
    accent_warn: Rgb565::new(0xE46C),   // soft orange
    accent_alert: Rgb565::new(0xF800),  // red
    border: Rgb565::new(0x4A69),        // subtle border
    header_bg: Rgb565::new(0x1082),     // same as bg
};

impl Default for ThemePalette {
    fn default() -> Self {
        SLATE_THEME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_slate() {
        assert_eq!(ThemePalette::default(), SLATE_THEME);
    }
}
