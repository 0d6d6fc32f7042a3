//! Shared drawing helpers

use core_types::{Rect, Rgb565};
use hal::{DisplayPanel, TextAnchor};
use themes::ThemePalette;

/// Large page title with an accent underline and an optional back chevron.
pub(crate) fn draw_header(
    display: &mut dyn DisplayPanel,
    theme: &ThemePalette,
    title: &str,
    show_back: bool,
) {
    display.fill_screen(theme.bg);
    display.draw_text(
        title,
        if show_back { 30 } else { 15 },
        30,
        TextAnchor::MiddleLeft,
        theme.text_main,
        Some(theme.bg),
    );
    display.draw_line(15, 50, 60, 50, theme.accent_primary);
    if show_back {
        display.draw_text("<", 10, 30, TextAnchor::MiddleLeft, theme.text_main, Some(theme.bg));
    }
}

/// Raised button with a drop shadow.
pub(crate) fn draw_button(
    display: &mut dyn DisplayPanel,
    theme: &ThemePalette,
    rect: Rect,
    label: &str,
    bg: Rgb565,
    text: Rgb565,
) {
    display.fill_round_rect(Rect::new(rect.x, rect.y + 4, rect.w, rect.h), 8, theme.panel_shadow);
    display.fill_round_rect(rect, 8, bg);
    display.draw_text(
        label,
        rect.x + rect.w / 2,
        rect.y + rect.h / 2,
        TextAnchor::MiddleCenter,
        text,
        Some(bg),
    );
}

/// Dashboard tile with a status strip, status text and bottom label.
pub(crate) fn draw_tile(
    display: &mut dyn DisplayPanel,
    theme: &ThemePalette,
    index: i32,
    label: &str,
    status: &str,
    accent: Rgb565,
) {
    let margin = 10;
    let col = index % 2;
    let row = index / 2;
    let w = (display.width() - margin * 3) / 2;
    let h = 90;
    let x = margin + col * (w + margin);
    let y = 60 + row * (h + margin);

    display.fill_round_rect(Rect::new(x, y + 4, w, h), 8, theme.panel_shadow);
    display.fill_round_rect(Rect::new(x, y, w, h), 8, theme.panel_bg);
    display.fill_round_rect(Rect::new(x + 10, y + 10, 30, 6), 3, accent);
    display.draw_text(
        label,
        x + 10,
        y + h - 10,
        TextAnchor::BottomLeft,
        theme.text_main,
        Some(theme.panel_bg),
    );
    display.draw_text(
        status,
        x + 10,
        y + 25,
        TextAnchor::TopLeft,
        theme.text_muted,
        Some(theme.panel_bg),
    );
}

/// Ascending signal bars, `lit` out of `total`.
pub(crate) fn draw_signal_bars(
    display: &mut dyn DisplayPanel,
    theme: &ThemePalette,
    x: i32,
    bottom: i32,
    total: i32,
    lit: i32,
    lit_color: Rgb565,
) {
    for i in 0..total {
        let h = 8 + i * 6;
        let color = if i < lit { lit_color } else { theme.panel_shadow };
        display.fill_rect(Rect::new(x + i * 12, bottom - h, 8, h), color);
    }
}
