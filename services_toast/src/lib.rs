//! # Toast Overlay
//!
//! Transient, timer-bounded messages drawn above whatever the foreground
//! application drew.
//!
//! ## Philosophy
//!
//! - **One instance**: constructed at boot, passed by reference; no global
//! - **Edge-triggered drawing**: a toast paints when shown and never again
//!   until something changes — redraw cost must not recur every tick
//! - **The kernel restores what a toast hid**: on the visible→hidden edge
//!   the run loop delivers exactly one forced redraw to the foreground app
//!
//! The state machine has two states, hidden and visible. `show` always
//! enters visible; `update` leaves it once the duration elapses. The
//! overlay is either fully shown or fully hidden — no partial position
//! survives between ticks.

use core_types::{Rect, Rgb565};
use hal::{DisplayPanel, TextAnchor};
use themes::ThemePalette;

/// Visual class of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Info,
    Success,
    Warning,
    Error,
}

/// The process-wide transient notification overlay.
#[derive(Debug)]
pub struct ToastOverlay {
    message: String,
    style: ToastStyle,
    visible: bool,
    start_ms: u64,
    duration_ms: u64,
    changed: bool,
    last_visible: bool,
}

const TOAST_HEIGHT: i32 = 40;
const TOAST_PADDING: i32 = 30;
const TOAST_BOTTOM_MARGIN: i32 = 60;

impl ToastOverlay {
    /// Creates the overlay in its hidden state
    pub fn new() -> Self {
        Self {
            message: String::new(),
            style: ToastStyle::Info,
            visible: false,
            start_ms: 0,
            duration_ms: 0,
            changed: false,
            last_visible: false,
        }
    }

    /// Shows `message` for `duration_ms`, restarting any visible toast
    pub fn show(&mut self, message: &str, style: ToastStyle, duration_ms: u64, now_ms: u64) {
        self.message = message.to_string();
        self.style = style;
        self.duration_ms = duration_ms;
        self.start_ms = now_ms;
        self.visible = true;
        self.changed = true;
    }

    /// Advances the timer; returns true when a paint is due this tick
    pub fn update(&mut self, now_ms: u64) -> bool {
        if self.visible && now_ms - self.start_ms > self.duration_ms {
            self.visible = false;
        }
        let paint = self.last_visible != self.visible || self.changed;
        self.changed = false;
        self.last_visible = self.visible;
        paint
    }

    /// True while the overlay occupies screen space
    pub fn is_active(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn style(&self) -> ToastStyle {
        self.style
    }

    /// Draws the toast bubble; a hidden overlay draws nothing
    pub fn paint(&self, display: &mut dyn DisplayPanel, theme: &ThemePalette) {
        if !self.visible {
            return;
        }

        let (text_color, bg_color) = self.colors(theme);

        let toast_w = display.text_width(&self.message) + TOAST_PADDING;
        let x = (display.width() - toast_w) / 2;
        let y = display.height() - TOAST_BOTTOM_MARGIN;
        let body = Rect::new(x, y, toast_w, TOAST_HEIGHT);
        let shadow = Rect::new(x + 2, y + 2, toast_w, TOAST_HEIGHT);

        display.fill_round_rect(shadow, 20, Rgb565::BLACK);
        display.fill_round_rect(body, 20, bg_color);
        display.draw_round_rect(body, 20, theme.text_muted);
        display.draw_text(
            &self.message,
            x + toast_w / 2,
            y + TOAST_HEIGHT / 2,
            TextAnchor::MiddleCenter,
            text_color,
            Some(bg_color),
        );
    }

    fn colors(&self, theme: &ThemePalette) -> (Rgb565, Rgb565) {
        match self.style {
            ToastStyle::Success => (theme.text_main, theme.accent_primary),
            ToastStyle::Error => (theme.text_main, theme.accent_alert),
            ToastStyle::Warning => (theme.bg, theme.accent_warn),
            ToastStyle::Info => (theme.text_main, theme.panel_shadow),
        }
    }
}

impl Default for ToastOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal::RecordingDisplay;
    use themes::SLATE_THEME;

    #[test]
    fn test_hidden_until_shown() {
        let mut toast = ToastOverlay::new();
        assert!(!toast.is_active());
        assert!(!toast.update(100));
    }

    #[test]
    fn test_show_then_expire() {
        let mut toast = ToastOverlay::new();
        toast.show("Hi", ToastStyle::Info, 2000, 0);

        assert!(toast.update(0));
        assert!(toast.is_active());

        assert!(!toast.update(1999));
        assert!(toast.is_active());

        // elapsed == duration is still inside the window
        assert!(!toast.update(2000));
        assert!(toast.is_active());

        assert!(toast.update(2001));
        assert!(!toast.is_active());

        // no further paints once hidden
        assert!(!toast.update(2002));
        assert!(!toast.update(9999));
    }

    #[test]
    fn test_reshow_restarts_timer() {
        let mut toast = ToastOverlay::new();
        toast.show("One", ToastStyle::Info, 1000, 0);
        toast.update(0);
        toast.show("Two", ToastStyle::Success, 1000, 900);

        assert!(toast.update(900));
        assert!(!toast.update(1500));
        assert!(toast.is_active());
        assert!(toast.update(1901));
        assert!(!toast.is_active());
        assert_eq!(toast.message(), "Two");
    }

    #[test]
    fn test_paint_draws_only_while_visible() {
        let mut toast = ToastOverlay::new();
        let mut display = RecordingDisplay::new();

        toast.paint(&mut display, &SLATE_THEME);
        assert!(display.ops().is_empty());

        toast.show("Saved", ToastStyle::Success, 1000, 0);
        toast.update(0);
        toast.paint(&mut display, &SLATE_THEME);
        assert!(display.drew_text("Saved"));
    }
}
