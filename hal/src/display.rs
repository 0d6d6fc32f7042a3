//! Display panel abstraction
//!
//! Raw drawing primitives only: rectangles, lines, circles and anchored
//! text. No widget toolkit, no layout — applications compose their own
//! screens from these calls, and the panel decides how glyphs are realized.

use core_types::{Rect, Rgb565};

/// Reference corner/edge for text placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
}

/// A pixel-addressed display panel.
pub trait DisplayPanel {
    /// Panel width in pixels
    fn width(&self) -> i32;

    /// Panel height in pixels
    fn height(&self) -> i32;

    fn fill_screen(&mut self, color: Rgb565);

    fn fill_rect(&mut self, rect: Rect, color: Rgb565);

    fn draw_rect(&mut self, rect: Rect, color: Rgb565);

    fn fill_round_rect(&mut self, rect: Rect, radius: i32, color: Rgb565);

    fn draw_round_rect(&mut self, rect: Rect, radius: i32, color: Rgb565);

    fn draw_hline(&mut self, x: i32, y: i32, w: i32, color: Rgb565);

    fn draw_vline(&mut self, x: i32, y: i32, h: i32, color: Rgb565);

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565);

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb565);

    /// Draws a text run anchored at (x, y).
    ///
    /// `bg` of `None` leaves the pixels behind the glyphs untouched.
    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        anchor: TextAnchor,
        color: Rgb565,
        bg: Option<Rgb565>,
    );

    /// Width in pixels the panel would use for `text`
    fn text_width(&self, text: &str) -> i32;
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    FillScreen(Rgb565),
    FillRect(Rect, Rgb565),
    DrawRect(Rect, Rgb565),
    FillRoundRect(Rect, Rgb565),
    DrawRoundRect(Rect, Rgb565),
    HLine { x: i32, y: i32, w: i32 },
    VLine { x: i32, y: i32, h: i32 },
    Line { x0: i32, y0: i32, x1: i32, y1: i32 },
    Circle { cx: i32, cy: i32, r: i32 },
    Text { text: String, x: i32, y: i32 },
}

/// Display that records every call instead of lighting pixels.
///
/// Tests assert on the recorded call stream; the host runtime uses it to
/// stay headless.
#[derive(Debug)]
pub struct RecordingDisplay {
    width: i32,
    height: i32,
    ops: Vec<DrawOp>,
}

/// Glyph advance used by [`RecordingDisplay::text_width`].
const GLYPH_ADVANCE: i32 = 8;

impl RecordingDisplay {
    /// Portrait 240x320 panel, the device's native geometry
    pub fn new() -> Self {
        Self::with_size(240, 320)
    }

    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// Recorded call stream, oldest first
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forgets everything recorded so far
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Returns true if any recorded text run contains `needle`
    pub fn drew_text(&self, needle: &str) -> bool {
        self.ops.iter().any(|op| match op {
            DrawOp::Text { text, .. } => text.contains(needle),
            _ => false,
        })
    }
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPanel for RecordingDisplay {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_screen(&mut self, color: Rgb565) {
        self.ops.push(DrawOp::FillScreen(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb565) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Rgb565) {
        self.ops.push(DrawOp::DrawRect(rect, color));
    }

    fn fill_round_rect(&mut self, rect: Rect, _radius: i32, color: Rgb565) {
        self.ops.push(DrawOp::FillRoundRect(rect, color));
    }

    fn draw_round_rect(&mut self, rect: Rect, _radius: i32, color: Rgb565) {
        self.ops.push(DrawOp::DrawRoundRect(rect, color));
    }

    fn draw_hline(&mut self, x: i32, y: i32, w: i32, _color: Rgb565) {
        self.ops.push(DrawOp::HLine { x, y, w });
    }

    fn draw_vline(&mut self, x: i32, y: i32, h: i32, _color: Rgb565) {
        self.ops.push(DrawOp::VLine { x, y, h });
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, _color: Rgb565) {
        self.ops.push(DrawOp::Line { x0, y0, x1, y1 });
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, _color: Rgb565) {
        self.ops.push(DrawOp::Circle { cx, cy, r: radius });
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        _anchor: TextAnchor,
        _color: Rgb565,
        _bg: Option<Rgb565>,
    ) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn text_width(&self, text: &str) -> i32 {
        GLYPH_ADVANCE * text.chars().count() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut display = RecordingDisplay::new();
        display.fill_screen(Rgb565::BLACK);
        display.draw_text("hello", 0, 0, TextAnchor::TopLeft, Rgb565::WHITE, None);

        assert_eq!(display.ops().len(), 2);
        assert!(matches!(display.ops()[0], DrawOp::FillScreen(_)));
        assert!(display.drew_text("hell"));
        assert!(!display.drew_text("goodbye"));
    }

    #[test]
    fn test_text_width_scales_with_chars() {
        let display = RecordingDisplay::new();
        assert_eq!(display.text_width(""), 0);
        assert_eq!(display.text_width("abcd"), 4 * GLYPH_ADVANCE);
    }
}
