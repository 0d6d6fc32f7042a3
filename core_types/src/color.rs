//! Display color representation

use serde::{Deserialize, Serialize};

/// A 16-bit RGB565 display color.
///
/// Serializes as its raw value, which is also the persisted form in
/// shortcut records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    /// Creates a color from its raw RGB565 value
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw RGB565 value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Packs 8-bit channels into RGB565
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }
}
