//! Display colors attached to shapes and shape groups.
//!
//! Colors play no part in shape checking; they only travel with the catalog
//! so that viewers can paint glyphs consistently.

use std::fmt;

use serde::{Serialize, Serializer};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_u32)
    }
}

// ── Named colors ────────────────────────────────────────────────────
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const SCORE_PHYSICALS: Color = Color::from_u32(0x9999ff); // text-like notes (metronome)
pub const SCORE_FRAME: Color = Color::from_u32(0xcccccc); // connectors
pub const SCORE_LYRICS: Color = Color::from_u32(0x4a4a9a);
pub const SHAPE_UNKNOWN: Color = Color::from_u32(0xff0000); // noise, clutter

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
